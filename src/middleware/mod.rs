/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (access_token → X-User-Id / X-Client), http (request-id / trace / limit)
 */
pub mod auth;
pub mod http;
