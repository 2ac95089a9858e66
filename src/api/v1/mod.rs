/*
 * Responsibility
 * - v1 の公開ポイント (public_routes() / protected_routes() の re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{protected_routes, public_routes};
