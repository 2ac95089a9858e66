/*!
 * Caller identity extractor
 *
 * Responsibility:
 * - access middleware が書いた X-User-Id / X-Client を handler に渡す
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 */

mod core;
mod types;

pub use types::Caller;
