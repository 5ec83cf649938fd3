/*!
 * Verified identity extractor
 *
 * Responsibility:
 * - 認証済みリクエストの identity (user_id / role) を handler と authorize middleware に提供する
 * - axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Identity
 * - IdentityExtractor
 */

mod core;
mod types;

pub use core::IdentityExtractor;
pub use types::Identity;
