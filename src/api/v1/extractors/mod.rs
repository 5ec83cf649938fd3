/*
 * Responsibility
 * - handler / middleware 共通の extractor
 */
pub mod identity;

pub use identity::{Identity, IdentityExtractor};
