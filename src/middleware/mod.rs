/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (認証), auth::authorize (認可), cors, http
 */
pub mod auth;
pub mod cors;
pub mod http;
