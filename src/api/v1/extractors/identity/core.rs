use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::Identity;

/// Handler / middleware で Identity を受け取るための extractor
/// access middleware が Identity を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・ミドルウェア未設定）
pub struct IdentityExtractor(pub Identity);

impl<S> FromRequestParts<S> for IdentityExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(identity) => Ok(IdentityExtractor(identity.clone())),
            None => {
                tracing::error!(path = %parts.uri.path(), "identity missing; access middleware not applied");
                Err(AppError::Unauthorized)
            }
        }
    }
}
