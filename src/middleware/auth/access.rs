//! access token (JWT) 検証 → Identity を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を受け取り、署名 + iss/aud/exp/sub を検証する
//! - 検証に失敗したら 401 で打ち切り、authorize middleware には到達させない
//! - 成功したら `Identity { user_id: sub, role }` を一度だけ extensions に格納する

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let identity: Identity = match state.auth.verify_identity(token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    // 後段 (authorize / handler) が上書きしないよう、ここで一度だけ入れる
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
