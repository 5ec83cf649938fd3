//! Route-level role / ownership authorization.
//!
//! Runs after `access` has put the verified [`Identity`] into request extensions.
//! The decision itself lives in [`AccessPolicy::decide`]; this module only gathers its inputs
//! (identity + `{id}` path parameter) and turns a denial into a typed 403.
//!
//! ```ignore
//! Router::new().route(
//!     "/students/{id}",
//!     authorize(get(get_student), AccessPolicy::new([Role::Admin])?.allow_same_user()),
//! )
//! ```
//!
//! [`Identity`]: crate::api::v1::extractors::Identity

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State, rejection::PathRejection},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::v1::extractors::IdentityExtractor;
use crate::error::AppError;
use crate::services::auth::{AccessPolicy, Decision};

/// Path parameter naming the owner of the resource being accessed.
const RESOURCE_OWNER_PARAM: &str = "id";

/// Guard every method of `method_router` with `policy`.
///
/// The policy is validated by its constructor and frozen behind an `Arc` here, once per route.
pub fn authorize<S>(method_router: MethodRouter<S>, policy: AccessPolicy) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    method_router.route_layer(middleware::from_fn_with_state(
        Arc::new(policy),
        authorize_middleware,
    ))
}

async fn authorize_middleware(
    State(policy): State<Arc<AccessPolicy>>,
    IdentityExtractor(identity): IdentityExtractor,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let resource_owner_id = path
        .ok()
        .and_then(|Path(mut params)| params.remove(RESOURCE_OWNER_PARAM));

    match policy.decide(&identity, resource_owner_id.as_deref()) {
        Decision::Allow => {
            tracing::debug!(
                user_id = ?identity.user_id,
                role = ?identity.role,
                "authorization granted"
            );
            Ok(next.run(req).await)
        }
        Decision::Deny(denial) => {
            tracing::info!(
                user_id = ?identity.user_id,
                role = ?identity.role,
                code = denial.code(),
                same_user = policy.allows_same_user(),
                path = %req.uri().path(),
                "authorization denied"
            );
            Err(AppError::Forbidden(denial))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        routing::{delete, get},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::api::v1::extractors::Identity;
    use crate::services::auth::Role;

    async fn ok() -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/students",
                authorize(get(ok), AccessPolicy::new([Role::Admin]).unwrap()),
            )
            .route(
                "/students/{id}",
                authorize(
                    get(ok),
                    AccessPolicy::new([Role::Admin, Role::Instructor]).unwrap().allow_same_user(),
                )
                .merge(authorize(delete(ok), AccessPolicy::new([Role::Admin]).unwrap())),
            )
    }

    fn request(method: &str, uri: &str, identity: Option<Identity>) -> Request<Body> {
        let mut req = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }
        req
    }

    fn user(uid: &str, role: Option<&str>) -> Option<Identity> {
        Some(Identity::new(uid, role.map(str::to_string)))
    }

    async fn error_code(res: Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn allowed_role_reaches_handler() {
        let res = app()
            .oneshot(request("GET", "/students", user("u1", Some("admin"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_role_is_insufficient() {
        let res = app()
            .oneshot(request("GET", "/students", user("u1", Some("student"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(res).await, "INSUFFICIENT_ROLE");
    }

    #[tokio::test]
    async fn missing_role_is_role_not_found() {
        let res = app()
            .oneshot(request("GET", "/students", user("u1", None)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(res).await, "ROLE_NOT_FOUND");
    }

    #[tokio::test]
    async fn owner_without_role_reads_own_record() {
        let res = app()
            .oneshot(request("GET", "/students/u1", user("u1", None)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn owner_cannot_read_someone_else() {
        let res = app()
            .oneshot(request("GET", "/students/u2", user("u1", Some("student"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(res).await, "INSUFFICIENT_ROLE");
    }

    #[tokio::test]
    async fn policies_are_per_method() {
        // same-user bypass is only granted on GET
        let res = app()
            .oneshot(request("DELETE", "/students/u1", user("u1", Some("student"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app()
            .oneshot(request("DELETE", "/students/u1", user("root", Some("admin"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let res = app()
            .oneshot(request("GET", "/students", None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
