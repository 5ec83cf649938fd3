/*
 * Responsibility
 * - v1 の URL 構造と route ごとの認可 policy を定義
 * - /students, /courses, /registrations
 * - 認証 (Bearer → Identity) は app 側で nest 全体にかける。ここでは method ごとに authorize()
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::v1::handlers::{
    courses::{create_course, delete_course, get_course, list_courses, update_course},
    enrollments::{
        create_enrollment, delete_enrollment, get_enrollment, list_enrollments, update_enrollment,
    },
    fallback::method_not_allowed,
    students::{create_student, delete_student, get_student, list_students, update_student},
};
use crate::middleware::auth::authorize;
use crate::services::auth::{AccessPolicy, PolicyError, Role};
use crate::state::AppState;

/// Build the v1 router. Fails at startup if any route policy is invalid.
pub fn routes() -> Result<Router<AppState>, PolicyError> {
    let router = Router::new()
        .merge(student_routes()?)
        .merge(course_routes()?)
        .merge(enrollment_routes()?)
        .method_not_allowed_fallback(method_not_allowed);

    Ok(router)
}

fn student_routes() -> Result<Router<AppState>, PolicyError> {
    let staff = || AccessPolicy::new([Role::Admin, Role::Instructor]);
    let admin = || AccessPolicy::new([Role::Admin]);

    Ok(Router::new()
        .route(
            "/students",
            authorize(get(list_students), staff()?).merge(authorize(post(create_student), admin()?)),
        )
        .route(
            "/students/{id}",
            authorize(get(get_student), staff()?.allow_same_user())
                .merge(authorize(put(update_student), admin()?.allow_same_user()))
                .merge(authorize(delete(delete_student), admin()?)),
        ))
}

fn course_routes() -> Result<Router<AppState>, PolicyError> {
    let readers = || AccessPolicy::new([Role::Admin, Role::Instructor, Role::Student]);
    let editors = || AccessPolicy::new([Role::Admin, Role::Instructor]);

    Ok(Router::new()
        .route(
            "/courses",
            authorize(get(list_courses), readers()?).merge(authorize(post(create_course), editors()?)),
        )
        .route(
            "/courses/{id}",
            authorize(get(get_course), readers()?).merge(authorize(
                put(update_course).delete(delete_course),
                editors()?,
            )),
        ))
}

fn enrollment_routes() -> Result<Router<AppState>, PolicyError> {
    let policy = || AccessPolicy::new([Role::Admin, Role::Student]);

    Ok(Router::new()
        .route(
            "/registrations",
            authorize(get(list_enrollments).post(create_enrollment), policy()?),
        )
        .route(
            "/registrations/{id}",
            authorize(
                get(get_enrollment)
                    .put(update_enrollment)
                    .delete(delete_enrollment),
                policy()?,
            ),
        ))
}
