/*
 * Responsibility
 * - /registrations 系 CRUD handler (course enrollment)
 * - 登録/更新/取消のあとに学生へメール通知 (失敗しても request は成功扱い)
 */
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    api::v1::dto::{
        enrollments::{CreateEnrollmentRequest, EnrollmentResponse, UpdateEnrollmentRequest},
        list::ListQuery,
        response::ApiResponse,
    },
    error::AppError,
    repos::{enrollment_repo, enrollment_repo::EnrollmentRow, student_repo},
    services::notify::templates,
    state::AppState,
};

const RESOURCE: &str = "enrollment";

/// Which enrollment e-mail to send.
#[derive(Debug, Clone, Copy)]
enum Notice {
    Enrolled,
    Updated,
    Dropped,
}

impl Notice {
    fn subject(self) -> &'static str {
        match self {
            Notice::Enrolled => templates::ENROLLED_SUBJECT,
            Notice::Updated => templates::UPDATED_SUBJECT,
            Notice::Dropped => templates::DROPPED_SUBJECT,
        }
    }

    fn body(self, full_name: &str, course_name: &str) -> String {
        match self {
            Notice::Enrolled => templates::enrolled(full_name, course_name),
            Notice::Updated => templates::updated(full_name, course_name),
            Notice::Dropped => templates::dropped(full_name, course_name),
        }
    }
}

// The write has already committed, so every failure here is logged and swallowed.
async fn notify_student(state: &AppState, enrollment: &EnrollmentRow, notice: Notice) {
    let student = match student_repo::get(state.store.as_ref(), &enrollment.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            tracing::warn!(
                student_id = %enrollment.student_id,
                enrollment_id = %enrollment.id,
                "no student record for enrollment, skipping notification"
            );
            return;
        }
        Err(err) => {
            tracing::error!(error = ?err, student_id = %enrollment.student_id, "student lookup failed");
            return;
        }
    };

    let html = notice.body(&student.full_name, &enrollment.course_name);
    if let Err(err) = state
        .notifier
        .send(&student.email, notice.subject(), &html)
        .await
    {
        tracing::error!(
            error = %err,
            notifier = state.notifier.backend_name(),
            enrollment_id = %enrollment.id,
            "failed to send enrollment notification"
        );
    }
}

pub async fn list_enrollments(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<EnrollmentResponse>>>), AppError> {
    let Query(query) = query?;
    let limit = query.limit().map_err(AppError::validation)?;

    let rows = enrollment_repo::list(state.store.as_ref(), limit).await?;
    let data = rows.into_iter().map(EnrollmentResponse::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            data,
            "All courses enrolled successfully retrieved.",
        )),
    ))
}

pub async fn create_enrollment(
    State(state): State<AppState>,
    payload: Result<Json<CreateEnrollmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let row = enrollment_repo::create(state.store.as_ref(), &req.into_new(Utc::now())).await?;
    notify_student(&state, &row, Notice::Enrolled).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            EnrollmentResponse::from(row),
            "Successfully enrolled in the course",
        )),
    ))
}

pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentResponse>>), AppError> {
    let row = enrollment_repo::get(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            EnrollmentResponse::from(row),
            "Course successfully retrieved.",
        )),
    ))
}

pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEnrollmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let row = enrollment_repo::update(state.store.as_ref(), &id, &req.into_patch())
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;
    notify_student(&state, &row, Notice::Updated).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            EnrollmentResponse::from(row),
            "Course updated successfully",
        )),
    ))
}

pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    let row = enrollment_repo::delete(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;
    notify_student(&state, &row, Notice::Dropped).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Course successfully dropped")),
    ))
}
