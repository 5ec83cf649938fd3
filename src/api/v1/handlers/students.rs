/*
 * Responsibility
 * - /students 系 CRUD handler
 * - Path/Json/Query を extractor で受け、DTO validation → repo 呼び出し
 * - 認可は route 側 (authorize) で済んでいる前提
 */
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    api::v1::dto::{
        list::ListQuery,
        response::ApiResponse,
        students::{CreateStudentRequest, StudentResponse, UpdateStudentRequest},
    },
    error::AppError,
    repos::student_repo,
    state::AppState,
};

const RESOURCE: &str = "student";

pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<StudentResponse>>>), AppError> {
    let Query(query) = query?;
    let limit = query.limit().map_err(AppError::validation)?;

    let rows = student_repo::list(state.store.as_ref(), limit).await?;
    let data = rows.into_iter().map(StudentResponse::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(data, "Students successfully retrieved.")),
    ))
}

pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let (id, student) = req.into_parts();
    let row = student_repo::create(state.store.as_ref(), id.as_deref(), &student).await?;

    tracing::info!(student_id = %row.id, "student created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            StudentResponse::from(row),
            "Student created successfully",
        )),
    ))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), AppError> {
    let row = student_repo::get(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentResponse::from(row),
            "Student successfully retrieved.",
        )),
    ))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let row = student_repo::update(state.store.as_ref(), &id, &req.into_patch())
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentResponse::from(row),
            "Student updated successfully",
        )),
    ))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    student_repo::delete(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(student_id = %id, "student deleted");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Student successfully deleted")),
    ))
}
