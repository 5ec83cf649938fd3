/*
 * Responsibility
 * - /courses 系 CRUD handler
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
        courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest},
        list::ListQuery,
        response::ApiResponse,
    },
    error::AppError,
    repos::course_repo,
    state::AppState,
};

const RESOURCE: &str = "course";

pub async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CourseResponse>>>), AppError> {
    let Query(query) = query?;
    let limit = query.limit().map_err(AppError::validation)?;

    let rows = course_repo::list(state.store.as_ref(), limit).await?;
    let data = rows.into_iter().map(CourseResponse::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(data, "Courses successfully retrieved.")),
    ))
}

pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let row = course_repo::create(state.store.as_ref(), &req.into_new()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            CourseResponse::from(row),
            "Course created successfully",
        )),
    ))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponse>>), AppError> {
    let row = course_repo::get(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            CourseResponse::from(row),
            "Course successfully retrieved.",
        )),
    ))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let row = course_repo::update(state.store.as_ref(), &id, &req.into_patch())
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            CourseResponse::from(row),
            "Course updated successfully",
        )),
    ))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    course_repo::delete(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Course successfully deleted")),
    ))
}
