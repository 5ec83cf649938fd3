/*
 * Responsibility
 * - 未定義の path / method を他のエラーと同じ JSON envelope で返す
 */
use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::not_found("route")
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
