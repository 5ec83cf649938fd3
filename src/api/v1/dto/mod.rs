/*
 * Responsibility
 * - v1 の request/response DTO
 * - 形式チェックは各 request の validate() に置く
 */
pub mod courses;
pub mod enrollments;
pub mod list;
pub mod response;
pub mod students;
mod rules;
