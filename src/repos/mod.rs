/*
 * Responsibility
 * - collection ごとの CRUD (students / courses / courseEnrollment)
 * - Document (JSON) ↔ 型付き Row の変換
 */
pub mod course_repo;
pub mod document;
pub mod enrollment_repo;
pub mod error;
pub mod student_repo;
