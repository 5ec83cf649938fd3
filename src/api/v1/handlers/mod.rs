pub mod courses;
pub mod enrollments;
pub mod fallback;
pub mod health;
pub mod students;
