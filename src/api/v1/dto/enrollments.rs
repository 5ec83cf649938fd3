/*
 * Responsibility
 * - Course enrollment (registration) の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::rules::{require, require_opt};
use crate::repos::enrollment_repo::{EnrollmentPatch, EnrollmentRow, NewEnrollment};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub student_id: String,
    pub course_name: String,
    pub course_id: String,
    pub semester: String,
    // defaults to the time of the request
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl CreateEnrollmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.student_id, "studentId is required")?;
        require(&self.course_name, "courseName is required")?;
        require(&self.course_id, "courseId is required")?;
        require(&self.semester, "semester is required")?;

        Ok(())
    }

    pub fn into_new(self, now: DateTime<Utc>) -> NewEnrollment {
        NewEnrollment {
            student_id: self.student_id,
            course_name: self.course_name,
            course_id: self.course_id,
            semester: self.semester,
            enrolled_at: self.enrolled_at.unwrap_or(now),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    pub student_id: Option<String>,
    pub course_name: Option<String>,
    pub course_id: Option<String>,
    pub semester: Option<String>,
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl UpdateEnrollmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.student_id.is_none()
            && self.course_name.is_none()
            && self.course_id.is_none()
            && self.semester.is_none()
            && self.enrolled_at.is_none()
        {
            return Err("at least one field is required");
        }
        require_opt(self.student_id.as_deref(), "studentId cannot be empty")?;
        require_opt(self.course_name.as_deref(), "courseName cannot be empty")?;
        require_opt(self.course_id.as_deref(), "courseId cannot be empty")?;
        require_opt(self.semester.as_deref(), "semester cannot be empty")?;

        Ok(())
    }

    pub fn into_patch(self) -> EnrollmentPatch {
        EnrollmentPatch {
            student_id: self.student_id,
            course_name: self.course_name,
            course_id: self.course_id,
            semester: self.semester,
            enrolled_at: self.enrolled_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: String,
    pub student_id: String,
    pub course_name: String,
    pub course_id: String,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for EnrollmentResponse {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            course_name: row.course_name,
            course_id: row.course_id,
            semester: row.semester,
            enrolled_at: row.enrolled_at,
        }
    }
}
