/*
 * Responsibility
 * - Students の request/response DTO
 * - `id` を指定すると document id = identity provider の uid になる (本人アクセスの前提)
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::rules::{is_email, require, require_opt};
use crate::repos::student_repo::{NewStudent, StudentPatch, StudentRow};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub id: Option<String>,
    pub student_id: i64,
    pub full_name: String,
    pub email: String,
    pub program: String,
    pub program_year: u32,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(id) = &self.id
            && (id.trim().is_empty() || id.contains('/'))
        {
            return Err("id must be a non-empty uid without '/'");
        }
        if self.student_id < 0 {
            return Err("studentId must be >= 0");
        }
        require(&self.full_name, "fullName is required")?;
        if !is_email(&self.email) {
            return Err("email must be a valid email address");
        }
        require(&self.program, "program is required")?;

        Ok(())
    }

    pub fn into_parts(self) -> (Option<String>, NewStudent) {
        (
            self.id,
            NewStudent {
                student_id: self.student_id,
                full_name: self.full_name,
                email: self.email,
                program: self.program,
                program_year: self.program_year,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub student_id: Option<i64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub program: Option<String>,
    pub program_year: Option<u32>,
}

impl UpdateStudentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.student_id.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.program.is_none()
            && self.program_year.is_none()
        {
            return Err("at least one field is required");
        }
        if let Some(id) = self.student_id
            && id < 0
        {
            return Err("studentId must be >= 0");
        }
        require_opt(self.full_name.as_deref(), "fullName cannot be empty")?;
        if let Some(email) = &self.email
            && !is_email(email)
        {
            return Err("email must be a valid email address");
        }
        require_opt(self.program.as_deref(), "program cannot be empty")?;

        Ok(())
    }

    pub fn into_patch(self) -> StudentPatch {
        StudentPatch {
            student_id: self.student_id,
            full_name: self.full_name,
            email: self.email,
            program: self.program,
            program_year: self.program_year,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub student_id: i64,
    pub full_name: String,
    pub email: String,
    pub program: String,
    pub program_year: u32,
}

impl From<StudentRow> for StudentResponse {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            full_name: row.full_name,
            email: row.email,
            program: row.program,
            program_year: row.program_year,
        }
    }
}
