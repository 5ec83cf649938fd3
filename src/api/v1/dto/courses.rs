/*
 * Responsibility
 * - Courses の request/response DTO
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::rules::{require, require_opt};
use crate::repos::course_repo::{CoursePatch, CourseRow, DeliveryFormat, NewCourse};

fn check_credits(credits: u32) -> Result<(), &'static str> {
    if credits == 0 {
        return Err("credits must be greater than zero");
    }
    Ok(())
}

fn check_cost(cost: f64) -> Result<(), &'static str> {
    if !cost.is_finite() || cost < 0.0 {
        return Err("cost must be a non-negative number");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub course_name: String,
    pub course_id: String,
    pub credits: u32,
    pub instructor: String,
    pub room_number: Option<String>,
    pub delivery_format: DeliveryFormat,
    pub cost: f64,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.course_name, "courseName is required")?;
        require(&self.course_id, "courseId is required")?;
        check_credits(self.credits)?;
        require(&self.instructor, "instructor is required")?;
        require_opt(self.room_number.as_deref(), "roomNumber cannot be empty")?;
        check_cost(self.cost)?;

        Ok(())
    }

    pub fn into_new(self) -> NewCourse {
        NewCourse {
            course_name: self.course_name,
            course_id: self.course_id,
            credits: self.credits,
            instructor: self.instructor,
            room_number: self.room_number,
            delivery_format: self.delivery_format,
            cost: self.cost,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub course_id: Option<String>,
    pub credits: Option<u32>,
    pub instructor: Option<String>,
    pub room_number: Option<String>,
    pub delivery_format: Option<DeliveryFormat>,
    pub cost: Option<f64>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.course_name.is_none()
            && self.course_id.is_none()
            && self.credits.is_none()
            && self.instructor.is_none()
            && self.room_number.is_none()
            && self.delivery_format.is_none()
            && self.cost.is_none()
        {
            return Err("at least one field is required");
        }
        require_opt(self.course_name.as_deref(), "courseName cannot be empty")?;
        require_opt(self.course_id.as_deref(), "courseId cannot be empty")?;
        self.credits.map_or(Ok(()), check_credits)?;
        require_opt(self.instructor.as_deref(), "instructor cannot be empty")?;
        require_opt(self.room_number.as_deref(), "roomNumber cannot be empty")?;
        self.cost.map_or(Ok(()), check_cost)?;

        Ok(())
    }

    pub fn into_patch(self) -> CoursePatch {
        CoursePatch {
            course_name: self.course_name,
            course_id: self.course_id,
            credits: self.credits,
            instructor: self.instructor,
            room_number: self.room_number,
            delivery_format: self.delivery_format,
            cost: self.cost,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub course_name: String,
    pub course_id: String,
    pub credits: u32,
    pub instructor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub delivery_format: DeliveryFormat,
    pub cost: f64,
}

impl From<CourseRow> for CourseResponse {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            course_name: row.course_name,
            course_id: row.course_id,
            credits: row.credits,
            instructor: row.instructor,
            room_number: row.room_number,
            delivery_format: row.delivery_format,
            cost: row.cost,
        }
    }
}
