use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::student;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Hermione Granger")]
    pub name: String,
    #[schema(example = 12)]
    pub age: i32,
    /// Optional faculty membership.
    pub faculty_id: Option<i32>,
}

/// Full-replace edit: every field is set to exactly what is supplied.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hermione Granger")]
    pub name: String,
    #[schema(example = 12)]
    pub age: i32,
    pub faculty_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
            faculty_id: model.faculty_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct AgeRangeQuery {
    /// Lower bound, inclusive. Must be >= 0.
    pub min_age: i32,
    /// Upper bound, inclusive. Must be >= min_age.
    pub max_age: i32,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct NamesByLetterQuery {
    /// Initial letter to filter on. Defaults to "A".
    pub letter: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentCountResponse {
    #[schema(example = 42)]
    pub count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AverageAgeResponse {
    /// Arithmetic mean age; 0.0 when there are no students.
    #[schema(example = 14.5)]
    pub average_age: f64,
}

/// Validate the shared name/age payload of create and edit requests.
pub fn validate_student_fields(name: &str, age: i32) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".into()));
    }
    if age < 0 {
        return Err(AppError::Validation("Age must be non-negative".into()));
    }
    Ok(())
}
