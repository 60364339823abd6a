use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::faculty;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateFacultyRequest {
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "scarlet")]
    pub color: String,
}

/// Full-replace edit.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateFacultyRequest {
    pub name: String,
    pub color: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FacultyResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "scarlet")]
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<faculty::Model> for FacultyResponse {
    fn from(model: faculty::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
        }
    }
}

/// Exact-match filter; when both fields are given a faculty must match
/// both.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct FacultyFilterQuery {
    pub color: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LongestNameResponse {
    /// Longest faculty name; empty string when no faculties exist.
    #[schema(example = "Hufflepuff")]
    pub name: String,
}
