use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::avatar;
use crate::models::shared::Pagination;

/// Metadata for one avatar, carrying the preview bytes but never the full
/// file (that one is streamed from the blob store instead).
#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 7)]
    pub student_id: i32,
    /// Byte size of the original upload.
    #[schema(example = 204800)]
    pub file_size: i64,
    /// Detected MIME type of the original upload.
    #[schema(example = "image/png")]
    pub media_type: String,
    /// Re-encoded preview bytes (JPEG, bounded dimensions).
    pub preview: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<avatar::Model> for AvatarResponse {
    fn from(model: avatar::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            file_size: model.file_size,
            media_type: model.media_type,
            preview: model.preview,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarListResponse {
    pub avatars: Vec<AvatarResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct AvatarListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Items per page (clamped to 1..=100).
    pub per_page: Option<u64>,
}
