use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Avatar metadata: the database-resident description of an uploaded image.
///
/// The full-resolution file lives in the blob store at `file_path`; the
/// record carries a compact re-encoded preview for fast listings. At most
/// one record exists per student (unique index on `student_id`, created in
/// `seed::ensure_indexes`); re-uploads replace the row via upsert.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avatar")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub student_id: i32,

    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    /// Location of the original upload in the blob store.
    pub file_path: String,

    /// Byte size of the original upload.
    pub file_size: i64,

    /// Detected MIME type of the original upload.
    pub media_type: String,

    /// Size-bounded re-encoded preview of the upload.
    pub preview: Vec<u8>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
