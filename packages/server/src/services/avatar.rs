use std::sync::Arc;

use chrono::Utc;
use common::storage::{BlobStore, BoxReader};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::warn;

use crate::entity::{avatar, student};
use crate::error::AppError;
use crate::services::transcode;

/// A full-resolution avatar opened for streaming, plus what the transport
/// layer needs to frame the response.
pub struct AvatarStream {
    pub reader: BoxReader,
    pub media_type: String,
    pub file_size: i64,
}

/// Orchestrates avatar ingestion and dual-mode retrieval.
///
/// Uploads are persisted twice: the original bytes go to the blob store at
/// a path derived from the student id, and a compact preview goes into the
/// metadata record. Retrieval picks one side or the other: the record for
/// listings, the file for full-resolution downloads.
#[derive(Clone)]
pub struct AvatarService {
    db: DatabaseConnection,
    store: Arc<dyn BlobStore>,
    max_upload_size: u64,
}

/// Deterministic blob path for a student's avatar. Extension-less so that
/// re-uploads in a different format still overwrite the same blob.
fn blob_path(student_id: i32) -> String {
    format!("student-{student_id}")
}

impl AvatarService {
    pub fn new(db: DatabaseConnection, store: Arc<dyn BlobStore>, max_upload_size: u64) -> Self {
        Self {
            db,
            store,
            max_upload_size,
        }
    }

    /// Ingest an upload for a student: size gate, transcode, write the
    /// original to the blob store, upsert the metadata record.
    ///
    /// Validation happens before any mutation. The blob write publishes
    /// atomically, so a concurrent download sees either the previous avatar
    /// or the new one. If the metadata upsert fails and no record existed
    /// before, the freshly written blob is removed again so it cannot
    /// linger unreferenced.
    pub async fn upload(&self, student_id: i32, bytes: &[u8]) -> Result<avatar::Model, AppError> {
        let size = bytes.len() as u64;
        if size > self.max_upload_size {
            return Err(AppError::PayloadTooLarge {
                actual: size,
                limit: self.max_upload_size,
            });
        }

        student::Entity::find_by_id(student_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".into()))?;

        let transcoded = transcode::transcode(bytes)?;

        let prior = self.find_record(student_id).await?;

        let path = blob_path(student_id);
        self.store.put(&path, bytes).await?;

        let now = Utc::now();
        let record = avatar::ActiveModel {
            student_id: Set(student_id),
            file_path: Set(path.clone()),
            file_size: Set(size as i64),
            media_type: Set(transcoded.media_type.to_string()),
            preview: Set(transcoded.preview),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let upsert = avatar::Entity::insert(record)
            .on_conflict(
                OnConflict::column(avatar::Column::StudentId)
                    .update_columns([
                        avatar::Column::FilePath,
                        avatar::Column::FileSize,
                        avatar::Column::MediaType,
                        avatar::Column::Preview,
                        avatar::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        if let Err(e) = upsert {
            if prior.is_none() {
                // The blob is referenced by nothing; best-effort rollback.
                self.discard_blob(&path).await;
            }
            return Err(e.into());
        }

        self.find_record(student_id)
            .await?
            .ok_or_else(|| AppError::Internal("avatar missing after upsert".into()))
    }

    /// The compact preview straight from the metadata record.
    pub async fn fetch_preview(&self, student_id: i32) -> Result<(Vec<u8>, String), AppError> {
        let record = self.require_record(student_id).await?;
        Ok((record.preview, record.media_type))
    }

    /// A lazy reader over the full-resolution file in the blob store.
    ///
    /// A missing or unreadable file behind an existing record is
    /// metadata/storage drift and surfaces as `StorageUnavailable`.
    pub async fn fetch_full_stream(&self, student_id: i32) -> Result<AvatarStream, AppError> {
        let record = self.require_record(student_id).await?;
        let reader = self.store.get_stream(&record.file_path).await?;
        Ok(AvatarStream {
            reader,
            media_type: record.media_type,
            file_size: record.file_size,
        })
    }

    /// One page of metadata records, ordered by owning student id
    /// ascending. `page` is 1-based; page 0 is treated as the first page,
    /// and a page past the end is empty.
    pub async fn list_previews(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<avatar::Model>, u64), AppError> {
        let page = page.max(1);
        let select = avatar::Entity::find().order_by_asc(avatar::Column::StudentId);

        let total = select
            .clone()
            .paginate(&self.db, per_page)
            .num_items()
            .await?;

        let records = select
            .offset(Some((page - 1) * per_page))
            .limit(Some(per_page))
            .all(&self.db)
            .await?;

        Ok((records, total))
    }

    /// Best-effort blob removal; failures are logged, never propagated.
    pub async fn discard_blob(&self, path: &str) {
        if let Err(e) = self.store.delete(path).await {
            warn!("Failed to remove avatar blob {path}: {e}");
        }
    }

    async fn find_record(&self, student_id: i32) -> Result<Option<avatar::Model>, AppError> {
        Ok(avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?)
    }

    async fn require_record(&self, student_id: i32) -> Result<avatar::Model, AppError> {
        self.find_record(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Avatar not found".into()))
    }
}
