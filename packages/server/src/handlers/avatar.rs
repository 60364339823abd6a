use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::avatar::{AvatarListQuery, AvatarListResponse, AvatarResponse};
use crate::models::shared::Pagination;
use crate::state::AppState;

/// Transport-level ceiling, above the service's configured limit so that
/// oversized uploads still get the structured PAYLOAD_TOO_LARGE body.
pub fn avatar_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(8 * 1024 * 1024) // 8 MB
}

#[utoipa::path(
    post,
    path = "/api/v1/students/{id}/avatar",
    tag = "Avatars",
    operation_id = "uploadAvatar",
    summary = "Upload an avatar for a student",
    description = "The `avatar` multipart field carries the image. The original \
        is written to durable storage and a compact preview is stored in the \
        metadata record; re-uploading replaces the previous avatar.",
    params(("id" = i32, Path, description = "Student ID")),
    request_body(content_type = "multipart/form-data", description = "Image upload"),
    responses(
        (status = 201, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Oversized or undecodable upload (PAYLOAD_TOO_LARGE, UNSUPPORTED_FORMAT)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(student_id))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("avatar") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing 'avatar' field".into()))?;

    let record = state.avatars.upload(student_id, &bytes).await?;

    Ok((StatusCode::CREATED, Json(AvatarResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/avatar/preview",
    tag = "Avatars",
    operation_id = "getAvatarPreview",
    summary = "Fetch the stored preview of a student's avatar",
    description = "Serves the compact re-encoded bytes kept in the metadata \
        record. Fast and low-resolution; meant for listings.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Preview bytes"),
        (status = 404, description = "No avatar for this student (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(student_id))]
pub async fn get_avatar_preview(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let (preview, media_type) = state.avatars.fetch_preview(student_id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media_type)
        .header(header::CONTENT_LENGTH, preview.len().to_string())
        .body(Body::from(preview))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/avatar",
    tag = "Avatars",
    operation_id = "downloadAvatar",
    summary = "Stream a student's full-resolution avatar",
    description = "Opens the original file from durable storage and streams it \
        lazily; the file handle is released when the stream is dropped, \
        including on client abort.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar file content"),
        (status = 404, description = "No avatar for this student (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Recorded file missing or unreadable (STORAGE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(student_id))]
pub async fn download_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let stream = state.avatars.fetch_full_stream(student_id).await?;

    let body = Body::from_stream(ReaderStream::new(stream.reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, stream.media_type)
        .header(header::CONTENT_LENGTH, stream.file_size.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    get,
    path = "/api/v1/avatars",
    tag = "Avatars",
    operation_id = "listAvatars",
    summary = "List avatar metadata with previews, paginated",
    description = "Stable order by owning student id ascending; a page past \
        the end is empty, not an error.",
    params(AvatarListQuery),
    responses(
        (status = 200, description = "One page of avatar records", body = AvatarListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_avatars(
    State(state): State<AppState>,
    Query(query): Query<AvatarListQuery>,
) -> Result<Json<AvatarListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (records, total) = state.avatars.list_previews(page, per_page).await?;
    let total_pages = total.div_ceil(per_page);

    Ok(Json(AvatarListResponse {
        avatars: records.into_iter().map(Into::into).collect(),
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}
