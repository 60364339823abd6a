use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::services::transcode::TranscodeError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `PAYLOAD_TOO_LARGE`, `UNSUPPORTED_FORMAT`, `NOT_FOUND`,
    /// `STORAGE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Age must be non-negative")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Upload exceeds the configured size ceiling. Detected before any
    /// side effect.
    PayloadTooLarge {
        actual: u64,
        limit: u64,
    },
    /// Uploaded bytes could not be decoded as a raster image.
    UnsupportedFormat,
    /// Metadata references a file the blob store cannot serve. Surfaced as
    /// its own code: masking this as NOT_FOUND would hide an integrity bug.
    StorageUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::PayloadTooLarge { actual, limit } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: format!("Upload of {actual} bytes exceeds the {limit} byte limit"),
                },
            ),
            AppError::UnsupportedFormat => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNSUPPORTED_FORMAT",
                    message: "Uploaded bytes are not a decodable image".into(),
                },
            ),
            AppError::StorageUnavailable(detail) => {
                tracing::error!("Storage drift: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "STORAGE_UNAVAILABLE",
                        message: "Stored file is missing or unreadable".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Storage failures during retrieval mean the metadata and the file area
/// have drifted apart; only the size ceiling maps back to a client error.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SizeLimitExceeded { actual, limit } => {
                AppError::PayloadTooLarge { actual, limit }
            }
            StorageError::NotFound(path) => {
                AppError::StorageUnavailable(format!("blob missing at {path}"))
            }
            StorageError::Io(e) => AppError::StorageUnavailable(e.to_string()),
            StorageError::InvalidPath(msg) => AppError::Internal(msg),
        }
    }
}

impl From<TranscodeError> for AppError {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::UnsupportedFormat => AppError::UnsupportedFormat,
            TranscodeError::Encode(e) => AppError::Internal(e.to_string()),
        }
    }
}
