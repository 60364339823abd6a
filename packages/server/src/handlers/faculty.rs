use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;

use crate::entity::{faculty, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::student::find_faculty;
use crate::models::faculty::*;
use crate::models::student::StudentResponse;
use crate::query;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/faculties",
    tag = "Faculties",
    operation_id = "createFaculty",
    summary = "Create a new faculty",
    request_body = CreateFacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateFacultyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_faculty = faculty::ActiveModel {
        name: Set(payload.name),
        color: Set(payload.color),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_faculty.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(FacultyResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties",
    tag = "Faculties",
    operation_id = "listFaculties",
    summary = "List all faculties",
    responses(
        (status = 200, description = "All faculties in creation order", body = [FacultyResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let faculties = all_faculties(&state).await?;
    Ok(Json(faculties.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    operation_id = "getFaculty",
    summary = "Get a faculty by ID",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty details", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let model = find_faculty(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    operation_id = "updateFaculty",
    summary = "Replace a faculty's name and color",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = UpdateFacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateFacultyRequest>,
) -> Result<Json<FacultyResponse>, AppError> {
    let existing = find_faculty(&state.db, id).await?;
    let mut active: faculty::ActiveModel = existing.into();

    active.name = Set(payload.name);
    active.color = Set(payload.color);

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    operation_id = "deleteFaculty",
    summary = "Delete a faculty",
    description = "Deletes the faculty; member students are kept and their \
        faculty reference is cleared.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 204, description = "Faculty deleted"),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    use sea_orm::TransactionTrait;

    let txn = state.db.begin().await?;

    find_faculty(&txn, id).await?;

    // Detach members first so the FK does not block the delete.
    student::Entity::update_many()
        .col_expr(student::Column::FacultyId, sea_orm::prelude::Expr::value(None::<i32>))
        .filter(student::Column::FacultyId.eq(id))
        .exec(&txn)
        .await?;

    faculty::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties/filter",
    tag = "Faculties",
    operation_id = "filterFaculties",
    summary = "Filter faculties by color and/or name",
    description = "Exact match. When both parameters are supplied a faculty \
        must match both; with neither, all faculties are returned.",
    params(FacultyFilterQuery),
    responses(
        (status = 200, description = "Matching faculties", body = [FacultyResponse]),
    ),
)]
#[instrument(skip(state, filter))]
pub async fn filter_faculties(
    State(state): State<AppState>,
    Query(filter): Query<FacultyFilterQuery>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let faculties = all_faculties(&state).await?;
    let found = query::filter_faculties(&faculties, filter.color.as_deref(), filter.name.as_deref());
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties/{id}/students",
    tag = "Faculties",
    operation_id = "studentsOfFaculty",
    summary = "List the students of a faculty",
    description = "Empty list when the faculty has no students or does not exist.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Member students", body = [StudentResponse]),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn students_of_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = student::Entity::find()
        .filter(student::Column::FacultyId.eq(id))
        .order_by_asc(student::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties/longest-name",
    tag = "Faculties",
    operation_id = "longestFacultyName",
    summary = "The longest faculty name",
    description = "Ties resolve to the first faculty created; an empty store \
        yields an empty string.",
    responses(
        (status = 200, description = "Longest name", body = LongestNameResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn longest_faculty_name(
    State(state): State<AppState>,
) -> Result<Json<LongestNameResponse>, AppError> {
    let faculties = all_faculties(&state).await?;
    Ok(Json(LongestNameResponse {
        name: query::longest_faculty_name(&faculties),
    }))
}

/// Snapshot of the faculty table in creation (insertion) order.
async fn all_faculties(state: &AppState) -> Result<Vec<faculty::Model>, AppError> {
    Ok(faculty::Entity::find()
        .order_by_asc(faculty::Column::Id)
        .all(&state.db)
        .await?)
}
