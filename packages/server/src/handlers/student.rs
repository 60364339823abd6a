use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::instrument;

use crate::entity::{avatar, faculty, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::faculty::FacultyResponse;
use crate::models::student::*;
use crate::query;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Register a new student",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Referenced faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_student_fields(&payload.name, payload.age)?;
    if let Some(faculty_id) = payload.faculty_id {
        find_faculty(&state.db, faculty_id).await?;
    }

    let new_student = student::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        age: Set(payload.age),
        faculty_id: Set(payload.faculty_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_student.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List all students",
    responses(
        (status = 200, description = "All students in creation order", body = [StudentResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = all_students(&state).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student by ID",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = find_student(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Replace a student's name, age and faculty",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student or faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    validate_student_fields(&payload.name, payload.age)?;
    if let Some(faculty_id) = payload.faculty_id {
        find_faculty(&state.db, faculty_id).await?;
    }

    let existing = find_student(&state.db, id).await?;
    let mut active: student::ActiveModel = existing.into();

    active.name = Set(payload.name.trim().to_string());
    active.age = Set(payload.age);
    active.faculty_id = Set(payload.faculty_id);

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student",
    description = "Deletes the student and their avatar metadata; the avatar \
        file is removed from storage best-effort. The faculty is untouched.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_student(&txn, id).await?;

    let avatar_record = avatar::Entity::find()
        .filter(avatar::Column::StudentId.eq(id))
        .one(&txn)
        .await?;
    if let Some(ref record) = avatar_record {
        avatar::Entity::delete_by_id(record.id).exec(&txn).await?;
    }

    student::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    // Only after the metadata is gone; a failed removal leaves an
    // unreferenced blob, not a dangling record.
    if let Some(record) = avatar_record {
        state.avatars.discard_blob(&record.file_path).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/students/by-age/{age}",
    tag = "Students",
    operation_id = "studentsByAge",
    summary = "Students with an exact age",
    params(("age" = i32, Path, description = "Exact age, must be positive")),
    responses(
        (status = 200, description = "Matching students", body = [StudentResponse]),
        (status = 400, description = "Non-positive age (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(age))]
pub async fn students_by_age(
    State(state): State<AppState>,
    Path(age): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    if age <= 0 {
        return Err(AppError::Validation("Age must be positive".into()));
    }

    let students = all_students(&state).await?;
    let found = query::students_with_age(&students, age);
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/by-age-range",
    tag = "Students",
    operation_id = "studentsByAgeRange",
    summary = "Students within an inclusive age range",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Matching students", body = [StudentResponse]),
        (status = 400, description = "Invalid range (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, range))]
pub async fn students_by_age_range(
    State(state): State<AppState>,
    Query(range): Query<AgeRangeQuery>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    if range.min_age < 0 {
        return Err(AppError::Validation("min_age must be non-negative".into()));
    }
    if range.min_age > range.max_age {
        return Err(AppError::Validation(
            "min_age must not exceed max_age".into(),
        ));
    }

    let students = all_students(&state).await?;
    let found = query::students_in_age_range(&students, range.min_age, range.max_age);
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/faculty",
    tag = "Students",
    operation_id = "facultyOfStudent",
    summary = "Get the faculty a student belongs to",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "The student's faculty", body = FacultyResponse),
        (status = 404, description = "Student missing or without faculty (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn faculty_of_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let student = find_student(&state.db, id).await?;
    let faculty_id = student
        .faculty_id
        .ok_or_else(|| AppError::NotFound("Student has no faculty".into()))?;
    let faculty = find_faculty(&state.db, faculty_id).await?;
    Ok(Json(faculty.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/count",
    tag = "Students",
    operation_id = "countStudents",
    summary = "Total number of students",
    responses(
        (status = 200, description = "Student count", body = StudentCountResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn count_students(
    State(state): State<AppState>,
) -> Result<Json<StudentCountResponse>, AppError> {
    let count = student::Entity::find().count(&state.db).await?;
    Ok(Json(StudentCountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/average-age",
    tag = "Students",
    operation_id = "averageStudentAge",
    summary = "Arithmetic mean of student ages",
    responses(
        (status = 200, description = "Average age, 0.0 when empty", body = AverageAgeResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn average_student_age(
    State(state): State<AppState>,
) -> Result<Json<AverageAgeResponse>, AppError> {
    let students = all_students(&state).await?;
    Ok(Json(AverageAgeResponse {
        average_age: query::average_age(&students),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/last-five",
    tag = "Students",
    operation_id = "lastFiveStudents",
    summary = "The five most recently registered students, newest first",
    responses(
        (status = 200, description = "Up to five students", body = [StudentResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn last_five_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = all_students(&state).await?;
    let last = query::last_n(&students, 5);
    Ok(Json(last.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/names-by-letter",
    tag = "Students",
    operation_id = "studentNamesByLetter",
    summary = "Uppercased, sorted names starting with a letter",
    params(NamesByLetterQuery),
    responses(
        (status = 200, description = "Matching names", body = [String]),
        (status = 400, description = "Not a single ASCII letter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn student_names_by_letter(
    State(state): State<AppState>,
    Query(params): Query<NamesByLetterQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let letter = match params.letter.as_deref() {
        None => 'A',
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => c,
                _ => {
                    return Err(AppError::Validation(
                        "letter must be a single ASCII letter".into(),
                    ));
                }
            }
        }
    };

    let students = all_students(&state).await?;
    Ok(Json(query::names_starting_with(&students, letter)))
}

/// Snapshot of the whole student table in creation (insertion) order, the
/// order the pure query functions assume.
async fn all_students(state: &AppState) -> Result<Vec<student::Model>, AppError> {
    Ok(student::Entity::find()
        .order_by_asc(student::Column::Id)
        .all(&state.db)
        .await?)
}

pub(crate) async fn find_student<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))
}

pub(crate) async fn find_faculty<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<faculty::Model, AppError> {
    faculty::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Faculty not found".into()))
}
