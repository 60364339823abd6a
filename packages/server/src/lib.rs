pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Records API",
        version = "1.0.0",
        description = "API for managing students, faculties and student avatars"
    ),
    paths(
        handlers::student::create_student,
        handlers::student::list_students,
        handlers::student::get_student,
        handlers::student::update_student,
        handlers::student::delete_student,
        handlers::student::students_by_age,
        handlers::student::students_by_age_range,
        handlers::student::faculty_of_student,
        handlers::student::count_students,
        handlers::student::average_student_age,
        handlers::student::last_five_students,
        handlers::student::student_names_by_letter,
        handlers::faculty::create_faculty,
        handlers::faculty::list_faculties,
        handlers::faculty::get_faculty,
        handlers::faculty::update_faculty,
        handlers::faculty::delete_faculty,
        handlers::faculty::filter_faculties,
        handlers::faculty::students_of_faculty,
        handlers::faculty::longest_faculty_name,
        handlers::avatar::upload_avatar,
        handlers::avatar::get_avatar_preview,
        handlers::avatar::download_avatar,
        handlers::avatar::list_avatars,
    ),
    tags(
        (name = "Students", description = "Student record CRUD and queries"),
        (name = "Faculties", description = "Faculty CRUD and queries"),
        (name = "Avatars", description = "Avatar upload, preview and download"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = state.config.server.cors.layer();

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
