use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/students", student_routes())
        .nest("/faculties", faculty_routes())
        .route("/avatars", get(handlers::avatar::list_avatars))
}

fn student_routes() -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::student::list_students).post(handlers::student::create_student),
        )
        .route("/count", get(handlers::student::count_students))
        .route("/average-age", get(handlers::student::average_student_age))
        .route("/last-five", get(handlers::student::last_five_students))
        .route(
            "/names-by-letter",
            get(handlers::student::student_names_by_letter),
        )
        .route("/by-age/{age}", get(handlers::student::students_by_age))
        .route(
            "/by-age-range",
            get(handlers::student::students_by_age_range),
        )
        .route(
            "/{id}",
            get(handlers::student::get_student)
                .put(handlers::student::update_student)
                .delete(handlers::student::delete_student),
        )
        .route("/{id}/faculty", get(handlers::student::faculty_of_student));

    let avatar = Router::new()
        .route(
            "/{id}/avatar",
            post(handlers::avatar::upload_avatar).get(handlers::avatar::download_avatar),
        )
        .route(
            "/{id}/avatar/preview",
            get(handlers::avatar::get_avatar_preview),
        )
        .layer(handlers::avatar::avatar_upload_body_limit());

    crud.merge(avatar)
}

fn faculty_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::faculty::list_faculties).post(handlers::faculty::create_faculty),
        )
        .route("/filter", get(handlers::faculty::filter_faculties))
        .route(
            "/longest-name",
            get(handlers::faculty::longest_faculty_name),
        )
        .route(
            "/{id}",
            get(handlers::faculty::get_faculty)
                .put(handlers::faculty::update_faculty)
                .delete(handlers::faculty::delete_faculty),
        )
        .route(
            "/{id}/students",
            get(handlers::faculty::students_of_faculty),
        )
}
