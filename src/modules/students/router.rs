use axum::{Router, routing::get};

use super::controller::{
    create_student, delete_student, get_student_by_id, get_students, replace_student,
    update_student,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route(
            "/{id}",
            get(get_student_by_id)
                .put(replace_student)
                .patch(update_student)
                .delete(delete_student),
        )
}
