use axum::{Router, routing::get};

use super::controller::{
    create_teacher, delete_teacher, get_teacher_by_id, get_teachers, replace_teacher,
    update_teacher,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_teachers).post(create_teacher))
        .route(
            "/{id}",
            get(get_teacher_by_id)
                .put(replace_teacher)
                .patch(update_teacher)
                .delete(delete_teacher),
        )
}
