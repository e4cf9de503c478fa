use axum::{Router, routing::get};

use super::controller::{
    create_curator, delete_curator, get_curator_by_id, get_curators, replace_curator,
    update_curator,
};
use crate::state::AppState;

pub fn init_curators_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_curators).post(create_curator))
        .route(
            "/{id}",
            get(get_curator_by_id)
                .put(replace_curator)
                .patch(update_curator)
                .delete(delete_curator),
        )
}
