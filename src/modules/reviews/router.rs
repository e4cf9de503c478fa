use axum::{Router, routing::get};

use crate::modules::reviews::controller::{
    create_review, delete_review, get_review_by_id, get_reviews,
};
use crate::state::AppState;

/// Routes nested under `/ielts/teachers/{teacher_id}/reviews`.
///
/// Only GET, POST and DELETE are routed. PUT and PATCH on a review
/// respond with 405.
pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_reviews).post(create_review))
        .route("/{id}", get(get_review_by_id).delete(delete_review))
}
