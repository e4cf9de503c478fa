use axum::{Router, routing::get};

use super::controller::{
    create_group_session, delete_group_session, get_group_session_by_id, get_group_sessions,
    replace_group_session, update_group_session,
};
use crate::state::AppState;

pub fn init_group_sessions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_group_sessions).post(create_group_session))
        .route(
            "/{id}",
            get(get_group_session_by_id)
                .put(replace_group_session)
                .patch(update_group_session)
                .delete(delete_group_session),
        )
}
