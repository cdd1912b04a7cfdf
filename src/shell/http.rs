use axum::{Router, routing::get};

use crate::modules::time_entries::inbound::http as time_entries_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(time_entries_http::ping))
        .route(
            "/time",
            get(time_entries_http::list).post(time_entries_http::create),
        )
        .route(
            "/time/{id}",
            get(time_entries_http::get_by_id)
                .put(time_entries_http::update)
                .delete(time_entries_http::remove),
        )
        .with_state(state)
}
