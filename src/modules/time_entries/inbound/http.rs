// HTTP inbound for the time entry CRUD surface.
//
// Responsibilities
// - Validate identifier syntax before any backend call.
// - Map repository and projection outcomes to statuses and `{"error": msg}`
//   bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::modules::time_entries::core::entry::{EntryDraft, EntryId, EntryPatch};
use crate::modules::time_entries::core::timezone;
use crate::modules::time_entries::repository::RepositoryError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct GetQuery {
    pub zone: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn map_repository_error(err: RepositoryError) -> Response {
    match err {
        RepositoryError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        RepositoryError::Store(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn parse_id(raw: &str) -> Result<EntryId, Response> {
    EntryId::parse(raw).map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid ID format"))
}

pub async fn ping() -> Response {
    Json(json!({ "message": "pong", "ts": Utc::now().timestamp_millis() })).into_response()
}

pub async fn list(State(state): State<AppState>) -> Response {
    match state.repository.list().await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => map_repository_error(err),
    }
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<GetQuery>,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let entry = match state.repository.get_by_id(&id).await {
        Ok(entry) => entry,
        Err(err) => return map_repository_error(err),
    };

    let Some(zone) = query.zone else {
        return Json(entry).into_response();
    };
    match timezone::convert(&entry, &zone) {
        Ok(local) => Json(local).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EntryDraft>, JsonRejection>,
) -> Response {
    let Json(draft) = match body {
        Ok(body) => body,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.repository.create(draft).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => map_repository_error(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<EntryPatch>, JsonRejection>,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(patch) = match body {
        Ok(body) => body,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.repository.update(&id, patch).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => map_repository_error(err),
    }
}

pub async fn remove(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.repository.delete(&id).await {
        Ok(()) => Json(json!({
            "message": format!("Time entry [{id}] successfully deleted")
        }))
        .into_response(),
        Err(err) => map_repository_error(err),
    }
}

#[cfg(test)]
mod time_entries_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::time_entries::repository::CacheAsideRepository;
    use crate::shared::infrastructure::cache::in_memory::InMemoryCache;
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::shell::http::router;
    use crate::shell::state::AppState;

    fn make_test_state() -> (Arc<InMemoryStore>, AppState) {
        let store = Arc::new(InMemoryStore::new());
        let cache = Arc::new(InMemoryCache::new());
        let repository = Arc::new(CacheAsideRepository::new(store.clone(), cache));
        (store, AppState { repository })
    }

    fn app() -> Router {
        let (_, state) = make_test_state();
        router(state)
    }

    async fn create_entry(app: &Router) -> serde_json::Value {
        let body = r#"{"description":"Standup","time":"2025-01-10T09:00:00Z"}"#;
        let response = app
            .clone()
            .oneshot(
                Request::post("/time")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_return_201_with_matching_timestamps_on_create() {
        let created = create_entry(&app()).await;
        assert!(created.get("id").is_some());
        assert_eq!(created["description"], "Standup");
        assert_eq!(created["created"], created["updated"]);
    }

    #[tokio::test]
    async fn it_should_return_422_on_a_malformed_body() {
        let response = app()
            .oneshot(
                Request::post("/time")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_400_on_a_malformed_id() {
        let response = app()
            .oneshot(Request::get("/time/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid ID format");
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_id() {
        let missing = uuid::Uuid::now_v7();
        let response = app()
            .oneshot(
                Request::get(format!("/time/{missing}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], format!("Time entry [{missing}] not found"));
    }

    #[tokio::test]
    async fn it_should_localize_time_when_a_zone_is_requested() {
        let app = app();
        let created = create_entry(&app).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/time/{id}?zone=America/New_York"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["time"], "2025-01-10T04:00:00-05:00");
        assert_eq!(json["description"], "Standup");
    }

    #[tokio::test]
    async fn it_should_return_400_for_an_unknown_zone_and_keep_the_canonical_value() {
        let app = app();
        let created = create_entry(&app).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/time/{id}?zone=Invalid/Zone"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid TZ Invalid/Zone");

        // The cached canonical record is untouched by the failed projection.
        let response = app
            .oneshot(
                Request::get(format!("/time/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["time"], "2025-01-10T09:00:00Z");
    }

    #[tokio::test]
    async fn it_should_update_an_entry_and_bump_updated() {
        let app = app();
        let created = create_entry(&app).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::put(format!("/time/{id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"time":"2025-01-10T10:00:00Z"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["time"], "2025-01-10T10:00:00Z");
        assert_eq!(json["created"], created["created"]);
        let created_at: chrono::DateTime<chrono::Utc> =
            json["created"].as_str().unwrap().parse().unwrap();
        let updated_at: chrono::DateTime<chrono::Utc> =
            json["updated"].as_str().unwrap().parse().unwrap();
        assert!(updated_at >= created_at);
    }

    #[tokio::test]
    async fn it_should_delete_an_entry_and_then_404() {
        let app = app();
        let created = create_entry(&app).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/time/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            format!("Time entry [{id}] successfully deleted")
        );

        let response = app
            .oneshot(
                Request::get(format!("/time/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_list_all_entries() {
        let app = app();
        let _ = create_entry(&app).await;
        let _ = create_entry(&app).await;

        let response = app
            .oneshot(Request::get("/time").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_store_is_offline() {
        let (store, state) = make_test_state();
        store.toggle_offline();

        let response = router(state)
            .oneshot(Request::get("/time").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn it_should_answer_the_health_check() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "pong");
        assert!(json["ts"].is_i64());
    }
}
