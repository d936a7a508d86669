use axum::{extract::OriginalUri, routing::get, Router};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::room;
use crate::shared::{AppError, AppState};
use crate::websockets::websocket_handler;

/// Assemble the HTTP surface: client page, static assets, JSON API and the event socket
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/rooms", get(room::list_rooms))
        .fallback(api_not_found)
        .layer(CorsLayer::permissive());

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/ws", get(websocket_handler))
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{InMemoryRoomRepository, RoomRepository};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn static_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "roomrelay-static-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>rooms</h1>").unwrap();
        std::fs::write(dir.join("app.js"), "console.log('hi');").unwrap();
        dir
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_root_serves_index_page() {
        let dir = static_fixture("index");
        let app = build_router(AppStateBuilder::new().build(), &dir);

        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>rooms</h1>");
    }

    #[tokio::test]
    async fn test_static_assets_served_from_directory() {
        let dir = static_fixture("assets");
        let app = build_router(AppStateBuilder::new().build(), &dir);

        let (status, body) = get(app.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("console.log"));

        let (status, _) = get(app, "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_rooms_lists_registry() {
        let dir = static_fixture("api");
        let repo = Arc::new(InMemoryRoomRepository::new());
        repo.create_room_if_absent("42", "Test", "c1").await;
        let state = AppStateBuilder::new().with_room_repository(repo).build();
        let app = build_router(state, &dir);

        let (status, body) = get(app, "/api/rooms").await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, serde_json::json!([{"code": "42", "name": "Test"}]));
    }

    #[tokio::test]
    async fn test_unknown_api_route_returns_json_error() {
        let dir = static_fixture("api-missing");
        let app = build_router(AppStateBuilder::new().build(), &dir);

        let (status, body) = get(app, "/api/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value["error"].as_str().unwrap().contains("/api/nope"));
    }

    #[tokio::test]
    async fn test_ws_route_requires_upgrade() {
        let dir = static_fixture("ws");
        let app = build_router(AppStateBuilder::new().build(), &dir);

        let (status, _) = get(app, "/ws").await;

        assert!(status.is_client_error());
    }
}
