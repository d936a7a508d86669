use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::room::RoomRepository;
use crate::session::SessionRepository;
use crate::websockets::{BroadcastCoordinator, ConnectionManager};

/// Shared application state containing all dependencies
///
/// Every handle is constructed once at startup and passed in, so independent
/// instances can run side by side (one per test, for example).
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository>,
    pub coordinator: Arc<BroadcastCoordinator>,
}

impl AppState {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let coordinator = Arc::new(BroadcastCoordinator::new(
            Arc::clone(&room_repository),
            session_repository,
            connection_manager,
        ));

        Self {
            room_repository,
            coordinator,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
