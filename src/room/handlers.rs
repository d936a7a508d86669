use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::RoomSummary;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all rooms
///
/// GET /api/rooms
/// Returns the same `[{code, name}]` list that `getRoomList` delivers over the socket
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = state.room_repository.list_summaries().await;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}
