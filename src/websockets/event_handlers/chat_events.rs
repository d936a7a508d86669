use std::sync::Arc;
use tracing::info;

use crate::{
    room::{ChatMessage, RoomRepository},
    websockets::{
        connection_manager::ConnectionManager,
        errors::EventError,
        messages::{SendMessagePayload, WebSocketMessage},
    },
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

pub struct ChatEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ChatEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            connection_manager,
        }
    }

    /// Append the message to the room log and relay it to everyone listening on the room.
    ///
    /// The sender name is taken as given; it is not checked against the member list.
    pub async fn handle_send_message(
        &self,
        connection_id: &str,
        request: SendMessagePayload,
    ) -> Result<(), EventError> {
        let room = RoomQueryUtils::get_room_or_error(&self.room_repository, &request.room_code)
            .await?;

        let message = ChatMessage::new(request.sender.clone(), request.text, request.timestamp);
        let outbound = WebSocketMessage::receive_message(&message)?;

        // Append and fan-out under one lock: every listener sees the log order
        let mut guard = room.lock().await;
        guard.append_message(message);
        MessageBroadcaster::broadcast_to_room(&self.connection_manager, room.code(), &outbound)
            .await?;
        drop(guard);

        info!(
            connection_id = %connection_id,
            room_code = %request.room_code,
            sender = %request.sender,
            "Message relayed to room"
        );

        Ok(())
    }
}
