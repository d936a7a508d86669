use crate::websockets::{
    connection_manager::ConnectionManager, errors::EventError, messages::WebSocketMessage,
};
use std::sync::Arc;

/// Serializes a message once and hands it to the resolved audience
pub struct MessageBroadcaster;

impl MessageBroadcaster {
    /// Reply to a single connection
    pub async fn send_to_connection(
        connection_manager: &Arc<dyn ConnectionManager>,
        connection_id: &str,
        message: &WebSocketMessage,
    ) -> Result<(), EventError> {
        let message_json = message.to_json()?;
        connection_manager
            .send_to_connection(connection_id, &message_json)
            .await;
        Ok(())
    }

    /// Every connection currently listening on the room
    pub async fn broadcast_to_room(
        connection_manager: &Arc<dyn ConnectionManager>,
        room_code: &str,
        message: &WebSocketMessage,
    ) -> Result<(), EventError> {
        let message_json = message.to_json()?;
        connection_manager
            .send_to_group(room_code, &message_json)
            .await;
        Ok(())
    }

    /// Every connected client regardless of room
    pub async fn broadcast_to_all(
        connection_manager: &Arc<dyn ConnectionManager>,
        message: &WebSocketMessage,
    ) -> Result<(), EventError> {
        let message_json = message.to_json()?;
        connection_manager.send_to_all(&message_json).await;
        Ok(())
    }
}
