use serde_json::json;

use roomrelay::{MessageHandler, MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a WebSocket message through the same path a real socket uses
    pub async fn send_message(&self, connection_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(connection_id, &message_json).await;
    }

    /// Send an arbitrary text frame
    pub async fn send_raw(&self, connection_id: &str, raw: &str) {
        self.input_handler
            .handle_message(connection_id, raw.to_string())
            .await;
    }

    /// Close the simulated connection
    pub async fn disconnect(&self, connection_id: &str) {
        self.coordinator.disconnect(connection_id).await;
    }

    /// Clear all pending messages for every listed client
    pub fn clear_messages(&self, connection_ids: &[&str]) {
        for id in connection_ids {
            self.messages_for(id);
        }
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_create_room(&self, connection_id: &str, code: &str, name: &str, user: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::CreateRoom,
                json!({ "roomCode": code, "roomName": name, "userName": user }),
            ),
        )
        .await;
    }

    pub async fn send_join_room(&self, connection_id: &str, code: &str, user: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::JoinRoom,
                json!({ "roomCode": code, "userName": user }),
            ),
        )
        .await;
    }

    pub async fn send_get_room_list(&self, connection_id: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(MessageType::GetRoomList, json!({})),
        )
        .await;
    }

    pub async fn send_chat(
        &self,
        connection_id: &str,
        code: &str,
        sender: &str,
        text: &str,
        timestamp: serde_json::Value,
    ) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::SendMessage,
                json!({ "roomCode": code, "sender": sender, "text": text, "timestamp": timestamp }),
            ),
        )
        .await;
    }
}
