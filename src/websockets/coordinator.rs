use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    room::RoomRepository,
    session::SessionRepository,
    websockets::{
        connection_manager::ConnectionManager,
        errors::EventError,
        messages::{ClientEvent, MessageType},
    },
};

use super::event_handlers::{ChatEventHandlers, ConnectionEventHandlers, RoomEventHandlers};

/// Routes client events to the room registry and fans out the results
///
/// Delegates to specialized event handlers:
/// - RoomEventHandlers: createRoom, joinRoom, getRoomList
/// - ChatEventHandlers: sendMessage
/// - ConnectionEventHandlers: connect, disconnect
pub struct BroadcastCoordinator {
    session_repository: Arc<dyn SessionRepository>,
    room_handlers: RoomEventHandlers,
    chat_handlers: ChatEventHandlers,
    connection_handlers: ConnectionEventHandlers,
}

impl BroadcastCoordinator {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let room_handlers = RoomEventHandlers::new(
            Arc::clone(&room_repository),
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
        );

        let chat_handlers =
            ChatEventHandlers::new(Arc::clone(&room_repository), Arc::clone(&connection_manager));

        let connection_handlers = ConnectionEventHandlers::new(
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
        );

        Self {
            session_repository,
            room_handlers,
            chat_handlers,
            connection_handlers,
        }
    }

    /// Register a freshly opened connection and its outbound channel
    pub async fn connect(&self, connection_id: &str, sender: mpsc::UnboundedSender<String>) {
        self.connection_handlers
            .handle_connect(connection_id, sender)
            .await;
    }

    pub async fn disconnect(&self, connection_id: &str) {
        self.connection_handlers
            .handle_disconnect(connection_id)
            .await;
    }

    /// Handle one event, surfacing any error to the caller
    pub async fn handle_event(
        &self,
        connection_id: &str,
        event: ClientEvent,
    ) -> Result<(), EventError> {
        if self
            .session_repository
            .get_session(connection_id)
            .await
            .is_none()
        {
            return Err(EventError::SessionNotFound(connection_id.to_string()));
        }

        debug!(
            connection_id = %connection_id,
            event_type = ?event.event_type(),
            "Handling client event"
        );

        match event {
            ClientEvent::CreateRoom(request) => {
                self.room_handlers
                    .handle_create_room(connection_id, request)
                    .await
            }
            ClientEvent::JoinRoom(request) => {
                self.room_handlers
                    .handle_join_room(connection_id, request)
                    .await
            }
            ClientEvent::GetRoomList => {
                self.room_handlers.handle_get_room_list(connection_id).await
            }
            ClientEvent::SendMessage(request) => {
                self.chat_handlers
                    .handle_send_message(connection_id, request)
                    .await
            }
        }
    }

    /// Handle one event; failures are logged and never reach the connection loop
    pub async fn dispatch(&self, connection_id: &str, event: ClientEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.handle_event(connection_id, event).await {
            Self::log_failure(connection_id, &e, Some(event_type));
        }
    }

    /// Parse a raw text frame and dispatch it; malformed frames are dropped
    pub async fn dispatch_raw(&self, connection_id: &str, raw: &str) {
        match ClientEvent::parse(raw) {
            Ok(event) => self.dispatch(connection_id, event).await,
            Err(e) => Self::log_failure(connection_id, &e, None),
        }
    }

    fn log_failure(connection_id: &str, error: &EventError, event_type: Option<MessageType>) {
        match error {
            // Sending into an unknown room is silently dropped
            EventError::RoomNotFound(room_code) => {
                debug!(
                    connection_id = %connection_id,
                    room_code = %room_code,
                    event_type = ?event_type,
                    "Event for unknown room dropped"
                );
            }
            _ => {
                warn!(
                    connection_id = %connection_id,
                    event_type = ?event_type,
                    error = %error,
                    "Client event dropped"
                );
            }
        }
    }
}
