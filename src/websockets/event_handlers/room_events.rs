use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    room::RoomRepository,
    session::SessionRepository,
    websockets::{
        connection_manager::ConnectionManager,
        errors::EventError,
        messages::{CreateRoomPayload, JoinRoomPayload, WebSocketMessage},
    },
};

use super::shared::MessageBroadcaster;

/// Handles createRoom, joinRoom and getRoomList
pub struct RoomEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
    /// Held from listing the registry until the list is queued, so room lists
    /// go out in registry order
    room_list_lock: Mutex<()>,
}

impl RoomEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            connection_manager,
            room_list_lock: Mutex::new(()),
        }
    }

    pub async fn handle_create_room(
        &self,
        connection_id: &str,
        request: CreateRoomPayload,
    ) -> Result<(), EventError> {
        let result = self
            .room_repository
            .create_room_if_absent(&request.room_code, &request.room_name, connection_id)
            .await;

        if result.was_created() {
            info!(
                connection_id = %connection_id,
                room_code = %request.room_code,
                room_name = %request.room_name,
                "Room created by connection"
            );
        } else {
            debug!(
                connection_id = %connection_id,
                room_code = %request.room_code,
                "createRoom for existing room, joining it instead"
            );
        }

        let room = result.into_room();

        // Membership, group entry and every notification happen under the room
        // lock so no message can be appended between the snapshot and the join.
        let mut guard = room.lock().await;
        guard.add_member(&request.user_name);
        self.connection_manager
            .join_group(room.code(), connection_id)
            .await;
        self.record_join(connection_id, room.code(), &request.user_name)
            .await;

        let snapshot = guard.snapshot();
        MessageBroadcaster::send_to_connection(
            &self.connection_manager,
            connection_id,
            &WebSocketMessage::room_created(&snapshot)?,
        )
        .await?;
        self.broadcast_room_list().await?;
        MessageBroadcaster::send_to_connection(
            &self.connection_manager,
            connection_id,
            &WebSocketMessage::load_messages(&snapshot.messages)?,
        )
        .await?;
        MessageBroadcaster::broadcast_to_room(
            &self.connection_manager,
            room.code(),
            &WebSocketMessage::user_joined(&request.user_name)?,
        )
        .await?;

        info!(
            connection_id = %connection_id,
            room_code = %room.code(),
            user_name = %request.user_name,
            "User joined room"
        );

        Ok(())
    }

    pub async fn handle_join_room(
        &self,
        connection_id: &str,
        request: JoinRoomPayload,
    ) -> Result<(), EventError> {
        let Some(room) = self.room_repository.get_room(&request.room_code).await else {
            info!(
                connection_id = %connection_id,
                room_code = %request.room_code,
                "Join rejected, room not found"
            );
            return MessageBroadcaster::send_to_connection(
                &self.connection_manager,
                connection_id,
                &WebSocketMessage::room_not_found(&request.room_code)?,
            )
            .await;
        };

        let mut guard = room.lock().await;
        guard.add_member(&request.user_name);
        self.connection_manager
            .join_group(room.code(), connection_id)
            .await;
        self.record_join(connection_id, room.code(), &request.user_name)
            .await;

        let snapshot = guard.snapshot();
        MessageBroadcaster::send_to_connection(
            &self.connection_manager,
            connection_id,
            &WebSocketMessage::room_joined(&snapshot)?,
        )
        .await?;
        MessageBroadcaster::send_to_connection(
            &self.connection_manager,
            connection_id,
            &WebSocketMessage::load_messages(&snapshot.messages)?,
        )
        .await?;
        MessageBroadcaster::broadcast_to_room(
            &self.connection_manager,
            room.code(),
            &WebSocketMessage::user_joined(&request.user_name)?,
        )
        .await?;

        info!(
            connection_id = %connection_id,
            room_code = %room.code(),
            user_name = %request.user_name,
            members = snapshot.members.len(),
            "User joined room"
        );

        Ok(())
    }

    pub async fn handle_get_room_list(&self, connection_id: &str) -> Result<(), EventError> {
        let _ordering = self.room_list_lock.lock().await;
        let rooms = self.room_repository.list_summaries().await;
        debug!(
            connection_id = %connection_id,
            room_count = rooms.len(),
            "Sending room list"
        );

        MessageBroadcaster::send_to_connection(
            &self.connection_manager,
            connection_id,
            &WebSocketMessage::update_room_list(&rooms)?,
        )
        .await
    }

    /// Send the current registry listing to every connection
    async fn broadcast_room_list(&self) -> Result<(), EventError> {
        let _ordering = self.room_list_lock.lock().await;
        let rooms = self.room_repository.list_summaries().await;
        MessageBroadcaster::broadcast_to_all(
            &self.connection_manager,
            &WebSocketMessage::update_room_list(&rooms)?,
        )
        .await
    }

    async fn record_join(&self, connection_id: &str, room_code: &str, user_name: &str) {
        if self
            .session_repository
            .record_room_join(connection_id, room_code, user_name)
            .await
            .is_none()
        {
            warn!(
                connection_id = %connection_id,
                room_code = %room_code,
                "Session vanished while joining room"
            );
        }
    }
}
