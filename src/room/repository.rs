use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::models::{Room, RoomSummary};

/// Result of asking the registry for a room that may not exist yet
#[derive(Debug, Clone)]
pub enum CreateRoomResult {
    /// The code was unseen and a new room was inserted
    Created(Arc<Room>),
    /// The code was already taken; the existing room is returned unchanged
    Existing(Arc<Room>),
}

impl CreateRoomResult {
    pub fn room(&self) -> &Arc<Room> {
        match self {
            CreateRoomResult::Created(room) | CreateRoomResult::Existing(room) => room,
        }
    }

    pub fn into_room(self) -> Arc<Room> {
        match self {
            CreateRoomResult::Created(room) | CreateRoomResult::Existing(room) => room,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, CreateRoomResult::Created(_))
    }
}

/// Trait for room registry operations
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Atomically returns the room for `code`, creating it first if the code is unseen.
    /// When the room already exists the supplied name and creator are ignored.
    async fn create_room_if_absent(
        &self,
        code: &str,
        name: &str,
        creator_id: &str,
    ) -> CreateRoomResult;

    async fn get_room(&self, code: &str) -> Option<Arc<Room>>;

    /// Summaries of every room, in creation order
    async fn list_summaries(&self) -> Vec<RoomSummary>;
}

#[derive(Default)]
struct RoomIndex {
    rooms: HashMap<String, Arc<Room>>,
    creation_order: Vec<String>,
}

/// In-memory registry; rooms live until the process exits
pub struct InMemoryRoomRepository {
    index: RwLock<RoomIndex>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            index: RwLock::new(RoomIndex::default()),
        }
    }

    /// Returns the current number of rooms
    pub async fn room_count(&self) -> usize {
        self.index.read().await.rooms.len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn create_room_if_absent(
        &self,
        code: &str,
        name: &str,
        creator_id: &str,
    ) -> CreateRoomResult {
        let mut index = self.index.write().await;

        if let Some(existing) = index.rooms.get(code) {
            debug!(
                room_code = %code,
                existing_name = %existing.name(),
                "Room already exists, keeping original"
            );
            return CreateRoomResult::Existing(Arc::clone(existing));
        }

        let room = Arc::new(Room::new(
            code.to_string(),
            name.to_string(),
            creator_id.to_string(),
        ));
        index.rooms.insert(code.to_string(), Arc::clone(&room));
        index.creation_order.push(code.to_string());

        info!(room_code = %code, room_name = %name, "Room created");
        CreateRoomResult::Created(room)
    }

    #[instrument(skip(self))]
    async fn get_room(&self, code: &str) -> Option<Arc<Room>> {
        let index = self.index.read().await;
        let room = index.rooms.get(code).cloned();

        if room.is_none() {
            debug!(room_code = %code, "Room not found");
        }

        room
    }

    #[instrument(skip(self))]
    async fn list_summaries(&self) -> Vec<RoomSummary> {
        let index = self.index.read().await;

        index
            .creation_order
            .iter()
            .filter_map(|code| index.rooms.get(code))
            .map(|room| room.summary())
            .collect()
    }
}
