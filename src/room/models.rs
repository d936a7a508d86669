use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

/// A chat message as relayed to room members
///
/// `timestamp` is supplied by the sending client and relayed verbatim; the
/// server never validates or reorders by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: serde_json::Value,
}

impl ChatMessage {
    pub fn new(sender: String, text: String, timestamp: serde_json::Value) -> Self {
        Self {
            sender,
            text,
            timestamp,
        }
    }
}

/// Entry in the room list shown to every client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub code: String,
    pub name: String,
}

/// Point-in-time copy of a room, sent to a connection that creates or joins it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub members: Vec<String>,
    pub creator_id: String,
}

/// Mutable part of a room, guarded by the room's lock
///
/// Both collections only ever grow: there is no eviction of old messages and
/// no leave semantics for members.
#[derive(Debug, Default)]
struct RoomState {
    messages: Vec<ChatMessage>,
    // Join order is kept for display; duplicates are rejected on insert
    members: Vec<String>,
}

/// In-memory room
///
/// `code`, `name` and `creator_id` are fixed at creation and can be read
/// without taking the lock.
#[derive(Debug)]
pub struct Room {
    code: String,
    name: String,
    creator_id: String,
    state: Mutex<RoomState>,
}

impl Room {
    pub fn new(code: String, name: String, creator_id: String) -> Self {
        Self {
            code,
            name,
            creator_id,
            state: Mutex::new(RoomState::default()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creator_id(&self) -> &str {
        &self.creator_id
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }

    /// Acquire exclusive access to the room's state
    ///
    /// Everything done through the returned guard is serialized against other
    /// holders, which is how the coordinator keeps append+broadcast atomic.
    pub async fn lock(&self) -> RoomGuard<'_> {
        RoomGuard {
            room: self,
            state: self.state.lock().await,
        }
    }

    /// Add a member name; returns false if the name was already present
    pub async fn add_member(&self, name: &str) -> bool {
        self.lock().await.add_member(name)
    }

    pub async fn append_message(&self, message: ChatMessage) {
        self.lock().await.append_message(message);
    }

    pub async fn snapshot(&self) -> RoomSnapshot {
        self.lock().await.snapshot()
    }
}

/// Locked view of a room
pub struct RoomGuard<'a> {
    room: &'a Room,
    state: MutexGuard<'a, RoomState>,
}

impl RoomGuard<'_> {
    pub fn add_member(&mut self, name: &str) -> bool {
        if self.state.members.iter().any(|m| m == name) {
            return false;
        }
        self.state.members.push(name.to_string());
        true
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.state.messages.push(message);
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.room.name.clone(),
            messages: self.state.messages.clone(),
            members: self.state.members.clone(),
            creator_id: self.room.creator_id.clone(),
        }
    }
}
