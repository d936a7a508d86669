use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Per-connection session record
///
/// Created when a socket connects and dropped when it closes. The room code is
/// unset until a create/join succeeds and is never cleared afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionModel {
    pub connection_id: String,
    pub current_room_code: Option<String>,
    pub user_name: Option<String>,
    pub connected_at: DateTime<Utc>,
}

impl SessionModel {
    pub fn new(connection_id: String) -> Self {
        Self {
            connection_id,
            current_room_code: None,
            user_name: None,
            connected_at: Utc::now(),
        }
    }

    /// Generate an opaque identifier for a fresh connection
    pub fn generate_connection_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn is_in_room(&self) -> bool {
        self.current_room_code.is_some()
    }

    /// Record a successful create/join
    pub fn enter_room(&mut self, room_code: &str, user_name: &str) {
        self.current_room_code = Some(room_code.to_string());
        self.user_name = Some(user_name.to_string());
    }
}
