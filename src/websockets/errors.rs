use thiserror::Error;

/// Errors raised while handling a client event
///
/// None of these leave the coordinator: each is logged and the event dropped.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("No session for connection: {0}")]
    SessionNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EventError {
    fn from(e: serde_json::Error) -> Self {
        EventError::Serialization(e.to_string())
    }
}
