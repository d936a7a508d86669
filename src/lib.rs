// Library crate for the room relay server
// This file exposes the public API for integration tests

pub mod app;
pub mod config;
pub mod room;
pub mod session;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use room::{InMemoryRoomRepository, RoomRepository};
pub use session::{InMemorySessionRepository, SessionRepository};
pub use shared::{AppError, AppState};
pub use websockets::{
    BroadcastCoordinator, ClientEvent, ConnectionManager, InMemoryConnectionManager,
    MessageHandler, MessageType, WebSocketMessage, WebsocketReceiveHandler,
};
