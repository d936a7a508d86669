// Public API - what other modules can use
pub use handlers::list_rooms;
pub use models::{ChatMessage, Room, RoomSnapshot, RoomSummary};
pub use repository::{CreateRoomResult, InMemoryRoomRepository, RoomRepository};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
