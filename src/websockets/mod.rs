// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use coordinator::BroadcastCoordinator;
pub use errors::EventError;
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use messages::{ClientEvent, MessageType, WebSocketMessage};
pub use socket::MessageHandler;

// Internal modules
mod connection_manager;
mod coordinator;
mod errors;
pub mod event_handlers;
mod handler;
pub mod messages;
mod socket;
