// Public API - what other modules can use
pub use models::SessionModel;
pub use repository::{InMemorySessionRepository, SessionRepository};

// Internal modules
pub mod models;
pub mod repository;
