use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    session::{SessionModel, SessionRepository},
    websockets::connection_manager::ConnectionManager,
};

pub struct ConnectionEventHandlers {
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ConnectionEventHandlers {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            session_repository,
            connection_manager,
        }
    }

    pub async fn handle_connect(
        &self,
        connection_id: &str,
        sender: mpsc::UnboundedSender<String>,
    ) {
        if !self
            .session_repository
            .create_session(SessionModel::new(connection_id.to_string()))
            .await
        {
            warn!(connection_id = %connection_id, "Connection id reused, keeping existing session");
        }

        self.connection_manager
            .add_connection(connection_id.to_string(), sender)
            .await;

        info!(connection_id = %connection_id, "User connected");
    }

    /// Tear down the session and its live group entries.
    ///
    /// Member names stay in their rooms and nobody is notified.
    // TODO: announce "user left" to the room once member names are pruned on leave
    pub async fn handle_disconnect(&self, connection_id: &str) {
        self.connection_manager
            .remove_connection(connection_id)
            .await;

        match self.session_repository.delete_session(connection_id).await {
            Some(session) => {
                info!(
                    connection_id = %connection_id,
                    room_code = ?session.current_room_code,
                    user_name = ?session.user_name,
                    "User disconnected"
                );
            }
            None => {
                warn!(connection_id = %connection_id, "Disconnect for unknown session");
            }
        }
    }
}
