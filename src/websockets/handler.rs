use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::SessionModel;
use crate::shared::AppState;

use super::coordinator::BroadcastCoordinator;
use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    coordinator: Arc<BroadcastCoordinator>,
}

impl WebsocketReceiveHandler {
    pub fn new(coordinator: Arc<BroadcastCoordinator>) -> Self {
        Self { coordinator }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        self.coordinator.dispatch_raw(connection_id, &message).await;
    }
}

/// WebSocket endpoint for the room event protocol
/// GET /ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    debug!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = SessionModel::generate_connection_id();

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .coordinator
        .connect(&connection_id, outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(Arc::clone(
        &app_state.coordinator,
    )));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    app_state.coordinator.disconnect(&connection_id).await;
}
