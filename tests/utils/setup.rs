use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use roomrelay::{
    BroadcastCoordinator, InMemoryConnectionManager, InMemoryRoomRepository,
    InMemorySessionRepository, WebSocketMessage, WebsocketReceiveHandler,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// One simulated socket: the coordinator writes into `receiver`'s channel
pub struct TestClient {
    receiver: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl TestClient {
    /// Drain everything delivered so far
    pub fn take_messages(&self) -> Vec<WebSocketMessage> {
        let mut receiver = self.receiver.lock().unwrap();
        let mut messages = Vec::new();
        while let Ok(raw) = receiver.try_recv() {
            messages.push(serde_json::from_str(&raw).unwrap());
        }
        messages
    }
}

pub struct TestSetup {
    pub room_repository: Arc<InMemoryRoomRepository>,
    pub session_repository: Arc<InMemorySessionRepository>,
    pub connection_manager: Arc<InMemoryConnectionManager>,
    pub coordinator: Arc<BroadcastCoordinator>,
    pub input_handler: WebsocketReceiveHandler,
    clients: Mutex<HashMap<String, Arc<TestClient>>>,
}

impl TestSetup {
    pub fn client(&self, connection_id: &str) -> Arc<TestClient> {
        self.clients
            .lock()
            .unwrap()
            .get(connection_id)
            .cloned()
            .unwrap_or_else(|| panic!("no test client {}", connection_id))
    }

    pub fn messages_for(&self, connection_id: &str) -> Vec<WebSocketMessage> {
        self.client(connection_id).take_messages()
    }

    /// Open a new simulated connection
    pub async fn connect(&self, connection_id: &str) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.coordinator.connect(connection_id, tx).await;
        self.clients.lock().unwrap().insert(
            connection_id.to_string(),
            Arc::new(TestClient {
                receiver: Mutex::new(rx),
            }),
        );
    }
}

pub struct TestSetupBuilder {
    clients: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { clients: vec![] }
    }

    pub fn with_clients(mut self, clients: Vec<&str>) -> Self {
        self.clients = clients.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_clients(self) -> Self {
        self.with_clients(vec!["c1", "c2"])
    }

    pub fn with_three_clients(self) -> Self {
        self.with_clients(vec!["c1", "c2", "c3"])
    }

    pub async fn build(self) -> TestSetup {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let connection_manager = Arc::new(InMemoryConnectionManager::new());

        let coordinator = Arc::new(BroadcastCoordinator::new(
            room_repository.clone(),
            session_repository.clone(),
            connection_manager.clone(),
        ));
        let input_handler = WebsocketReceiveHandler::new(coordinator.clone());

        let setup = TestSetup {
            room_repository,
            session_repository,
            connection_manager,
            coordinator,
            input_handler,
            clients: Mutex::new(HashMap::new()),
        };

        for client in &self.clients {
            setup.connect(client).await;
        }

        setup
    }
}
