use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Live connection registry and room-scoped multicast groups
///
/// Groups track which sockets are currently listening on a room. They are
/// separate from a room's member names: a group shrinks when a socket goes
/// away, member names never do.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>);

    /// Drop the connection and remove it from every group it joined
    async fn remove_connection(&self, connection_id: &str);

    async fn join_group(&self, group: &str, connection_id: &str);

    async fn group_members(&self, group: &str) -> Vec<String>;

    async fn send_to_connection(&self, connection_id: &str, message: &str);

    async fn send_to_group(&self, group: &str, message: &str);

    async fn send_to_all(&self, message: &str);

    async fn count_connections(&self) -> usize;
}

#[derive(Default)]
struct Connections {
    // connection id -> outbound sender
    senders: HashMap<String, mpsc::UnboundedSender<String>>,
    // group (room code) -> connection ids
    groups: HashMap<String, HashSet<String>>,
}

pub struct InMemoryConnectionManager {
    connections: RwLock<Connections>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Connections::default()),
        }
    }
}

fn deliver(sender: &mpsc::UnboundedSender<String>, connection_id: &str, message: &str) {
    // A closed receiver means the socket task is already shutting down
    if sender.send(message.to_string()).is_err() {
        debug!(connection_id = %connection_id, "Dropped message for closing connection");
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.senders.insert(connection_id, sender);
    }

    async fn remove_connection(&self, connection_id: &str) {
        let mut connections = self.connections.write().await;
        connections.senders.remove(connection_id);
        connections.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    async fn join_group(&self, group: &str, connection_id: &str) {
        let mut connections = self.connections.write().await;
        if !connections.senders.contains_key(connection_id) {
            debug!(
                connection_id = %connection_id,
                group = %group,
                "Unknown connection not added to group"
            );
            return;
        }
        connections
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(connection_id.to_string());
    }

    async fn group_members(&self, group: &str) -> Vec<String> {
        let connections = self.connections.read().await;
        connections
            .groups
            .get(group)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        let connections = self.connections.read().await;
        if let Some(sender) = connections.senders.get(connection_id) {
            deliver(sender, connection_id, message);
        }
    }

    async fn send_to_group(&self, group: &str, message: &str) {
        let connections = self.connections.read().await;
        let Some(members) = connections.groups.get(group) else {
            return;
        };
        for connection_id in members {
            if let Some(sender) = connections.senders.get(connection_id) {
                deliver(sender, connection_id, message);
            }
        }
    }

    async fn send_to_all(&self, message: &str) {
        let connections = self.connections.read().await;
        for (connection_id, sender) in &connections.senders {
            deliver(sender, connection_id, message);
        }
    }

    async fn count_connections(&self) -> usize {
        self.connections.read().await.senders.len()
    }
}
