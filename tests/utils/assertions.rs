//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use roomrelay::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub fn received_types(messages: &[WebSocketMessage]) -> Vec<MessageType> {
    messages.iter().map(|m| m.message_type).collect()
}

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    clients: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for specific clients
    pub fn for_clients(setup: &'a TestSetup, clients: Vec<&'a str>) -> Self {
        Self { setup, clients }
    }

    /// Assert every client received exactly this sequence of message types
    /// (consumes the messages). Returns the payloads of the first client.
    pub fn received_sequence(self, expected: &[MessageType]) -> Vec<serde_json::Value> {
        let mut first: Option<Vec<serde_json::Value>> = None;

        for client in &self.clients {
            let messages = self.setup.messages_for(client);
            assert_eq!(
                received_types(&messages),
                expected,
                "{} received wrong message sequence",
                client
            );

            let payloads: Vec<serde_json::Value> =
                messages.into_iter().map(|m| m.payload).collect();
            match &first {
                Some(first_payloads) => assert_eq!(
                    &payloads, first_payloads,
                    "{} payloads differ from {}",
                    client, self.clients[0]
                ),
                None => first = Some(payloads),
            }
        }

        first.unwrap_or_default()
    }

    /// Assert that clients received a single message of the given type
    pub fn received_message_type(self, expected_type: MessageType) -> serde_json::Value {
        self.received_sequence(&[expected_type])
            .into_iter()
            .next()
            .unwrap()
    }

    /// Assert that clients received no messages
    pub fn received_no_messages(self) {
        for client in &self.clients {
            let messages = self.setup.messages_for(client);
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                client,
                received_types(&messages)
            );
        }
    }
}
