use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::EventError;
use crate::room::{ChatMessage, RoomSnapshot, RoomSummary};

/// Event names on the wire, in both directions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    // Client -> Server
    CreateRoom,
    JoinRoom,
    GetRoomList,
    SendMessage,

    // Server -> Client
    RoomCreated,
    RoomJoined,
    RoomNotFound,
    UpdateRoomList,
    LoadMessages,
    UserJoined,
    ReceiveMessage,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    pub room_code: String,
    pub room_name: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_code: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub room_code: String,
    pub sender: String,
    pub text: String,
    // Opaque client clock value; absent is relayed as null
    #[serde(default)]
    pub timestamp: serde_json::Value,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticePayload {
    pub message: String,
}

/// An inbound event after validation
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    CreateRoom(CreateRoomPayload),
    JoinRoom(JoinRoomPayload),
    GetRoomList,
    SendMessage(SendMessagePayload),
}

impl ClientEvent {
    /// Parse a raw text frame into a client event
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let message: WebSocketMessage = serde_json::from_str(raw)
            .map_err(|e| EventError::MalformedEvent(format!("invalid envelope: {}", e)))?;
        Self::try_from(message)
    }

    pub fn event_type(&self) -> MessageType {
        match self {
            ClientEvent::CreateRoom(_) => MessageType::CreateRoom,
            ClientEvent::JoinRoom(_) => MessageType::JoinRoom,
            ClientEvent::GetRoomList => MessageType::GetRoomList,
            ClientEvent::SendMessage(_) => MessageType::SendMessage,
        }
    }
}

fn payload_as<T: serde::de::DeserializeOwned>(
    message_type: MessageType,
    payload: serde_json::Value,
) -> Result<T, EventError> {
    serde_json::from_value(payload)
        .map_err(|e| EventError::MalformedEvent(format!("{:?}: {}", message_type, e)))
}

impl TryFrom<WebSocketMessage> for ClientEvent {
    type Error = EventError;

    fn try_from(message: WebSocketMessage) -> Result<Self, Self::Error> {
        let message_type = message.message_type;
        match message_type {
            MessageType::CreateRoom => Ok(ClientEvent::CreateRoom(payload_as(
                message_type,
                message.payload,
            )?)),
            MessageType::JoinRoom => Ok(ClientEvent::JoinRoom(payload_as(
                message_type,
                message.payload,
            )?)),
            MessageType::GetRoomList => Ok(ClientEvent::GetRoomList),
            MessageType::SendMessage => Ok(ClientEvent::SendMessage(payload_as(
                message_type,
                message.payload,
            )?)),
            other => Err(EventError::MalformedEvent(format!(
                "{:?} is not accepted from clients",
                other
            ))),
        }
    }
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    fn with_payload<T: Serialize>(
        message_type: MessageType,
        payload: &T,
    ) -> Result<Self, EventError> {
        Ok(Self::new(message_type, serde_json::to_value(payload)?))
    }

    /// Create a roomCreated message
    pub fn room_created(snapshot: &RoomSnapshot) -> Result<Self, EventError> {
        Self::with_payload(MessageType::RoomCreated, snapshot)
    }

    /// Create a roomJoined message
    pub fn room_joined(snapshot: &RoomSnapshot) -> Result<Self, EventError> {
        Self::with_payload(MessageType::RoomJoined, snapshot)
    }

    /// Create a roomNotFound message naming the missing code
    pub fn room_not_found(room_code: &str) -> Result<Self, EventError> {
        let payload = NoticePayload {
            message: format!("Room with code {} not found.", room_code),
        };
        Self::with_payload(MessageType::RoomNotFound, &payload)
    }

    /// Create an updateRoomList message
    pub fn update_room_list(rooms: &[RoomSummary]) -> Result<Self, EventError> {
        Self::with_payload(MessageType::UpdateRoomList, &rooms)
    }

    /// Create a loadMessages message carrying the room history
    pub fn load_messages(messages: &[ChatMessage]) -> Result<Self, EventError> {
        Self::with_payload(MessageType::LoadMessages, &messages)
    }

    /// Create a userJoined announcement
    pub fn user_joined(user_name: &str) -> Result<Self, EventError> {
        let payload = NoticePayload {
            message: format!("{} joined the room.", user_name),
        };
        Self::with_payload(MessageType::UserJoined, &payload)
    }

    /// Create a receiveMessage message
    pub fn receive_message(message: &ChatMessage) -> Result<Self, EventError> {
        Self::with_payload(MessageType::ReceiveMessage, message)
    }

    /// Serialize to the text frame sent over the socket
    pub fn to_json(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(self)?)
    }
}
