/**
 * Real-time Event Envelopes
 *
 * Websocket frames carry JSON envelopes of the form
 * `{"event": "<name>", "data": <payload>}`.
 *
 * Client to server:
 * - `msg` - a chat message
 * - `sendTable` - a product submission
 *
 * Server to client:
 * - `msg-list` - the normalized chat history, sent to every connection
 * - `prods` - the product list, sent to the submitting connection only
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::message::IncomingChatMessage;
use crate::shared::normalize::NormalizedChat;
use crate::shared::product::{NewProduct, Product};

/// Event received from a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "msg")]
    Msg(IncomingChatMessage),
    #[serde(rename = "sendTable")]
    SendTable(NewProduct),
}

/// Payload of `msg-list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MsgListPayload {
    pub normalizado: NormalizedChat,
}

/// Event sent to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "msg-list")]
    MsgList(MsgListPayload),
    #[serde(rename = "prods")]
    Prods(Vec<Product>),
}

impl ClientEvent {
    /// Parse a websocket text frame
    pub fn from_frame(frame: &str) -> Result<Self, SharedError> {
        serde_json::from_str(frame)
            .map_err(|e| SharedError::event(format!("unrecognised client event: {}", e)))
    }

    /// Event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Msg(_) => "msg",
            Self::SendTable(_) => "sendTable",
        }
    }
}

impl ServerEvent {
    /// Create a `msg-list` event
    pub fn msg_list(normalizado: NormalizedChat) -> Self {
        Self::MsgList(MsgListPayload { normalizado })
    }

    /// Event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::MsgList(_) => "msg-list",
            Self::Prods(_) => "prods",
        }
    }

    /// Serialize to a websocket text frame
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}
