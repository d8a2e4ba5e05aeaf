/**
 * Chat Message Data Structures
 *
 * This module defines the persisted chat record (`ChatMessage`), the payload a
 * client sends with a `msg` event (`IncomingChatMessage`) and the ephemeral
 * `ChatHistory` rebuilt from the store before every broadcast.
 *
 * Field names on the wire follow the storefront's browser client
 * (`nombre`, `apellido`, `edad`, `mensaje`, `fecha`, `hora`), while the Rust
 * side uses English names.
 */
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::error::SharedError;

/// Identifier of the singleton chat history root
pub const CHAT_HISTORY_ID: &str = "chatHistory";

/// Largest accepted `edad`
pub const MAX_AGE: u32 = 150;

/// Author block of a chat message
///
/// `id` carries the author's email and is the deduplication key used by the
/// normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatAuthor {
    /// Author email, used as identity
    pub id: String,
    /// First name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Surname
    #[serde(rename = "apellido")]
    pub surname: String,
    /// Age, when the client provided one
    #[serde(rename = "edad", default, deserialize_with = "deserialize_age")]
    pub age: Option<u32>,
    /// Avatar URL
    pub avatar: String,
}

/// Text block of a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatText {
    /// Message body
    #[serde(rename = "mensaje")]
    pub body: String,
    /// Local date, `D/M/YYYY` without padding
    #[serde(rename = "fecha")]
    pub date: String,
    /// Local time, `H:M:S` without padding
    #[serde(rename = "hora")]
    pub time: String,
}

/// A persisted chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: ChatText,
}

/// Payload of an inbound `msg` event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomingChatMessage {
    /// Author email; becomes `author.id`
    #[serde(default)]
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub edad: Option<u32>,
    pub avatar: String,
    pub mensaje: String,
}

/// Full chat history, recomputed for every broadcast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatHistory {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatAuthor {
    /// Check the author carries a usable identity
    ///
    /// An empty email would merge unrelated users into one author entity, so
    /// it is rejected instead.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.id.trim().is_empty() {
            return Err(SharedError::validation(
                "author.id",
                "author email must not be empty",
            ));
        }
        if let Some(age) = self.age.filter(|age| *age > MAX_AGE) {
            return Err(SharedError::validation(
                "author.edad",
                format!("age must be at most {MAX_AGE}, got {age}"),
            ));
        }
        Ok(())
    }
}

impl ChatMessage {
    /// Build a message stamped with the given instant
    ///
    /// # Errors
    ///
    /// Returns a validation error when the payload has no email.
    pub fn from_incoming<Tz: TimeZone>(
        incoming: IncomingChatMessage,
        at: &DateTime<Tz>,
    ) -> Result<Self, SharedError> {
        let (date, time) = format_timestamp(at);
        let message = Self {
            author: ChatAuthor {
                id: incoming.email.trim().to_string(),
                name: incoming.nombre,
                surname: incoming.apellido,
                age: incoming.edad,
                avatar: incoming.avatar,
            },
            text: ChatText {
                body: incoming.mensaje,
                date,
                time,
            },
        };
        message.author.validate()?;
        Ok(message)
    }
}

impl ChatHistory {
    /// Wrap stored messages under the fixed history id
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            id: CHAT_HISTORY_ID.to_string(),
            messages,
        }
    }
}

/// Format an instant as the `(fecha, hora)` pair shown in the chat
///
/// Components are not zero padded: 5 March 2024 at 09:07:03 becomes
/// `("5/3/2024", "9:7:3")`.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> (String, String) {
    let date = format!("{}/{}/{}", at.day(), at.month(), at.year());
    let time = format!("{}:{}:{}", at.hour(), at.minute(), at.second());
    (date, time)
}

/// Accept an age sent as a number, a numeric string, an empty string or null
///
/// Ages above `MAX_AGE` are rejected.
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(u32),
        Text(String),
    }

    let age = match Option::<RawAge>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawAge::Number(age)) => age,
        Some(RawAge::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(RawAge::Text(text)) => text
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid age: {text}")))?,
    };

    if age > MAX_AGE {
        return Err(serde::de::Error::custom(format!(
            "age must be at most {MAX_AGE}, got {age}"
        )));
    }
    Ok(Some(age))
}
