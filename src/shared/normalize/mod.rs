//! Chat History Normalization
//!
//! Flattens a `ChatHistory` into an entity graph so clients receive each
//! author's profile once, however many messages that author sent.
//!
//! # Output Shape
//!
//! ```json
//! {
//!   "entities": {
//!     "mensaje": { "1": { "id": "1", "mensaje": "hi", "fecha": "5/3/2024", "hora": "9:7:3" } },
//!     "author":  { "a@x.com": { "id": "a@x.com", "nombre": "Ana", "mensajes": ["1"], ... } },
//!     "chat":    { "chatHistory": { "id": "chatHistory", "authors": ["a@x.com"], "mensajes": ["1"] } }
//!   },
//!   "result": "chatHistory"
//! }
//! ```
//!
//! # Guarantees
//!
//! - Authors are deduplicated by email; an author references all of its messages
//!   in history order.
//! - Tables are ordered maps, so equal input serializes to identical bytes.
//! - A message without an author email fails the whole call with a
//!   validation error; nothing partial is returned.

/// Entity schema declaration
pub mod schema;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::message::ChatHistory;

pub use schema::{ChatSchema, EntitySchema, IdStrategy, CHAT_SCHEMA};

/// A message body block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MensajeEntity {
    pub id: String,
    pub mensaje: String,
    pub fecha: String,
    pub hora: String,
}

/// An author, holding keys of its messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorEntity {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub edad: Option<u32>,
    pub avatar: String,
    pub mensajes: Vec<String>,
}

/// The chat root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEntity {
    pub id: String,
    /// Author keys, each once, in order of first appearance
    pub authors: Vec<String>,
    /// Message keys in history order
    pub mensajes: Vec<String>,
}

/// Entity tables of a normalized chat
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEntities {
    pub mensaje: BTreeMap<String, MensajeEntity>,
    pub author: BTreeMap<String, AuthorEntity>,
    pub chat: BTreeMap<String, ChatEntity>,
}

/// Result of normalizing a chat history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedChat {
    pub entities: ChatEntities,
    /// Key of the root `chat` entity
    pub result: String,
}

impl NormalizedChat {
    /// The root chat entity
    pub fn root(&self) -> Option<&ChatEntity> {
        self.entities.chat.get(&self.result)
    }

    /// Look up an author by email
    pub fn author(&self, email: &str) -> Option<&AuthorEntity> {
        self.entities.author.get(email)
    }
}

/// Normalize a chat history against `schema`
///
/// # Errors
///
/// Returns `SharedError::ValidationError` when any message has an empty
/// author email.
///
/// # Example
///
/// ```rust
/// use storefront::shared::message::ChatHistory;
/// use storefront::shared::normalize::{normalize, CHAT_SCHEMA};
///
/// let normalized = normalize(&ChatHistory::new(Vec::new()), &CHAT_SCHEMA).unwrap();
/// assert_eq!(normalized.result, "chatHistory");
/// assert!(normalized.entities.author.is_empty());
/// ```
pub fn normalize(history: &ChatHistory, schema: &ChatSchema) -> Result<NormalizedChat, SharedError> {
    let mut entities = ChatEntities::default();
    let mut author_order: Vec<String> = Vec::new();
    let mut message_order: Vec<String> = Vec::with_capacity(history.messages.len());

    for (position, message) in history.messages.iter().enumerate() {
        let email = message.author.id.trim();
        if email.is_empty() {
            return Err(SharedError::validation(
                schema.author.id_field(),
                format!("message {} has no author email", position + 1),
            ));
        }

        let mensaje_key = schema.mensaje.key_for(position, "");
        let author_key = schema.author.key_for(position, email);

        entities.mensaje.insert(
            mensaje_key.clone(),
            MensajeEntity {
                id: mensaje_key.clone(),
                mensaje: message.text.body.clone(),
                fecha: message.text.date.clone(),
                hora: message.text.time.clone(),
            },
        );

        let mut mensajes = match entities.author.remove(&author_key) {
            Some(existing) => existing.mensajes,
            None => {
                author_order.push(author_key.clone());
                Vec::new()
            }
        };
        mensajes.push(mensaje_key.clone());

        // Latest profile data wins for a repeated email.
        entities.author.insert(
            author_key.clone(),
            AuthorEntity {
                id: author_key,
                nombre: message.author.name.clone(),
                apellido: message.author.surname.clone(),
                edad: message.author.age,
                avatar: message.author.avatar.clone(),
                mensajes,
            },
        );

        message_order.push(mensaje_key);
    }

    let chat_key = schema.chat.key_for(0, &history.id);
    entities.chat.insert(
        chat_key.clone(),
        ChatEntity {
            id: chat_key.clone(),
            authors: author_order,
            mensajes: message_order,
        },
    );

    Ok(NormalizedChat {
        entities,
        result: chat_key,
    })
}
