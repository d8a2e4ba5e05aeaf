//! Entity schema for chat normalization
//!
//! The schema is declared once as a constant and shared by every
//! normalization call. It names the three entity kinds, how each one derives
//! its key, and which relationships are replaced by keys.

/// How an entity derives its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Key is read from the named field of the record
    Field(&'static str),
    /// Key is the 1-based position of the record in the history
    Sequence,
}

/// A single entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    /// Entity name; qualifies the field named in validation errors
    /// (`author.id`). The output tables themselves are fixed struct fields.
    pub key: &'static str,
    /// Key derivation
    pub id: IdStrategy,
}

/// Relationship layout of the chat graph
///
/// `chat` -> many `author` (by email) -> many `mensaje` (by position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSchema {
    pub mensaje: EntitySchema,
    pub author: EntitySchema,
    pub chat: EntitySchema,
}

/// The chat schema used across the application
pub const CHAT_SCHEMA: ChatSchema = ChatSchema {
    mensaje: EntitySchema {
        key: "mensaje",
        id: IdStrategy::Sequence,
    },
    author: EntitySchema {
        key: "author",
        id: IdStrategy::Field("id"),
    },
    chat: EntitySchema {
        key: "chat",
        id: IdStrategy::Field("id"),
    },
};

impl EntitySchema {
    /// Name of the identity field, for error reporting
    pub fn id_field(&self) -> String {
        match self.id {
            IdStrategy::Field(field) => format!("{}.{}", self.key, field),
            IdStrategy::Sequence => format!("{}.<position>", self.key),
        }
    }

    /// Key for a record at `position` (0-based) whose identity field is `field_value`
    pub fn key_for(&self, position: usize, field_value: &str) -> String {
        match self.id {
            IdStrategy::Field(_) => field_value.to_string(),
            IdStrategy::Sequence => (position + 1).to_string(),
        }
    }
}
