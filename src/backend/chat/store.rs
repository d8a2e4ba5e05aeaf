/**
 * Message Store
 *
 * Append-only persistence for chat messages. The pipeline appends one message
 * per `msg` event and then reads the whole history back.
 *
 * Two backends implement `MessageStore`:
 * - `MemoryMessageStore` - process memory, used when no database is configured
 * - `PgMessageStore` (in `chat::db`) - PostgreSQL via sqlx
 */

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::error::BackendError;
use crate::shared::ChatMessage;

/// Append-only chat message persistence
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Backend name, for logging
    fn name(&self) -> &'static str;

    /// Persist one message
    ///
    /// # Errors
    ///
    /// `BackendError::StorageError` when the backend cannot be reached. No
    /// retry and no buffering.
    async fn append(&self, message: &ChatMessage) -> Result<(), BackendError>;

    /// Every stored message, in insertion order
    async fn list_all(&self) -> Result<Vec<ChatMessage>, BackendError>;
}

/// In-memory message store
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: RwLock<Vec<ChatMessage>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn append(&self, message: &ChatMessage) -> Result<(), BackendError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ChatMessage>, BackendError> {
        Ok(self.messages.read().await.clone())
    }
}
