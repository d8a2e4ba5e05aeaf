/**
 * Chat Pipeline
 *
 * Turns an inbound `msg` event into a `msg-list` broadcast:
 *
 * 1. Stamp the payload with the local date and time, reject it without an email
 * 2. `append` it to the message store
 * 3. `list_all` the full history
 * 4. Normalize the history against `CHAT_SCHEMA`
 * 5. Broadcast `msg-list` to every registered connection
 *
 * Steps 2 to 5 run under one async mutex. Every broadcast therefore contains
 * the message that triggered it and all earlier ones, and broadcasts leave in
 * append order. New connections join under the same lock and get a snapshot
 * of the history before any later broadcast.
 *
 * Any failure stops the sequence before the broadcast and is returned to the
 * caller; nothing is sent to the sender.
 */

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::backend::chat::store::MessageStore;
use crate::backend::error::BackendError;
use crate::backend::realtime::{BroadcastReport, ConnectionId, ConnectionRegistry, OutboundReceiver};
use crate::shared::normalize::{normalize, ChatSchema, NormalizedChat, CHAT_SCHEMA};
use crate::shared::{ChatHistory, ChatMessage, IncomingChatMessage, ServerEvent};

/// Store, normalizer and registry wired together
#[derive(Clone)]
pub struct ChatPipeline {
    store: Arc<dyn MessageStore>,
    registry: Arc<dyn ConnectionRegistry>,
    schema: &'static ChatSchema,
    publish_lock: Arc<Mutex<()>>,
}

impl ChatPipeline {
    pub fn new(store: Arc<dyn MessageStore>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            store,
            registry,
            schema: &CHAT_SCHEMA,
            publish_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The registry this pipeline broadcasts through
    pub fn registry(&self) -> &Arc<dyn ConnectionRegistry> {
        &self.registry
    }

    /// Name of the underlying store backend
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Handle a `msg` event end to end
    ///
    /// # Errors
    ///
    /// - `ValidationError` when the payload has no email; nothing is stored
    /// - `StorageError` when `append` or `list_all` fails; nothing is broadcast
    pub async fn publish(&self, incoming: IncomingChatMessage) -> Result<BroadcastReport, BackendError> {
        let message = ChatMessage::from_incoming(incoming, &Local::now())?;

        let _guard = self.publish_lock.lock().await;

        self.store.append(&message).await?;
        tracing::debug!(
            "[Chat] Appended message from {} to {} store",
            message.author.id,
            self.store.name()
        );

        let normalized = self.load_normalized().await?;
        let report = self.registry.broadcast(ServerEvent::msg_list(normalized));

        tracing::info!(
            "[Chat] msg-list broadcast to {} connections ({} pruned)",
            report.delivered,
            report.failed.len()
        );
        Ok(report)
    }

    /// Register a new connection and queue the current history for it
    ///
    /// Registration and the snapshot happen under the publish lock, so the
    /// snapshot is the first event the connection sees. A failed snapshot is
    /// logged; the connection stays registered.
    pub async fn join(&self) -> (ConnectionId, OutboundReceiver) {
        let _guard = self.publish_lock.lock().await;
        let (connection, outbound) = self.registry.register();
        if let Err(e) = self.send_snapshot(connection).await {
            tracing::warn!("[Chat] Catch-up for {} failed: {}", connection, e);
        }
        (connection, outbound)
    }

    async fn send_snapshot(&self, connection: ConnectionId) -> Result<(), BackendError> {
        let normalized = self.load_normalized().await?;
        self.registry
            .send_to(connection, ServerEvent::msg_list(normalized))?;
        tracing::debug!("[Chat] Sent history snapshot to {}", connection);
        Ok(())
    }

    async fn load_normalized(&self) -> Result<NormalizedChat, BackendError> {
        let history = ChatHistory::new(self.store.list_all().await?);
        Ok(normalize(&history, self.schema)?)
    }
}
