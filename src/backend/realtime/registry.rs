/**
 * Connection Registry
 *
 * Tracks every live real-time connection and fans server events out to them.
 *
 * Each registered connection owns the receiving half of a channel holding at
 * most `OUTBOUND_CAPACITY` events; the websocket writer task drains it.
 * Broadcasting never waits on a client. A send either lands in the channel or
 * fails because the receiver is gone or the queue is full, and in both cases
 * the connection is pruned. Every `msg-list` carries the full history, so a
 * reader that stalls long enough to fill its queue is dropped rather than
 * allowed to grow memory.
 *
 * The registry is a trait object (`Arc<dyn ConnectionRegistry>`) so the chat
 * pipeline can be driven in tests without sockets.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::ServerEvent;

/// Identifier of a registered connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Events a connection may have queued before it is considered stalled
pub const OUTBOUND_CAPACITY: usize = 256;

/// Events queued for one connection
pub type OutboundReceiver = mpsc::Receiver<Arc<ServerEvent>>;

type OutboundSender = mpsc::Sender<Arc<ServerEvent>>;

/// Outcome of a broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the event was queued for
    pub delivered: usize,
    /// Connections found closed or stalled, and pruned
    pub failed: Vec<ConnectionId>,
}

/// Registry of active real-time connections
pub trait ConnectionRegistry: Send + Sync {
    /// Register a new connection and return the stream of events addressed to it
    fn register(&self) -> (ConnectionId, OutboundReceiver);

    /// Forget a connection; unknown ids are ignored
    fn unregister(&self, id: ConnectionId);

    /// Queue `event` for every registered connection
    ///
    /// Best effort and at most once. Closed or stalled connections are
    /// reported in `failed` and removed.
    fn broadcast(&self, event: ServerEvent) -> BroadcastReport;

    /// Queue `event` for a single connection
    fn send_to(&self, id: ConnectionId, event: ServerEvent) -> Result<(), BackendError>;

    /// Number of registered connections
    fn connection_count(&self) -> usize;
}

/// Registry for connections served by this process
#[derive(Default)]
pub struct InProcessRegistry {
    connections: Mutex<HashMap<ConnectionId, OutboundSender>>,
}

impl InProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn connections(&self) -> MutexGuard<'_, HashMap<ConnectionId, OutboundSender>> {
        // The map holds no invariants a panicking holder could break.
        self.connections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn delivery_error<T>(id: ConnectionId, err: &TrySendError<T>) -> BackendError {
    match err {
        TrySendError::Full(_) => BackendError::transport(format!("connection {} is not keeping up", id)),
        TrySendError::Closed(_) => BackendError::transport(format!("connection {} is closed", id)),
    }
}

impl ConnectionRegistry for InProcessRegistry {
    fn register(&self) -> (ConnectionId, OutboundReceiver) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let count = {
            let mut connections = self.connections();
            connections.insert(id, tx);
            connections.len()
        };
        tracing::info!("[Realtime] Connection {} registered ({} active)", id, count);
        (id, rx)
    }

    fn unregister(&self, id: ConnectionId) {
        let (removed, count) = {
            let mut connections = self.connections();
            let removed = connections.remove(&id).is_some();
            (removed, connections.len())
        };
        if removed {
            tracing::info!("[Realtime] Connection {} unregistered ({} active)", id, count);
        }
    }

    fn broadcast(&self, event: ServerEvent) -> BroadcastReport {
        let event = Arc::new(event);
        let mut report = BroadcastReport::default();
        let mut connections = self.connections();

        let mut failures = Vec::new();
        for (id, tx) in connections.iter() {
            match tx.try_send(Arc::clone(&event)) {
                Ok(()) => report.delivered += 1,
                Err(e) => failures.push((*id, delivery_error(*id, &e))),
            }
        }
        for (id, err) in failures {
            connections.remove(&id);
            tracing::warn!("[Realtime] {}; pruned", err);
            report.failed.push(id);
        }
        drop(connections);

        tracing::info!(
            "[Realtime] Event '{}' broadcast to {} connections",
            event.name(),
            report.delivered
        );
        report
    }

    fn send_to(&self, id: ConnectionId, event: ServerEvent) -> Result<(), BackendError> {
        let mut connections = self.connections();
        let Some(tx) = connections.get(&id) else {
            return Err(BackendError::transport(format!("connection {} is not registered", id)));
        };
        let name = event.name();
        if let Err(e) = tx.try_send(Arc::new(event)) {
            let err = delivery_error(id, &e);
            connections.remove(&id);
            tracing::warn!("[Realtime] {}; pruned", err);
            return Err(err);
        }
        tracing::debug!("[Realtime] Event '{}' sent to {}", name, id);
        Ok(())
    }

    fn connection_count(&self) -> usize {
        self.connections().len()
    }
}
