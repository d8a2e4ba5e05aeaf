/**
 * WebSocket Transport
 *
 * `GET /ws` upgrades to a websocket speaking JSON event envelopes.
 *
 * # Connection Lifecycle
 *
 * 1. Join the chat: register and receive a `msg-list` snapshot of the
 *    current history (catch-up)
 * 2. Handle inbound frames one at a time, in arrival order
 * 3. Unregister on close or read error, or once the registry has dropped
 *    the connection for falling behind
 *
 * Outbound events are written by a dedicated task draining the connection's
 * registry channel, so a broadcast never waits on this socket.
 *
 * # Error Handling
 *
 * Failures while handling an event are logged and swallowed. The sender gets
 * no error frame and the connection stays open.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};

use crate::backend::error::BackendError;
use crate::backend::realtime::registry::ConnectionId;
use crate::backend::server::state::AppState;
use crate::shared::{ClientEvent, NewProduct, ServerEvent};

/// Upgrade handler for `GET /ws`
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_connection(socket, state))
}

async fn serve_connection(socket: WebSocket, state: AppState) {
    let (connection, mut outbound) = state.chat.join().await;
    let (mut sender, mut receiver) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let frame = match event.to_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to encode '{}': {}", event.name(), e);
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    dispatch_client_event(&state, connection, text.as_str()).await
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("[Realtime] Read error on {}: {}", connection, e);
                    break;
                }
            },
            _ = &mut writer => {
                tracing::info!("[Realtime] Outbound stream for {} ended; closing", connection);
                break;
            }
        }
    }

    state.chat.registry().unregister(connection);
    writer.abort();
}

/// Handle one inbound text frame from `connection`
///
/// Never fails: malformed frames, unknown events and pipeline errors are
/// logged and dropped.
pub async fn dispatch_client_event(state: &AppState, connection: ConnectionId, frame: &str) {
    let event = match ClientEvent::from_frame(frame) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("[Realtime] Ignoring frame from {}: {}", connection, e);
            return;
        }
    };

    let name = event.name();
    let result = match event {
        ClientEvent::Msg(incoming) => state.chat.publish(incoming).await.map(|_| ()),
        ClientEvent::SendTable(product) => send_table(state, connection, product).await,
    };

    if let Err(e) = result {
        if e.is_validation() {
            tracing::warn!("[Realtime] Rejected '{}' from {}: {}", name, connection, e);
        } else {
            tracing::error!("[Realtime] Handling '{}' from {} failed: {}", name, connection, e);
        }
    }
}

/// Save a product and reply to the sender alone with the full list
async fn send_table(
    state: &AppState,
    connection: ConnectionId,
    product: NewProduct,
) -> Result<(), BackendError> {
    let saved = state.products.save(product).await?;
    tracing::info!("[Realtime] Product {} saved via sendTable", saved.id);

    let products = state.products.get_all().await;
    state.chat.registry().send_to(connection, ServerEvent::Prods(products))
}
