/**
 * Test Fixtures
 *
 * Configuration, state and server builders, plus a message store that
 * always fails.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;

use storefront::backend::chat::{ChatPipeline, MessageStore};
use storefront::backend::error::BackendError;
use storefront::backend::realtime::{ConnectionRegistry, InProcessRegistry};
use storefront::backend::routes::create_router;
use storefront::backend::server::{build_state, AppState};
use storefront::shared::normalize::NormalizedChat;
use storefront::shared::{AppConfig, ChatMessage, IncomingChatMessage, ServerEvent};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Config with a fast bcrypt cost and a fixed JWT secret
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .static_dir("public")
        .build()
        .expect("test config is valid")
}

/// In-memory application state
pub fn test_state() -> AppState {
    build_state(test_config(), None)
}

/// Mock-transport server over the full router
pub fn test_server() -> TestServer {
    TestServer::new(create_router(test_state())).expect("Failed to create test server")
}

/// Real HTTP server, required for websocket tests
pub fn websocket_server() -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(create_router(test_state()))
        .expect("Failed to create websocket test server")
}

/// Pipeline over `store` with a registry the test can register on
pub fn pipeline_with_store(store: Arc<dyn MessageStore>) -> (ChatPipeline, Arc<InProcessRegistry>) {
    let registry = Arc::new(InProcessRegistry::new());
    let shared: Arc<dyn ConnectionRegistry> = registry.clone();
    (ChatPipeline::new(store, shared), registry)
}

/// Application state whose chat pipeline uses `store`
pub fn state_with_store(store: Arc<dyn MessageStore>) -> AppState {
    let mut state = test_state();
    state.chat = pipeline_with_store(store).0;
    state
}

pub fn incoming(email: &str, body: &str) -> IncomingChatMessage {
    IncomingChatMessage {
        email: email.to_string(),
        nombre: "Ana".to_string(),
        apellido: "Gomez".to_string(),
        edad: Some(30),
        avatar: "https://example.com/ana.png".to_string(),
        mensaje: body.to_string(),
    }
}

/// Unwrap a `msg-list` event or fail the test
pub fn expect_msg_list(event: &ServerEvent) -> &NormalizedChat {
    match event {
        ServerEvent::MsgList(payload) => &payload.normalizado,
        other => panic!("Expected msg-list, got {:?}", other),
    }
}

/// Message store whose every call fails
#[derive(Default)]
pub struct FailingStore {
    pub append_calls: AtomicUsize,
}

impl FailingStore {
    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn append(&self, _message: &ChatMessage) -> Result<(), BackendError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        Err(BackendError::storage("disk full"))
    }

    async fn list_all(&self) -> Result<Vec<ChatMessage>, BackendError> {
        Err(BackendError::storage("disk full"))
    }
}
