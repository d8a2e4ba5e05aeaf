/**
 * Chat Pipeline Integration Tests
 *
 * Publish ordering, failure isolation and event dispatch through
 * `dispatch_client_event`, without a real socket.
 */

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;

use storefront::backend::chat::MemoryMessageStore;
use storefront::backend::error::BackendError;
use storefront::backend::realtime::{dispatch_client_event, ConnectionRegistry};
use storefront::shared::{ServerEvent, SharedError};

use crate::common::{
    expect_msg_list, incoming, pipeline_with_store, state_with_store, test_state, FailingStore,
};

#[tokio::test]
async fn test_same_author_messages_collapse_into_one_author() {
    let (pipeline, registry) = pipeline_with_store(Arc::new(MemoryMessageStore::new()));
    let (_id, mut rx) = registry.register();

    pipeline.publish(incoming("a@x.com", "hi")).await.unwrap();
    pipeline.publish(incoming("a@x.com", "yo")).await.unwrap();

    let _first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    let normalized = expect_msg_list(&second);

    assert_eq!(normalized.entities.author.len(), 1);
    let author = normalized.author("a@x.com").unwrap();
    assert_eq!(author.mensajes, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(normalized.entities.mensaje["1"].mensaje, "hi");
    assert_eq!(normalized.entities.mensaje["2"].mensaje, "yo");
    assert_eq!(normalized.root().unwrap().authors, vec!["a@x.com".to_string()]);
}

#[tokio::test]
async fn test_every_connection_receives_the_broadcast() {
    let (pipeline, registry) = pipeline_with_store(Arc::new(MemoryMessageStore::new()));
    let (_a, mut rx_a) = registry.register();
    let (_b, mut rx_b) = registry.register();

    let report = pipeline.publish(incoming("b@x.com", "hola")).await.unwrap();
    assert_eq!(report.delivered, 2);
    assert!(report.failed.is_empty());

    let from_a = rx_a.recv().await.unwrap();
    let from_b = rx_b.recv().await.unwrap();
    assert_eq!(from_a, from_b);
}

#[tokio::test]
async fn test_storage_failure_prevents_broadcast() {
    let store = Arc::new(FailingStore::default());
    let (pipeline, registry) = pipeline_with_store(store.clone());
    let (_id, mut rx) = registry.register();

    let result = pipeline.publish(incoming("a@x.com", "hi")).await;

    assert_matches!(result, Err(BackendError::StorageError { .. }));
    assert_eq!(store.append_calls(), 1);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_missing_email_is_rejected_before_storage() {
    let store = Arc::new(FailingStore::default());
    let (pipeline, registry) = pipeline_with_store(store.clone());
    let (_id, mut rx) = registry.register();

    let result = pipeline.publish(incoming("  ", "anonymous")).await;

    assert_matches!(
        result,
        Err(BackendError::SharedError(SharedError::ValidationError { .. }))
    );
    assert_eq!(store.append_calls(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_concurrent_publishes_broadcast_growing_histories() {
    const PUBLISHES: usize = 20;

    let (pipeline, registry) = pipeline_with_store(Arc::new(MemoryMessageStore::new()));
    let (_id, mut rx) = registry.register();

    let handles: Vec<_> = (0..PUBLISHES)
        .map(|i| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                pipeline
                    .publish(incoming(&format!("user{}@x.com", i % 3), &format!("m{}", i)))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for expected in 1..=PUBLISHES {
        let event = rx.recv().await.unwrap();
        let normalized = expect_msg_list(&event);
        assert_eq!(normalized.entities.mensaje.len(), expected);
        assert_eq!(normalized.root().unwrap().mensajes.len(), expected);
    }
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_dispatch_msg_reaches_registered_connections() {
    let state = test_state();
    let (sender, mut sender_rx) = state.chat.registry().register();
    let (_other, mut other_rx) = state.chat.registry().register();

    let frame = json!({
        "event": "msg",
        "data": {
            "email": "a@x.com",
            "nombre": "Ana",
            "apellido": "Gomez",
            "edad": 30,
            "avatar": "",
            "mensaje": "hi"
        }
    })
    .to_string();
    dispatch_client_event(&state, sender, &frame).await;

    let seen_by_sender = sender_rx.recv().await.unwrap();
    let seen_by_other = other_rx.recv().await.unwrap();
    assert_eq!(seen_by_sender, seen_by_other);
    assert!(expect_msg_list(&seen_by_other).author("a@x.com").is_some());
}

#[tokio::test]
async fn test_dispatch_with_failing_store_sends_nothing() {
    let state = state_with_store(Arc::new(FailingStore::default()));
    let (sender, mut rx) = state.chat.registry().register();

    let frame = json!({
        "event": "msg",
        "data": { "email": "a@x.com", "nombre": "", "apellido": "", "avatar": "", "mensaje": "hi" }
    })
    .to_string();
    dispatch_client_event(&state, sender, &frame).await;

    assert!(rx.try_recv().is_err());
    assert_eq!(state.chat.registry().connection_count(), 1);
}

#[tokio::test]
async fn test_dispatch_rejects_out_of_range_age() {
    let state = test_state();
    let (sender, mut rx) = state.chat.registry().register();

    let frame = json!({
        "event": "msg",
        "data": {
            "email": "a@x.com",
            "nombre": "Ana",
            "apellido": "Gomez",
            "edad": 3_000_000_000u32,
            "avatar": "",
            "mensaje": "hi"
        }
    })
    .to_string();
    dispatch_client_event(&state, sender, &frame).await;
    assert!(rx.try_recv().is_err());

    let (_joined, mut joined_rx) = state.chat.join().await;
    let snapshot = joined_rx.recv().await.unwrap();
    assert!(expect_msg_list(&snapshot).entities.mensaje.is_empty());
}

#[tokio::test]
async fn test_dispatch_ignores_malformed_and_unknown_frames() {
    let state = test_state();
    let (sender, mut rx) = state.chat.registry().register();

    dispatch_client_event(&state, sender, "not json").await;
    dispatch_client_event(&state, sender, r#"{"event":"dance","data":{}}"#).await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_send_table_replies_only_to_sender() {
    let state = test_state();
    let (sender, mut sender_rx) = state.chat.registry().register();
    let (_other, mut other_rx) = state.chat.registry().register();

    let frame = json!({
        "event": "sendTable",
        "data": { "title": "Escuadra", "price": 123.45, "thumbnail": "" }
    })
    .to_string();
    dispatch_client_event(&state, sender, &frame).await;

    let reply = sender_rx.recv().await.unwrap();
    match reply.as_ref() {
        ServerEvent::Prods(products) => {
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].id, 1);
            assert_eq!(products[0].title, "Escuadra");
        }
        other => panic!("Expected prods, got {:?}", other),
    }
    assert!(other_rx.try_recv().is_err());
    assert_eq!(state.products.get_all().await.len(), 1);
}

#[tokio::test]
async fn test_send_table_with_invalid_product_sends_nothing() {
    let state = test_state();
    let (sender, mut rx) = state.chat.registry().register();

    let frame = r#"{"event":"sendTable","data":{"title":"","price":1}}"#;
    dispatch_client_event(&state, sender, frame).await;

    assert!(rx.try_recv().is_err());
    assert!(state.products.get_all().await.is_empty());
}
