/**
 * Property-Based Tests for Chat Normalization
 *
 * Checks the normalized graph against arbitrary histories drawn from a small
 * pool of authors, so repeated emails are common.
 */

use std::collections::BTreeSet;

use proptest::prelude::*;

use storefront::shared::message::{ChatAuthor, ChatMessage, ChatText};
use storefront::shared::normalize::{normalize, CHAT_SCHEMA};
use storefront::shared::ChatHistory;

fn message_strategy() -> impl Strategy<Value = ChatMessage> {
    (
        prop::sample::select(vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"]),
        "[A-Za-z]{1,10}",
        prop::option::of(0u32..120),
        "[ -~]{0,40}",
    )
        .prop_map(|(email, name, age, body)| ChatMessage {
            author: ChatAuthor {
                id: email.to_string(),
                name,
                surname: "Perez".to_string(),
                age,
                avatar: String::new(),
            },
            text: ChatText {
                body,
                date: "16/10/2024".to_string(),
                time: "12:0:0".to_string(),
            },
        })
}

fn history_strategy() -> impl Strategy<Value = ChatHistory> {
    prop::collection::vec(message_strategy(), 0..40).prop_map(ChatHistory::new)
}

proptest! {
    #[test]
    fn prop_one_author_per_distinct_email(history in history_strategy()) {
        let normalized = normalize(&history, &CHAT_SCHEMA).unwrap();

        let emails: BTreeSet<&str> = history
            .messages
            .iter()
            .map(|m| m.author.id.as_str())
            .collect();
        prop_assert_eq!(normalized.entities.author.len(), emails.len());
        prop_assert_eq!(normalized.root().unwrap().authors.len(), emails.len());
    }

    #[test]
    fn prop_every_message_belongs_to_exactly_one_author(history in history_strategy()) {
        let normalized = normalize(&history, &CHAT_SCHEMA).unwrap();

        let total: usize = normalized
            .entities
            .author
            .values()
            .map(|author| author.mensajes.len())
            .sum();
        prop_assert_eq!(total, history.messages.len());
        prop_assert_eq!(normalized.entities.mensaje.len(), history.messages.len());
    }

    #[test]
    fn prop_root_lists_positions_in_order(history in history_strategy()) {
        let normalized = normalize(&history, &CHAT_SCHEMA).unwrap();

        let expected: Vec<String> = (1..=history.messages.len()).map(|i| i.to_string()).collect();
        prop_assert_eq!(&normalized.root().unwrap().mensajes, &expected);
    }

    #[test]
    fn prop_author_messages_are_ascending(history in history_strategy()) {
        let normalized = normalize(&history, &CHAT_SCHEMA).unwrap();

        for author in normalized.entities.author.values() {
            let positions: Vec<usize> = author
                .mensajes
                .iter()
                .map(|key| key.parse().unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn prop_message_bodies_survive(history in history_strategy()) {
        let normalized = normalize(&history, &CHAT_SCHEMA).unwrap();

        for (position, message) in history.messages.iter().enumerate() {
            let key = (position + 1).to_string();
            prop_assert_eq!(&normalized.entities.mensaje[&key].mensaje, &message.text.body);
        }
    }

    #[test]
    fn prop_serialization_is_deterministic(history in history_strategy()) {
        let first = serde_json::to_string(&normalize(&history, &CHAT_SCHEMA).unwrap()).unwrap();
        let second = serde_json::to_string(&normalize(&history, &CHAT_SCHEMA).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
