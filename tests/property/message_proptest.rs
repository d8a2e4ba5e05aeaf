/**
 * Property-Based Tests for Chat Messages
 */

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use storefront::shared::message::{format_timestamp, MAX_AGE};
use storefront::shared::{ChatMessage, IncomingChatMessage};

fn incoming(email: String, mensaje: String) -> IncomingChatMessage {
    IncomingChatMessage {
        email,
        nombre: "Ana".to_string(),
        apellido: "Gomez".to_string(),
        edad: None,
        avatar: String::new(),
        mensaje,
    }
}

proptest! {
    #[test]
    fn prop_blank_email_is_always_rejected(spaces in "[ \t]{0,8}", body in ".{0,40}") {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        prop_assert!(ChatMessage::from_incoming(incoming(spaces, body), &at).is_err());
    }

    #[test]
    fn prop_email_is_trimmed_into_author_id(
        local in "[a-z]{1,10}",
        pad in "[ ]{0,3}",
        body in ".{0,40}",
    ) {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let email = format!("{pad}{local}@x.com{pad}");
        let message = ChatMessage::from_incoming(incoming(email, body.clone()), &at).unwrap();
        prop_assert_eq!(message.author.id, format!("{local}@x.com"));
        prop_assert_eq!(message.text.body, body);
    }

    #[test]
    fn prop_timestamp_components_are_unpadded(
        day in 1u32..=28,
        month in 1u32..=12,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let at = Utc.with_ymd_and_hms(2024, month, day, hour, minute, second).unwrap();
        let (date, time) = format_timestamp(&at);
        prop_assert_eq!(date, format!("{day}/{month}/2024"));
        prop_assert_eq!(time, format!("{hour}:{minute}:{second}"));
    }

    #[test]
    fn prop_age_accepts_numeric_strings(age in 0u32..=MAX_AGE) {
        let frame = serde_json::json!({
            "email": "a@x.com",
            "nombre": "Ana",
            "apellido": "Gomez",
            "edad": age.to_string(),
            "avatar": "",
            "mensaje": "hi"
        });
        let parsed: IncomingChatMessage = serde_json::from_value(frame).unwrap();
        prop_assert_eq!(parsed.edad, Some(age));
    }

    #[test]
    fn prop_age_above_limit_is_rejected(age in (MAX_AGE + 1)..=u32::MAX) {
        let frame = serde_json::json!({
            "email": "a@x.com",
            "nombre": "Ana",
            "apellido": "Gomez",
            "edad": age,
            "avatar": "",
            "mensaje": "hi"
        });
        prop_assert!(serde_json::from_value::<IncomingChatMessage>(frame).is_err());
    }
}
