/// WebSocket wire schema
///
/// Every frame exchanged over `/ws` is a UTF-8 JSON text frame carrying one
/// of two event kinds:
/// - `system`: synthesized by the hub itself (join/leave notices)
/// - `chat`: wraps verbatim text received from a connection, stamped at
///   receipt time
///
/// The serialized shape is part of the client contract and must not drift:
/// `{"type":"system","message":...}` and `{"type":"chat","text":...,"ts":...}`.
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One broadcast event
///
/// Immutable once constructed. `ts` is an ISO-8601 UTC timestamp assigned
/// when the inbound text was received, not when the frame was delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMessage {
    System { message: String },
    Chat { text: String, ts: String },
}

impl EventMessage {
    /// Build a system notice (join/leave)
    pub fn system(message: &str) -> Self {
        EventMessage::System {
            message: message.to_string(),
        }
    }

    /// Wrap inbound chat text, stamping the current UTC time
    pub fn chat(text: String) -> Self {
        EventMessage::Chat {
            text,
            ts: Utc::now().to_rfc3339(),
        }
    }

    /// Serialize to the wire JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_wire_shape() {
        let msg = EventMessage::system("Player joined");
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"system","message":"Player joined"}"#
        );

        let msg = EventMessage::system("Player left");
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"system","message":"Player left"}"#
        );
    }

    #[test]
    fn test_chat_wire_shape() {
        let msg = EventMessage::Chat {
            text: "hello world".to_string(),
            ts: "2024-06-01T12:00:00+00:00".to_string(),
        };
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"chat","text":"hello world","ts":"2024-06-01T12:00:00+00:00"}"#
        );
    }

    #[test]
    fn test_chat_text_is_verbatim() {
        // Inbound text is not parsed or escaped beyond JSON string encoding
        let msg = EventMessage::chat("{\"nested\": \"json\"}".to_string());
        match &msg {
            EventMessage::Chat { text, .. } => assert_eq!(text, "{\"nested\": \"json\"}"),
            _ => panic!("expected chat"),
        }

        let json = msg.to_json().unwrap();
        let parsed: EventMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_chat_timestamp_is_rfc3339() {
        let msg = EventMessage::chat("hi".to_string());
        match msg {
            EventMessage::Chat { ts, .. } => {
                assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_deserialize_tagged_kinds() {
        let msg: EventMessage =
            serde_json::from_str(r#"{"type":"system","message":"Player joined"}"#).unwrap();
        assert_eq!(msg, EventMessage::system("Player joined"));

        let msg: EventMessage =
            serde_json::from_str(r#"{"type":"chat","text":"yo","ts":"2024-06-01T12:00:00+00:00"}"#)
                .unwrap();
        match msg {
            EventMessage::Chat { text, ts } => {
                assert_eq!(text, "yo");
                assert_eq!(ts, "2024-06-01T12:00:00+00:00");
            }
            _ => panic!("expected chat"),
        }
    }
}
