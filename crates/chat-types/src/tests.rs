#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::feedback::*;
    use crate::message::*;
    use crate::session::*;
    use crate::wire::*;

    fn stamp(id: &str) -> Stamp {
        Stamp {
            id: MessageId(id.to_string()),
            at: chrono::Utc::now(),
        }
    }

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user(stamp("m1"), "Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert_eq!(msg.id.as_str(), "m1");
        assert!(!msg.is_error);
        assert!(msg.intent.is_none());
        assert!(msg.is_user());
    }

    #[test]
    fn test_message_error_is_bot_styled() {
        let msg = Message::error(stamp("m2"), "Error: boom. Please try again.");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.is_error);
        assert!(!msg.escalated());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = MessageId::random();
        let b = MessageId::random();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("msg-"));
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), r#""bot""#);
    }

    #[test]
    fn test_message_serialization_skips_empty_optionals() {
        let msg = Message::bot(stamp("m3"), "Hi!");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("intent"));
        assert!(!json.contains("escalation_ticket_id"));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_adopts_first_id_only() {
        let mut session = Session::new(ConnectionState::Open);
        assert!(session.adopt("s1"));
        assert!(!session.adopt("s1"));
        assert!(session.conflicting_id.is_none());

        assert!(!session.adopt("s2"));
        assert_eq!(session.session_id.as_deref(), Some("s1"));
        assert_eq!(session.conflicting_id.as_deref(), Some("s2"));
    }

    #[test]
    fn test_connection_state_labels() {
        assert_eq!(ConnectionState::Open.label(), "Connected");
        assert!(Session::new(ConnectionState::Open).is_open());
        assert!(!Session::new(ConnectionState::Connecting).is_open());
    }

    // ─── Feedback Tests ──────────────────────────────────────

    #[test]
    fn test_feedback_prompt_starts_unrated() {
        let prompt = FeedbackPrompt::new(MessageId("m1".to_string()));
        assert_eq!(prompt.rating, 0);
        assert!(prompt.comment.is_empty());
        assert!(!prompt.has_rating());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
    }

    #[test]
    fn test_feedback_stage_visibility() {
        assert!(!FeedbackStage::Hidden.is_visible());
        assert!(FeedbackStage::RatingUnselected.is_visible());
        assert!(FeedbackStage::Submitting.is_visible());
    }

    // ─── Wire Tests ──────────────────────────────────────────

    #[test]
    fn test_chat_request_null_session() {
        let req = ChatRequest {
            message: "Hello".to_string(),
            session_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"message":"Hello","session_id":null}"#);
    }

    #[test]
    fn test_feedback_request_body() {
        let req = FeedbackRequest {
            session_id: "abc".to_string(),
            rating: 4,
            comment: "great".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"session_id": "abc", "rating": 4, "comment": "great"})
        );
    }

    #[test]
    fn test_http_response_into_bot_reply() {
        let raw = r#"{"response_message":"Hi!","session_id":"s1","debug_intent":"greeting","escalated":false,"escalation_ticket_id":null}"#;
        let resp: HttpChatResponse = serde_json::from_str(raw).unwrap();
        let reply = BotReply::from(resp);
        assert_eq!(reply.text, "Hi!");
        assert_eq!(reply.session_id.as_deref(), Some("s1"));
        assert_eq!(reply.intent.as_deref(), Some("greeting"));
        assert!(!reply.escalated);
        assert!(reply.escalation_ticket_id.is_none());
    }

    #[test]
    fn test_ticket_id_accepts_numbers() {
        let raw = r#"{"response_message":"Escalating","session_id":"s1","debug_intent":"complaint","escalated":true,"escalation_ticket_id":42}"#;
        let resp: HttpChatResponse = serde_json::from_str(raw).unwrap();
        let reply = BotReply::from(resp);
        assert_eq!(reply.escalation_ticket_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_socket_outbound_shape() {
        let frame = SocketOutbound {
            text: "Hi".to_string(),
            session_id: Some("s1".to_string()),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"text":"Hi","session_id":"s1"}"#);
    }

    #[test]
    fn test_decode_socket_reply() {
        let raw = r#"{"response":"Sure","intent":"order_status","requires_human_escalation":true,"escalation_ticket_id":"T-42","conversation_id":7}"#;
        match decode_socket_frame(raw).unwrap() {
            ReplyPayload::Reply(reply) => {
                assert_eq!(reply.text, "Sure");
                assert!(reply.escalated);
                assert_eq!(reply.escalation_ticket_id.as_deref(), Some("T-42"));
                assert!(reply.session_id.is_none());
            }
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_decode_socket_error_frame() {
        let raw = r#"{"error":"Text input cannot be empty","conversation_id":3}"#;
        assert_eq!(
            decode_socket_frame(raw).unwrap(),
            ReplyPayload::Error("Text input cannot be empty".to_string())
        );
    }

    #[test]
    fn test_decode_socket_missing_response() {
        let err = decode_socket_frame(r#"{"intent":"greeting"}"#).unwrap_err();
        assert!(matches!(err, ChatError::Protocol(_)));
    }

    #[test]
    fn test_decode_socket_garbage() {
        let err = decode_socket_frame("not json").unwrap_err();
        assert!(matches!(err, ChatError::Protocol(_)));
    }

    #[test]
    fn test_error_detail_fallbacks() {
        assert_eq!(error_detail(500, r#"{"detail":"db down"}"#), "db down");
        assert_eq!(error_detail(502, "<html>"), "HTTP error! status: 502");
        assert_eq!(error_detail(400, r#"{"detail":""}"#), "HTTP error! status: 400");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_names() {
        assert_eq!(ChatEvent::Teardown.name(), "Teardown");
        assert_eq!(
            ChatEvent::UserSubmit { text: "x".to_string() }.name(),
            "UserSubmit"
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = ChatEvent::FeedbackResult { outcome: Err("timeout".to_string()) };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("FeedbackResult"));
        assert!(json.contains("timeout"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.ws_url, "ws://localhost:8000/ws");
        assert_eq!(config.transport, TransportKind::Socket);
        assert!(!config.reconnect.enabled());
        assert!(config.welcome_message.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let mut config = ClientConfig::default();
        assert_eq!(config.chat_url(), "http://localhost:8000/api/v1/chat");
        assert_eq!(config.feedback_url(), "http://localhost:8000/api/v1/feedback");

        config.api_prefix = String::new();
        config.api_base_url = "http://example.test/".to_string();
        assert_eq!(config.chat_url(), "http://example.test/chat");

        config.api_prefix = "v2".to_string();
        assert_eq!(config.feedback_url(), "http://example.test/v2/feedback");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();
        config.ws_url = "http://nope".to_string();
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));

        config.transport = TransportKind::HttpPolling;
        assert!(config.validate().is_ok());

        config.api_base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_transport_kind_parse() {
        assert_eq!(TransportKind::parse("http"), Some(TransportKind::HttpPolling));
        assert_eq!(TransportKind::parse(" WebSocket "), Some(TransportKind::Socket));
        assert_eq!(TransportKind::parse("carrier-pigeon"), None);
    }

    #[test]
    fn test_reconnect_backoff() {
        let policy = ReconnectPolicy {
            max_attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 3_000,
        };
        assert_eq!(policy.delay_for(0), Some(500));
        assert_eq!(policy.delay_for(1), Some(1_000));
        assert_eq!(policy.delay_for(2), Some(2_000));
        assert_eq!(policy.delay_for(3), Some(3_000));
        assert_eq!(policy.delay_for(5), None);
        assert_eq!(ReconnectPolicy::default().delay_for(0), None);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            ChatError::Network("offline".to_string()).to_string(),
            "Network error: offline"
        );
        assert_eq!(
            ChatError::TransportClosed.to_string(),
            "Not connected to the chat server"
        );
        assert_eq!(ChatError::Network("offline".to_string()).user_detail(), "offline");
        assert_eq!(
            ChatError::Protocol("bad".to_string()).user_detail(),
            "Protocol error: bad"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
