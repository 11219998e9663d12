use super::*;

// =============================================================
// ChatState defaults
// =============================================================

#[test]
fn chat_state_default_empty_messages() {
    let state = ChatState::default();
    assert!(state.messages.is_empty());
}

// =============================================================
// Wire shape
// =============================================================

#[test]
fn message_kind_uses_wire_tags() {
    assert_eq!(serde_json::to_string(&MessageKind::Join).expect("json"), "\"JOIN\"");
    assert_eq!(serde_json::to_string(&MessageKind::Chat).expect("json"), "\"CHAT\"");
}

#[test]
fn chat_message_parses_wire_shape() {
    let msg: ChatMessage =
        serde_json::from_str(r#"{"sender":"alice","content":"hi","type":"CHAT"}"#).expect("parse");
    assert_eq!(
        msg,
        ChatMessage {
            sender: "alice".to_owned(),
            content: "hi".to_owned(),
            kind: MessageKind::Chat,
        }
    );
}

#[test]
fn join_message_defaults_missing_content_to_empty() {
    let msg: ChatMessage =
        serde_json::from_str(r#"{"sender":"bob","type":"JOIN"}"#).expect("parse");
    assert_eq!(msg.kind, MessageKind::Join);
    assert!(msg.content.is_empty());
}

#[test]
fn unknown_type_tag_fails_to_parse() {
    let result = serde_json::from_str::<ChatMessage>(r#"{"sender":"a","type":"LEAVE"}"#);
    assert!(result.is_err());
}
