use super::*;

// =============================================================
// Frame builders
// =============================================================

#[test]
fn connect_frame_carries_required_headers() {
    let frame = Frame::connect("localhost:8090");
    assert_eq!(frame.command, Command::Connect);
    assert_eq!(frame.header("accept-version"), Some("1.2"));
    assert_eq!(frame.header("host"), Some("localhost:8090"));
    assert_eq!(frame.header("heart-beat"), Some("0,0"));
}

#[test]
fn send_json_frame_records_content_length() {
    let frame = Frame::send_json("/app/chat.sendMessage", r#"{"a":1}"#.to_owned());
    assert_eq!(frame.header("content-type"), Some("application/json"));
    assert_eq!(frame.header("content-length"), Some("7"));
}

// =============================================================
// Encoding
// =============================================================

#[test]
fn encode_terminates_with_nul() {
    let text = encode_frame(&Frame::disconnect());
    assert_eq!(text, "DISCONNECT\n\n\0");
}

#[test]
fn send_frame_round_trips() {
    let frame = Frame::send_json("/app/chat.sendMessage", r#"{"sender":"alice"}"#.to_owned());
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded, frame);
}

#[test]
fn header_escaping_round_trips_special_characters() {
    let mut frame = Frame::subscribe("sub-0", "/topic/public");
    frame.headers.push(("note".to_owned(), "a:b\nc\\d".to_owned()));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.header("note"), Some("a:b\nc\\d"));
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn decode_message_frame_extracts_headers_and_body() {
    let text =
        "MESSAGE\ndestination:/topic/public\nmessage-id:7\nsubscription:sub-0\n\n{\"sender\":\"bob\"}\0";
    let frame = decode_frame(text).expect("decode");
    assert_eq!(frame.command, Command::Message);
    assert_eq!(frame.header("destination"), Some("/topic/public"));
    assert_eq!(frame.header("message-id"), Some("7"));
    assert_eq!(frame.body, r#"{"sender":"bob"}"#);
}

#[test]
fn decode_accepts_crlf_line_endings() {
    let text = "CONNECTED\r\nversion:1.2\r\n\r\n\0";
    let frame = decode_frame(text).expect("decode");
    assert_eq!(frame.command, Command::Connected);
    assert_eq!(frame.header("version"), Some("1.2"));
    assert!(frame.body.is_empty());
}

#[test]
fn connected_frame_headers_are_not_unescaped() {
    let text = "CONNECTED\nversion:1.2\nserver:RabbitMQ\\3.13\n\n\0";
    let frame = decode_frame(text).expect("decode");
    assert_eq!(frame.header("server"), Some("RabbitMQ\\3.13"));
}

#[test]
fn decode_rejects_unknown_command() {
    let err = decode_frame("WIBBLE\n\n\0").expect_err("unknown command");
    assert!(matches!(err, CodecError::UnknownCommand(_)));
}

#[test]
fn decode_rejects_missing_separator() {
    let err = decode_frame("MESSAGE\ndestination:/topic/public\0").expect_err("no separator");
    assert!(matches!(err, CodecError::MissingSeparator));
}

#[test]
fn decode_rejects_malformed_header_line() {
    let err = decode_frame("MESSAGE\nno-colon-here\n\nbody\0").expect_err("malformed header");
    assert!(matches!(err, CodecError::MalformedHeader(_)));
}

#[test]
fn decode_rejects_invalid_escape() {
    let err = decode_frame("MESSAGE\nnote:bad\\x\n\nbody\0").expect_err("invalid escape");
    assert!(matches!(err, CodecError::InvalidEscape));
}

#[test]
fn empty_payload_is_not_a_frame() {
    assert!(matches!(decode_frame("\0"), Err(CodecError::Empty)));
    assert!(matches!(decode_frame("\n"), Err(CodecError::Empty)));
}

// =============================================================
// Heart-beats
// =============================================================

#[test]
fn heartbeat_detection() {
    assert!(is_heartbeat("\n"));
    assert!(is_heartbeat("\r\n"));
    assert!(is_heartbeat(""));
    assert!(!is_heartbeat("MESSAGE"));
}
