//! Connection-lifecycle state machine for one chat session.
//!
//! Pure event -> commands core: the socket driver feeds transport and UI
//! events in and carries out the returned commands in order. Keeping the
//! lifecycle here makes ordering and idempotence properties unit-testable
//! without a browser.
//!
//! A failed or closed connection leaves the session `Disconnected` and it
//! stays there; there is deliberately no retry or timeout. The hosting view
//! keeps showing its placeholder until remount.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::json;

use crate::config::ChatConfig;
use crate::net::stomp::{Command, Frame};
use crate::state::chat::ChatMessage;
use crate::state::connection::ConnectionStatus;

/// Subscription id registered for the public topic.
const SUBSCRIPTION_ID: &str = "sub-0";

/// Inputs to the session: transport lifecycle plus UI intents.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// UI requested a connection. Absorbed if one is already live or in flight.
    Activate,
    /// The WebSocket opened; time for the STOMP handshake.
    TransportOpen,
    /// A decoded frame arrived from the broker.
    ServerFrame(Frame),
    /// UI submitted outgoing chat text.
    SendChat(String),
    /// The view is unmounting; tear the session down.
    Deactivate,
    /// The WebSocket closed or failed.
    TransportClosed,
}

/// Effects the driver must carry out, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    OpenTransport { url: String },
    SendFrame(Frame),
    Deliver(ChatMessage),
    CloseTransport,
}

/// State machine owning one session's lifecycle and publish gating.
///
/// Instance-scoped: each mounted view constructs its own session, so two
/// mounts never share a transport handle.
pub struct ChatSession {
    config: ChatConfig,
    username: String,
    status: ConnectionStatus,
}

impl ChatSession {
    #[must_use]
    pub fn new(config: ChatConfig, username: String) -> Self {
        Self { config, username, status: ConnectionStatus::Disconnected }
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Advance the session by one event, returning the effects to apply.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::Activate => self.activate(),
            SessionEvent::TransportOpen => self.on_transport_open(),
            SessionEvent::ServerFrame(frame) => self.on_server_frame(&frame),
            SessionEvent::SendChat(text) => self.send_chat(&text),
            SessionEvent::Deactivate => self.deactivate(),
            SessionEvent::TransportClosed => self.on_transport_closed(),
        }
    }

    fn activate(&mut self) -> Vec<SessionCommand> {
        // Idempotent: a live or in-flight session absorbs repeat activations.
        if self.status != ConnectionStatus::Disconnected {
            return Vec::new();
        }
        self.status = ConnectionStatus::Connecting;
        vec![SessionCommand::OpenTransport { url: self.config.endpoint.clone() }]
    }

    fn on_transport_open(&mut self) -> Vec<SessionCommand> {
        if self.status != ConnectionStatus::Connecting {
            return Vec::new();
        }
        vec![SessionCommand::SendFrame(Frame::connect(host_of(&self.config.endpoint)))]
    }

    fn on_server_frame(&mut self, frame: &Frame) -> Vec<SessionCommand> {
        match frame.command {
            Command::Connected => self.on_broker_connected(),
            Command::Message => self.on_topic_message(frame),
            Command::Error => {
                let detail = frame.header("message").unwrap_or(frame.body.as_str());
                leptos::logging::warn!("broker error frame: {detail}");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_broker_connected(&mut self) -> Vec<SessionCommand> {
        if self.status != ConnectionStatus::Connecting {
            return Vec::new();
        }
        self.status = ConnectionStatus::Connected;

        // Subscribe first so the session sees its own JOIN echoed back.
        let join = json!({ "sender": self.username, "type": "JOIN" });
        vec![
            SessionCommand::SendFrame(Frame::subscribe(SUBSCRIPTION_ID, &self.config.topic)),
            SessionCommand::SendFrame(Frame::send_json(
                &self.config.join_destination,
                join.to_string(),
            )),
        ]
    }

    fn on_topic_message(&mut self, frame: &Frame) -> Vec<SessionCommand> {
        if self.status != ConnectionStatus::Connected {
            return Vec::new();
        }
        match serde_json::from_str::<ChatMessage>(&frame.body) {
            Ok(message) => vec![SessionCommand::Deliver(message)],
            Err(e) => {
                leptos::logging::warn!("dropping malformed chat payload: {e}");
                Vec::new()
            }
        }
    }

    fn send_chat(&mut self, text: &str) -> Vec<SessionCommand> {
        let content = text.trim();
        if content.is_empty() || self.status != ConnectionStatus::Connected {
            return Vec::new();
        }
        let body = json!({ "sender": self.username, "content": content, "type": "CHAT" });
        vec![SessionCommand::SendFrame(Frame::send_json(
            &self.config.chat_destination,
            body.to_string(),
        ))]
    }

    fn deactivate(&mut self) -> Vec<SessionCommand> {
        match self.status {
            ConnectionStatus::Disconnected => Vec::new(),
            ConnectionStatus::Connecting => {
                self.status = ConnectionStatus::Disconnected;
                vec![SessionCommand::CloseTransport]
            }
            ConnectionStatus::Connected => {
                self.status = ConnectionStatus::Disconnected;
                // DISCONNECT is best-effort; closing the socket ends the session.
                vec![
                    SessionCommand::SendFrame(Frame::disconnect()),
                    SessionCommand::CloseTransport,
                ]
            }
        }
    }

    fn on_transport_closed(&mut self) -> Vec<SessionCommand> {
        if self.status == ConnectionStatus::Connecting {
            leptos::logging::warn!("chat connect failed; staying disconnected");
        }
        self.status = ConnectionStatus::Disconnected;
        Vec::new()
    }
}

/// Host portion of the endpoint URL, used for the STOMP `host` header.
fn host_of(endpoint: &str) -> &str {
    let tail = endpoint.split_once("://").map_or(endpoint, |(_, tail)| tail);
    let host = tail.split(['/', '?']).next().unwrap_or(tail);
    if host.is_empty() { "/" } else { host }
}
