//! Browser transport driver for the chat session.
//!
//! Each mounted view gets one driver task: it opens the WebSocket, pumps
//! STOMP frames through the [`ChatSession`] state machine, and applies the
//! resulting commands to the Leptos signals. There is no reconnect loop; a
//! failed or closed transport leaves the session disconnected until the view
//! is remounted.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.
//!
//! [`ChatSession`]: crate::net::session::ChatSession

use leptos::prelude::RwSignal;

use crate::config::ChatConfig;
use crate::state::chat::ChatState;
use crate::state::connection::ConnectionStatus;

#[cfg(feature = "hydrate")]
use crate::net::session::{ChatSession, SessionCommand, SessionEvent};
#[cfg(feature = "hydrate")]
use crate::net::stomp::{decode_frame, encode_frame, is_heartbeat};
#[cfg(feature = "hydrate")]
use leptos::prelude::{Set, Update};

/// UI intents forwarded to the driver task.
#[cfg(feature = "hydrate")]
enum UiCommand {
    SendChat(String),
    Deactivate,
}

/// Handle to one mounted view's session driver.
///
/// Owned by the view instance. The view calls [`ChatHandle::deactivate`] on
/// cleanup, which tears down the transport deterministically.
#[derive(Clone)]
pub struct ChatHandle {
    #[cfg(feature = "hydrate")]
    tx: futures::channel::mpsc::UnboundedSender<UiCommand>,
}

impl ChatHandle {
    /// Publish chat text through the session. Dropped by the state machine
    /// when the text is blank or the session is not connected.
    pub fn send_chat(&self, text: String) {
        #[cfg(feature = "hydrate")]
        {
            let _ = self.tx.unbounded_send(UiCommand::SendChat(text));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = text;
        }
    }

    /// Tear down the session and its transport. Idempotent.
    pub fn deactivate(&self) {
        #[cfg(feature = "hydrate")]
        {
            let _ = self.tx.unbounded_send(UiCommand::Deactivate);
        }
    }
}

/// Start one session driver bound to the view's signals.
///
/// Outside the browser this returns an inert handle and touches nothing.
pub fn connect(
    config: ChatConfig,
    username: String,
    status: RwSignal<ConnectionStatus>,
    chat: RwSignal<ChatState>,
) -> ChatHandle {
    #[cfg(feature = "hydrate")]
    {
        let (tx, rx) = futures::channel::mpsc::unbounded();
        leptos::task::spawn_local(drive(config, username, status, chat, rx));
        ChatHandle { tx }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, username, status, chat);
        ChatHandle {}
    }
}

/// Inputs multiplexed by the driver loop.
#[cfg(feature = "hydrate")]
enum Input {
    Transport(Result<gloo_net::websocket::Message, gloo_net::websocket::WebSocketError>),
    Ui(UiCommand),
}

/// Single connection attempt: handshake, pump, teardown.
#[cfg(feature = "hydrate")]
async fn drive(
    config: ChatConfig,
    username: String,
    status: RwSignal<ConnectionStatus>,
    chat: RwSignal<ChatState>,
    rx: futures::channel::mpsc::UnboundedReceiver<UiCommand>,
) {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let mut session = ChatSession::new(config, username);

    let mut startup = session.handle(SessionEvent::Activate);
    status.set(session.status());
    // A fresh session always asks for exactly one transport.
    let Some(SessionCommand::OpenTransport { url }) = startup.pop() else {
        return;
    };

    let ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(e) => {
            leptos::logging::warn!("chat transport failed to open: {e}");
            session.handle(SessionEvent::TransportClosed);
            status.set(session.status());
            return;
        }
    };
    let (mut ws_write, ws_read) = ws.split();

    // Outgoing frames funnel through one channel so a single task owns the
    // write half and sends stay ordered.
    let (out_tx, mut out_rx) = futures::channel::mpsc::unbounded::<String>();

    let send_task = async {
        use futures::SinkExt;
        while let Some(text) = out_rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let drive_task = async {
        let mut inputs = futures::stream::select(ws_read.map(Input::Transport), rx.map(Input::Ui));

        for command in session.handle(SessionEvent::TransportOpen) {
            apply(command, &out_tx, chat);
        }
        status.set(session.status());

        while let Some(input) = inputs.next().await {
            let commands = match input {
                Input::Transport(Ok(Message::Text(text))) => {
                    if is_heartbeat(&text) {
                        continue;
                    }
                    match decode_frame(&text) {
                        Ok(frame) => session.handle(SessionEvent::ServerFrame(frame)),
                        Err(e) => {
                            leptos::logging::warn!("unreadable broker frame: {e}");
                            continue;
                        }
                    }
                }
                Input::Transport(Ok(Message::Bytes(_))) => continue,
                Input::Transport(Err(e)) => {
                    leptos::logging::warn!("chat transport error: {e}");
                    break;
                }
                Input::Ui(UiCommand::SendChat(text)) => {
                    session.handle(SessionEvent::SendChat(text))
                }
                Input::Ui(UiCommand::Deactivate) => session.handle(SessionEvent::Deactivate),
            };

            let mut open = true;
            for command in commands {
                open &= apply(command, &out_tx, chat);
            }
            status.set(session.status());
            if !open {
                break;
            }
        }
    };

    // Run both halves; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(drive_task)).await;

    session.handle(SessionEvent::TransportClosed);
    status.set(session.status());
}

/// Carry out one session command. Returns `false` when the transport should
/// close.
#[cfg(feature = "hydrate")]
fn apply(
    command: SessionCommand,
    out: &futures::channel::mpsc::UnboundedSender<String>,
    chat: RwSignal<ChatState>,
) -> bool {
    match command {
        SessionCommand::SendFrame(frame) => {
            let _ = out.unbounded_send(encode_frame(&frame));
            true
        }
        SessionCommand::Deliver(message) => {
            chat.update(|c| c.messages.push(message));
            true
        }
        SessionCommand::CloseTransport => false,
        // Only produced by the initial activation, which drive() handles itself.
        SessionCommand::OpenTransport { .. } => true,
    }
}
