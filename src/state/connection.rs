#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

/// WebSocket connection status for the chat session.
///
/// Transitions are driven only by transport lifecycle events, never by
/// application logic. `Connecting` covers the window between activation and
/// the broker's CONNECTED frame; a failed attempt falls back to
/// `Disconnected` and stays there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}
