//! Minimal STOMP 1.2 frame model and text codec.
//!
//! Covers only the commands this client exchanges with the broker. Protocol
//! semantics beyond framing (acknowledgement modes, receipts, heart-beat
//! negotiation) stay with the broker; the client advertises `heart-beat:0,0`
//! and treats bare EOLs on the socket as keepalive noise.

#[cfg(test)]
#[path = "stomp_test.rs"]
mod stomp_test;

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload contains no frame at all (a lone NUL or nothing).
    #[error("empty frame")]
    Empty,
    /// The command line is not a STOMP command this client understands.
    #[error("unknown STOMP command: {0}")]
    UnknownCommand(String),
    /// A header line has no `name:value` separator.
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
    /// The blank line between headers and body is missing.
    #[error("frame missing header/body separator")]
    MissingSeparator,
    /// A header contains a backslash escape outside the STOMP repertoire.
    #[error("invalid escape sequence in header")]
    InvalidEscape,
}

/// STOMP commands used on this connection, client- and server-originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Subscribe,
    Send,
    Message,
    Error,
    Receipt,
    Disconnect,
}

impl Command {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Subscribe => "SUBSCRIBE",
            Self::Send => "SEND",
            Self::Message => "MESSAGE",
            Self::Error => "ERROR",
            Self::Receipt => "RECEIPT",
            Self::Disconnect => "DISCONNECT",
        }
    }

    fn parse(line: &str) -> Result<Self, CodecError> {
        match line {
            "CONNECT" => Ok(Self::Connect),
            "CONNECTED" => Ok(Self::Connected),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "SEND" => Ok(Self::Send),
            "MESSAGE" => Ok(Self::Message),
            "ERROR" => Ok(Self::Error),
            "RECEIPT" => Ok(Self::Receipt),
            "DISCONNECT" => Ok(Self::Disconnect),
            other => Err(CodecError::UnknownCommand(other.to_owned())),
        }
    }

    /// STOMP 1.2 exempts the connection handshake from header escaping.
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

/// A single STOMP frame: command, ordered headers, and an opaque body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    #[must_use]
    pub fn new(command: Command, headers: &[(&str, &str)], body: String) -> Self {
        Self {
            command,
            headers: headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            body,
        }
    }

    /// CONNECT frame opening a session against `host`, with heart-beats off.
    #[must_use]
    pub fn connect(host: &str) -> Self {
        Self::new(
            Command::Connect,
            &[("accept-version", "1.2"), ("host", host), ("heart-beat", "0,0")],
            String::new(),
        )
    }

    /// SUBSCRIBE frame registering `id` on `destination`.
    #[must_use]
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(
            Command::Subscribe,
            &[("id", id), ("destination", destination)],
            String::new(),
        )
    }

    /// SEND frame publishing a JSON `body` to `destination`.
    #[must_use]
    pub fn send_json(destination: &str, body: String) -> Self {
        let length = body.len().to_string();
        Self::new(
            Command::Send,
            &[
                ("destination", destination),
                ("content-type", "application/json"),
                ("content-length", length.as_str()),
            ],
            body,
        )
    }

    /// DISCONNECT frame ending the session.
    #[must_use]
    pub fn disconnect() -> Self {
        Self::new(Command::Disconnect, &[], String::new())
    }

    /// First value of the header named `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }
}

/// True for bare EOL keepalive payloads sent between frames.
#[must_use]
pub fn is_heartbeat(text: &str) -> bool {
    text.chars().all(|c| matches!(c, '\n' | '\r'))
}

/// Encode a frame into its NUL-terminated wire text.
#[must_use]
pub fn encode_frame(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(frame.command.as_str());
    out.push('\n');
    for (name, value) in &frame.headers {
        if frame.command.escapes_headers() {
            out.push_str(&escape(name));
            out.push(':');
            out.push_str(&escape(value));
        } else {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&frame.body);
    out.push('\0');
    out
}

/// Decode one frame from wire text.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first structural problem found.
pub fn decode_frame(text: &str) -> Result<Frame, CodecError> {
    // Tolerate EOL padding around the NUL-terminated frame.
    let text = text.trim_end_matches(['\r', '\n']);
    let text = text.strip_suffix('\0').unwrap_or(text);
    let text = text.trim_start_matches(['\r', '\n']);
    if text.is_empty() {
        return Err(CodecError::Empty);
    }

    let (head, body) = split_head_body(text)?;
    let mut lines = head.split('\n').map(|line| line.trim_end_matches('\r'));

    // split always yields at least one element
    let command = Command::parse(lines.next().unwrap_or_default())?;

    let mut headers = Vec::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            return Err(CodecError::MalformedHeader(line.to_owned()));
        };
        if command.escapes_headers() {
            headers.push((unescape(name)?, unescape(value)?));
        } else {
            headers.push((name.to_owned(), value.to_owned()));
        }
    }

    Ok(Frame { command, headers, body: body.to_owned() })
}

/// Split wire text at the blank line separating headers from the body.
fn split_head_body(text: &str) -> Result<(&str, &str), CodecError> {
    let (index, width) = match (text.find("\n\n"), text.find("\r\n\r\n")) {
        (Some(lf), Some(crlf)) if crlf < lf => (crlf, 4),
        (Some(lf), _) => (lf, 2),
        (None, Some(crlf)) => (crlf, 4),
        (None, None) => return Err(CodecError::MissingSeparator),
    };
    Ok((&text[..index], &text[index + width..]))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            _ => return Err(CodecError::InvalidEscape),
        }
    }
    Ok(out)
}
