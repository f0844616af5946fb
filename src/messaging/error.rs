//! Transport error types.

use derive_more::{Display, Error};

/// What went wrong on the realtime channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MessagingErrorKind {
    /// The connection could not be established.
    #[display("connect")]
    Connect,
    /// The open connection failed while reading.
    #[display("receive")]
    Receive,
    /// An outbound frame could not be written.
    #[display("send")]
    Send,
    /// The close handshake failed.
    #[display("close")]
    Close,
    /// An outbound frame could not be encoded.
    #[display("encode")]
    Encode,
}

/// Realtime messaging error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Messaging {} error: {} at {}:{}", kind, message, file, line)]
pub struct MessagingError {
    /// Error category.
    pub kind: MessagingErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MessagingError {
    /// Creates a new messaging error with caller location tracking.
    #[track_caller]
    pub fn new(kind: MessagingErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true when the connection never opened.
    pub fn is_connect(&self) -> bool {
        self.kind == MessagingErrorKind::Connect
    }
}

impl From<crate::ProtocolError> for MessagingError {
    #[track_caller]
    fn from(err: crate::ProtocolError) -> Self {
        Self::new(MessagingErrorKind::Encode, err.message)
    }
}
