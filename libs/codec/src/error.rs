//! Protocol-level errors for puncher message processing
//!
//! Every error is terminal for a single encode or decode call. Nothing in this
//! crate retries, logs or swallows an error; the transport decides what to do
//! with it (re-read the socket, drop the datagram, close the peer).

use std::io;

use thiserror::Error;

use crate::message_type::MessageType;

/// Codec errors with enough context to diagnose a broken peer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Leading byte does not match any registered message tag
    #[error("netpuncher: unknown message type {0:#04x}")]
    UnknownType(u8),

    /// Header decoded but the version field is not implemented here
    #[error("netpuncher: unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    /// Structurally malformed payload, usually a read that ran out mid-field
    #[error("netpuncher: {0}")]
    InvalidMessage(String),

    /// Fewer than 2 bytes obtained, not even a header
    #[error("netpuncher: message not long enough, read {0} byte")]
    NotReadEnough(usize),

    /// Address-bearing message has an endpoint without an address
    #[error("netpuncher: cannot encode {message}: {field} address not set")]
    UnsetAddress {
        message: MessageType,
        field: &'static str,
    },
}

impl ProtocolError {
    /// Create InvalidMessage for a field that ran past the end of the buffer
    pub fn truncated(field: &str, offset: usize, need: usize, available: usize) -> Self {
        Self::InvalidMessage(format!(
            "truncated {field}: need {need} bytes at offset {offset}, {available} available"
        ))
    }

    /// Create InvalidMessage for a variant decoder handed another variant's bytes
    pub fn tag_mismatch(expected: MessageType, actual: u8) -> Self {
        Self::InvalidMessage(format!(
            "expected {} tag {:#04x}, found {actual:#04x}",
            expected.name(),
            u8::from(expected)
        ))
    }

    /// Create UnsetAddress for an endpoint that cannot be widened to 16 bytes
    pub fn unset_address(message: MessageType, field: &'static str) -> Self {
        Self::UnsetAddress { message, field }
    }

    /// True for errors raised while encoding rather than decoding
    pub fn is_encode_error(&self) -> bool {
        matches!(self, Self::UnsetAddress { .. })
    }
}

/// Errors surfaced by entry points that read from a byte source
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("netpuncher: read failed: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Protocol error carried by this error, if any
    pub fn as_protocol(&self) -> Option<&ProtocolError> {
        match self {
            Self::Protocol(err) => Some(err),
            Self::Io(_) => None,
        }
    }
}

/// Result type for encode/decode operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type for reader and framing operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;
