//! # Message Type Registry
//!
//! Maps the one-byte type tag at offset 0 of every message to the shape that
//! follows it. The decoder dispatches on this table; the tags are stable and
//! must never be renumbered.
//!
//! ```text
//! Tag   Name      Size  Sent by
//! 0x51  AssID        6  puncher → host
//! 0x52  SReq         6  client  → puncher
//! 0x53  CReq        20  puncher → host, client
//! 0x54  IDReq        2  host    → puncher
//! 0x62  SReqTCP      6  client  → puncher
//! 0x63  CReqTCP     38  puncher → host, client
//! ```

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::constants::{ENDPOINT_SIZE, HEADER_SIZE, SESSION_ID_SIZE};
use crate::error::{ProtocolError, ProtocolResult};

/// Registered puncher message tags
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum MessageType {
    /// Puncher announcing the assigned session ID to a host
    AssId = 0x51,
    /// Client requesting to be served with UDP punching for a session ID
    SReq = 0x52,
    /// Puncher requesting a peer to punch towards an address
    CReq = 0x53,
    /// Host requesting a session ID
    IdReq = 0x54,
    /// Client requesting to be served with TCP punching for a session ID
    SReqTcp = 0x62,
    /// Puncher requesting peers to TCP-punch between a port pair
    CReqTcp = 0x63,
}

/// Which way a message travels relative to the puncher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ToPuncher,
    FromPuncher,
}

impl MessageType {
    /// Resolve a wire tag, failing with `UnknownType` for unregistered bytes
    pub fn lookup(tag: u8) -> ProtocolResult<Self> {
        Self::try_from(tag).map_err(|_| ProtocolError::UnknownType(tag))
    }

    /// Every registered type, ordered by tag
    pub fn all() -> [MessageType; 6] {
        [
            Self::AssId,
            Self::SReq,
            Self::CReq,
            Self::IdReq,
            Self::SReqTcp,
            Self::CReqTcp,
        ]
    }

    /// Protocol name as used on the wire documentation
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssId => "AssID",
            Self::SReq => "SReq",
            Self::CReq => "CReq",
            Self::IdReq => "IDReq",
            Self::SReqTcp => "SReqTCP",
            Self::CReqTcp => "CReqTCP",
        }
    }

    /// Fixed encoded size including the header
    pub const fn encoded_size(&self) -> usize {
        match self {
            Self::IdReq => HEADER_SIZE,
            Self::AssId | Self::SReq | Self::SReqTcp => HEADER_SIZE + SESSION_ID_SIZE,
            Self::CReq => HEADER_SIZE + ENDPOINT_SIZE,
            Self::CReqTcp => HEADER_SIZE + 2 * ENDPOINT_SIZE,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::IdReq | Self::SReq | Self::SReqTcp => Direction::ToPuncher,
            Self::AssId | Self::CReq | Self::CReqTcp => Direction::FromPuncher,
        }
    }

    /// True for the simultaneous-open TCP messages
    pub fn is_tcp(&self) -> bool {
        matches!(self, Self::SReqTcp | Self::CReqTcp)
    }

    /// True if the payload carries a session ID
    pub fn carries_session_id(&self) -> bool {
        matches!(self, Self::AssId | Self::SReq | Self::SReqTcp)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToPuncher => f.write_str("to puncher"),
            Direction::FromPuncher => f.write_str("from puncher"),
        }
    }
}
