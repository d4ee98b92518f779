//! Fixed-field messages: IDReq, AssID, SReq, SReqTCP
//!
//! ```text
//! IDReq                   ┌──────┬─────┐
//!                         │ 0x54 │ ver │
//!                         └──────┴─────┘
//! AssID / SReq / SReqTCP  ┌──────┬─────┬──────────────┐
//!                         │ tag  │ ver │ CID (u32 LE) │
//!                         └──────┴─────┴──────────────┘
//! ```

use std::fmt;

use bytes::{BufMut, BytesMut};

use super::PuncherPacket;
use crate::error::ProtocolResult;
use crate::header::{Header, ProtocolVersion};
use crate::message_type::MessageType;
use crate::wire::WireReader;

/// Session identifier assigned by the puncher
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct SessionId(pub u32);

impl SessionId {
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for SessionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<SessionId> for u32 {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host requesting a session ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IdReq {
    pub version: ProtocolVersion,
}

impl IdReq {
    pub fn new() -> Self {
        Self {
            version: ProtocolVersion::NEWEST,
        }
    }
}

impl PuncherPacket for IdReq {
    const TYPE: MessageType = MessageType::IdReq;

    fn version(&self) -> ProtocolVersion {
        self.version
    }

    fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()> {
        self.header().encode(dst);
        Ok(())
    }

    fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        let mut reader = WireReader::new(buf);
        let header = Header::read_expecting(&mut reader, Self::TYPE)?;
        Ok(Self {
            version: header.version,
        })
    }
}

/// Header plus one session ID. The three variants differ only in their tag.
macro_rules! session_message {
    (
        $(#[$meta:meta])*
        $name:ident => $message_type:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            pub version: ProtocolVersion,
            pub cid: SessionId,
        }

        impl $name {
            pub fn new(cid: impl Into<SessionId>) -> Self {
                Self {
                    version: ProtocolVersion::NEWEST,
                    cid: cid.into(),
                }
            }
        }

        impl PuncherPacket for $name {
            const TYPE: MessageType = MessageType::$message_type;

            fn version(&self) -> ProtocolVersion {
                self.version
            }

            fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()> {
                dst.reserve(self.encoded_len());
                self.header().encode(dst);
                dst.put_u32_le(self.cid.0);
                Ok(())
            }

            fn decode(buf: &[u8]) -> ProtocolResult<Self> {
                let mut reader = WireReader::new(buf);
                let header = Header::read_expecting(&mut reader, Self::TYPE)?;
                let cid = reader.read_u32_le(concat!($label, " session id"))?;
                Ok(Self {
                    version: header.version,
                    cid: SessionId(cid),
                })
            }
        }
    };
}

session_message! {
    /// Puncher announcing the assigned session ID to the host
    AssId => AssId, "AssID"
}

session_message! {
    /// Client requesting UDP punching towards the host of a session
    SReq => SReq, "SReq"
}

session_message! {
    /// Client requesting TCP punching towards the host of a session
    SReqTcp => SReqTcp, "SReqTCP"
}
