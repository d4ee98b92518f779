//! Tagged union over every puncher message
//!
//! `Message::decode` is the dispatch point: check that a header is present,
//! look the tag up in the registry, then hand the buffer to the variant's own
//! decoder, which re-validates length and version.

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::constants::HEADER_SIZE;
use crate::error::{ProtocolError, ProtocolResult};
use crate::header::ProtocolVersion;
use crate::message_type::MessageType;
use crate::messages::{AssId, CReq, CReqTcp, IdReq, PuncherPacket, SReq, SReqTcp, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    IdReq(IdReq),
    AssId(AssId),
    SReq(SReq),
    SReqTcp(SReqTcp),
    CReq(CReq),
    CReqTcp(CReqTcp),
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::IdReq(_) => MessageType::IdReq,
            Message::AssId(_) => MessageType::AssId,
            Message::SReq(_) => MessageType::SReq,
            Message::SReqTcp(_) => MessageType::SReqTcp,
            Message::CReq(_) => MessageType::CReq,
            Message::CReqTcp(_) => MessageType::CReqTcp,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        match self {
            Message::IdReq(m) => m.version,
            Message::AssId(m) => m.version,
            Message::SReq(m) => m.version,
            Message::SReqTcp(m) => m.version,
            Message::CReq(m) => m.version,
            Message::CReqTcp(m) => m.version,
        }
    }

    /// Overwrite the header version, e.g. to probe how a peer handles one it
    /// does not speak
    pub fn set_version(&mut self, version: ProtocolVersion) {
        match self {
            Message::IdReq(m) => m.version = version,
            Message::AssId(m) => m.version = version,
            Message::SReq(m) => m.version = version,
            Message::SReqTcp(m) => m.version = version,
            Message::CReq(m) => m.version = version,
            Message::CReqTcp(m) => m.version = version,
        }
    }

    /// Session ID for AssID, SReq and SReqTCP
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Message::AssId(m) => Some(m.cid),
            Message::SReq(m) => Some(m.cid),
            Message::SReqTcp(m) => Some(m.cid),
            _ => None,
        }
    }

    pub fn encoded_len(&self) -> usize {
        self.message_type().encoded_size()
    }

    /// Append the wire form to `dst`; only address-bearing messages can fail
    pub fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()> {
        match self {
            Message::IdReq(m) => m.encode(dst),
            Message::AssId(m) => m.encode(dst),
            Message::SReq(m) => m.encode(dst),
            Message::SReqTcp(m) => m.encode(dst),
            Message::CReq(m) => m.encode(dst),
            Message::CReqTcp(m) => m.encode(dst),
        }
    }

    pub fn to_bytes(&self) -> ProtocolResult<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Decode one message from the bytes obtained by a single read
    pub fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(ProtocolError::NotReadEnough(buf.len()));
        }

        let message = match MessageType::lookup(buf[0])? {
            MessageType::AssId => Message::AssId(AssId::decode(buf)?),
            MessageType::SReq => Message::SReq(SReq::decode(buf)?),
            MessageType::CReq => Message::CReq(CReq::decode(buf)?),
            MessageType::IdReq => Message::IdReq(IdReq::decode(buf)?),
            MessageType::SReqTcp => Message::SReqTcp(SReqTcp::decode(buf)?),
            MessageType::CReqTcp => Message::CReqTcp(CReqTcp::decode(buf)?),
        };
        Ok(message)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Message {
                fn from(message: $variant) -> Self {
                    Message::$variant(message)
                }
            }
        )+
    };
}

impl_from_variant!(IdReq, AssId, SReq, SReqTcp, CReq, CReqTcp);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.message_type(), self.version())?;
        match self {
            Message::IdReq(_) => Ok(()),
            Message::AssId(m) => write!(f, " cid={}", m.cid),
            Message::SReq(m) => write!(f, " cid={}", m.cid),
            Message::SReqTcp(m) => write!(f, " cid={}", m.cid),
            Message::CReq(m) => write!(f, " addr={}", m.addr),
            Message::CReqTcp(m) => write!(f, " source={} destination={}", m.source, m.destination),
        }
    }
}
