//! Address-bearing messages: CReq and CReqTCP
//!
//! ```text
//! CReq     ┌──────┬─────┬──────────┬────────────────────┐
//!          │ 0x53 │ ver │ port (2) │ address (16)       │
//!          └──────┴─────┴──────────┴────────────────────┘
//! CReqTCP  ┌──────┬─────┬──────────┬──────────────┬──────────┬──────────────┐
//!          │ 0x63 │ ver │ src port │ src addr(16) │ dst port │ dst addr(16) │
//!          └──────┴─────┴──────────┴──────────────┴──────────┴──────────────┘
//! ```
//!
//! The puncher sends each peer its own address pair: `source` is the local
//! port the recipient punches from, `destination` is the peer it punches
//! towards. The codec only preserves that order.

use bytes::BytesMut;

use super::PuncherPacket;
use crate::endpoint::Endpoint;
use crate::error::ProtocolResult;
use crate::header::{Header, ProtocolVersion};
use crate::message_type::MessageType;
use crate::wire::WireReader;

/// Puncher requesting a peer to punch towards `addr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CReq {
    pub version: ProtocolVersion,
    pub addr: Endpoint,
}

impl CReq {
    pub fn new(addr: impl Into<Endpoint>) -> Self {
        Self {
            version: ProtocolVersion::NEWEST,
            addr: addr.into(),
        }
    }
}

impl PuncherPacket for CReq {
    const TYPE: MessageType = MessageType::CReq;

    fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Fails if `addr` is not set
    fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()> {
        let octets = self.addr.require_octets(Self::TYPE, "punch")?;
        dst.reserve(self.encoded_len());
        self.header().encode(dst);
        Endpoint::put(dst, self.addr.port, &octets);
        Ok(())
    }

    fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        let mut reader = WireReader::new(buf);
        let header = Header::read_expecting(&mut reader, Self::TYPE)?;
        let addr = Endpoint::read(&mut reader, "CReq port", "CReq address")?;
        Ok(Self {
            version: header.version,
            addr,
        })
    }
}

/// Puncher requesting a simultaneous TCP open between a port pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CReqTcp {
    pub version: ProtocolVersion,
    /// Recipient's own punching endpoint
    pub source: Endpoint,
    /// Peer endpoint to connect to
    pub destination: Endpoint,
}

impl CReqTcp {
    pub fn new(source: impl Into<Endpoint>, destination: impl Into<Endpoint>) -> Self {
        Self {
            version: ProtocolVersion::NEWEST,
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Same pair as seen from the other peer
    pub fn swapped(&self) -> Self {
        Self {
            version: self.version,
            source: self.destination,
            destination: self.source,
        }
    }
}

impl PuncherPacket for CReqTcp {
    const TYPE: MessageType = MessageType::CReqTcp;

    fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Fails if either endpoint is not set
    fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()> {
        let source = self.source.require_octets(Self::TYPE, "source")?;
        let destination = self.destination.require_octets(Self::TYPE, "destination")?;
        dst.reserve(self.encoded_len());
        self.header().encode(dst);
        Endpoint::put(dst, self.source.port, &source);
        Endpoint::put(dst, self.destination.port, &destination);
        Ok(())
    }

    fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        let mut reader = WireReader::new(buf);
        let header = Header::read_expecting(&mut reader, Self::TYPE)?;
        let source = Endpoint::read(&mut reader, "CReqTCP source port", "CReqTCP source address")?;
        let destination = Endpoint::read(
            &mut reader,
            "CReqTCP destination port",
            "CReqTCP destination address",
        )?;
        Ok(Self {
            version: header.version,
            source,
            destination,
        })
    }
}
