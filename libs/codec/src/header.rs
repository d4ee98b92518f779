//! Message header and protocol version gate
//!
//! The header is identical for all messages: byte 0 is the type tag, byte 1
//! the protocol version. There is no negotiation; anything other than the
//! implemented version is rejected outright.

use std::fmt;

use bytes::{BufMut, BytesMut};

use crate::constants::{HEADER_SIZE, PROTOCOL_VERSION};
use crate::error::{ProtocolError, ProtocolResult};
use crate::message_type::MessageType;
use crate::wire::WireReader;

/// Protocol version byte carried in every header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(pub u8);

impl ProtocolVersion {
    /// Newest version supported
    pub const NEWEST: ProtocolVersion = ProtocolVersion(PROTOCOL_VERSION);

    /// Returns whether this implementation speaks the version
    pub fn is_supported(&self) -> bool {
        self.0 == PROTOCOL_VERSION
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::NEWEST
    }
}

impl From<u8> for ProtocolVersion {
    fn from(version: u8) -> Self {
        Self(version)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Header preceding all messages (2 bytes)
///
/// ```text
/// ┌──────────┬─────────┐
/// │ Type (1) │ Ver (1) │
/// └──────────┴─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Raw type tag, see [`MessageType`]
    pub type_tag: u8,
    pub version: ProtocolVersion,
}

impl Header {
    pub const SIZE: usize = HEADER_SIZE;

    pub fn new(message_type: MessageType, version: ProtocolVersion) -> Self {
        Self {
            type_tag: message_type.into(),
            version,
        }
    }

    /// Registered type for the tag
    pub fn message_type(&self) -> ProtocolResult<MessageType> {
        MessageType::lookup(self.type_tag)
    }

    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(Self::SIZE);
        dst.put_u8(self.type_tag);
        dst.put_u8(self.version.0);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        [self.type_tag, self.version.0]
    }

    /// Decode the first two bytes, rejecting unsupported versions
    pub fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        Self::read(&mut WireReader::new(buf))
    }

    pub(crate) fn read(reader: &mut WireReader<'_>) -> ProtocolResult<Self> {
        let type_tag = reader.read_u8("header type")?;
        let version = ProtocolVersion(reader.read_u8("header version")?);
        if !version.is_supported() {
            return Err(ProtocolError::UnsupportedVersion(version.0));
        }
        Ok(Self { type_tag, version })
    }

    /// Read a header and require it to carry `expected`'s tag.
    ///
    /// The version is checked before the tag, so a bad version always wins.
    pub(crate) fn read_expecting(
        reader: &mut WireReader<'_>,
        expected: MessageType,
    ) -> ProtocolResult<Self> {
        let header = Self::read(reader)?;
        if header.type_tag != u8::from(expected) {
            return Err(ProtocolError::tag_mismatch(expected, header.type_tag));
        }
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode() {
        let header = Header::new(MessageType::IdReq, ProtocolVersion::NEWEST);
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(&buf[..], &[0x54, 0x01]);
        assert_eq!(header.to_bytes(), [0x54, 0x01]);
    }

    #[test]
    fn test_header_decode_ignores_type_registration() {
        // header decoding only checks length and version
        let header = Header::decode(&[0xee, 0x01]).unwrap();
        assert_eq!(header.type_tag, 0xee);
        assert_eq!(header.message_type(), Err(ProtocolError::UnknownType(0xee)));
    }

    #[test]
    fn test_header_too_short() {
        assert!(matches!(
            Header::decode(&[0x54]),
            Err(ProtocolError::InvalidMessage(_))
        ));
        assert!(matches!(
            Header::decode(&[]),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_unsupported_versions() {
        for version in [0u8, 2, 0x7f, 0xff] {
            assert_eq!(
                Header::decode(&[0x54, version]),
                Err(ProtocolError::UnsupportedVersion(version))
            );
        }
    }

    #[test]
    fn test_version_checked_before_tag() {
        let mut reader = WireReader::new(&[0x51, 0x02]);
        assert_eq!(
            Header::read_expecting(&mut reader, MessageType::IdReq),
            Err(ProtocolError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_version_support() {
        assert!(ProtocolVersion::NEWEST.is_supported());
        assert!(!ProtocolVersion(2).is_supported());
        assert_eq!(ProtocolVersion::default(), ProtocolVersion(1));
        assert_eq!(ProtocolVersion(1).to_string(), "v1");
    }
}
