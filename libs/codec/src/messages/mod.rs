//! Concrete puncher messages
//!
//! Each message is a plain value: header version plus a fixed-width payload.
//! The type tag is not stored; it is implied by the Rust type and forced on
//! encode.

mod address;
mod fixed;

pub use address::{CReq, CReqTcp};
pub use fixed::{AssId, IdReq, SReq, SReqTcp, SessionId};

use bytes::{Bytes, BytesMut};

use crate::error::ProtocolResult;
use crate::header::{Header, ProtocolVersion};
use crate::message_type::MessageType;

/// Common contract of every puncher message
pub trait PuncherPacket: Sized {
    /// Tag written into the header on encode
    const TYPE: MessageType;

    fn version(&self) -> ProtocolVersion;

    /// Header as it will appear on the wire
    fn header(&self) -> Header {
        Header::new(Self::TYPE, self.version())
    }

    fn encoded_len(&self) -> usize {
        Self::TYPE.encoded_size()
    }

    /// Append the wire form to `dst`.
    ///
    /// On error nothing has been appended.
    fn encode(&self, dst: &mut BytesMut) -> ProtocolResult<()>;

    /// Decode from the start of `buf`; bytes past the fixed size are ignored.
    fn decode(buf: &[u8]) -> ProtocolResult<Self>;

    fn to_bytes(&self) -> ProtocolResult<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }
}
