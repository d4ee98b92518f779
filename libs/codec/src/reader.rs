//! Decoder entry points over a byte source
//!
//! One read into a `MAX_PACKET_SIZE` buffer, then decode. A message must be
//! fully available in that one read; there is no accumulation across calls.
//! Timeouts and retries are the caller's business.

use std::io::Read;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::constants::MAX_PACKET_SIZE;
use crate::error::{CodecResult, ProtocolResult};
use crate::message::Message;

/// Decode one message from an in-memory buffer
pub fn decode_message(buf: &[u8]) -> ProtocolResult<Message> {
    Message::decode(buf)
}

/// Reads one puncher message with a single blocking read
pub fn read_message<R: Read>(reader: &mut R) -> CodecResult<Message> {
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let n = reader.read(&mut buf)?;
    decode_read(&buf[..n])
}

/// Reads one puncher message with a single async read
pub async fn read_message_async<R>(reader: &mut R) -> CodecResult<Message>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let n = reader.read(&mut buf).await?;
    decode_read(&buf[..n])
}

fn decode_read(buf: &[u8]) -> CodecResult<Message> {
    let message = Message::decode(buf)?;
    trace!(
        message_type = %message.message_type(),
        bytes = buf.len(),
        "decoded puncher message"
    );
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, ProtocolError};
    use crate::messages::{AssId, IdReq};
    use std::io::{self, Cursor};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_read_message_from_cursor() {
        let mut cursor = Cursor::new(vec![0x51, 0x01, 0x39, 0x05, 0x00, 0x00]);
        let message = read_message(&mut cursor).unwrap();
        assert_eq!(message, Message::AssId(AssId::new(1337u32)));
    }

    #[test]
    fn test_read_message_single_byte() {
        let mut cursor = Cursor::new(vec![0x54]);
        let err = read_message(&mut cursor).unwrap_err();
        assert_eq!(err.as_protocol(), Some(&ProtocolError::NotReadEnough(1)));
    }

    #[test]
    fn test_read_message_empty_source() {
        let mut cursor = Cursor::new(Vec::new());
        let err = read_message(&mut cursor).unwrap_err();
        assert_eq!(err.as_protocol(), Some(&ProtocolError::NotReadEnough(0)));
    }

    #[test]
    fn test_read_message_reads_at_most_one_packet() {
        // two IDReqs back to back: one read decodes the first, the rest is left
        // to the caller's source
        let mut cursor = Cursor::new([[0x54u8, 0x01]; 24].concat());
        assert_eq!(
            read_message(&mut cursor).unwrap(),
            Message::IdReq(IdReq::new())
        );
        assert_eq!(cursor.position() as usize, MAX_PACKET_SIZE);
    }

    #[test]
    fn test_read_message_io_error() {
        let err = read_message(&mut FailingReader).unwrap_err();
        assert!(matches!(err, CodecError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_read_message_async() {
        let mut mock = tokio_test::io::Builder::new()
            .read(&[0x54, 0x01])
            .build();
        let message = tokio_test::block_on(read_message_async(&mut mock)).unwrap();
        assert_eq!(message, Message::IdReq(IdReq::new()));
    }
}
