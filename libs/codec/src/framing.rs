//! Tokio codec for puncher message framing.
//!
//! Every message has a fixed size implied by its tag, so a stream needs no
//! length prefix: peek the tag, wait for that many bytes, split. Datagrams
//! carry exactly one message each and any trailing bytes are dropped, the same
//! way a single read into a `MAX_PACKET_SIZE` buffer behaves.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::constants::HEADER_SIZE;
use crate::error::{CodecError, CodecResult};
use crate::message::Message;
use crate::message_type::MessageType;

/// How the decoder carves messages out of its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// Byte stream (TCP, pipes, capture files); messages may span reads.
    /// An unknown tag discards everything buffered.
    #[default]
    Stream,
    /// One message per buffer fill (UDP via `UdpFramed`)
    Datagram,
}

/// Tokio codec for puncher messages
#[derive(Debug, Clone, Default)]
pub struct PuncherCodec {
    mode: FrameMode,
}

impl PuncherCodec {
    /// Create a stream codec.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: FrameMode) -> Self {
        Self { mode }
    }

    /// Create a codec for `tokio_util::udp::UdpFramed`.
    pub fn datagram() -> Self {
        Self::with_mode(FrameMode::Datagram)
    }

    fn decode_stream(&mut self, src: &mut BytesMut) -> CodecResult<Option<Message>> {
        // Need the header to know the message size
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }

        // An unregistered tag means message boundaries are lost; nothing left
        // in the buffer can be trusted, so drop it before reporting.
        let size = match MessageType::lookup(src[0]) {
            Ok(message_type) => message_type.encoded_size(),
            Err(e) => {
                src.clear();
                return Err(e.into());
            }
        };
        if src.len() < size {
            src.reserve(size - src.len());
            return Ok(None);
        }

        let frame = src.split_to(size);
        let message = Message::decode(&frame)?;
        trace!(message_type = %message.message_type(), bytes = size, "decoded puncher frame");
        Ok(Some(message))
    }

    fn decode_datagram(&mut self, src: &mut BytesMut) -> CodecResult<Option<Message>> {
        if src.is_empty() {
            return Ok(None);
        }

        let datagram = src.split();
        let message = Message::decode(&datagram)?;
        trace!(
            message_type = %message.message_type(),
            bytes = datagram.len(),
            "decoded puncher datagram"
        );
        Ok(Some(message))
    }
}

impl Decoder for PuncherCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> CodecResult<Option<Self::Item>> {
        match self.mode {
            FrameMode::Stream => self.decode_stream(src),
            FrameMode::Datagram => self.decode_datagram(src),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> CodecResult<Option<Self::Item>> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }
        if src.is_empty() {
            return Ok(None);
        }

        // Partial message at end of stream: report why it cannot be decoded
        let leftover = src.split();
        Message::decode(&leftover).map(Some).map_err(Into::into)
    }
}

impl Encoder<Message> for PuncherCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> CodecResult<()> {
        item.encode(dst)?;
        Ok(())
    }
}
