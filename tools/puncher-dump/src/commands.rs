//! Offline commands: encode, decode, dump, types

use std::io::Write;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Subcommand;
use codec::{
    decode_message, AssId, CReq, CReqTcp, IdReq, Message, MessageType, ProtocolVersion, PuncherCodec,
    SReq, SReqTcp,
};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::debug;

/// Message to build from the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MessageSpec {
    /// Host requesting a session ID
    #[command(alias = "idreq")]
    IdReq,
    /// Puncher announcing a session ID
    #[command(alias = "assid")]
    AssId { cid: u32 },
    /// Client requesting UDP punching for a session
    #[command(alias = "sreq")]
    SReq { cid: u32 },
    /// Client requesting TCP punching for a session
    #[command(alias = "sreqtcp")]
    SReqTcp { cid: u32 },
    /// Puncher requesting a punch towards ADDR
    #[command(alias = "creq")]
    CReq { addr: SocketAddr },
    /// Puncher requesting a simultaneous TCP open
    #[command(alias = "creqtcp")]
    CReqTcp {
        source: SocketAddr,
        destination: SocketAddr,
    },
}

impl MessageSpec {
    pub fn to_message(&self, version: ProtocolVersion) -> Message {
        let mut message: Message = match *self {
            MessageSpec::IdReq => IdReq::new().into(),
            MessageSpec::AssId { cid } => AssId::new(cid).into(),
            MessageSpec::SReq { cid } => SReq::new(cid).into(),
            MessageSpec::SReqTcp { cid } => SReqTcp::new(cid).into(),
            MessageSpec::CReq { addr } => CReq::new(addr).into(),
            MessageSpec::CReqTcp {
                source,
                destination,
            } => CReqTcp::new(source, destination).into(),
        };
        message.set_version(version);
        message
    }
}

/// Encode a message to lowercase hex
pub fn encode_hex(requested: &MessageSpec, version: ProtocolVersion) -> Result<String> {
    let message = requested.to_message(version);
    let bytes = message
        .to_bytes()
        .with_context(|| format!("Failed to encode {}", message.message_type()))?;
    Ok(hex::encode(bytes))
}

/// Decode hex text; whitespace and a leading `0x` are ignored
pub fn decode_hex(input: &str) -> Result<Message> {
    let cleaned: String = input.split_whitespace().collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    let bytes = hex::decode(digits).context("Input is not valid hex")?;
    debug!(bytes = bytes.len(), "decoding hex input");
    decode_message(&bytes).context("Failed to decode message")
}

/// Render the registry as a table
pub fn write_types(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<6} {:<8} {:>4}  {}", "TAG", "NAME", "SIZE", "DIRECTION")?;
    for message_type in MessageType::all() {
        writeln!(
            out,
            "{:<#6x} {:<8} {:>4}  {}",
            u8::from(message_type),
            message_type.name(),
            message_type.encoded_size(),
            message_type.direction()
        )?;
    }
    Ok(())
}

/// Decode every message from `reader`, printing one line per message.
///
/// A capture is a byte stream with no datagram boundaries, so messages are
/// always carved by their tag's fixed size. Stops at the first error, after
/// printing the messages before it.
pub async fn dump<R>(reader: R, out: &mut impl Write) -> Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut frames = FramedRead::new(reader, PuncherCodec::new());
    let mut count = 0;

    while let Some(frame) = frames.next().await {
        let message = frame.with_context(|| format!("Failed to decode message #{}", count + 1))?;
        count += 1;
        writeln!(out, "{count:>4}  {message}")?;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{ProtocolError, SessionId};

    #[test]
    fn test_encode_hex() {
        let hex = encode_hex(&MessageSpec::AssId { cid: 1337 }, ProtocolVersion::NEWEST).unwrap();
        assert_eq!(hex, "510139050000");

        let creq = MessageSpec::CReq {
            addr: "[::1]:11113".parse().unwrap(),
        };
        assert_eq!(
            encode_hex(&creq, ProtocolVersion::NEWEST).unwrap(),
            "5301692b00000000000000000000000000000001"
        );
    }

    #[test]
    fn test_encode_with_custom_version() {
        let hex = encode_hex(&MessageSpec::IdReq, ProtocolVersion(2)).unwrap();
        assert_eq!(hex, "5402");
    }

    #[test]
    fn test_decode_hex_accepts_prefix_and_spaces() {
        let message = decode_hex("0x51 01 39 05 00 00").unwrap();
        assert_eq!(message.session_id(), Some(SessionId(1337)));
    }

    #[test]
    fn test_decode_hex_errors() {
        assert!(decode_hex("zz").is_err());

        let err = decode_hex("54").unwrap_err();
        let protocol = err.downcast_ref::<ProtocolError>();
        assert_eq!(protocol, Some(&ProtocolError::NotReadEnough(1)));
    }

    #[test]
    fn test_write_types() {
        let mut out = Vec::new();
        write_types(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("0x63"));
        assert!(text.contains("CReqTCP"));
        assert!(text.contains("38"));
    }

    #[test]
    fn test_dump_stream() {
        let wire = [0x54u8, 0x01, 0x51, 0x01, 0x39, 0x05, 0x00, 0x00];
        let mut out = Vec::new();
        let count =
            tokio_test::block_on(dump(&wire[..], &mut out)).unwrap();
        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("IDReq v1"));
        assert!(text.contains("AssID v1 cid=1337"));
    }

    #[test]
    fn test_dump_counts_every_message_across_reads() {
        let wire = [
            0x54u8, 0x01, 0x51, 0x01, 0x39, 0x05, 0x00, 0x00, 0x54, 0x01,
        ];
        // the AssID straddles both read boundaries
        let capture = tokio_test::io::Builder::new()
            .read(&wire[..4])
            .read(&wire[4..7])
            .read(&wire[7..])
            .build();
        let mut out = Vec::new();
        let count = tokio_test::block_on(dump(capture, &mut out)).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            ["   1  IDReq v1", "   2  AssID v1 cid=1337", "   3  IDReq v1"]
        );
    }

    #[test]
    fn test_dump_stops_at_first_error() {
        let wire = [0x54u8, 0x01, 0x51, 0x02, 0x39, 0x05, 0x00, 0x00];
        let mut out = Vec::new();
        let err =
            tokio_test::block_on(dump(&wire[..], &mut out)).unwrap_err();
        assert!(err.to_string().contains("message #2"));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
