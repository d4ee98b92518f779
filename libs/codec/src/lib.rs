//! # Netpuncher Wire Codec
//!
//! ## Purpose
//!
//! Encoding and decoding of the control messages exchanged between a *Host*,
//! the rendezvous *Puncher* and a *Client* while they coordinate UDP and TCP
//! hole punching. Every message is a 2-byte header followed by a fixed-size,
//! little-endian payload:
//!
//! ```text
//! IDReq    [0x54][ver]                                      2 bytes
//! AssID    [0x51][ver][cid u32]                             6 bytes
//! SReq     [0x52][ver][cid u32]                             6 bytes
//! SReqTCP  [0x62][ver][cid u32]                             6 bytes
//! CReq     [0x53][ver][port u16][addr 16]                  20 bytes
//! CReqTCP  [0x63][ver][port u16][addr 16][port u16][addr 16]  38 bytes
//! ```
//!
//! ## Protocol flow
//!
//! ```text
//! Host                         Puncher                          Client
//! IDReq ───────────────────────▶
//!       ◀─────────────────────── AssID[1337]
//!                                ◀───────────────────────────── SReq[1337]
//!       ◀─────────────────────── CReq[client addr]
//!                                CReq[host addr] ─────────────▶
//!                                ◀───────────────────────────── SReqTCP[1337]
//!       ◀─────────────────────── CReqTCP[host port, client port]
//!                                CReqTCP[client port, host port] ▶
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Session tracking on the puncher
//! - The UDP connect handshake or TCP simultaneous open
//! - Socket management, timeouts or retries
//!
//! The codec is stateless; every call is an independent transformation
//! between bytes and a [`Message`].

pub mod constants;
pub mod endpoint;
pub mod error;
pub mod framing;
pub mod header;
pub mod message;
pub mod message_type;
pub mod messages;
pub mod reader;

mod wire;

pub use constants::*;
pub use endpoint::Endpoint;
pub use error::{CodecError, CodecResult, ProtocolError, ProtocolResult};
pub use framing::{FrameMode, PuncherCodec};
pub use header::{Header, ProtocolVersion};
pub use message::Message;
pub use message_type::{Direction, MessageType};
pub use messages::{AssId, CReq, CReqTcp, IdReq, PuncherPacket, SReq, SReqTcp, SessionId};
pub use reader::{decode_message, read_message, read_message_async};
