//! Protocol-level constants for the netpuncher wire format
//!
//! These values are part of the wire format. They MUST stay identical across
//! every implementation talking to a puncher, or hole punching silently fails
//! in the field.

/// Header size: type tag (1) + protocol version (1)
pub const HEADER_SIZE: usize = 2;

/// Session ID (CID) field size
pub const SESSION_ID_SIZE: usize = 4;

/// Address field size, always the 16-byte IPv6 form
pub const ADDRESS_SIZE: usize = 16;

/// Endpoint size: u16 port + 16-byte address
pub const ENDPOINT_SIZE: usize = 2 + ADDRESS_SIZE;

/// Largest message on the wire.
///
/// 2 byte header, CReqTCP is largest (two ports and addresses). Receive
/// buffers must be at least this large.
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + 2 * ENDPOINT_SIZE;

/// Newest protocol version implemented
pub const PROTOCOL_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_packet_size_is_two_plus_thirty_six() {
        assert_eq!(MAX_PACKET_SIZE, 2 + 36);
        assert_eq!(ENDPOINT_SIZE, 18);
    }
}
