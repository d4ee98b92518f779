//! Error formatting tests
//!
//! Display output is what ends up in peer logs, so keep it greppable and keep
//! the offending value in it.

use codec::{CodecError, MessageType, ProtocolError};

#[test]
fn test_unknown_type_formatting() {
    let error = ProtocolError::UnknownType(0x0a);

    let debug_output = format!("{:?}", error);
    assert!(debug_output.contains("UnknownType"));

    let display_output = format!("{}", error);
    assert_eq!(display_output, "netpuncher: unknown message type 0x0a");
}

#[test]
fn test_unsupported_version_formatting() {
    let display_output = ProtocolError::UnsupportedVersion(3).to_string();
    assert_eq!(display_output, "netpuncher: unsupported protocol version 3");
}

#[test]
fn test_not_read_enough_formatting() {
    let display_output = ProtocolError::NotReadEnough(1).to_string();
    assert_eq!(display_output, "netpuncher: message not long enough, read 1 byte");
}

#[test]
fn test_invalid_message_formatting() {
    let error = ProtocolError::truncated("CReqTCP source address", 4, 16, 9);
    let display_output = error.to_string();
    assert!(display_output.starts_with("netpuncher: truncated CReqTCP source address"));
    assert!(display_output.contains("need 16 bytes"));
    assert!(display_output.contains("offset 4"));

    let mismatch = ProtocolError::tag_mismatch(MessageType::CReq, 0x51).to_string();
    assert_eq!(mismatch, "netpuncher: expected CReq tag 0x53, found 0x51");
}

#[test]
fn test_unset_address_formatting() {
    let error = ProtocolError::unset_address(MessageType::CReqTcp, "destination");
    assert_eq!(
        error.to_string(),
        "netpuncher: cannot encode CReqTCP: destination address not set"
    );
}

#[test]
fn test_codec_error_is_transparent_for_protocol_errors() {
    let error = CodecError::from(ProtocolError::NotReadEnough(0));
    assert_eq!(
        error.to_string(),
        "netpuncher: message not long enough, read 0 byte"
    );

    let io = CodecError::from(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "closed",
    ));
    assert_eq!(io.to_string(), "netpuncher: read failed: closed");
}
