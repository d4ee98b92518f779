//! Bounds-checked little-endian field reader
//!
//! Every read checks the remaining length first, so a short buffer becomes an
//! `InvalidMessage` naming the field and offset instead of a panic. Writes go
//! straight through `bytes::BufMut` on a `BytesMut`.

use bytes::Buf;

use crate::error::{ProtocolError, ProtocolResult};

pub(crate) struct WireReader<'a> {
    rest: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self {
            rest: buf,
            offset: 0,
        }
    }

    /// Bytes consumed so far
    #[cfg(test)]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    fn ensure(&self, field: &str, need: usize) -> ProtocolResult<()> {
        if self.rest.remaining() < need {
            return Err(ProtocolError::truncated(
                field,
                self.offset,
                need,
                self.rest.remaining(),
            ));
        }
        Ok(())
    }

    pub(crate) fn read_u8(&mut self, field: &str) -> ProtocolResult<u8> {
        self.ensure(field, 1)?;
        self.offset += 1;
        Ok(self.rest.get_u8())
    }

    pub(crate) fn read_u16_le(&mut self, field: &str) -> ProtocolResult<u16> {
        self.ensure(field, 2)?;
        self.offset += 2;
        Ok(self.rest.get_u16_le())
    }

    pub(crate) fn read_u32_le(&mut self, field: &str) -> ProtocolResult<u32> {
        self.ensure(field, 4)?;
        self.offset += 4;
        Ok(self.rest.get_u32_le())
    }

    pub(crate) fn read_array<const N: usize>(&mut self, field: &str) -> ProtocolResult<[u8; N]> {
        self.ensure(field, N)?;
        let mut out = [0u8; N];
        self.rest.copy_to_slice(&mut out);
        self.offset += N;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian() {
        let bytes = [0x01, 0x69, 0x2b, 0x39, 0x05, 0x00, 0x00];
        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_u8("tag").unwrap(), 0x01);
        assert_eq!(reader.read_u16_le("port").unwrap(), 11113);
        assert_eq!(reader.read_u32_le("cid").unwrap(), 1337);
        assert_eq!(reader.offset(), 7);
    }

    #[test]
    fn test_short_read_reports_field_and_offset() {
        let bytes = [0xaa, 0xbb, 0xcc];
        let mut reader = WireReader::new(&bytes);
        reader.read_u16_le("port").unwrap();
        let err = reader.read_array::<16>("address").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidMessage(
                "truncated address: need 16 bytes at offset 2, 1 available".to_string()
            )
        );
        // failed reads consume nothing
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.read_u8("tail").unwrap(), 0xcc);
    }
}
