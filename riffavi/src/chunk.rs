use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};

use riffcore::buf::{read_record, BufError};
use riffcore::fourcc::FourCC;

// This only describes where a chunk is, the payload stays in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: FourCC,
    pub length: u32,
    pub address: Option<u64>,
}

impl ChunkHeader {
    /// Reads the 8 byte `tag || length` header
    pub fn read<R: Read + ?Sized>(data: &mut R, address: Option<u64>) -> Result<Self, BufError> {
        let mut header = [0u8; 8];
        read_record(data, &mut header)?;

        Ok(ChunkHeader {
            tag: FourCC([header[0], header[1], header[2], header[3]]),
            length: LittleEndian::read_u32(&header[4..]),
            address,
        })
    }

    /// On disk extent of the payload, chunks are padded to an even length
    pub fn padded(&self) -> u64 {
        padded(self.length)
    }
}

pub fn padded(length: u32) -> u64 {
    length as u64 + (length & 1) as u64
}

#[cfg(test)]
mod test_chunk_header {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_header() {
        let mut data = Cursor::new(b"avih\x38\x00\x00\x00rest".to_vec());

        assert_eq!(
            ChunkHeader::read(&mut data, Some(12)).unwrap(),
            ChunkHeader {
                tag: FourCC(*b"avih"),
                length: 56,
                address: Some(12),
            }
        );
        assert_eq!(data.position(), 8);
    }

    #[test]
    fn short_header() {
        let mut data = Cursor::new(b"avih\x38\x00".to_vec());

        assert!(matches!(
            ChunkHeader::read(&mut data, None),
            Err(BufError::Short { wanted: 8, got: 6 })
        ));
    }

    #[test]
    fn odd_lengths_are_padded() {
        assert_eq!(padded(0), 0);
        assert_eq!(padded(7), 8);
        assert_eq!(padded(8), 8);
        assert_eq!(padded(u32::MAX), u32::MAX as u64 + 1);
    }
}
