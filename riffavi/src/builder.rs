//! Assembles RIFF files in memory for the tests
use byteorder::{ByteOrder, LittleEndian};

pub struct RiffBuilder {
    inner: Vec<u8>,
    // Offsets of the length fields of the open containers
    open: Vec<usize>,
}

impl RiffBuilder {
    pub fn new() -> Self {
        RiffBuilder {
            inner: vec![],
            open: vec![],
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        assert!(self.open.is_empty(), "{} containers left open", self.open.len());
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    fn container(&mut self, tag: &[u8; 4], name: &[u8; 4]) -> &mut Self {
        self.inner.extend_from_slice(tag);
        self.open.push(self.inner.len());
        self.inner.extend_from_slice(&[0; 4]);
        self.inner.extend_from_slice(name);
        self
    }

    pub fn riff(&mut self, form: &[u8; 4]) -> &mut Self {
        self.container(b"RIFF", form)
    }

    pub fn list(&mut self, name: &[u8; 4]) -> &mut Self {
        self.container(b"LIST", name)
    }

    /// Writes a chunk, odd lengths get their pad byte
    pub fn chunk(&mut self, tag: &[u8; 4], data: &[u8]) -> &mut Self {
        self.inner.extend_from_slice(tag);
        self.inner.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.inner.extend_from_slice(data);
        if data.len() % 2 == 1 {
            self.inner.push(0);
        }
        self
    }

    pub fn raw(&mut self, data: &[u8]) -> &mut Self {
        self.inner.extend_from_slice(data);
        self
    }

    /// Patches the length of the innermost open container
    pub fn close(&mut self) -> &mut Self {
        let at = self.open.pop().expect("Nothing left to close");
        let length = (self.inner.len() - at - 4) as u32;
        LittleEndian::write_u32(&mut self.inner[at..at + 4], length);
        self
    }
}

pub fn u32s(fields: &[u32]) -> Vec<u8> {
    fields.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn main_header(total_frames: u32, streams: u32) -> Vec<u8> {
    u32s(&[40000, 0, 0, 0x10, total_frames, 0, streams, 0, 320, 240, 0, 0, 0, 0])
}

pub fn stream_header(fcc_type: &[u8; 4], handler: &[u8; 4], size: usize) -> Vec<u8> {
    let mut buf = vec![];
    buf.extend_from_slice(fcc_type);
    buf.extend_from_slice(handler);
    buf.extend_from_slice(&u32s(&[0, 0, 0, 1, 25, 0, 2, 0, 10000, 0]));
    buf.resize(size, 0);
    buf
}

pub fn bitmap_header(compression: &[u8; 4], clr_used: u32) -> Vec<u8> {
    let mut buf = u32s(&[40, 320, 240]);
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&24u16.to_le_bytes());
    buf.extend_from_slice(compression);
    buf.extend_from_slice(&u32s(&[0, 0, 0, clr_used, 0]));
    buf
}

pub fn index_header(
    longs_per_entry: u16,
    subtype: u8,
    index_type: u8,
    entries: u32,
    chunk_id: &[u8; 4],
    base_offset: u64,
) -> Vec<u8> {
    let mut buf = vec![];
    buf.extend_from_slice(&longs_per_entry.to_le_bytes());
    buf.push(subtype);
    buf.push(index_type);
    buf.extend_from_slice(&entries.to_le_bytes());
    buf.extend_from_slice(chunk_id);
    buf.extend_from_slice(&base_offset.to_le_bytes());
    buf.extend_from_slice(&[0; 4]);
    buf
}

pub fn legacy_entries(entries: &[(&[u8; 4], u32, u32, u32)]) -> Vec<u8> {
    let mut buf = vec![];
    for (tag, flags, offset, length) in entries {
        buf.extend_from_slice(*tag);
        buf.extend_from_slice(&u32s(&[*flags, *offset, *length]));
    }
    buf
}

#[cfg(test)]
mod test_builder {
    use super::*;

    #[test]
    fn nested_lengths() {
        let mut riff = RiffBuilder::new();
        riff.riff(b"AVI ").list(b"hdrl").chunk(b"JUNK", &[1, 2, 3]).close().close();
        let data = riff.into_inner();

        // JUNK is 8 + 3 + 1 pad, hdrl adds its header and name
        assert_eq!(data.len(), 12 + 12 + 12);
        assert_eq!(LittleEndian::read_u32(&data[4..8]), 4 + 12 + 12);
        assert_eq!(LittleEndian::read_u32(&data[16..20]), 4 + 12);
        assert_eq!(LittleEndian::read_u32(&data[28..32]), 3);
        assert_eq!(&data[8..12], b"AVI ");
    }

    #[test]
    fn header_sizes() {
        assert_eq!(main_header(1, 1).len(), 56);
        assert_eq!(stream_header(b"vids", b"MJPG", 56).len(), 56);
        assert_eq!(bitmap_header(b"MJPG", 0).len(), 40);
        assert_eq!(index_header(2, 0, 1, 0, b"00dc", 0).len(), 24);
        assert_eq!(legacy_entries(&[(b"00dc", 0, 0, 0)]).len(), 16);
    }
}
