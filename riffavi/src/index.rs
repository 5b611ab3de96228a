//! Legacy `idx1` and Open-DML `indx`/`ix##` indexes
//!
//! An Open-DML index starts with a 24 byte header followed by
//! `entries_in_use` entries of `entry_width` bytes each.
//!
//! | Type    | Name           | Description |
//! | ------: | -------------- | ----------- |
//! | u16     | longs_per_entry| Entry width in 4 byte units |
//! | u8      | index_subtype  | `0x01` for field indexes |
//! | u8      | index_type     | `0x00` index of indexes, `0x01` index of chunks |
//! | u32     | entries_in_use | |
//! | [u8; 4] | chunk_id       | Tag of the indexed chunks, `00dc` etc |
//! | u64     | base_offset    | Entries are relative to this (reserved in a super index) |
//! | u32     | reserved       | |
//!
//! The variant decides the entry layout:
//!
//! | Type | Subtype | Variant  | Entry |
//! | ---: | ------: | -------- | ----- |
//! | 0x00 | any     | super    | u64 offset, u32 size, u32 duration |
//! | 0x01 | 0x01    | field    | u32 offset, u32 size, u32 second field offset |
//! | 0x01 | other   | standard | u32 offset, u32 size |
//!
//! Bit 31 of a standard or field entry size is set for entries that are NOT
//! key frames. A legacy `idx1` is a bare array of 16 byte entries whose
//! offsets are relative to the `movi` tag of the segment.
use std::io::{Cursor, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

use riffcore::addr::Whence;
use riffcore::fourcc::{FourCC, ReadFourCC, Tag};

use crate::chunk::ChunkHeader;
use crate::error::{Anomaly, Result, WalkError};
use crate::report::{Event, ReportSink};
use crate::walker::Walker;

pub const INDEX_HEADER_SIZE: u32 = 24;
pub const LEGACY_ENTRY_SIZE: u32 = 16;

const NOT_KEYFRAME: u32 = 0x8000_0000;

pub const LEGACY_FLAGS: &[(u32, &str)] = &[
    (0x0000_0010, "KEYFRAME"),
    (0x0000_0001, "LIST"),
    (0x0000_0020, "FIRSTPART"),
    (0x0000_0040, "LASTPART"),
    (0x0000_0100, "NO_TIME"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Super,
    Standard,
    Field,
    Unknown,
}

impl IndexKind {
    // Any subtype but 0x01 is read as a standard index
    pub fn of(index_type: u8, subtype: u8) -> Self {
        match (index_type, subtype) {
            (0x00, _) => IndexKind::Super,
            (0x01, 0x01) => IndexKind::Field,
            (0x01, _) => IndexKind::Standard,
            _ => IndexKind::Unknown,
        }
    }

    /// Bytes of an entry this variant understands
    pub fn entry_size(self) -> Option<u32> {
        match self {
            IndexKind::Super => Some(16),
            IndexKind::Standard => Some(8),
            IndexKind::Field => Some(12),
            IndexKind::Unknown => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            IndexKind::Super => "ODML Super Index",
            IndexKind::Standard => "ODML Standard Index",
            IndexKind::Field => "ODML Field Index",
            IndexKind::Unknown => "Unknown Index",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub entry_width: u32,
    pub subtype: u8,
    pub index_type: u8,
    pub entries_in_use: u32,
    pub chunk_id: Tag,
    pub base_offset: u64,
    pub kind: IndexKind,
}

impl IndexHeader {
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        let entry_width = data.read_u16::<LittleEndian>()? as u32 * 4;
        let subtype = data.read_u8()?;
        let index_type = data.read_u8()?;
        let entries_in_use = data.read_u32::<LittleEndian>()?;
        let chunk_id = data.read_movi_tag()?;
        let base_offset = data.read_u64::<LittleEndian>()?;

        Ok(IndexHeader {
            entry_width,
            subtype,
            index_type,
            entries_in_use,
            chunk_id,
            base_offset,
            kind: IndexKind::of(index_type, subtype),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexRecord {
    Legacy {
        tag: Tag,
        flags: u32,
        offset: u32,
        length: u32,
    },
    Super {
        absolute_offset: u64,
        size: u32,
        duration: u32,
    },
    Standard {
        offset: u32,
        size: u32,
        keyframe: bool,
    },
    Field {
        offset: u32,
        second_field: u32,
        size: u32,
        keyframe: bool,
    },
}

impl IndexRecord {
    /// Decodes the known prefix of an Open-DML entry, `None` for unknown variants
    pub fn decode(kind: IndexKind, buf: &[u8]) -> std::io::Result<Option<Self>> {
        let mut data = Cursor::new(buf);

        Ok(match kind {
            IndexKind::Super => Some(IndexRecord::Super {
                absolute_offset: data.read_u64::<LittleEndian>()?,
                size: data.read_u32::<LittleEndian>()?,
                duration: data.read_u32::<LittleEndian>()?,
            }),
            IndexKind::Standard => {
                let offset = data.read_u32::<LittleEndian>()?;
                let size = data.read_u32::<LittleEndian>()?;
                Some(IndexRecord::Standard {
                    offset,
                    size: size & !NOT_KEYFRAME,
                    keyframe: size & NOT_KEYFRAME == 0,
                })
            }
            IndexKind::Field => {
                let offset = data.read_u32::<LittleEndian>()?;
                let size = data.read_u32::<LittleEndian>()?;
                Some(IndexRecord::Field {
                    offset,
                    second_field: data.read_u32::<LittleEndian>()?,
                    size: size & !NOT_KEYFRAME,
                    keyframe: size & NOT_KEYFRAME == 0,
                })
            }
            IndexKind::Unknown => None,
        })
    }

    pub fn decode_legacy(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(IndexRecord::Legacy {
            tag: data.read_movi_tag()?,
            flags: data.read_u32::<LittleEndian>()?,
            offset: data.read_u32::<LittleEndian>()?,
            length: data.read_u32::<LittleEndian>()?,
        })
    }

    /// Absolute address of what the entry points at, `base` being the
    /// `movi` address for legacy entries and the index base otherwise
    pub fn target(&self, base: u64) -> Option<u64> {
        match self {
            IndexRecord::Legacy { offset, .. } => base.checked_add(*offset as u64),
            IndexRecord::Super { absolute_offset, .. } => Some(*absolute_offset),
            IndexRecord::Standard { offset, .. } | IndexRecord::Field { offset, .. } => {
                base.checked_add(*offset as u64)
            }
        }
    }
}

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub(crate) fn legacy_index(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        let count = payload / LEGACY_ENTRY_SIZE;
        let remainder = payload % LEGACY_ENTRY_SIZE;

        let base = match self.movi_base {
            Some(base) => base,
            None => {
                self.anomaly(header.address, Anomaly::NoMoviBase)?;
                self.space.base()
            }
        };

        for i in 0..count {
            let record = IndexRecord::decode_legacy(&self.record(LEGACY_ENTRY_SIZE as usize, "idx1 entry")?)?;
            if (i as usize) < self.limits.display_limit {
                let target = record.target(base);
                self.emit(Event::IndexEntry { record, target })?;
            }
        }
        self.suppressed(header.tag, count)?;

        if remainder > 0 {
            self.anomaly(
                header.address,
                Anomaly::Remainder {
                    tag: header.tag,
                    bytes: remainder,
                },
            )?;
        }
        Ok(())
    }

    /// Reads the index header without consuming it
    pub(crate) fn peek_index_kind(&mut self, payload: u32) -> Result<Option<IndexKind>> {
        if payload < INDEX_HEADER_SIZE {
            return Ok(None);
        }

        let index = IndexHeader::decode(&self.record(INDEX_HEADER_SIZE as usize, "index header")?)?;
        self.space.seek(-(INDEX_HEADER_SIZE as i64), Whence::Current)?;
        Ok(Some(index.kind))
    }

    pub(crate) fn odml_index(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < INDEX_HEADER_SIZE {
            return self.short_chunk(header, INDEX_HEADER_SIZE, payload);
        }

        let index = IndexHeader::decode(&self.record(INDEX_HEADER_SIZE as usize, "index header")?)?;
        self.emit(Event::IndexHeader(index.clone()))?;

        // Narrower entries than the variant needs cannot be read at all
        let known = match index.kind.entry_size() {
            Some(size) if index.entry_width >= size => size,
            _ => {
                return self.anomaly(
                    header.address,
                    Anomaly::UnknownIndex {
                        index_type: index.index_type,
                        subtype: index.subtype,
                        width: index.entry_width,
                    },
                );
            }
        };

        if index.entry_width > known {
            self.anomaly(
                header.address,
                Anomaly::WideEntries {
                    width: index.entry_width,
                    known,
                },
            )?;
        }

        let room = payload - INDEX_HEADER_SIZE;
        let fit = room / index.entry_width;
        let count = if index.entries_in_use > fit {
            self.anomaly(
                header.address,
                Anomaly::ClampedEntries {
                    declared: index.entries_in_use,
                    fit,
                },
            )?;
            fit
        } else {
            index.entries_in_use
        };

        for i in 0..count {
            let buf = self.record(index.entry_width as usize, "index entry")?;

            if (i as usize) < self.limits.display_limit {
                let record = IndexRecord::decode(index.kind, &buf[..known as usize])?
                    .ok_or_else(|| WalkError::truncated("index entry", header.address))?;
                let target = record.target(index.base_offset);
                self.emit(Event::IndexEntry { record, target })?;
            }
        }
        self.suppressed(header.tag, count)?;

        let padding = room - count * index.entry_width;
        if padding > 0 {
            let address = self.space.address();
            self.emit(Event::Padding {
                address,
                bytes: padding,
            })?;
        }
        Ok(())
    }

    pub(crate) fn suppressed(&mut self, what: FourCC, count: u32) -> Result<()> {
        let limit = self.limits.display_limit as u64;
        if count as u64 > limit {
            self.emit(Event::Suppressed {
                what,
                count: count as u64 - limit,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_index_kind {
    use super::*;

    #[test]
    fn variants() {
        assert_eq!(IndexKind::of(0x01, 0x00), IndexKind::Standard);
        assert_eq!(IndexKind::of(0x01, 0x01), IndexKind::Field);
        assert_eq!(IndexKind::of(0x00, 0x00), IndexKind::Super);
        assert_eq!(IndexKind::of(0x00, 0x7F), IndexKind::Super);
        assert_eq!(IndexKind::of(0x01, 0x42), IndexKind::Standard);
        assert_eq!(IndexKind::of(0x80, 0x00), IndexKind::Unknown);
        assert_eq!(IndexKind::of(0x02, 0x01), IndexKind::Unknown);
    }

    #[test]
    fn keyframe_bit() {
        let mut buf = vec![];
        buf.extend_from_slice(&0x100u32.to_le_bytes());
        buf.extend_from_slice(&(0x8000_0000u32 | 1234).to_le_bytes());

        assert_eq!(
            IndexRecord::decode(IndexKind::Standard, &buf).unwrap(),
            Some(IndexRecord::Standard {
                offset: 0x100,
                size: 1234,
                keyframe: false
            })
        );

        buf[7] = 0;
        assert_eq!(
            IndexRecord::decode(IndexKind::Standard, &buf).unwrap(),
            Some(IndexRecord::Standard {
                offset: 0x100,
                size: 1234,
                keyframe: true
            })
        );
    }

    #[test]
    fn targets() {
        let standard = IndexRecord::Standard {
            offset: 8,
            size: 0,
            keyframe: true,
        };
        let top = IndexRecord::Super {
            absolute_offset: 0x1_0000_0000,
            size: 0,
            duration: 0,
        };

        assert_eq!(standard.target(0x1_0000_0000), Some(0x1_0000_0008));
        assert_eq!(standard.target(u64::MAX), None);
        assert_eq!(top.target(12345), Some(0x1_0000_0000));
    }
}
