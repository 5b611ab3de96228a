//! Fixed layout headers: `avih`, `strh` and `dmlh`
//!
//! The stream header was written in three sizes over the years, all of them
//! decode into the same [`StreamHeader`].
//!
//! | Size | Frame rectangle |
//! | ---: | --------------- |
//! | 48   | absent |
//! | 56   | four `i16` |
//! | 64   | four `i32`, narrowed to `i16` |
use std::io::{Cursor, Read, Seek};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use riffcore::fourcc::{FourCC, ReadFourCC};

use crate::chunk::ChunkHeader;
use crate::error::{Anomaly, Result};
use crate::report::{Event, ReportSink};
use crate::walker::{StreamContext, Walker};

pub const MAIN_HEADER_SIZE: u32 = 56;

pub const MAIN_FLAGS: &[(u32, &str)] = &[
    (0x0000_0010, "HASINDEX"),
    (0x0000_0020, "MUSTUSEINDEX"),
    (0x0000_0100, "ISINTERLEAVED"),
    (0x0000_0800, "TRUSTCKTYPE"),
    (0x0001_0000, "WASCAPTUREFILE"),
    (0x0002_0000, "COPYRIGHTED"),
];

pub const STREAM_FLAGS: &[(u32, &str)] = &[(0x0000_0001, "DISABLED"), (0x0001_0000, "VIDEO_PALCHANGES")];

/// Names of the bits set in `flags`, unnamed bits are ignored
pub fn flag_names(flags: u32, table: &[(u32, &'static str)]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainHeader {
    pub micro_sec_per_frame: u32,
    pub max_bytes_per_sec: u32,
    pub padding_granularity: u32,
    pub flags: u32,
    pub total_frames: u32,
    pub initial_frames: u32,
    pub streams: u32,
    pub suggested_buffer_size: u32,
    pub width: u32,
    pub height: u32,
    pub reserved: [u32; 4],
}

impl MainHeader {
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(MainHeader {
            micro_sec_per_frame: data.read_u32::<LittleEndian>()?,
            max_bytes_per_sec: data.read_u32::<LittleEndian>()?,
            padding_granularity: data.read_u32::<LittleEndian>()?,
            flags: data.read_u32::<LittleEndian>()?,
            total_frames: data.read_u32::<LittleEndian>()?,
            initial_frames: data.read_u32::<LittleEndian>()?,
            streams: data.read_u32::<LittleEndian>()?,
            suggested_buffer_size: data.read_u32::<LittleEndian>()?,
            width: data.read_u32::<LittleEndian>()?,
            height: data.read_u32::<LittleEndian>()?,
            reserved: {
                let mut reserved = [0u32; 4];
                data.read_u32_into::<LittleEndian>(&mut reserved)?;
                reserved
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    Video,
    Audio,
    Text,
    #[default]
    Unknown,
}

impl MediaType {
    pub fn from_fourcc(code: FourCC) -> Self {
        match &code.0 {
            b"vids" => MediaType::Video,
            b"auds" => MediaType::Audio,
            b"txts" => MediaType::Text,
            _ => MediaType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    pub fcc_type: FourCC,
    pub handler: FourCC,
    pub flags: u32,
    pub priority: u16,
    pub language: u16,
    pub initial_frames: u32,
    pub scale: u32,
    pub rate: u32,
    pub start: u32,
    pub length: u32,
    pub suggested_buffer_size: u32,
    pub quality: u32,
    pub sample_size: u32,
    pub frame: Option<Rect>,
}

impl StreamHeader {
    pub const SIZES: [u32; 3] = [48, 56, 64];

    /// Decodes any of the three layouts, `None` for any other size
    pub fn decode(buf: &[u8]) -> std::io::Result<Option<Self>> {
        let mut data = Cursor::new(buf);

        let mut header = match buf.len() {
            48 | 56 | 64 => StreamHeader {
                fcc_type: data.read_code()?,
                handler: data.read_code()?,
                flags: data.read_u32::<LittleEndian>()?,
                priority: data.read_u16::<LittleEndian>()?,
                language: data.read_u16::<LittleEndian>()?,
                initial_frames: data.read_u32::<LittleEndian>()?,
                scale: data.read_u32::<LittleEndian>()?,
                rate: data.read_u32::<LittleEndian>()?,
                start: data.read_u32::<LittleEndian>()?,
                length: data.read_u32::<LittleEndian>()?,
                suggested_buffer_size: data.read_u32::<LittleEndian>()?,
                quality: data.read_u32::<LittleEndian>()?,
                sample_size: data.read_u32::<LittleEndian>()?,
                frame: None,
            },
            _ => return Ok(None),
        };

        header.frame = match buf.len() {
            56 => Some(Rect {
                left: data.read_i16::<LittleEndian>()?,
                top: data.read_i16::<LittleEndian>()?,
                right: data.read_i16::<LittleEndian>()?,
                bottom: data.read_i16::<LittleEndian>()?,
            }),
            64 => Some(Rect {
                left: data.read_i32::<LittleEndian>()? as i16,
                top: data.read_i32::<LittleEndian>()? as i16,
                right: data.read_i32::<LittleEndian>()? as i16,
                bottom: data.read_i32::<LittleEndian>()? as i16,
            }),
            _ => None,
        };

        Ok(Some(header))
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_fourcc(self.fcc_type)
    }
}

/// Open-DML `dmlh`, only the first field is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedHeader {
    pub total_frames: u32,
}

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub(crate) fn main_header(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < MAIN_HEADER_SIZE {
            return self.short_chunk(header, MAIN_HEADER_SIZE, payload);
        }

        let main = MainHeader::decode(&self.record(MAIN_HEADER_SIZE as usize, "main header")?)?;
        self.emit(Event::MainHeader(main))
    }

    pub(crate) fn stream_header(
        &mut self,
        header: &ChunkHeader,
        payload: u32,
        stream: &mut StreamContext,
    ) -> Result<()> {
        if !StreamHeader::SIZES.contains(&payload) {
            return self.anomaly(header.address, Anomaly::StreamHeaderSize(payload));
        }

        let buf = self.record(payload as usize, "stream header")?;
        let Some(strh) = StreamHeader::decode(&buf)? else {
            return self.anomaly(header.address, Anomaly::StreamHeaderSize(payload));
        };

        let media = strh.media_type();
        let fcc_type = strh.fcc_type;
        stream.0 = Some(media);
        self.emit(Event::StreamHeader(strh))?;

        if media == MediaType::Unknown {
            self.anomaly(header.address, Anomaly::UnknownStreamType(fcc_type))?;
        }
        Ok(())
    }

    pub(crate) fn extended_header(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < 4 {
            return self.short_chunk(header, 4, payload);
        }

        let buf = self.record(4, "extended header")?;
        self.emit(Event::ExtendedHeader(ExtendedHeader {
            total_frames: LittleEndian::read_u32(&buf),
        }))
    }

    pub(crate) fn short_chunk(&mut self, header: &ChunkHeader, wanted: u32, got: u32) -> Result<()> {
        self.anomaly(
            header.address,
            Anomaly::ShortChunk {
                tag: header.tag,
                wanted,
                got,
            },
        )
    }
}


#[cfg(test)]
mod test_main_header {
    use super::*;

    #[test]
    fn decode_main_header() {
        let mut buf = vec![];
        for field in [40000u32, 1_000_000, 0, 0x0000_0910, 250, 0, 2, 0x10000, 640, 480, 0, 0, 0, 0] {
            buf.extend_from_slice(&field.to_le_bytes());
        }
        assert_eq!(buf.len() as u32, MAIN_HEADER_SIZE);

        let header = MainHeader::decode(&buf).unwrap();
        assert_eq!(header.micro_sec_per_frame, 40000);
        assert_eq!(header.total_frames, 250);
        assert_eq!(header.streams, 2);
        assert_eq!(header.width, 640);
        assert_eq!(header.height, 480);
        assert_eq!(
            flag_names(header.flags, MAIN_FLAGS),
            vec!["HASINDEX", "ISINTERLEAVED", "TRUSTCKTYPE"]
        );
    }

    #[test]
    fn media_types() {
        assert_eq!(MediaType::from_fourcc(FourCC(*b"auds")), MediaType::Audio);
        assert_eq!(MediaType::from_fourcc(FourCC(*b"txts")), MediaType::Text);
        assert_eq!(MediaType::from_fourcc(FourCC(*b"mids")), MediaType::Unknown);
    }
}
