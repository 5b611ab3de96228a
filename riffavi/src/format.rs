//! Stream formats (`strf`) and video properties (`vprp`)
//!
//! What a `strf` holds depends on the media type of the `strh` before it.
//!
//! | Media | Layout | Size |
//! | ----- | ------ | ---: |
//! | video | `BITMAPINFOHEADER` then `clr_used` palette entries | 40 + 4N |
//! | audio | `WAVEFORMATEX`, `cb_size` may be absent for PCM | 16 or 18 |
//! | audio, format `0x0055` | `MPEGLAYER3WAVEFORMAT` extension | 12 |
//! | audio, `cb_size == 22` | `WAVEFORMATEXTENSIBLE` extension | 22 |
//! | text  | no known layout | - |
use std::fmt;
use std::io::{Cursor, Read, Seek};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use riffcore::fourcc::{FourCC, ReadFourCC};

use crate::chunk::ChunkHeader;
use crate::error::{Anomaly, Result};
use crate::headers::MediaType;
use crate::report::{Event, ReportSink};
use crate::walker::{StreamContext, Walker};

pub const BITMAP_HEADER_SIZE: u32 = 40;
pub const RGB_QUAD_SIZE: u32 = 4;
pub const WAVE_FORMAT_SIZE: u32 = 18;
pub const WAVE_FORMAT_MIN_SIZE: u32 = 16;
pub const MP3_EXTENSION_SIZE: u32 = 12;
pub const EXTENSIBLE_SIZE: u32 = 22;
pub const VIDEO_PROPERTIES_SIZE: u32 = 36;
pub const FIELD_DESC_SIZE: u32 = 32;

pub const WAVE_FORMAT_MPEGLAYER3: u16 = 0x0055;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapInfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: FourCC,
    pub size_image: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub clr_used: u32,
    pub clr_important: u32,
}

impl BitmapInfoHeader {
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(BitmapInfoHeader {
            size: data.read_u32::<LittleEndian>()?,
            width: data.read_i32::<LittleEndian>()?,
            height: data.read_i32::<LittleEndian>()?,
            planes: data.read_u16::<LittleEndian>()?,
            bit_count: data.read_u16::<LittleEndian>()?,
            compression: data.read_code()?,
            size_image: data.read_u32::<LittleEndian>()?,
            x_pels_per_meter: data.read_i32::<LittleEndian>()?,
            y_pels_per_meter: data.read_i32::<LittleEndian>()?,
            clr_used: data.read_u32::<LittleEndian>()?,
            clr_important: data.read_u32::<LittleEndian>()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbQuad {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl RgbQuad {
    pub fn decode_all(buf: &[u8]) -> Vec<RgbQuad> {
        buf.chunks_exact(RGB_QUAD_SIZE as usize)
            .map(|q| RgbQuad {
                blue: q[0],
                green: q[1],
                red: q[2],
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFormatEx {
    pub format_tag: u16,
    pub channels: u16,
    pub samples_per_sec: u32,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub cb_size: u16,
}

impl WaveFormatEx {
    /// A buffer without `cb_size` decodes with `cb_size` 0
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(WaveFormatEx {
            format_tag: data.read_u16::<LittleEndian>()?,
            channels: data.read_u16::<LittleEndian>()?,
            samples_per_sec: data.read_u32::<LittleEndian>()?,
            avg_bytes_per_sec: data.read_u32::<LittleEndian>()?,
            block_align: data.read_u16::<LittleEndian>()?,
            bits_per_sample: data.read_u16::<LittleEndian>()?,
            cb_size: match buf.len() {
                len if len >= WAVE_FORMAT_SIZE as usize => data.read_u16::<LittleEndian>()?,
                _ => 0,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp3Extension {
    pub id: u16,
    pub flags: u32,
    pub block_size: u16,
    pub frames_per_block: u16,
    pub codec_delay: u16,
}

impl Mp3Extension {
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(Mp3Extension {
            id: data.read_u16::<LittleEndian>()?,
            flags: data.read_u32::<LittleEndian>()?,
            block_size: data.read_u16::<LittleEndian>()?,
            frames_per_block: data.read_u16::<LittleEndian>()?,
            codec_delay: data.read_u16::<LittleEndian>()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFormatExtensible {
    // Also read as samples per block, depending on the sub format
    pub valid_bits_per_sample: u16,
    pub channel_mask: u32,
    pub sub_format: Guid,
}

impl WaveFormatExtensible {
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);

        Ok(WaveFormatExtensible {
            valid_bits_per_sample: data.read_u16::<LittleEndian>()?,
            channel_mask: data.read_u32::<LittleEndian>()?,
            sub_format: Guid {
                data1: data.read_u32::<LittleEndian>()?,
                data2: data.read_u16::<LittleEndian>()?,
                data3: data.read_u16::<LittleEndian>()?,
                data4: {
                    let mut data4 = [0u8; 8];
                    data.read_exact(&mut data4)?;
                    data4
                },
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    pub compressed_height: u32,
    pub compressed_width: u32,
    pub valid_height: u32,
    pub valid_width: u32,
    pub valid_x_offset: u32,
    pub valid_y_offset: u32,
    pub x_offset_in_t: u32,
    pub y_valid_start_line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProperties {
    pub format_token: u32,
    pub standard: u32,
    pub refresh_rate: u32,
    pub h_total_in_t: u32,
    pub v_total_in_lines: u32,
    pub aspect_ratio: u32,
    pub width: u32,
    pub height: u32,
    pub fields_per_frame: u32,
    pub fields: Vec<FieldDesc>,
}

impl VideoProperties {
    /// Decodes the fixed part, then as many field descriptions as `buf` holds
    /// up to `fields_per_frame`
    pub fn decode(buf: &[u8]) -> std::io::Result<Self> {
        let mut data = Cursor::new(buf);
        let mut head = [0u32; 9];
        data.read_u32_into::<LittleEndian>(&mut head)?;

        let room = (buf.len() - VIDEO_PROPERTIES_SIZE as usize) / FIELD_DESC_SIZE as usize;
        let count = (head[8] as usize).min(room);

        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            let mut f = [0u32; 8];
            data.read_u32_into::<LittleEndian>(&mut f)?;
            fields.push(FieldDesc {
                compressed_height: f[0],
                compressed_width: f[1],
                valid_height: f[2],
                valid_width: f[3],
                valid_x_offset: f[4],
                valid_y_offset: f[5],
                x_offset_in_t: f[6],
                y_valid_start_line: f[7],
            });
        }

        Ok(VideoProperties {
            format_token: head[0],
            standard: head[1],
            refresh_rate: head[2],
            h_total_in_t: head[3],
            v_total_in_lines: head[4],
            aspect_ratio: head[5],
            width: head[6],
            height: head[7],
            fields_per_frame: head[8],
            fields,
        })
    }

    /// `(x, y)` from the packed `x:y` aspect ratio
    pub fn aspect(&self) -> (u16, u16) {
        ((self.aspect_ratio >> 16) as u16, self.aspect_ratio as u16)
    }

    pub fn format_name(&self) -> &'static str {
        match self.format_token {
            0 => "FORMAT_UNKNOWN",
            1 => "FORMAT_PAL_SQUARE",
            2 => "FORMAT_PAL_CCIR_601",
            3 => "FORMAT_NTSC_SQUARE",
            4 => "FORMAT_NTSC_CCIR_601",
            _ => "INVALID",
        }
    }

    pub fn standard_name(&self) -> &'static str {
        match self.standard {
            0 => "STANDARD_UNKNOWN",
            1 => "STANDARD_PAL",
            2 => "STANDARD_NTSC",
            3 => "STANDARD_SECAM",
            _ => "INVALID",
        }
    }
}

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub(crate) fn stream_format(&mut self, header: &ChunkHeader, payload: u32, stream: &StreamContext) -> Result<()> {
        match stream.0 {
            Some(MediaType::Video) => self.video_format(header, payload),
            Some(MediaType::Audio) => self.audio_format(header, payload),
            Some(MediaType::Text) => self.hex_dump(payload),
            Some(MediaType::Unknown) => self.anomaly(header.address, Anomaly::UnsupportedStreamType),
            None => self.anomaly(header.address, Anomaly::MissingStreamHeader),
        }
    }

    fn video_format(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < BITMAP_HEADER_SIZE {
            return self.short_chunk(header, BITMAP_HEADER_SIZE, payload);
        }

        let bitmap = BitmapInfoHeader::decode(&self.record(BITMAP_HEADER_SIZE as usize, "bitmap header")?)?;
        let colors = bitmap.clr_used;
        let mut left = payload - BITMAP_HEADER_SIZE;
        self.emit(Event::VideoFormat(bitmap))?;

        if colors > 0 {
            let room = left / RGB_QUAD_SIZE;
            if colors > room {
                self.anomaly(header.address, Anomaly::PaletteOverrun { colors, room })?;
            }

            let read = colors.min(room) * RGB_QUAD_SIZE;
            let entries = RgbQuad::decode_all(&self.record(read as usize, "palette")?);
            left -= read;
            self.emit(Event::Palette { colors, entries })?;
        }

        if left > 0 {
            self.anomaly(header.address, Anomaly::Unrecognized(left))?;
        }
        Ok(())
    }

    fn audio_format(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < WAVE_FORMAT_MIN_SIZE {
            return self.short_chunk(header, WAVE_FORMAT_MIN_SIZE, payload);
        }

        let read = payload.min(WAVE_FORMAT_SIZE);
        let wave = WaveFormatEx::decode(&self.record(read as usize, "wave format")?)?;
        let (format_tag, cb_size) = (wave.format_tag, wave.cb_size as u32);
        let left = payload - read;
        self.emit(Event::AudioFormat(wave))?;

        if cb_size == 0 {
            return Ok(());
        }

        if format_tag == WAVE_FORMAT_MPEGLAYER3 {
            if left < MP3_EXTENSION_SIZE {
                return self.short_chunk(header, read + MP3_EXTENSION_SIZE, payload);
            }
            let ext = Mp3Extension::decode(&self.record(MP3_EXTENSION_SIZE as usize, "MP3 extension")?)?;
            self.emit(Event::Mp3Extension(ext))
        } else if cb_size == EXTENSIBLE_SIZE {
            if left < EXTENSIBLE_SIZE {
                return self.short_chunk(header, read + EXTENSIBLE_SIZE, payload);
            }
            let ext = WaveFormatExtensible::decode(&self.record(EXTENSIBLE_SIZE as usize, "audio extension")?)?;
            self.emit(Event::ExtensibleAudio(ext))
        } else {
            self.hex_dump(cb_size.min(left))
        }
    }

    pub(crate) fn video_properties(&mut self, header: &ChunkHeader, payload: u32) -> Result<()> {
        if payload < VIDEO_PROPERTIES_SIZE {
            return self.short_chunk(header, VIDEO_PROPERTIES_SIZE, payload);
        }

        let mut buf = self.record(VIDEO_PROPERTIES_SIZE as usize, "video properties")?;
        let declared = LittleEndian::read_u32(&buf[32..36]);
        let fit = (payload - VIDEO_PROPERTIES_SIZE) / FIELD_DESC_SIZE;
        if declared > fit {
            self.anomaly(header.address, Anomaly::ClampedEntries { declared, fit })?;
        }

        let fields = declared.min(fit) * FIELD_DESC_SIZE;
        buf.extend(self.record(fields as usize, "field description")?);
        self.emit(Event::VideoProperties(VideoProperties::decode(&buf)?))
    }
}

#[cfg(test)]
mod test_video_format {
    use super::*;

    #[test]
    fn bitmap_header() {
        let mut buf = vec![];
        buf.extend_from_slice(&40u32.to_le_bytes());
        buf.extend_from_slice(&320i32.to_le_bytes());
        buf.extend_from_slice(&(-240i32).to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&8u16.to_le_bytes());
        buf.extend_from_slice(b"RLE8");
        for field in [76800u32, 0, 0, 2, 2] {
            buf.extend_from_slice(&field.to_le_bytes());
        }
        assert_eq!(buf.len() as u32, BITMAP_HEADER_SIZE);

        let header = BitmapInfoHeader::decode(&buf).unwrap();
        assert_eq!(header.height, -240);
        assert_eq!(header.bit_count, 8);
        assert_eq!(header.compression, FourCC(*b"RLE8"));
        assert_eq!(header.clr_used, 2);
    }

    #[test]
    fn palette_ignores_partial_entries() {
        let palette = RgbQuad::decode_all(&[1, 2, 3, 0, 4, 5, 6, 0, 7]);

        assert_eq!(
            palette,
            vec![
                RgbQuad {
                    blue: 1,
                    green: 2,
                    red: 3
                },
                RgbQuad {
                    blue: 4,
                    green: 5,
                    red: 6
                },
            ]
        );
    }

    #[test]
    fn video_properties_bounded_by_buffer() {
        let mut buf = vec![];
        for field in [2u32, 1, 50, 864, 625, (4 << 16) | 3, 720, 576, 2] {
            buf.extend_from_slice(&field.to_le_bytes());
        }
        for field in [288u32, 720, 288, 720, 0, 0, 0, 23] {
            buf.extend_from_slice(&field.to_le_bytes());
        }

        // Two fields declared, only one present
        let props = VideoProperties::decode(&buf).unwrap();
        assert_eq!(props.fields_per_frame, 2);
        assert_eq!(props.fields.len(), 1);
        assert_eq!(props.fields[0].y_valid_start_line, 23);
        assert_eq!(props.aspect(), (4, 3));
        assert_eq!(props.format_name(), "FORMAT_PAL_CCIR_601");
        assert_eq!(props.standard_name(), "STANDARD_PAL");
    }
}
