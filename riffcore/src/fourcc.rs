//! Four character codes and `movi` tag canonicalization
//!
//! Chunks inside a `movi` list carry the stream number in their tag, either as
//! `NNxx` (`00dc`, `01wb`, ...) or as `ixNN` for Open-DML standard indexes. `NN`
//! is a two digit upper case hex number. Lower case hex is not accepted since
//! `dcdb` would otherwise read as stream `0xDC` of class `db`.
//!
//! | On disk | Canonical | Stream |
//! | :-----: | :-------: | -----: |
//! | `00dc`  | `##dc`    | 0      |
//! | `01wb`  | `##wb`    | 1      |
//! | `ix1F`  | `ix##`    | 31     |
//! | `JUNK`  | `JUNK`    | -      |
use std::fmt;
use std::io::Read;

use crate::buf::fill_buf;

const MOVI_CLASSES: [[u8; 2]; 6] = [*b"db", *b"dc", *b"wb", *b"tx", *b"ix", *b"pc"];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const RIFF: FourCC = FourCC(*b"RIFF");
    pub const LIST: FourCC = FourCC(*b"LIST");
    pub const JUNK: FourCC = FourCC(*b"JUNK");
    pub const ZERO: FourCC = FourCC([0; 4]);

    pub fn to_ascii_uppercase(self) -> FourCC {
        FourCC(self.0.map(|c| c.to_ascii_uppercase()))
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            let c = if c.is_ascii_graphic() || c == b' ' { c as char } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self)
    }
}

/// A tag read inside a `movi` list, stream numbers folded out into `stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub code: FourCC,
    pub stream: Option<u8>,
}

impl Tag {
    /// Spells the tag the way it appears on disk.
    pub fn spelled(&self) -> FourCC {
        let Some(stream) = self.stream else {
            return self.code;
        };
        let [hi, lo] = hex_digits(stream);
        let c = self.code.0;

        if c == *b"ix##" {
            FourCC([b'i', b'x', hi, lo])
        } else {
            FourCC([hi, lo, c[2], c[3]])
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.spelled().fmt(f)
    }
}

pub fn canonicalize(raw: [u8; 4]) -> Tag {
    if raw[..2] == *b"ix" {
        if let Some(stream) = stream_number(raw[2], raw[3]) {
            return Tag {
                code: FourCC(*b"ix##"),
                stream: Some(stream),
            };
        }
    }

    if MOVI_CLASSES.contains(&[raw[2], raw[3]]) {
        if let Some(stream) = stream_number(raw[0], raw[1]) {
            return Tag {
                code: FourCC([b'#', b'#', raw[2], raw[3]]),
                stream: Some(stream),
            };
        }
    }

    Tag {
        code: FourCC(raw),
        stream: None,
    }
}

fn stream_number(hi: u8, lo: u8) -> Option<u8> {
    Some(upper_hex(hi)? << 4 | upper_hex(lo)?)
}

fn upper_hex(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_digits(n: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(n >> 4) as usize], DIGITS[(n & 0x0F) as usize]]
}

pub trait ReadFourCC: Read {
    /// `None` when fewer than 4 bytes are left, the usual end of container.
    fn read_fourcc(&mut self) -> std::io::Result<Option<FourCC>> {
        let mut code = [0u8; 4];
        match fill_buf(self, &mut code)? {
            (_, 4) => Ok(Some(FourCC(code))),
            _ => Ok(None),
        }
    }

    /// A tag inside a fixed size record, running out is an error.
    fn read_code(&mut self) -> std::io::Result<FourCC> {
        self.read_fourcc()?
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
    }

    /// A canonical movi tag inside an index record.
    fn read_movi_tag(&mut self) -> std::io::Result<Tag> {
        Ok(canonicalize(self.read_code()?.0))
    }
}

impl<R: Read + ?Sized> ReadFourCC for R {}

#[cfg(test)]
mod test_canonicalize {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stream_chunks() {
        assert_eq!(
            canonicalize(*b"01dc"),
            Tag {
                code: FourCC(*b"##dc"),
                stream: Some(1)
            }
        );
        assert_eq!(
            canonicalize(*b"01wb"),
            Tag {
                code: FourCC(*b"##wb"),
                stream: Some(1)
            }
        );
        assert_eq!(
            canonicalize(*b"02dc"),
            Tag {
                code: FourCC(*b"##dc"),
                stream: Some(2)
            }
        );
        assert_eq!(canonicalize(*b"FFpc").stream, Some(255));
        assert_eq!(canonicalize(*b"00ix").code, FourCC(*b"##ix"));
    }

    #[test]
    fn index_chunks() {
        assert_eq!(
            canonicalize(*b"ix0A"),
            Tag {
                code: FourCC(*b"ix##"),
                stream: Some(10)
            }
        );
    }

    #[test]
    fn all_streams_round_trip() {
        for stream in 0..=255u8 {
            let [hi, lo] = hex_digits(stream);

            for class in MOVI_CLASSES {
                let tag = canonicalize([hi, lo, class[0], class[1]]);
                assert_eq!(tag.stream, Some(stream));
                assert_eq!(tag.code, FourCC([b'#', b'#', class[0], class[1]]));
                assert_eq!(tag.spelled(), FourCC([hi, lo, class[0], class[1]]));
            }

            let tag = canonicalize([b'i', b'x', hi, lo]);
            assert_eq!(tag.stream, Some(stream));
            assert_eq!(tag.code, FourCC(*b"ix##"));
            assert_eq!(tag.spelled(), FourCC([b'i', b'x', hi, lo]));
        }
    }

    #[test]
    fn lower_case_hex_is_not_a_stream() {
        assert_eq!(canonicalize(*b"0adc").stream, None);
        assert_eq!(canonicalize(*b"0adc").code, FourCC(*b"0adc"));
        assert_eq!(canonicalize(*b"ix0a").stream, None);

        // Would be stream 0xDC of class db with lower case hex allowed
        assert_eq!(canonicalize(*b"dcdb").stream, None);
    }

    #[test]
    fn other_tags_untouched() {
        for raw in [*b"JUNK", *b"LIST", *b"rec ", *b"00xx", *b"ixix"] {
            assert_eq!(
                canonicalize(raw),
                Tag {
                    code: FourCC(raw),
                    stream: None
                }
            );
        }
    }

    #[test]
    fn read_until_eof() {
        let mut data = Cursor::new(b"01dcLIS".to_vec());

        assert_eq!(
            data.read_movi_tag().unwrap(),
            Tag {
                code: FourCC(*b"##dc"),
                stream: Some(1)
            }
        );
        assert_eq!(data.read_fourcc().unwrap(), None);
    }

    #[test]
    fn code_inside_record() {
        let mut data = Cursor::new(b"vidsMJP".to_vec());

        assert_eq!(data.read_code().unwrap(), FourCC(*b"vids"));
        assert_eq!(
            data.read_code().unwrap_err().kind(),
            std::io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn display_masks_unprintable() {
        assert_eq!(FourCC(*b"AVI ").to_string(), "AVI ");
        assert_eq!(FourCC([0, b'a', 0x7F, b'Z']).to_string(), ".a.Z");
        assert_eq!(canonicalize(*b"1Fwb").to_string(), "1Fwb");
    }
}
