//! The `movi` list, where the stream data lives
//!
//! Chunks are reported by their canonical tag, so `00dc` and `01dc` both
//! count against `##dc`. Counts are shared by every list nested inside one
//! `movi`, `rec ` lists included.
use std::io::{Read, Seek};

use log::debug;

use riffcore::fourcc::{canonicalize, FourCC, Tag};

use crate::chunk::ChunkHeader;
use crate::error::Result;
use crate::index::IndexKind;
use crate::report::{Event, ReportSink};
use crate::walker::Walker;

const IX: FourCC = FourCC(*b"ix##");

pub fn describe(tag: &Tag) -> &'static str {
    match &tag.code.0 {
        b"##db" => "Uncompressed Video",
        b"##dc" => "Compressed Video",
        b"##tx" => "Subtitle Text",
        b"##wb" => "Audio",
        b"##pc" => "Palette Change",
        b"##ix" => "Data chunk for timecode stream",
        b"JUNK" => "Wasted Space",
        _ => "Unsupported FourCC tag",
    }
}

// Seen chunks per canonical tag, in order of first appearance
#[derive(Debug, Default)]
struct Counts(Vec<(FourCC, u64)>);

impl Counts {
    fn bump(&mut self, code: FourCC) -> u64 {
        match self.0.iter_mut().find(|(c, _)| *c == code) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                self.0.push((code, 1));
                1
            }
        }
    }
}

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub(crate) fn movi(&mut self, budget: u64) -> Result<u64> {
        let mut counts = Counts::default();
        let consumed = self.movi_frame(budget, &mut counts)?;

        let limit = self.limits.display_limit as u64;
        for (what, count) in counts.0 {
            debug!("movi {:?}: {} chunks", what, count);
            if count > limit {
                self.emit(Event::Suppressed {
                    what,
                    count: count - limit,
                })?;
            }
        }
        Ok(consumed)
    }

    fn movi_frame(&mut self, budget: u64, counts: &mut Counts) -> Result<u64> {
        self.frame(budget, |walker, header, payload| walker.movi_child(header, payload, counts))
    }

    fn movi_child(&mut self, header: &ChunkHeader, payload: u32, counts: &mut Counts) -> Result<()> {
        if header.tag == FourCC::LIST {
            return self.list(header, payload, |walker, _, budget| walker.movi_frame(budget, counts));
        }

        let tag = canonicalize(header.tag.0);

        if tag.code == IX {
            let description = match self.peek_index_kind(payload)? {
                Some(kind) => kind.description(),
                None => IndexKind::Unknown.description(),
            };
            self.emit(Event::MoviChunk {
                address: header.address,
                length: header.length,
                tag,
                description,
            })?;
            return self.odml_index(header, payload);
        }

        if counts.bump(tag.code) <= self.limits.display_limit as u64 {
            self.emit(Event::MoviChunk {
                address: header.address,
                length: header.length,
                tag,
                description: describe(&tag),
            })?;
        }
        Ok(())
    }
}
