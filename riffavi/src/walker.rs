use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use riffcore::addr::{AddressSpace, Whence};
use riffcore::buf::{read_prefix, read_record};
use riffcore::fourcc::{FourCC, ReadFourCC};

use crate::chunk::ChunkHeader;
use crate::dispatch::{self, is_segment_form, Handler};
use crate::error::{Anomaly, Result, WalkError};
use crate::headers::MediaType;
use crate::report::{Event, ReportSink};

// Longest string read out of a text chunk
const MAX_TEXT: u32 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Entries shown per movi class or index before the rest are counted
    pub display_limit: usize,
    /// 16 byte lines captured per hex dump
    pub hexdump_lines: usize,
    /// Deepest `LIST` nesting walked
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            display_limit: 16,
            hexdump_lines: 16,
            max_depth: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub segments: u32,
    /// Bytes walked across all segments, headers included
    pub consumed: u64,
}

/// Media type of the stream a `strl` describes, `None` until its `strh`
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StreamContext(pub(crate) Option<MediaType>);

pub struct Walker<R: Read + Seek, S: ReportSink> {
    pub(crate) space: AddressSpace<R>,
    pub(crate) sink: S,
    pub(crate) limits: Limits,
    pub(crate) depth: usize,
    // Address of the `movi` tag of the current segment
    pub(crate) movi_base: Option<u64>,
}

/// Walks every segment of `reader`, reporting to `sink`.
///
/// A fatal error is reported as [`Event::Fatal`] before it is returned.
pub fn walk<R: Read + Seek, S: ReportSink>(reader: R, sink: S, limits: Limits) -> Result<Summary> {
    let space = AddressSpace::new(reader)?;
    Walker::new(space, sink, limits).run()
}

// State machine for the top level
#[derive(Debug, Clone, Copy)]
enum Top {
    Start,
    Segment,
}

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub fn new(space: AddressSpace<R>, sink: S, limits: Limits) -> Self {
        Walker {
            space,
            sink,
            limits,
            depth: 0,
            movi_base: None,
        }
    }

    pub fn run(mut self) -> Result<Summary> {
        match self.segments() {
            Ok(summary) => Ok(summary),
            Err(e) => {
                self.sink.event(Event::Fatal(e.to_string()))?;
                Err(e)
            }
        }
    }

    fn segments(&mut self) -> Result<Summary> {
        let mut summary = Summary::default();
        let mut state = Top::Start;

        loop {
            let address = self.space.address();

            match (state, self.space.read_fourcc()?) {
                (Top::Start, None) => return Err(WalkError::truncated("RIFF header", address)),

                (Top::Segment, None) => {
                    debug!("EOF after {} segments", summary.segments);
                    break;
                }

                (_, Some(FourCC::RIFF)) => {
                    summary.consumed += self.segment(address)?;
                    summary.segments += 1;
                    state = Top::Segment;
                }

                (Top::Start, Some(tag)) => return Err(WalkError::NotRiff(tag)),

                (Top::Segment, Some(tag)) => {
                    self.anomaly(address, Anomaly::TrailingGarbage(tag))?;
                    break;
                }
            }
        }
        Ok(summary)
    }

    // Picks up after the `RIFF` tag
    fn segment(&mut self, address: Option<u64>) -> Result<u64> {
        let length = {
            let mut buf = [0u8; 4];
            read_record(&mut self.space, &mut buf)
                .map_err(|e| WalkError::from_buf(e, "RIFF header", address))?;
            LittleEndian::read_u32(&buf)
        };
        let form = self
            .space
            .read_fourcc()?
            .ok_or_else(|| WalkError::truncated("RIFF header", address))?;

        let base = self.space.set_base(-12)?;
        self.movi_base = None;
        debug!("RIFF {:?} base {:#X}", form, base);

        self.emit(Event::Segment {
            address,
            length,
            form,
            base,
        })?;

        if length < 4 {
            self.anomaly(
                address,
                Anomaly::ShortChunk {
                    tag: FourCC::RIFF,
                    wanted: 4,
                    got: length,
                },
            )?;
        }
        let budget = (length as u64).saturating_sub(4);

        let consumed = if is_segment_form(form) {
            self.list_children(form, budget)?
        } else {
            self.anomaly(address, Anomaly::UnknownForm(form))?;
            let target = self.space.physical()? + budget;
            self.skip_to(target, "RIFF segment", address)?;
            budget
        };

        // The pad byte of the last segment may be missing
        if length & 1 == 1 && self.space.remaining()? > 0 {
            self.space.seek(1, Whence::Current)?;
        }

        self.emit(Event::EndSegment {
            form,
            consumed,
            budget,
        })?;
        Ok(consumed + 12)
    }

    /// Walks the children of one list frame, returning the bytes consumed.
    ///
    /// `child` sees each chunk header and its payload length clamped to the
    /// frame. The stream is positioned at the padded end of the chunk
    /// afterward no matter how much `child` read.
    pub(crate) fn frame<F>(&mut self, budget: u64, mut child: F) -> Result<u64>
    where
        F: FnMut(&mut Self, &ChunkHeader, u32) -> Result<()>,
    {
        let mut consumed = 0;

        while consumed < budget {
            let room = budget - consumed;
            if room < 8 {
                let address = self.space.address();
                self.anomaly(address, Anomaly::StrayBytes(room))?;
                let target = self.space.physical()? + room;
                self.skip_to(target, "stray bytes", address)?;
                consumed += room;
                break;
            }

            let header = self.read_header()?;
            consumed += 8;

            let room = budget - consumed;
            let mut extent = header.padded();
            if extent > room {
                // An overrun of just the pad byte goes unreported
                if header.length as u64 > room {
                    self.anomaly(
                        header.address,
                        Anomaly::Overrun {
                            tag: header.tag,
                            declared: header.length,
                            room,
                        },
                    )?;
                }
                extent = room;
            }
            let payload = (header.length as u64).min(extent) as u32;

            debug!("{:?} {} bytes at {:?}", header.tag, header.length, header.address);
            let start = self.space.physical()?;
            child(self, &header, payload)?;
            self.skip_to(start + extent, &format!("{} chunk", header.tag), header.address)?;

            consumed += extent;
        }
        Ok(consumed)
    }

    pub(crate) fn list_children(&mut self, parent: FourCC, budget: u64) -> Result<u64> {
        let mut stream = StreamContext::default();
        self.frame(budget, |walker, header, payload| {
            walker.child(parent, header, payload, &mut stream)
        })
    }

    fn child(&mut self, parent: FourCC, header: &ChunkHeader, payload: u32, stream: &mut StreamContext) -> Result<()> {
        let handler = dispatch::handler(parent, header.tag).ok_or(WalkError::Syntax {
            tag: header.tag,
            parent,
            address: header.address,
        })?;

        if handler != Handler::List {
            self.chunk(header)?;
        }

        match handler {
            Handler::List => self.list(header, payload, Self::list_children),
            Handler::LegacyIndex => self.legacy_index(header, payload),
            Handler::Index => self.odml_index(header, payload),
            Handler::HexDump => self.hex_dump(payload),
            Handler::MainHeader => self.main_header(header, payload),
            Handler::StreamHeader => self.stream_header(header, payload, stream),
            Handler::StreamFormat => self.stream_format(header, payload, stream),
            Handler::VideoProperties => self.video_properties(header, payload),
            Handler::ExtendedHeader => self.extended_header(header, payload),
            Handler::Text if header.tag == FourCC::ZERO => self.text(header, payload, "Parameter"),
            Handler::Text => self.text(header, payload, "Stream Name"),
            Handler::Skip => self.emit(Event::Skipped {
                tag: header.tag,
                parent,
            }),
        }
    }

    /// Reads the list name and walks the body with `body`, unless nested too deep.
    pub(crate) fn list<F>(&mut self, header: &ChunkHeader, payload: u32, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self, FourCC, u64) -> Result<u64>,
    {
        if payload < 4 {
            self.chunk(header)?;
            return self.anomaly(
                header.address,
                Anomaly::ShortChunk {
                    tag: header.tag,
                    wanted: 4,
                    got: payload,
                },
            );
        }

        let name = self
            .space
            .read_fourcc()?
            .ok_or_else(|| WalkError::truncated("LIST name", header.address))?;
        self.emit(Event::List {
            address: header.address,
            length: header.length,
            name,
        })?;

        let budget = payload as u64 - 4;
        let consumed = if self.depth >= self.limits.max_depth {
            self.anomaly(
                header.address,
                Anomaly::TooDeep {
                    name,
                    depth: self.depth + 1,
                },
            )?;
            0
        } else {
            self.depth += 1;
            let consumed = match &name.0 {
                b"movi" => {
                    self.movi_base = header.address.map(|a| a + 8);
                    self.movi(budget)?
                }
                b"INFO" => self.info(budget)?,
                _ => body(self, name, budget)?,
            };
            self.depth -= 1;
            consumed
        };

        self.emit(Event::EndList { name, consumed, budget })
    }

    pub(crate) fn chunk(&mut self, header: &ChunkHeader) -> Result<()> {
        self.emit(Event::Chunk {
            address: header.address,
            length: header.length,
            tag: header.tag,
        })
    }

    pub(crate) fn emit(&mut self, event: Event) -> Result<()> {
        self.sink.event(event)?;
        Ok(())
    }

    pub(crate) fn anomaly(&mut self, address: Option<u64>, anomaly: Anomaly) -> Result<()> {
        warn!("{} (at {:?})", anomaly, address);
        self.emit(Event::Anomaly { address, anomaly })
    }

    fn read_header(&mut self) -> Result<ChunkHeader> {
        let address = self.space.address();
        ChunkHeader::read(&mut self.space, address).map_err(|e| WalkError::from_buf(e, "chunk header", address))
    }

    /// Reads exactly `len` bytes, a short read is a truncation
    pub(crate) fn record(&mut self, len: usize, context: &str) -> Result<Vec<u8>> {
        let address = self.space.address();
        if len as u64 > self.space.remaining()? {
            return Err(WalkError::truncated(context, address));
        }
        let mut buf = vec![0; len];
        read_record(&mut self.space, &mut buf).map_err(|e| WalkError::from_buf(e, context, address))?;
        Ok(buf)
    }

    /// Seeks forward to the physical offset `target`, which must lie within
    /// the stream.
    pub(crate) fn skip_to(&mut self, target: u64, context: &str, address: Option<u64>) -> Result<()> {
        if target > self.space.len() {
            return Err(WalkError::truncated(context, address));
        }
        let here = self.space.physical()?;
        if target != here {
            self.space.seek(target as i64 - here as i64, Whence::Current)?;
        }
        Ok(())
    }

    /// Captures the first lines of the next `length` bytes
    pub(crate) fn hex_dump(&mut self, length: u32) -> Result<()> {
        let address = self.space.address();
        let wanted = (length as usize).min(self.limits.hexdump_lines * 16);
        let bytes = read_prefix(&mut self.space, wanted)?;

        self.emit(Event::HexDump { address, length, bytes })
    }

    /// Null terminated string, unprintable characters become spaces
    pub(crate) fn text(&mut self, header: &ChunkHeader, payload: u32, label: &'static str) -> Result<()> {
        let bytes = read_prefix(&mut self.space, payload.min(MAX_TEXT) as usize)?;
        let text = bytes
            .iter()
            .take_while(|c| **c != 0)
            .map(|c| match c {
                c if c.is_ascii_graphic() || *c == b' ' => *c as char,
                _ => ' ',
            })
            .collect();

        self.emit(Event::Text {
            tag: header.tag,
            label,
            text,
        })
    }
}
