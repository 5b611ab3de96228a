//! Events emitted by the walker, in file order
//!
//! `Segment`/`EndSegment` and `List`/`EndList` always come in pairs, every
//! other event belongs to the innermost open list. Detail events such as
//! [`Event::MainHeader`] follow the [`Event::Chunk`] they were decoded from.
use riffcore::fourcc::{FourCC, Tag};

use crate::error::Anomaly;
use crate::format::{BitmapInfoHeader, Mp3Extension, RgbQuad, VideoProperties, WaveFormatEx, WaveFormatExtensible};
use crate::headers::{ExtendedHeader, MainHeader, StreamHeader};
use crate::index::{IndexHeader, IndexRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Segment {
        address: Option<u64>,
        length: u32,
        form: FourCC,
        base: u64,
    },
    EndSegment {
        form: FourCC,
        consumed: u64,
        budget: u64,
    },
    List {
        address: Option<u64>,
        length: u32,
        name: FourCC,
    },
    EndList {
        name: FourCC,
        consumed: u64,
        budget: u64,
    },
    Chunk {
        address: Option<u64>,
        length: u32,
        tag: FourCC,
    },
    /// A chunk inside `movi`, `description` names the tag class
    MoviChunk {
        address: Option<u64>,
        length: u32,
        tag: Tag,
        description: &'static str,
    },
    MainHeader(MainHeader),
    StreamHeader(StreamHeader),
    VideoFormat(BitmapInfoHeader),
    Palette {
        colors: u32,
        entries: Vec<RgbQuad>,
    },
    AudioFormat(WaveFormatEx),
    Mp3Extension(Mp3Extension),
    ExtensibleAudio(WaveFormatExtensible),
    VideoProperties(VideoProperties),
    ExtendedHeader(ExtendedHeader),
    Text {
        tag: FourCC,
        label: &'static str,
        text: String,
    },
    HexDump {
        address: Option<u64>,
        length: u32,
        bytes: Vec<u8>,
    },
    IndexHeader(IndexHeader),
    /// `target` is the absolute address the entry points at
    IndexEntry {
        record: IndexRecord,
        target: Option<u64>,
    },
    Padding {
        address: Option<u64>,
        bytes: u32,
    },
    /// Entries of `what` past the display limit
    Suppressed {
        what: FourCC,
        count: u64,
    },
    Skipped {
        tag: FourCC,
        parent: FourCC,
    },
    Anomaly {
        address: Option<u64>,
        anomaly: Anomaly,
    },
    Fatal(String),
}

pub trait ReportSink {
    fn event(&mut self, event: Event) -> std::io::Result<()>;
}

impl ReportSink for Vec<Event> {
    fn event(&mut self, event: Event) -> std::io::Result<()> {
        self.push(event);
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn event(&mut self, event: Event) -> std::io::Result<()> {
        (**self).event(event)
    }
}
