//! `LIST INFO` metadata, a flat run of null terminated strings
use std::io::{Read, Seek};

use riffcore::fourcc::FourCC;

use crate::codecs;
use crate::error::Result;
use crate::report::{Event, ReportSink};
use crate::walker::Walker;

const INFO: FourCC = FourCC(*b"INFO");

impl<R: Read + Seek, S: ReportSink> Walker<R, S> {
    pub(crate) fn info(&mut self, budget: u64) -> Result<u64> {
        self.frame(budget, |walker, header, payload| {
            walker.chunk(header)?;

            if header.tag == FourCC::LIST {
                return walker.emit(Event::Skipped {
                    tag: header.tag,
                    parent: INFO,
                });
            }
            walker.text(header, payload, codecs::info_name(header.tag))
        })
    }
}
