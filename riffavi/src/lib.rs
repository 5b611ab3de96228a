//! AVI and Open-DML structure walker
//!
//! An AVI file is one or more RIFF segments, the first of form `AVI ` and
//! any further ones (files over 1 GiB) of form `AVIX`. Everything is stored
//! in Little Endian format and every chunk is padded to an even length.
//!
//! | Type    | Name   | Description |
//! | ------: | ------ | ----------- |
//! | [u8; 4] | tag    | `RIFF`, `LIST` or the chunk type such as `avih` |
//! | u32     | length | The length of the payload, excluding the pad byte |
//! | [u8; 4] | form   | Only for `RIFF` and `LIST`, the form or list name |
//! | [u8; N] | value  | The payload, interpret according to the tag |
//!
//! Offsets inside a segment are 32 bit, each segment is addressed relative
//! to the start of its `RIFF` header and reported as absolute addresses.
//!
//! # Chunk Types
//!
//! | Chunk Type | Parent  | Description |
//! | :--------: | ------- | ----------- |
//! | `avih`     | `hdrl`  | Main header, see [`headers::MainHeader`] |
//! | `strh`     | `strl`  | Stream header, see [`headers::StreamHeader`] |
//! | `strf`     | `strl`  | Stream format, depends on the stream type |
//! | `vprp`     | `strl`  | Video properties, see [`format::VideoProperties`] |
//! | `strn`     | `strl`  | Stream name |
//! | `strd`     | `strl`  | Codec data, hex dumped |
//! | `indx`     | any     | Open-DML index, see [`index`] |
//! | `dmlh`     | `odml`  | Open-DML extended header |
//! | `idx1`     | segment | Legacy index |
//! | `DISP`     | segment | Display data, hex dumped |
//!
//! Any other chunk is skipped. The `movi` list holds the stream data and
//! the `INFO` list metadata strings, both have their own walkers.
pub mod chunk;
pub mod codecs;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod headers;
pub mod index;
mod info;
pub mod movi;
pub mod report;
pub mod walker;

#[cfg(test)]
mod builder;

pub use error::{Anomaly, WalkError};
pub use report::{Event, ReportSink};
pub use walker::{walk, Limits, Summary, Walker};
