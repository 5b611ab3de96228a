use thiserror::Error;

use riffcore::addr::AddressError;
use riffcore::buf::BufError;
use riffcore::fourcc::FourCC;

/// Errors that end the walk
#[derive(Error, Debug)]
pub enum WalkError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("truncated {context} at {}", at(.address))]
    Truncation {
        context: String,
        address: Option<u64>,
    },
    #[error("{tag:?} is not allowed inside {parent:?} at {}", at(.address))]
    Syntax {
        tag: FourCC,
        parent: FourCC,
        address: Option<u64>,
    },
    #[error("not a RIFF file, found {0:?}")]
    NotRiff(FourCC),
}

pub type Result<T> = std::result::Result<T, WalkError>;

impl WalkError {
    pub(crate) fn truncated(context: impl Into<String>, address: Option<u64>) -> Self {
        WalkError::Truncation {
            context: context.into(),
            address,
        }
    }

    /// A short record read becomes a truncation at `address`
    pub(crate) fn from_buf(e: BufError, context: impl Into<String>, address: Option<u64>) -> Self {
        match e {
            BufError::IO(e) => WalkError::IO(e),
            BufError::Short { .. } => WalkError::truncated(context, address),
        }
    }
}

fn at(address: &Option<u64>) -> String {
    match address {
        Some(a) => format!("{:#X}", a),
        None => "an unknown address".to_string(),
    }
}

/// Data shape problems, reported and skipped over
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    #[error("{0} stray bytes at the end of the list")]
    StrayBytes(u64),
    #[error("{tag:?} declares {declared} bytes but only {room} remain in its parent")]
    Overrun { tag: FourCC, declared: u32, room: u64 },
    #[error("{tag:?} is {got} bytes, at least {wanted} expected")]
    ShortChunk { tag: FourCC, wanted: u32, got: u32 },
    #[error("unknown index variant (type {index_type:#04X}, subtype {subtype:#04X}, {width} byte entries)")]
    UnknownIndex { index_type: u8, subtype: u8, width: u32 },
    #[error("index entries are {width} bytes, only the first {known} are understood")]
    WideEntries { width: u32, known: u32 },
    #[error("{declared} entries declared but only {fit} fit in the chunk")]
    ClampedEntries { declared: u32, fit: u32 },
    #[error("{tag:?} has {bytes} bytes left over after its last entry")]
    Remainder { tag: FourCC, bytes: u32 },
    #[error("no movi list seen yet, offsets taken from the segment base")]
    NoMoviBase,
    #[error("stream header of {0} bytes, expected 48, 56 or 64")]
    StreamHeaderSize(u32),
    #[error("unknown stream type {0:?}")]
    UnknownStreamType(FourCC),
    #[error("stream format without a preceding stream header")]
    MissingStreamHeader,
    #[error("stream format for an unsupported stream type")]
    UnsupportedStreamType,
    #[error("palette of {colors} colors does not fit, {room} colors available")]
    PaletteOverrun { colors: u32, room: u32 },
    #[error("{0} bytes of unrecognized extension skipped")]
    Unrecognized(u32),
    #[error("unknown RIFF form {0:?}")]
    UnknownForm(FourCC),
    #[error("trailing data after the last segment, starting with {0:?}")]
    TrailingGarbage(FourCC),
    #[error("list {name:?} nested {depth} deep, not walked")]
    TooDeep { name: FourCC, depth: usize },
}
