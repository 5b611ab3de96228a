use riffcore::fourcc::FourCC;

/// What the walker does with a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    List,
    LegacyIndex,
    Index,
    HexDump,
    MainHeader,
    StreamHeader,
    StreamFormat,
    VideoProperties,
    ExtendedHeader,
    Text,
    Skip,
}

#[derive(Debug, Clone, Copy)]
enum Parent {
    Any,
    Segment,
    Named(FourCC),
}

impl Parent {
    fn matches(&self, parent: FourCC) -> bool {
        match self {
            Parent::Any => true,
            Parent::Segment => is_segment_form(parent),
            Parent::Named(name) => *name == parent,
        }
    }
}

const HDRL: FourCC = FourCC(*b"hdrl");
const STRL: FourCC = FourCC(*b"strl");
const ODML: FourCC = FourCC(*b"odml");
const PRMI: FourCC = FourCC(*b"PRMI");

const TABLE: &[(Parent, FourCC, Handler)] = &[
    (Parent::Any, FourCC::LIST, Handler::List),
    (Parent::Segment, FourCC(*b"idx1"), Handler::LegacyIndex),
    (Parent::Segment, FourCC(*b"DISP"), Handler::HexDump),
    (Parent::Named(HDRL), FourCC(*b"avih"), Handler::MainHeader),
    (Parent::Named(STRL), FourCC(*b"strh"), Handler::StreamHeader),
    (Parent::Named(STRL), FourCC(*b"strf"), Handler::StreamFormat),
    (Parent::Named(STRL), FourCC(*b"vprp"), Handler::VideoProperties),
    (Parent::Named(STRL), FourCC(*b"strn"), Handler::Text),
    (Parent::Named(STRL), FourCC(*b"strd"), Handler::HexDump),
    (Parent::Named(ODML), FourCC(*b"dmlh"), Handler::ExtendedHeader),
    (Parent::Any, FourCC(*b"indx"), Handler::Index),
    (Parent::Named(PRMI), FourCC::ZERO, Handler::Text),
];

// Only legal under the parent the table gives them
const PLACED: [FourCC; 7] = [
    FourCC(*b"avih"),
    FourCC(*b"strh"),
    FourCC(*b"strf"),
    FourCC(*b"vprp"),
    FourCC(*b"strn"),
    FourCC(*b"strd"),
    FourCC(*b"dmlh"),
];

pub fn is_segment_form(name: FourCC) -> bool {
    matches!(&name.0, b"AVI " | b"AVIX")
}

/// `None` when `tag` may not appear inside `parent`
pub fn handler(parent: FourCC, tag: FourCC) -> Option<Handler> {
    match TABLE.iter().find(|(p, t, _)| *t == tag && p.matches(parent)) {
        Some((_, _, handler)) => Some(*handler),
        None if PLACED.contains(&tag) => None,
        None => Some(Handler::Skip),
    }
}
