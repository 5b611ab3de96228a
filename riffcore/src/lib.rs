//! Byte level plumbing shared by the RIFF inspectors: record buffers, the
//! relocatable address space and four character code reading.
pub mod addr;
pub mod buf;
pub mod fourcc;
