//! Virtual 64 bit addressing over a seekable stream
//!
//! Every offset stored inside a RIFF segment is a 32 bit value relative to the
//! start of that segment. Open-DML files chain several segments together so the
//! file itself can grow well past 4GiB. The [`AddressSpace`] keeps a relocatable
//! `base` (the physical offset of the current segment) so segment local offsets
//! can be turned back into absolute file locations and vice versa.
//!
//! | Call                        | Meaning |
//! | --------------------------- | ------- |
//! | `set_base(delta)`           | `base = physical position + delta` |
//! | `seek(n, Whence::Start)`    | physical seek to `base + n` |
//! | `seek(n, Whence::Current)`  | physical seek relative to the current position |
//! | `seek(n, Whence::End)`      | physical seek relative to the end of the stream |
//! | `position()`                | `physical - base`, if it fits in 32 bits |
use std::io::{Read, Seek, SeekFrom};

use log::warn;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("physical offset {physical:#X} is not addressable from base {base:#X}")]
    Unrepresentable { physical: u64, base: u64 },
    #[error("seek to a negative offset ({0})")]
    Negative(i128),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

pub struct AddressSpace<R: Read + Seek> {
    inner: R,
    base: u64,
    len: u64,
}

impl<R: Read + Seek> AddressSpace<R> {
    /// Wraps `reader`, measuring its length and rewinding it to the start.
    pub fn new(mut reader: R) -> std::io::Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        Ok(AddressSpace {
            inner: reader,
            base: 0,
            len,
        })
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    /// Moves the base to the current physical position plus `delta`.
    pub fn set_base(&mut self, delta: i64) -> Result<u64, AddressError> {
        let physical = self.physical()?;
        self.base = offset_by(physical, delta)?;
        Ok(self.base)
    }

    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, AddressError> {
        let target = match whence {
            Whence::Start => SeekFrom::Start(offset_by(self.base, offset)?),
            Whence::Current => SeekFrom::Current(offset),
            Whence::End => SeekFrom::End(offset),
        };
        Ok(self.inner.seek(target)?)
    }

    pub fn physical(&mut self) -> std::io::Result<u64> {
        self.inner.stream_position()
    }

    /// Bytes between the physical position and the end of the stream.
    pub fn remaining(&mut self) -> std::io::Result<u64> {
        Ok(self.len.saturating_sub(self.physical()?))
    }

    /// The physical position as a 32 bit offset from the current base.
    pub fn position(&mut self) -> Result<u32, AddressError> {
        let physical = self.physical()?;
        physical
            .checked_sub(self.base)
            .and_then(|local| u32::try_from(local).ok())
            .ok_or(AddressError::Unrepresentable {
                physical,
                base: self.base,
            })
    }

    /// Absolute address of the physical position, `None` when it cannot be
    /// expressed relative to the current base.
    pub fn address(&mut self) -> Option<u64> {
        match self.position() {
            Ok(local) => Some(self.base + local as u64),
            Err(e) => {
                warn!("addressing error: {}", e);
                None
            }
        }
    }
}

impl<R: Read + Seek> Read for AddressSpace<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

fn offset_by(origin: u64, delta: i64) -> Result<u64, AddressError> {
    let target = origin as i128 + delta as i128;
    u64::try_from(target).map_err(|_| AddressError::Negative(target))
}
