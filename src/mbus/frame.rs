//! # Frame View
//!
//! A [`FrameView`] is a read-only window over a region of a caller-owned byte
//! buffer. Views are produced by the [extractor](super::extract) for every
//! delimited region it finds and consumed by the record decoder.
//!
//! The view never copies: it borrows the source buffer for its whole
//! lifetime, so the buffer cannot be mutated (or dropped) while any view over
//! it exists. Views are `Copy` and `Send + Sync`, and several views over the
//! same buffer can be decoded on different threads.
//!
//! ```rust
//! use mbus_meter::mbus::frame::FrameView;
//!
//! let buffer = [0x00, 0x7E, 0xA0, 0x7E, 0x00];
//! let view = FrameView::new(&buffer, 1, 3).unwrap();
//! assert_eq!(view.size(), 3);
//! assert_eq!(view.front(), Some(0x7E));
//! assert_eq!(view[1], 0xA0);
//!
//! assert!(FrameView::new(&buffer, 3, 3).is_err());
//! ```

use std::ops::Index;

use crate::error::MeterError;

/// Bounds-checked, non-owning window `[offset, offset + length)` over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FrameView<'a> {
    /// Creates a view over `length` bytes of `buffer` starting at `offset`.
    ///
    /// Fails with [`MeterError::OutOfRange`] if the region does not lie
    /// entirely inside `buffer`.
    pub fn new(buffer: &'a [u8], offset: usize, length: usize) -> Result<Self, MeterError> {
        let out_of_range = || MeterError::OutOfRange {
            offset,
            length,
            buffer_len: buffer.len(),
        };
        let end = offset.checked_add(length).ok_or_else(out_of_range)?;
        let bytes = buffer.get(offset..end).ok_or_else(out_of_range)?;
        Ok(Self { bytes, offset })
    }

    /// Byte at `index`, or `None` past the end of the view.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// First byte of the view.
    pub fn front(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Last byte of the view.
    pub fn back(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    /// Number of bytes covered by the view.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Position of the first byte within the source buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The viewed bytes, borrowed from the source buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Panics when `index >= size()`; use [`FrameView::get`] for a checked read.
impl Index<usize> for FrameView<'_> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl AsRef<[u8]> for FrameView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}
