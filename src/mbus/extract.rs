//! # Frame Extraction
//!
//! Slices a raw receive buffer into delimiter-bounded [`FrameView`]s.
//!
//! A frame starts at a `0x7E` flag that is not immediately followed by
//! another `0x7E`, and ends at the next `0x7E`. Scanning is a single
//! left-to-right pass: after a frame is emitted the scan resumes right after
//! its closing flag, so frames never overlap. Noise between frames is
//! skipped. A start flag with no closing flag before the end of the buffer is
//! a partial read and is dropped.
//!
//! ```rust
//! use mbus_meter::mbus::extract::extract_frames;
//!
//! let buffer = [0x00, 0x7E, 0xA0, 0x01, 0x7E, 0x7E, 0xA0, 0x02, 0x7E, 0x7E, 0xA0];
//! let frames = extract_frames(&buffer);
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].offset(), 1);
//! assert_eq!(frames[1].offset(), 5);
//! ```

use log::debug;

use crate::constants::{FRAME_DELIMITER, MIN_FRAME_LEN};
use crate::logging::log_debug;
use crate::mbus::frame::FrameView;

/// Lazy scanner over a raw buffer, yielding one [`FrameView`] per frame.
///
/// Each call to [`FrameExtractor::new`] scans from the start of the buffer.
#[derive(Debug, Clone)]
pub struct FrameExtractor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> FrameExtractor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        // Too short to hold a frame: start past the end so nothing is yielded.
        let position = if buffer.len() < MIN_FRAME_LEN {
            buffer.len()
        } else {
            0
        };
        Self { buffer, position }
    }

    /// Index of the next start flag at or after `from`.
    fn find_start(&self, from: usize) -> Option<usize> {
        let tail = self.buffer.get(from..)?;
        tail.windows(2)
            .position(|pair| pair[0] == FRAME_DELIMITER && pair[1] != FRAME_DELIMITER)
            .map(|i| from + i)
    }

    /// Index of the closing flag for a frame opened at `start`.
    fn find_end(&self, start: usize) -> Option<usize> {
        let tail = self.buffer.get(start + 1..)?;
        tail.iter()
            .position(|&b| b == FRAME_DELIMITER)
            .map(|i| start + 1 + i)
    }
}

impl<'a> Iterator for FrameExtractor<'a> {
    type Item = FrameView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(start) = self.find_start(self.position) else {
                self.position = self.buffer.len();
                return None;
            };
            let Some(end) = self.find_end(start) else {
                log_debug(&format!(
                    "Dropping unterminated frame at offset {start} ({} trailing bytes)",
                    self.buffer.len() - start
                ));
                self.position = self.buffer.len();
                return None;
            };

            self.position = end + 1;
            let length = end - start + 1;
            if length < MIN_FRAME_LEN {
                continue;
            }

            match FrameView::new(self.buffer, start, length) {
                Ok(view) => {
                    debug!("Found frame at offset {start}, {length} bytes");
                    return Some(view);
                }
                Err(e) => {
                    // start and end both come from this buffer, so this is unreachable
                    debug!("Skipping frame candidate: {e}");
                    continue;
                }
            }
        }
    }
}

impl std::iter::FusedIterator for FrameExtractor<'_> {}

/// Scans `buffer` and collects every complete frame, in order of appearance.
///
/// Buffers shorter than three bytes yield no frames.
pub fn extract_frames(buffer: &[u8]) -> Vec<FrameView<'_>> {
    FrameExtractor::new(buffer).collect()
}
