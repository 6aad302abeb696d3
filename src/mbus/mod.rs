//! The mbus module contains the frame-level building blocks: the borrowed
//! frame view, the delimiter scanner that produces views from a raw buffer,
//! and the byte pattern search used to locate fields inside a frame.

pub mod extract;
pub mod frame;
pub mod search;

pub use extract::{extract_frames, FrameExtractor};
pub use frame::FrameView;
pub use search::find;
