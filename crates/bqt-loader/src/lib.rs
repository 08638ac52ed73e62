// ABOUTME: Reads .bqt layout documents.
// ABOUTME: Turns END/CONFIG delimited text into built frames.

pub mod document;

pub use document::{load_frames, parse_frames, parse_sources, FrameSource, LoadError};
