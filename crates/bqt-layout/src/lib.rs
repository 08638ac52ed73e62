// ABOUTME: Region extraction and weighted resizing for bouquet frames.
// ABOUTME: Turns a character grid into typed rectangles and stretches it along its cuts.

pub mod apportion;
pub mod cuts;
pub mod frame;
pub mod regions;

pub use apportion::{apportion, resize_grid, ResizeError};
pub use cuts::{detect_cuts, Axis, Cut, Orientation};
pub use frame::{Frame, SizeMode};
pub use regions::{extract_all, extract_regions, sort_regions, Region};
