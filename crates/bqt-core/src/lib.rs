// ABOUTME: Shared types and settings for bouquet.
// ABOUTME: Defines the character grid and the tool's TOML settings.

pub mod config;
pub mod grid;

pub use config::{ConfigError, Settings, SortKey};
pub use grid::{Grid, GridError};
