// ABOUTME: Splits .bqt text into per-frame chunks and builds frames from them.
// ABOUTME: Chunks end at END lines; a CONFIG line separates the grid from key:value config.

use std::collections::BTreeMap;
use std::path::Path;

use bqt_core::{Grid, GridError, Settings};
use bqt_layout::Frame;

pub const END_DELIMITER: &str = "END";
pub const CONFIG_DELIMITER: &str = "CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame {index} does not start with a {expected:?} header: {line:?}")]
    MissingHeader {
        index: usize,
        expected: String,
        line: String,
    },

    #[error("Frame {frame:?} has a config line without ':': {line:?}")]
    MalformedConfig { frame: String, line: String },

    #[error("Frame {frame:?} has an invalid grid: {source}")]
    Grid {
        frame: String,
        #[source]
        source: GridError,
    },
}

/// One frame's raw pieces, before any layout work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSource {
    pub name: String,
    pub rows: Vec<String>,
    pub config: BTreeMap<String, String>,
}

impl FrameSource {
    pub fn build(self, settings: &Settings) -> Result<Frame, LoadError> {
        let grid = Grid::from_rows(&self.rows).map_err(|source| LoadError::Grid {
            frame: self.name.clone(),
            source,
        })?;
        Frame::build(self.name.clone(), grid, self.config, settings).map_err(|source| {
            LoadError::Grid {
                frame: self.name,
                source,
            }
        })
    }
}

fn clean_line(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, '\n' | '\r' | '\t'))
}

fn parse_config(frame: &str, lines: &[&str]) -> Result<BTreeMap<String, String>, LoadError> {
    let mut config = BTreeMap::new();
    for line in lines {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| LoadError::MalformedConfig {
                frame: frame.to_string(),
                line: line.to_string(),
            })?;
        config.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(config)
}

fn parse_chunk(index: usize, lines: &[&str], settings: &Settings) -> Result<FrameSource, LoadError> {
    let header = lines[0];
    let prefix = settings.frame_header.trim_end();
    let name = header
        .strip_prefix(prefix)
        .map(|rest| rest.trim_start_matches(':').trim())
        .ok_or_else(|| LoadError::MissingHeader {
            index,
            expected: prefix.to_string(),
            line: header.to_string(),
        })?;

    let body = &lines[1..];
    let (grid_lines, config_lines) =
        match body.iter().position(|l| l.trim() == CONFIG_DELIMITER) {
            Some(at) => (&body[..at], &body[at + 1..]),
            None => (body, &[][..]),
        };

    Ok(FrameSource {
        name: name.to_string(),
        rows: grid_lines.iter().map(|l| l.to_string()).collect(),
        config: parse_config(name, config_lines)?,
    })
}

/// Split layout text into frame chunks without building any frames.
pub fn parse_sources(text: &str, settings: &Settings) -> Result<Vec<FrameSource>, LoadError> {
    let lines: Vec<&str> = text.lines().map(clean_line).filter(|l| !l.is_empty()).collect();

    lines
        .split(|l| l.trim() == END_DELIMITER)
        .filter(|chunk| !chunk.is_empty())
        .enumerate()
        .map(|(index, chunk)| parse_chunk(index, chunk, settings))
        .collect()
}

/// Parse every frame in `text`.
pub fn parse_frames(text: &str, settings: &Settings) -> Result<Vec<Frame>, LoadError> {
    parse_sources(text, settings)?
        .into_iter()
        .map(|source| source.build(settings))
        .collect()
}

/// Read and parse a `.bqt` file.
pub fn load_frames(path: &Path, settings: &Settings) -> Result<Vec<Frame>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let frames = parse_frames(&text, settings)?;
    tracing::info!("Loaded {} frames from {}", frames.len(), path.display());
    for frame in &frames {
        tracing::debug!(
            frame = frame.name(),
            dims = ?frame.dims(),
            fixed_size = frame.is_fixed_size(),
            "loaded frame"
        );
    }
    Ok(frames)
}
