// ABOUTME: Printable and JSON views of frames for the command line.
// ABOUTME: Plain text lists regions and cuts under the grid; JSON mirrors the same fields.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use bqt_layout::{Cut, Frame, Orientation, Region};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub name: &'a str,
    pub dims: (usize, usize),
    pub fixed_size: bool,
    pub config: &'a BTreeMap<String, String>,
    pub grid: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<&'a [Region]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuts: Option<&'a [Cut]>,
}

/// Which derived lists a report carries
#[derive(Debug, Clone, Copy)]
pub struct Sections {
    pub regions: bool,
    pub cuts: bool,
}

impl<'a> FrameReport<'a> {
    pub fn new(frame: &'a Frame, sections: Sections) -> Self {
        Self {
            name: frame.name(),
            dims: frame.dims(),
            fixed_size: frame.is_fixed_size(),
            config: frame.config(),
            grid: frame.grid().to_string().lines().map(String::from).collect(),
            regions: sections.regions.then(|| frame.regions()),
            cuts: sections.cuts.then(|| frame.cuts()),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mode = if self.fixed_size { "fixed" } else { "resizable" };
        let _ = writeln!(
            out,
            "{} ({}x{}, {})",
            self.name, self.dims.0, self.dims.1, mode
        );
        for line in &self.grid {
            let _ = writeln!(out, "  {line}");
        }

        if let Some(regions) = self.regions {
            let _ = writeln!(out, "regions:");
            for r in regions {
                let _ = writeln!(
                    out,
                    "  {} at ({}, {}) size {}x{}",
                    r.kind, r.origin.0, r.origin.1, r.extent.0, r.extent.1
                );
            }
        }

        if let Some(cuts) = self.cuts {
            let _ = writeln!(out, "cuts:");
            if cuts.is_empty() {
                let _ = writeln!(out, "  none");
            }
            for c in cuts {
                let line = match c.orientation {
                    Orientation::Horizontal => "row",
                    Orientation::Vertical => "column",
                };
                let _ = writeln!(
                    out,
                    "  {} {} weight {} (thickness {})",
                    line, c.position, c.weight, c.thickness
                );
            }
        }

        out
    }
}
