// ABOUTME: Finds expansion lines marked on a grid's top and left borders.
// ABOUTME: Contiguous border markers form one cut weighted by their count.

use bqt_core::{Grid, GridError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Lies on a row; grows and shrinks the frame's height
    Horizontal,
    /// Lies on a column; grows and shrinks the frame's width
    Vertical,
}

/// Dimension a resize acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    /// Orientation of the cuts that absorb a delta on this axis
    pub fn cut_orientation(self) -> Orientation {
        match self {
            Axis::Rows => Orientation::Horizontal,
            Axis::Columns => Orientation::Vertical,
        }
    }
}

impl Orientation {
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Horizontal => Axis::Rows,
            Orientation::Vertical => Axis::Columns,
        }
    }

    /// Name used in per-frame config keys (`weight.vertical.0`)
    pub fn config_name(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cut {
    pub orientation: Orientation,
    /// Row (horizontal) or column (vertical) of the first marker in the run
    pub position: usize,
    /// Share of a delta this cut absorbs relative to its axis siblings
    pub weight: u32,
    /// Number of contiguous markers forming the cut
    pub thickness: usize,
}

impl Cut {
    /// Lines that can be removed while keeping the cut alive
    pub fn removable(&self) -> usize {
        self.thickness.saturating_sub(1)
    }
}

/// Maximal runs of `symbol` as (start, length)
fn marker_runs(line: &[char], symbol: char) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, c) in line.iter().enumerate() {
        match (start, *c == symbol) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, line.len() - s));
    }
    runs
}

/// Vertical cuts from the top row, then horizontal cuts from the left column.
pub fn detect_cuts(grid: &Grid, cut_symbol: char) -> Result<Vec<Cut>, GridError> {
    let top = grid.row(0)?;
    let left = grid.column(0)?;

    let vertical = marker_runs(top, cut_symbol)
        .into_iter()
        .map(|run| (Orientation::Vertical, run));
    let horizontal = marker_runs(&left, cut_symbol)
        .into_iter()
        .map(|run| (Orientation::Horizontal, run));

    let cuts = vertical
        .chain(horizontal)
        .map(|(orientation, (position, thickness))| Cut {
            orientation,
            position,
            weight: u32::try_from(thickness).unwrap_or(u32::MAX),
            thickness,
        })
        .collect();

    Ok(cuts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(orientation: Orientation, position: usize, thickness: usize) -> Cut {
        Cut {
            orientation,
            position,
            weight: thickness as u32,
            thickness,
        }
    }

    #[test]
    fn border_markers_become_cuts() {
        let grid = Grid::from_rows(&["AAX", "AAX", "XXX"]).unwrap();
        assert_eq!(
            detect_cuts(&grid, 'X').unwrap(),
            vec![
                cut(Orientation::Vertical, 2, 1),
                cut(Orientation::Horizontal, 2, 1),
            ]
        );
    }

    #[test]
    fn contiguous_markers_form_one_weighted_cut() {
        let grid = Grid::from_rows(&["AXXAXA", "AAAAAA", "XAAAAA", "XAAAAA", "XAAAAA"]).unwrap();
        let cuts = detect_cuts(&grid, 'X').unwrap();
        assert_eq!(
            cuts,
            vec![
                cut(Orientation::Vertical, 1, 2),
                cut(Orientation::Vertical, 4, 1),
                cut(Orientation::Horizontal, 2, 3),
            ]
        );
        assert_eq!(cuts[0].removable(), 1);
        assert_eq!(cuts[1].removable(), 0);
    }

    #[test]
    fn interior_markers_are_not_cuts() {
        let grid = Grid::from_rows(&["AAA", "AXA", "AAA"]).unwrap();
        assert!(detect_cuts(&grid, 'X').unwrap().is_empty());
    }

    #[test]
    fn corner_marker_cuts_both_axes() {
        let grid = Grid::from_rows(&["XA", "AA"]).unwrap();
        assert_eq!(
            detect_cuts(&grid, 'X').unwrap(),
            vec![
                cut(Orientation::Vertical, 0, 1),
                cut(Orientation::Horizontal, 0, 1),
            ]
        );
    }

    #[test]
    fn runs_reaching_the_edge_are_closed() {
        assert_eq!(marker_runs(&['X', '.', 'X', 'X'], 'X'), vec![(0, 1), (2, 2)]);
        assert!(marker_runs(&['.', '.'], 'X').is_empty());
    }

    #[test]
    fn axis_and_orientation_pair_up() {
        assert_eq!(Axis::Rows.cut_orientation(), Orientation::Horizontal);
        assert_eq!(Orientation::Vertical.axis(), Axis::Columns);
    }
}
