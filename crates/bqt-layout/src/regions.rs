// ABOUTME: Decomposes a character grid into rectangles of uniform type.
// ABOUTME: Greedy grow-right-then-down scan from the first unclaimed cell.

use std::cmp::Ordering;

use bqt_core::{Grid, GridError, SortKey};
use serde::{Deserialize, Serialize};

/// A rectangle of cells that all carry the same type symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "type")]
    pub kind: char,
    /// (row, col) of the top-left cell
    pub origin: (usize, usize),
    /// (height, width)
    pub extent: (usize, usize),
}

impl Region {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.origin.0
            && row < self.origin.0 + self.extent.0
            && col >= self.origin.1
            && col < self.origin.1 + self.extent.1
    }

    pub fn area(&self) -> usize {
        self.extent.0 * self.extent.1
    }

    /// Every covered (row, col), row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (top, left) = self.origin;
        let (height, width) = self.extent;
        (top..top + height).flat_map(move |row| (left..left + width).map(move |col| (row, col)))
    }
}

/// Extractor state. One rectangle is produced per trip around the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Looking for a free matching cell at or after flat index `from`
    Scanning { from: usize },
    GrowingWidth { origin: (usize, usize), width: usize },
    GrowingHeight {
        origin: (usize, usize),
        width: usize,
        height: usize,
    },
    Claiming {
        origin: (usize, usize),
        extent: (usize, usize),
    },
    Done,
}

struct Extractor<'g> {
    grid: &'g Grid,
    symbol: char,
    claimed: Vec<bool>,
    regions: Vec<Region>,
}

impl<'g> Extractor<'g> {
    fn new(grid: &'g Grid, symbol: char) -> Self {
        Self {
            grid,
            symbol,
            claimed: vec![false; grid.height() * grid.width()],
            regions: Vec::new(),
        }
    }

    fn is_free_match(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let cell = self.grid.get(row, col)?;
        Ok(cell == self.symbol && !self.claimed[row * self.grid.width() + col])
    }

    fn step(&mut self, state: Scan) -> Result<Scan, GridError> {
        let (height, width) = self.grid.dims();

        let next = match state {
            Scan::Scanning { from } => {
                let mut found = None;
                for index in from..height * width {
                    if self.is_free_match(index / width, index % width)? {
                        found = Some((index / width, index % width));
                        break;
                    }
                }
                match found {
                    Some(origin) => Scan::GrowingWidth { origin, width: 1 },
                    None => Scan::Done,
                }
            }
            Scan::GrowingWidth { origin, width: w } => {
                let col = origin.1 + w;
                if col < width && self.is_free_match(origin.0, col)? {
                    Scan::GrowingWidth {
                        origin,
                        width: w + 1,
                    }
                } else {
                    Scan::GrowingHeight {
                        origin,
                        width: w,
                        height: 1,
                    }
                }
            }
            Scan::GrowingHeight {
                origin,
                width: w,
                height: h,
            } => {
                let row = origin.0 + h;
                let mut edge_matches = row < height;
                if edge_matches {
                    for col in origin.1..origin.1 + w {
                        if !self.is_free_match(row, col)? {
                            edge_matches = false;
                            break;
                        }
                    }
                }
                if edge_matches {
                    Scan::GrowingHeight {
                        origin,
                        width: w,
                        height: h + 1,
                    }
                } else {
                    Scan::Claiming {
                        origin,
                        extent: (h, w),
                    }
                }
            }
            Scan::Claiming { origin, extent } => {
                let region = Region {
                    kind: self.symbol,
                    origin,
                    extent,
                };
                for (row, col) in region.cells() {
                    self.claimed[row * width + col] = true;
                }
                self.regions.push(region);
                Scan::Scanning {
                    from: origin.0 * width + origin.1 + 1,
                }
            }
            Scan::Done => Scan::Done,
        };

        Ok(next)
    }

    fn run(mut self) -> Result<Vec<Region>, GridError> {
        let mut state = Scan::Scanning { from: 0 };
        while state != Scan::Done {
            state = self.step(state)?;
        }
        Ok(self.regions)
    }
}

/// All rectangles of `symbol`, in discovery order.
///
/// Starting from the first unclaimed matching cell in row-major order, the
/// rectangle grows right along its top row, then down while the whole next
/// row segment matches. Together the rectangles cover every occurrence of
/// `symbol` exactly once.
pub fn extract_regions(grid: &Grid, symbol: char) -> Result<Vec<Region>, GridError> {
    Extractor::new(grid, symbol).run()
}

/// Regions of every symbol accepted by `is_type`, in ascending symbol order.
pub fn extract_all(
    grid: &Grid,
    is_type: impl Fn(char) -> bool,
) -> Result<Vec<Region>, GridError> {
    let mut regions = Vec::new();
    for symbol in grid.symbols().into_iter().filter(|c| is_type(*c)) {
        regions.extend(extract_regions(grid, symbol)?);
    }
    Ok(regions)
}

fn compare(a: &Region, b: &Region, order: &[SortKey]) -> Ordering {
    order.iter().fold(Ordering::Equal, |acc, key| {
        acc.then_with(|| match key {
            SortKey::Type => a.kind.cmp(&b.kind),
            SortKey::Origin => a.origin.cmp(&b.origin),
            SortKey::Extent => a.extent.cmp(&b.extent),
        })
    })
}

/// Stable sort, so keys left out of `order` keep discovery order.
pub fn sort_regions(regions: &mut [Region], order: &[SortKey]) {
    regions.sort_by(|a, b| compare(a, b, order));
}
