// ABOUTME: Spreads a row/column delta across weighted cuts.
// ABOUTME: Cyclic largest-remainder awards, then line surgery on the grid.

use bqt_core::{Grid, GridError};

use crate::cuts::{Axis, Cut};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    #[error("Frame {frame:?} has no cuts and cannot be resized")]
    NotResizable { frame: String },

    #[error("Cannot remove {requested} {axis:?}: the cuts only have {available} to give")]
    InsufficientCutCapacity {
        axis: Axis,
        requested: usize,
        available: usize,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Index of the eligible cut with the most remaining share. Ties go to the
/// lower index.
fn best_candidate(
    remaining: &[u32],
    awards: &[usize],
    capacity: Option<&[usize]>,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &left) in remaining.iter().enumerate() {
        let capped = capacity.is_some_and(|caps| awards[i] >= caps[i]);
        if left == 0 || capped {
            continue;
        }
        if best.map_or(true, |b| left > remaining[b]) {
            best = Some(i);
        }
    }
    best
}

/// Award `units` one at a time across cuts with the given weights.
///
/// Each unit goes to the cut with the highest `remaining / total` share,
/// where `remaining` starts at the cut's weight and drops by one per award.
/// `total` is the same for every cut, so comparing `remaining` alone is
/// enough. When every eligible cut is exhausted the shares reset to the
/// weights, so the weight pattern repeats for deltas larger than the total.
///
/// `capacity` caps each cut's award. Returns `None` if the units cannot all
/// be placed.
pub fn apportion(
    weights: &[u32],
    units: usize,
    capacity: Option<&[usize]>,
) -> Option<Vec<usize>> {
    let mut awards = vec![0usize; weights.len()];
    if units == 0 {
        return Some(awards);
    }
    if let Some(caps) = capacity {
        if caps.len() != weights.len() || caps.iter().sum::<usize>() < units {
            return None;
        }
    }

    let mut remaining = weights.to_vec();
    for _ in 0..units {
        let pick = match best_candidate(&remaining, &awards, capacity) {
            Some(i) => i,
            None => {
                remaining.copy_from_slice(weights);
                best_candidate(&remaining, &awards, capacity)?
            }
        };
        awards[pick] += 1;
        remaining[pick] -= 1;
    }

    Some(awards)
}

fn insert_lines(grid: &Grid, axis: Axis, at: usize, count: usize) -> Result<Grid, GridError> {
    match axis {
        Axis::Rows => grid.with_rows_inserted(at, at, count),
        Axis::Columns => grid.with_columns_inserted(at, at, count),
    }
}

fn remove_lines(grid: &Grid, axis: Axis, at: usize, count: usize) -> Result<Grid, GridError> {
    match axis {
        Axis::Rows => grid.with_rows_removed(at, count),
        Axis::Columns => grid.with_columns_removed(at, count),
    }
}

/// Grow (`delta > 0`) or shrink (`delta < 0`) `grid` along `axis` using the
/// cuts on that axis. Returns the new grid and each cut's award.
///
/// Growing inserts copies of a cut's marker line at its position. Shrinking
/// removes lines from the cut's marker run, always keeping its first line.
/// On error `grid` is untouched.
pub fn resize_grid(
    grid: &Grid,
    cuts: &[Cut],
    axis: Axis,
    delta: i64,
) -> Result<(Grid, Vec<usize>), ResizeError> {
    let orientation = axis.cut_orientation();
    let on_axis: Vec<&Cut> = cuts
        .iter()
        .filter(|c| c.orientation == orientation)
        .collect();
    let weights: Vec<u32> = on_axis.iter().map(|c| c.weight).collect();
    let units = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);

    let awards = if delta >= 0 {
        if units > 0 && on_axis.is_empty() {
            return Err(ResizeError::InsufficientCutCapacity {
                axis,
                requested: units,
                available: 0,
            });
        }
        apportion(&weights, units, None)
    } else {
        let capacity: Vec<usize> = on_axis.iter().map(|c| c.removable()).collect();
        apportion(&weights, units, Some(capacity.as_slice()))
    };
    let awards = awards.ok_or_else(|| ResizeError::InsufficientCutCapacity {
        axis,
        requested: units,
        available: on_axis.iter().map(|c| c.removable()).sum(),
    })?;

    tracing::debug!(?axis, delta, ?awards, "apportioned resize across cuts");

    let mut plan: Vec<(usize, usize)> = on_axis
        .iter()
        .zip(&awards)
        .filter(|&(_, &award)| award > 0)
        .map(|(cut, &award)| (cut.position, award))
        .collect();
    plan.sort_by(|a, b| b.0.cmp(&a.0));

    let mut resized = grid.clone();
    for (position, award) in plan {
        resized = if delta > 0 {
            insert_lines(&resized, axis, position, award)?
        } else {
            remove_lines(&resized, axis, position + 1, award)?
        };
    }

    Ok((resized, awards))
}
