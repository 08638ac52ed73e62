// ABOUTME: A named grid together with its derived regions and cuts.
// ABOUTME: Resizing produces a new frame whose derived state is rebuilt from scratch.

use std::collections::BTreeMap;

use bqt_core::{Grid, GridError, Settings, SortKey};

use crate::apportion::{self, ResizeError};
use crate::cuts::{self, Axis, Cut, Orientation};
use crate::regions::{self, Region};

/// Per-frame config key holding a region sort order
pub const SORT_KEY: &str = "sort";
/// Config key injected by the frame itself
pub const FIXED_SIZE_KEY: &str = "fixed_size";
const WEIGHT_PREFIX: &str = "weight.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// No cut markers anywhere; every resize is rejected
    FixedSize,
    Resizable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    grid: Grid,
    config: BTreeMap<String, String>,
    regions: Vec<Region>,
    cuts: Vec<Cut>,
    size_mode: SizeMode,
    sort_order: Vec<SortKey>,
    settings: Settings,
}

impl Frame {
    /// Derive regions and cuts for `grid` and fix the frame's size mode.
    pub fn build(
        name: impl Into<String>,
        grid: Grid,
        mut config: BTreeMap<String, String>,
        settings: &Settings,
    ) -> Result<Self, GridError> {
        let name = name.into();
        let size_mode = if grid.contains(settings.cut_symbol) {
            SizeMode::Resizable
        } else {
            SizeMode::FixedSize
        };
        config.insert(
            FIXED_SIZE_KEY.to_string(),
            (size_mode == SizeMode::FixedSize).to_string(),
        );

        let sort_order = match config.get(SORT_KEY) {
            Some(list) => SortKey::parse_list(list).unwrap_or_else(|e| {
                tracing::warn!(frame = %name, "ignoring sort order: {}", e);
                settings.region_sort_order.clone()
            }),
            None => settings.region_sort_order.clone(),
        };

        Self::derive(name, grid, config, size_mode, sort_order, settings.clone())
    }

    fn derive(
        name: String,
        grid: Grid,
        config: BTreeMap<String, String>,
        size_mode: SizeMode,
        sort_order: Vec<SortKey>,
        settings: Settings,
    ) -> Result<Self, GridError> {
        let mut regions = regions::extract_all(&grid, |c| settings.is_type_symbol(c))?;
        regions::sort_regions(&mut regions, &sort_order);

        let cuts = match size_mode {
            SizeMode::FixedSize => Vec::new(),
            SizeMode::Resizable => {
                let mut cuts = cuts::detect_cuts(&grid, settings.cut_symbol)?;
                apply_weight_overrides(&name, &mut cuts, &config);
                cuts
            }
        };

        tracing::debug!(
            frame = %name,
            dims = ?grid.dims(),
            regions = regions.len(),
            cuts = cuts.len(),
            "derived frame state"
        );

        Ok(Self {
            name,
            grid,
            config,
            regions,
            cuts,
            size_mode,
            sort_order,
            settings,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        self.grid.dims()
    }

    pub fn config(&self) -> &BTreeMap<String, String> {
        &self.config
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn regions_of(&self, symbol: char) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.kind == symbol)
    }

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn cuts_on(&self, axis: Axis) -> impl Iterator<Item = &Cut> {
        let orientation = axis.cut_orientation();
        self.cuts.iter().filter(move |c| c.orientation == orientation)
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn is_fixed_size(&self) -> bool {
        self.size_mode == SizeMode::FixedSize
    }

    pub fn sort_order(&self) -> &[SortKey] {
        &self.sort_order
    }

    /// A copy of this frame grown or shrunk by `delta` lines along `axis`.
    ///
    /// `self` is never modified; on error nothing has changed.
    pub fn resized(&self, axis: Axis, delta: i64) -> Result<Frame, ResizeError> {
        if self.is_fixed_size() {
            return Err(ResizeError::NotResizable {
                frame: self.name.clone(),
            });
        }

        let (grid, _awards) = apportion::resize_grid(&self.grid, &self.cuts, axis, delta)?;
        let frame = Self::derive(
            self.name.clone(),
            grid,
            self.config.clone(),
            self.size_mode,
            self.sort_order.clone(),
            self.settings.clone(),
        )?;

        tracing::info!(
            frame = %self.name,
            ?axis,
            delta,
            from = ?self.dims(),
            to = ?frame.dims(),
            "resized frame"
        );
        Ok(frame)
    }

    /// In-place form of [`Frame::resized`]. The frame is replaced only on success.
    pub fn resize(&mut self, axis: Axis, delta: i64) -> Result<(), ResizeError> {
        *self = self.resized(axis, delta)?;
        Ok(())
    }
}

/// Apply `weight.<orientation>.<n>` entries to the n-th cut of that
/// orientation. Bad entries are skipped.
fn apply_weight_overrides(frame: &str, cuts: &mut [Cut], config: &BTreeMap<String, String>) {
    for (key, value) in config.range(WEIGHT_PREFIX.to_string()..) {
        let Some(rest) = key.strip_prefix(WEIGHT_PREFIX) else {
            break;
        };

        let parsed = rest.split_once('.').and_then(|(axis, ordinal)| {
            let orientation = [Orientation::Horizontal, Orientation::Vertical]
                .into_iter()
                .find(|o| o.config_name() == axis)?;
            let ordinal: usize = ordinal.parse().ok()?;
            Some((orientation, ordinal))
        });
        let Some((orientation, ordinal)) = parsed else {
            tracing::warn!(frame, key = %key, "ignoring unrecognised weight key");
            continue;
        };

        let weight = match value.trim().parse::<u32>() {
            Ok(w) if w >= 1 => w,
            _ => {
                tracing::warn!(
                    frame,
                    key = %key,
                    value = %value,
                    "weight must be a whole number of at least 1"
                );
                continue;
            }
        };

        match cuts
            .iter_mut()
            .filter(|c| c.orientation == orientation)
            .nth(ordinal)
        {
            Some(cut) => cut.weight = weight,
            None => tracing::warn!(frame, key = %key, "no cut with that index"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[&str], config: &[(&str, &str)]) -> Frame {
        let config = config
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Frame::build(
            "test",
            Grid::from_rows(rows).unwrap(),
            config,
            &Settings::default(),
        )
        .unwrap()
    }

    #[test]
    fn builds_regions_and_cuts() {
        let f = frame(&["AAX", "AAX", "XXX"], &[]);
        assert_eq!(f.size_mode(), SizeMode::Resizable);
        assert_eq!(f.config().get(FIXED_SIZE_KEY).map(String::as_str), Some("false"));
        assert_eq!(
            f.regions(),
            &[Region {
                kind: 'A',
                origin: (0, 0),
                extent: (2, 2)
            }]
        );
        assert_eq!(f.cuts().len(), 2);
        assert_eq!(f.cuts_on(Axis::Columns).count(), 1);
    }

    #[test]
    fn frames_without_markers_are_fixed() {
        let mut f = frame(&["AB", "ab"], &[]);
        assert!(f.is_fixed_size());
        assert!(f.cuts().is_empty());
        assert_eq!(f.config().get(FIXED_SIZE_KEY).map(String::as_str), Some("true"));
        assert_eq!(
            f.resize(Axis::Rows, 1),
            Err(ResizeError::NotResizable {
                frame: "test".to_string()
            })
        );
        assert_eq!(f.dims(), (2, 2));
    }

    #[test]
    fn interior_marker_makes_a_frame_resizable_without_cuts() {
        let f = frame(&["AAA", "AXA", "AAA"], &[]);
        assert!(!f.is_fixed_size());
        assert!(f.cuts().is_empty());
        assert!(matches!(
            f.resized(Axis::Columns, 1),
            Err(ResizeError::InsufficientCutCapacity { .. })
        ));
    }

    #[test]
    fn resize_rebuilds_regions() {
        let f = frame(&["AAX", "AAX", "XXX"], &[]);
        let wider = f.resized(Axis::Columns, 3).unwrap();
        assert_eq!(wider.dims(), (3, 6));
        assert_eq!(f.dims(), (3, 3));
        assert_eq!(wider.cuts_on(Axis::Columns).next().map(|c| c.thickness), Some(4));

        let g = frame(&["XAB", "XAB", "AAB"], &[]);
        let taller = g.resized(Axis::Rows, 2).unwrap();
        assert_eq!(
            taller.regions_of('B').collect::<Vec<_>>(),
            vec![&Region {
                kind: 'B',
                origin: (0, 2),
                extent: (5, 1)
            }]
        );
    }

    #[test]
    fn failed_resize_leaves_the_frame_alone() {
        let mut f = frame(&["AAX", "AAX", "XXX"], &[]);
        let before = f.clone();
        assert!(f.resize(Axis::Columns, -1).is_err());
        assert_eq!(f, before);
    }

    #[test]
    fn resize_round_trip_restores_dims() {
        let mut f = frame(&["AXXB", "AbbB", "XbbB"], &[]);
        f.resize(Axis::Columns, 5).unwrap();
        f.resize(Axis::Rows, 2).unwrap();
        assert_eq!(f.dims(), (5, 9));
        f.resize(Axis::Columns, -5).unwrap();
        f.resize(Axis::Rows, -2).unwrap();
        assert_eq!(f.dims(), (3, 4));
    }

    #[test]
    fn sort_key_from_config() {
        let f = frame(&["BA", "Aa"], &[("sort", "origin")]);
        let origins: Vec<_> = f.regions().iter().map(|r| r.origin).collect();
        assert_eq!(origins, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(f.sort_order(), &[SortKey::Origin]);
    }

    #[test]
    fn bad_sort_key_falls_back_to_settings() {
        let f = frame(&["BA"], &[("sort", "area")]);
        assert_eq!(f.sort_order(), SortKey::default_order().as_slice());
        assert_eq!(f.regions()[0].kind, 'A');
    }

    #[test]
    fn weight_overrides_apply_by_index() {
        let f = frame(
            &["AXAXA", "AAAAA"],
            &[
                ("weight.vertical.1", "3"),
                ("weight.vertical.7", "2"),
                ("weight.diagonal.0", "2"),
                ("weight.vertical.0", "0"),
                ("title", "menu"),
            ],
        );
        let weights: Vec<u32> = f.cuts_on(Axis::Columns).map(|c| c.weight).collect();
        assert_eq!(weights, vec![1, 3]);
        assert_eq!(f.config().get("title").map(String::as_str), Some("menu"));

        let wider = f.resized(Axis::Columns, 4).unwrap();
        // 1:3 split of four columns
        let thickness: Vec<usize> = wider.cuts_on(Axis::Columns).map(|c| c.thickness).collect();
        assert_eq!(thickness, vec![2, 4]);
    }
}
