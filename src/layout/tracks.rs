//! Weighted tracks: the rows or columns of a proportional grid.
//!
//! A [`Tracks`] list turns an available extent into one size per track.
//! Weighted tracks share whatever the fixed-pixel tracks leave over; every
//! track is bounded by its own minimum and maximum.
//!
//! # Divider drags
//!
//! Dragging the boundary between two tracks works in absolute pixels:
//!
//! 1. The first drag event snapshots every track's resolved size as a
//!    *live* pixel size.
//! 2. Each event moves pixels from one side of the boundary to the other.
//! 3. When the drag completes, [`Tracks::settle`] clamps a track that fell
//!    below its minimum and takes the deficit from its neighbour's slack.
//! 4. [`Tracks::renormalize`] later folds the live sizes back into weights
//!    so the steady state is proportional again.
//!
//! Resolution never reports a size below a track's minimum, live or not.

use serde::{Deserialize, Serialize};

/// Default minimum height of a grid row, in pixels.
pub const DEFAULT_MIN_ROW_HEIGHT: f64 = 50.0;
/// Default minimum width of a grid column, in pixels.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 100.0;

const EPSILON: f64 = 1e-9;

/// How a track asks for space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackSize {
    /// Proportional share of the space left by pixel tracks.
    Weight(f64),
    /// Fixed size in pixels.
    Pixels(f64),
}

/// A single row or column.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub size: TrackSize,
    pub min: f64,
    pub max: f64,
    /// Absolute size while a divider drag is in progress or awaiting
    /// renormalisation.
    live: Option<f64>,
}

impl Track {
    pub fn weighted(weight: f64, min: f64) -> Self {
        Self {
            size: TrackSize::Weight(weight),
            min,
            max: f64::INFINITY,
            live: None,
        }
    }

    /// A fixed track with no minimum.
    pub fn fixed(pixels: f64) -> Self {
        Self {
            size: TrackSize::Pixels(pixels),
            min: 0.0,
            max: f64::INFINITY,
            live: None,
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match self.size {
            TrackSize::Weight(w) => Some(w),
            TrackSize::Pixels(_) => None,
        }
    }

    /// Live pixel size, if the track is currently in a drag.
    pub fn live(&self) -> Option<f64> {
        self.live
    }

    fn clamp(&self, size: f64) -> f64 {
        size.min(self.max).max(self.min)
    }
}

/// Ordered list of tracks along one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracks {
    tracks: Vec<Track>,
}

impl Tracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` equally weighted tracks with the same minimum.
    pub fn uniform(count: usize, min: f64) -> Self {
        Self {
            tracks: (0..count).map(|_| Track::weighted(1.0, min)).collect(),
        }
    }

    /// One weighted track per entry of `weights`.
    pub fn from_weights(weights: &[f64], min: f64) -> Self {
        Self {
            tracks: weights.iter().map(|&w| Track::weighted(w, min)).collect(),
        }
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Replace a track's size request.
    ///
    /// A drag in progress is folded into the other tracks first so the list
    /// never mixes live and requested sizes.  Returns `false` if `index` is
    /// out of range.
    pub fn set_size(&mut self, index: usize, size: TrackSize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.renormalize();
        match self.tracks.get_mut(index) {
            Some(track) => {
                track.size = size;
                track.live = None;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if `index` is out of range.
    pub fn set_min(&mut self, index: usize, min: f64) -> bool {
        match self.tracks.get_mut(index) {
            Some(track) => {
                track.min = min.max(0.0);
                true
            }
            None => false,
        }
    }

    /// Whether any track holds a live pixel size.
    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(|t| t.live.is_some())
    }

    /// Resolve one size per track for an available `extent`.
    ///
    /// Live and pixel tracks are sized first.  The remaining space is
    /// shared by weight; tracks whose share breaks their bounds are pinned
    /// to the bound and the rest is shared again until nothing moves.  If
    /// the minimums alone exceed `extent`, the result overflows rather
    /// than shrinking a track below its minimum.
    pub fn resolve(&self, extent: f64) -> Vec<f64> {
        let n = self.tracks.len();
        let mut sizes = vec![0.0; n];
        let mut pinned = vec![false; n];

        for (i, t) in self.tracks.iter().enumerate() {
            let fixed = match (t.live, t.size) {
                (Some(px), _) | (None, TrackSize::Pixels(px)) => Some(px.max(0.0)),
                (None, TrackSize::Weight(_)) => None,
            };
            if let Some(px) = fixed {
                sizes[i] = t.clamp(px);
                pinned[i] = true;
            }
        }

        loop {
            let used: f64 = (0..n).filter(|&i| pinned[i]).map(|i| sizes[i]).sum();
            let free = (extent - used).max(0.0);
            let total_weight: f64 = (0..n)
                .filter(|&i| !pinned[i])
                .filter_map(|i| self.tracks[i].weight())
                .sum();
            if total_weight <= 0.0 {
                break;
            }

            let share = |i: usize| free * self.tracks[i].weight().unwrap_or(0.0) / total_weight;

            let mut changed = false;
            for i in 0..n {
                if !pinned[i] && share(i) < self.tracks[i].min - EPSILON {
                    sizes[i] = self.tracks[i].min;
                    pinned[i] = true;
                    changed = true;
                }
            }
            if !changed {
                for i in 0..n {
                    if !pinned[i] && share(i) > self.tracks[i].max + EPSILON {
                        sizes[i] = self.tracks[i].max;
                        pinned[i] = true;
                        changed = true;
                    }
                }
            }
            if !changed {
                for i in (0..n).filter(|&i| !pinned[i]) {
                    sizes[i] = share(i);
                }
                break;
            }
        }
        sizes
    }

    /// Move the boundary between `first` and `second` by `delta` pixels
    /// (positive grows `first`).
    ///
    /// Snapshots the list into live pixel sizes on the first call of a
    /// drag.  Neither track goes below zero here; minimums are restored by
    /// [`settle`](Self::settle).  Returns the delta actually applied.
    pub fn drag_boundary(&mut self, first: usize, second: usize, delta: f64, extent: f64) -> f64 {
        if first >= self.tracks.len() || second >= self.tracks.len() || first == second {
            return 0.0;
        }
        if !self.is_live() {
            let sizes = self.resolve(extent);
            for (t, s) in self.tracks.iter_mut().zip(sizes) {
                t.live = Some(s);
            }
        }
        let a = self.tracks[first].live.unwrap_or(0.0);
        let b = self.tracks[second].live.unwrap_or(0.0);
        let applied = delta.clamp(-a, b);
        self.tracks[first].live = Some(a + applied);
        self.tracks[second].live = Some(b - applied);
        applied
    }

    /// Enforce minimums on the two tracks of a finished drag.
    ///
    /// A track below its minimum is clamped to it and the deficit is taken
    /// from the other track's slack above its own minimum, never more than
    /// that slack.  Returns whether anything changed.
    pub fn settle(&mut self, first: usize, second: usize) -> bool {
        if first >= self.tracks.len() || second >= self.tracks.len() {
            return false;
        }
        let mut changed = false;
        for (shrunk, other) in [(first, second), (second, first)] {
            let Some(size) = self.tracks[shrunk].live else {
                continue;
            };
            let min = self.tracks[shrunk].min;
            if size >= min {
                continue;
            }
            let deficit = min - size;
            self.tracks[shrunk].live = Some(min);
            let other_track = &mut self.tracks[other];
            if let Some(other_size) = other_track.live {
                let slack = (other_size - other_track.min).max(0.0);
                other_track.live = Some(other_size - deficit.min(slack));
            }
            changed = true;
        }
        changed
    }

    /// Fold live pixel sizes back into track sizes.
    ///
    /// Weighted tracks get weights proportional to their live sizes,
    /// scaled so the total weight is unchanged.  Pixel tracks keep their
    /// live size as their new pixel size.  Returns whether anything was
    /// live.
    pub fn renormalize(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let (weight_total, pixel_total) = self
            .tracks
            .iter()
            .filter_map(|t| Some((t.weight()?, t.live?)))
            .fold((0.0, 0.0), |(w, p), (tw, tp)| (w + tw, p + tp));

        for t in &mut self.tracks {
            let Some(live) = t.live.take() else {
                continue;
            };
            t.size = match t.size {
                TrackSize::Weight(w) if pixel_total > 0.0 => {
                    let scaled = live / pixel_total * weight_total;
                    TrackSize::Weight(if scaled > 0.0 { scaled } else { w })
                }
                TrackSize::Weight(w) => TrackSize::Weight(w),
                TrackSize::Pixels(_) => TrackSize::Pixels(live),
            };
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn equal_weights_split_evenly() {
        let t = Tracks::uniform(4, 0.0);
        assert_eq!(t.resolve(400.0), vec![100.0; 4]);
    }

    #[test]
    fn weights_are_proportional() {
        let t = Tracks::from_weights(&[80.0, 20.0], 0.0);
        let s = t.resolve(1000.0);
        assert!(approx(s[0], 800.0));
        assert!(approx(s[1], 200.0));
    }

    #[test]
    fn pixel_tracks_come_first() {
        let mut t = Tracks::uniform(2, 0.0);
        t.push(Track::fixed(100.0));
        let s = t.resolve(500.0);
        assert_eq!(s, vec![200.0, 200.0, 100.0]);
    }

    #[test]
    fn minimum_is_pinned_and_rest_reshared() {
        let mut t = Tracks::from_weights(&[1.0, 9.0], 0.0);
        t.set_min(0, 150.0);
        let s = t.resolve(1000.0);
        assert!(approx(s[0], 150.0));
        assert!(approx(s[1], 850.0));
    }

    #[test]
    fn maximum_is_pinned() {
        let mut t = Tracks::uniform(2, 0.0);
        t.tracks[0].max = 100.0;
        let s = t.resolve(1000.0);
        assert!(approx(s[0], 100.0));
        assert!(approx(s[1], 900.0));
    }

    #[test]
    fn minimums_win_when_space_runs_out() {
        let t = Tracks::uniform(3, 100.0);
        assert_eq!(t.resolve(150.0), vec![100.0; 3]);
    }

    #[test]
    fn drag_moves_pixels_between_neighbours() {
        let mut t = Tracks::uniform(2, 50.0);
        let applied = t.drag_boundary(0, 1, 100.0, 400.0);
        assert_eq!(applied, 100.0);
        assert_eq!(t.resolve(400.0), vec![300.0, 100.0]);
    }

    #[test]
    fn settle_clamps_and_takes_from_neighbour_slack() {
        let mut t = Tracks::uniform(2, 50.0);
        t.drag_boundary(0, 1, 180.0, 400.0);
        // Live sizes are now 380 / 20.
        assert!(t.settle(0, 1));
        assert_eq!(t.tracks[1].live(), Some(50.0));
        assert_eq!(t.tracks[0].live(), Some(350.0));
    }

    #[test]
    fn settle_transfers_at_most_the_slack() {
        let mut t = Tracks::uniform(2, 0.0);
        t.drag_boundary(0, 1, 90.0, 200.0);
        // Live sizes 190 / 10; raise minimums afterwards.
        t.set_min(0, 180.0);
        t.set_min(1, 40.0);
        t.settle(0, 1);
        assert_eq!(t.tracks[1].live(), Some(40.0));
        assert_eq!(t.tracks[0].live(), Some(180.0));
    }

    #[test]
    fn renormalize_adopts_dragged_proportions() {
        let mut t = Tracks::uniform(2, 0.0);
        t.drag_boundary(0, 1, 100.0, 400.0);
        assert!(t.renormalize());
        assert!(!t.is_live());
        let s = t.resolve(800.0);
        assert!(approx(s[0], 600.0));
        assert!(approx(s[1], 200.0));
    }

    #[test]
    fn renormalize_keeps_fixed_tracks_fixed() {
        let mut t = Tracks::uniform(2, 0.0);
        t.push(Track::fixed(10.0));
        t.drag_boundary(0, 1, 50.0, 210.0);
        t.renormalize();
        assert_eq!(t.tracks[2].size, TrackSize::Pixels(10.0));
    }

    #[test]
    fn resizing_mid_drag_keeps_the_extent_filled() {
        let mut t = Tracks::uniform(2, 0.0);
        t.drag_boundary(0, 1, 50.0, 800.0);
        assert!(t.set_size(1, TrackSize::Weight(1.0)));
        assert!(!t.is_live());
        let applied = t.drag_boundary(0, 1, 50.0, 800.0);
        assert!(approx(applied, 50.0));
        let sizes = t.resolve(800.0);
        assert!(approx(sizes.iter().sum::<f64>(), 800.0));
    }

    #[test]
    fn no_track_ever_observed_below_minimum() {
        let mut t = Tracks::uniform(3, 50.0);
        let extent = 600.0;
        let drags = [(0, 1, 500.0), (1, 2, -300.0), (0, 1, -900.0), (1, 2, 700.0)];
        for (first, second, delta) in drags {
            t.drag_boundary(first, second, delta, extent);
            assert!(t.resolve(extent).iter().all(|&s| s >= 50.0 - 1e-9));
            t.settle(first, second);
            assert!(t.resolve(extent).iter().all(|&s| s >= 50.0 - 1e-9));
            t.renormalize();
            assert!(t.resolve(extent).iter().all(|&s| s >= 50.0 - 1e-9));
        }
    }
}
