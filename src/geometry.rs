//! Plain geometry types shared by every layout.
//!
//! All values are in device-independent pixels as `f64`.  Nothing here knows
//! about panels; layouts turn track sizes into [`Rect`]s and hand them back
//! to the host.

use serde::{Deserialize, Serialize};

/// The two layout axes.
///
/// `Horizontal` runs along x (columns, widths); `Vertical` runs along y
/// (rows, heights).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink by `margin` on every side.  Width and height never go
    /// negative.
    pub fn deflate(&self, margin: &Thickness) -> Rect {
        Rect {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: (self.width - margin.left - margin.right).max(0.0),
            height: (self.height - margin.top - margin.bottom).max(0.0),
        }
    }

    /// Cut a band of `extent` pixels off the given edge and return
    /// `(band, remainder)`.  The band is capped at the available space.
    pub fn split_edge(&self, edge: Edge, extent: f64) -> (Rect, Rect) {
        match edge {
            Edge::Top => {
                let h = extent.clamp(0.0, self.height);
                (
                    Rect::new(self.x, self.y, self.width, h),
                    Rect::new(self.x, self.y + h, self.width, self.height - h),
                )
            }
            Edge::Bottom => {
                let h = extent.clamp(0.0, self.height);
                (
                    Rect::new(self.x, self.bottom() - h, self.width, h),
                    Rect::new(self.x, self.y, self.width, self.height - h),
                )
            }
            Edge::Left => {
                let w = extent.clamp(0.0, self.width);
                (
                    Rect::new(self.x, self.y, w, self.height),
                    Rect::new(self.x + w, self.y, self.width - w, self.height),
                )
            }
            Edge::Right => {
                let w = extent.clamp(0.0, self.width);
                (
                    Rect::new(self.right() - w, self.y, w, self.height),
                    Rect::new(self.x, self.y, self.width - w, self.height),
                )
            }
        }
    }
}

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// The axis a band cut from this edge is measured along.
    pub fn axis(self) -> Axis {
        match self {
            Edge::Top | Edge::Bottom => Axis::Vertical,
            Edge::Left | Edge::Right => Axis::Horizontal,
        }
    }
}

/// Per-side spacing, used for panel margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    /// The same spacing on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Offsets of consecutive tracks: `[0, s0, s0+s1, …]` shifted by `origin`.
pub(crate) fn track_offsets(origin: f64, sizes: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(sizes.len() + 1);
    let mut acc = origin;
    offsets.push(acc);
    for s in sizes {
        acc += s;
        offsets.push(acc);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflate_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).deflate(&Thickness::uniform(8.0));
        assert_eq!(r.x, 8.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn split_top_band() {
        let (band, rest) = Rect::new(0.0, 0.0, 100.0, 50.0).split_edge(Edge::Top, 20.0);
        assert_eq!(band, Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(rest, Rect::new(0.0, 20.0, 100.0, 30.0));
    }

    #[test]
    fn split_right_band_is_capped() {
        let (band, rest) = Rect::new(10.0, 0.0, 40.0, 50.0).split_edge(Edge::Right, 90.0);
        assert_eq!(band, Rect::new(10.0, 0.0, 40.0, 50.0));
        assert_eq!(rest.width, 0.0);
    }

    #[test]
    fn offsets_accumulate() {
        assert_eq!(track_offsets(5.0, &[10.0, 20.0]), vec![5.0, 15.0, 35.0]);
    }
}
