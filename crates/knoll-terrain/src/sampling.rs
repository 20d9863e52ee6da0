//! Bilinear lookup at fractional grid positions

use glam::{Vec2, Vec3, Vec4};

use crate::mesh::{GridIndex, Topology};

/// Values that can be linearly blended
pub(crate) trait Blend: Copy {
    fn blend(self, other: Self, t: f32) -> Self;
}

impl Blend for f32 {
    fn blend(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Blend for Vec3 {
    fn blend(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Blend for Vec4 {
    fn blend(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// How indices outside the grid are brought back in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EdgeMode {
    /// Pin to the nearest border sample
    Clamp,
    /// Euclidean modulo, so the grid repeats in both directions
    Wrap,
}

impl EdgeMode {
    pub(crate) fn for_topology(topology: Topology) -> Self {
        match topology {
            Topology::Planar => EdgeMode::Clamp,
            Topology::Toroidal => EdgeMode::Wrap,
        }
    }

    /// Map a whole-valued float index into `0..len`.
    ///
    /// The range reduction happens in `f32` so that huge or infinite
    /// positions never reach an integer cast that could overflow.
    fn resolve(self, index: f32, len: usize) -> usize {
        let last = len.saturating_sub(1);
        let reduced = match self {
            EdgeMode::Clamp => index.clamp(0.0, last as f32),
            EdgeMode::Wrap => index.rem_euclid(len as f32),
        };
        // NaN casts to 0
        (reduced as usize).min(last)
    }
}

/// Integer part (towards negative infinity) and fractional shift
fn split(value: f32) -> (f32, f32) {
    let whole = value.floor();
    (whole, value - whole)
}

/// Sample a `rows x cols` grid at `position = (row, col)`.
///
/// Each of the two bracketing rows is blended along the column shift first,
/// then the rows are blended along the row shift.
pub(crate) fn bilinear<T, F>(
    position: Vec2,
    rows: usize,
    cols: usize,
    edge: EdgeMode,
    fetch: F,
) -> T
where
    T: Blend,
    F: Fn(GridIndex) -> T,
{
    let (prev_i, i_shift) = split(position.x);
    let (prev_j, j_shift) = split(position.y);

    let r0 = edge.resolve(prev_i, rows);
    let r1 = edge.resolve(prev_i + 1.0, rows);
    let c0 = edge.resolve(prev_j, cols);
    let c1 = edge.resolve(prev_j + 1.0, cols);

    let upper = fetch(GridIndex::new(r0, c0)).blend(fetch(GridIndex::new(r0, c1)), j_shift);
    let lower = fetch(GridIndex::new(r1, c0)).blend(fetch(GridIndex::new(r1, c1)), j_shift);
    upper.blend(lower, i_shift)
}
