//! Height-band texture level classification

use glam::Vec3;
use serde::Deserialize;

/// One elevation band: vertices at or below `max_height` use `level`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HeightBand {
    pub max_height: f32,
    pub level: f32,
}

/// Classifies vertices into texture layers by elevation and steepness.
///
/// Bands are checked in order and the first one whose `max_height` covers the
/// vertex wins; vertices above every band take the last band. When `steep_slope` is
/// set, vertices whose normal is flatter than that cosine against the
/// vertical get `steep_level` regardless of height.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeightBands {
    pub bands: Vec<HeightBand>,
    pub steep_slope: Option<f32>,
    pub steep_level: f32,
}

impl HeightBands {
    pub fn new(bands: Vec<HeightBand>) -> Self {
        Self {
            bands,
            ..Self::default()
        }
    }

    /// Mark vertices steeper than `cos_threshold` with `level`
    pub fn with_steep_level(mut self, cos_threshold: f32, level: f32) -> Self {
        self.steep_slope = Some(cos_threshold);
        self.steep_level = level;
        self
    }

    pub fn classify(&self, position: Vec3, normal: Vec3) -> f32 {
        if let Some(threshold) = self.steep_slope {
            let length = normal.length();
            if length > 0.0 && normal.z.abs() / length < threshold {
                return self.steep_level;
            }
        }

        self.bands
            .iter()
            .find(|band| position.z <= band.max_height)
            .or(self.bands.last())
            .map(|band| band.level)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> HeightBands {
        HeightBands::new(vec![
            HeightBand { max_height: 0.2, level: 0.0 },
            HeightBand { max_height: 0.4, level: 1.0 },
            HeightBand { max_height: 0.6, level: 2.0 },
        ])
    }

    const UP: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    #[test]
    fn first_covering_band_wins() {
        let b = bands();
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.1), UP), 0.0);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.2), UP), 0.0);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.3), UP), 1.0);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.5), UP), 2.0);
    }

    #[test]
    fn list_order_decides_between_overlapping_bands() {
        let b = HeightBands::new(vec![
            HeightBand { max_height: 0.6, level: 2.0 },
            HeightBand { max_height: 0.2, level: 0.0 },
        ]);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.1), UP), 2.0);
    }

    #[test]
    fn above_every_band_uses_last() {
        assert_eq!(bands().classify(Vec3::new(0.0, 0.0, 0.9), UP), 2.0);

        let unsorted = HeightBands::new(vec![
            HeightBand { max_height: 0.8, level: 4.0 },
            HeightBand { max_height: 0.3, level: 1.0 },
        ]);
        assert_eq!(unsorted.classify(Vec3::new(0.0, 0.0, 0.9), UP), 1.0);
    }

    #[test]
    fn steep_vertices_override_height() {
        let b = bands().with_steep_level(0.7, 5.0);
        let cliff = Vec3::new(1.0, 0.0, -0.5);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.1), cliff), 5.0);
        assert_eq!(b.classify(Vec3::new(0.0, 0.0, 0.1), UP), 0.0);
    }

    #[test]
    fn no_bands_means_level_zero() {
        let b = HeightBands::default();
        assert_eq!(b.classify(Vec3::new(3.0, 2.0, 100.0), UP), 0.0);
    }
}
