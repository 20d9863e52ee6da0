//! Heightmap loading and the height field abstraction

use std::path::Path;

use image::DynamicImage;
use knoll_core::{KnollError, Result};

/// A 2D grid of elevation samples in `[0, 255]`
pub trait HeightField {
    /// Number of columns
    fn width(&self) -> usize;

    /// Number of rows
    fn height(&self) -> usize;

    /// Elevation at `(row, col)`. Callers stay within bounds.
    fn sample(&self, row: usize, col: usize) -> f32;
}

/// An in-memory height field, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl Heightmap {
    /// Wrap raw row-major samples
    pub fn from_raw(values: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        if values.len() != width * height {
            return Err(KnollError::InvalidArgument(format!(
                "heightmap of {}x{} needs {} samples, got {}",
                width,
                height,
                width * height,
                values.len()
            )));
        }

        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// A heightmap with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
        }
    }

    /// Build from a decoded image, reading the red channel of its RGBA8 form.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let width = rgba.width() as usize;
        let height = rgba.height() as usize;
        let values = rgba.pixels().map(|p| p.0[0] as f32).collect();

        Self {
            values,
            width,
            height,
        }
    }

    /// Load a heightmap from an image file (PNG or any format `image` decodes).
    pub fn from_png(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            KnollError::HeightmapError(format!(
                "Failed to load heightmap '{}': {}",
                path.display(),
                e
            ))
        })?;

        let heightmap = Self::from_image(&img);
        log::debug!(
            "Loaded heightmap '{}' ({}x{})",
            path.display(),
            heightmap.width,
            heightmap.height
        );
        Ok(heightmap)
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl HeightField for Heightmap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sample(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }
}
