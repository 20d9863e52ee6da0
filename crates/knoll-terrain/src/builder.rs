//! Heightmap resampling and the terrain build pipeline

use glam::Vec3;
use knoll_core::{KnollError, Result};

use crate::heightmap::HeightField;
use crate::mesh::GridMesh;
use crate::sampling::Blend;
use crate::smoothing::smooth_normals;
use crate::tangents::compute_tangents;
use crate::terrain::Terrain;

/// Default divisor applied to grid indices to get texture coordinates
pub const DEFAULT_TEXTURE_TILING: f32 = 15.0;

/// Largest raw sample value; normalized terrains divide by this
const MAX_SAMPLE: f32 = 255.0;

/// Configures and runs the resample → triangulate → smooth → tangent pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainBuilder {
    width: usize,
    height: usize,
    normalize_coordinates: bool,
    smooth_normals: bool,
    texture_tiling: f32,
}

impl TerrainBuilder {
    /// Builder for an output grid of `width x height` vertices
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            normalize_coordinates: false,
            smooth_normals: false,
            texture_tiling: DEFAULT_TEXTURE_TILING,
        }
    }

    /// Builder whose output resolution matches `field`
    pub fn matching(field: &dyn HeightField) -> Self {
        Self::new(field.width(), field.height())
    }

    /// Emit positions in `[0, 1]` (heights divided by 255) instead of grid units
    pub fn normalize_coordinates(mut self, normalize: bool) -> Self {
        self.normalize_coordinates = normalize;
        self
    }

    /// Run the normal-smoothing and tangent-space passes
    pub fn smooth_normals(mut self, smooth: bool) -> Self {
        self.smooth_normals = smooth;
        self
    }

    pub fn texture_tiling(mut self, tiling: f32) -> Self {
        self.texture_tiling = tiling;
        self
    }

    /// Build a terrain where every vertex is texture level 0
    pub fn build(&self, field: &dyn HeightField) -> Result<Terrain> {
        self.build_with(field, |_, _| 0.0)
    }

    /// Build a terrain, classifying each vertex with `texture_level(position, normal)`.
    pub fn build_with<F>(&self, field: &dyn HeightField, texture_level: F) -> Result<Terrain>
    where
        F: Fn(Vec3, Vec3) -> f32,
    {
        if field.width() == 0 || field.height() == 0 {
            return Err(KnollError::InvalidArgument(format!(
                "height field is empty ({}x{})",
                field.width(),
                field.height()
            )));
        }
        if !(self.texture_tiling.is_finite() && self.texture_tiling > 0.0) {
            return Err(KnollError::InvalidArgument(format!(
                "texture tiling must be positive, got {}",
                self.texture_tiling
            )));
        }

        let mut mesh = GridMesh::new(self.width, self.height)?;

        if self.width > field.width() || self.height > field.height() {
            log::warn!(
                "Upsampling {}x{} height field to {}x{} grid",
                field.width(),
                field.height(),
                self.width,
                self.height
            );
        }

        self.resample(field, &mut mesh);
        mesh.compute_face_normals();

        if self.smooth_normals {
            smooth_normals(&mut mesh);
            compute_tangents(&mut mesh)?;
        } else {
            mesh.assign_flat_vertex_normals();
        }

        for ((uv, position), normal) in mesh
            .texture_coordinates
            .iter_mut()
            .zip(&mesh.coordinates)
            .zip(&mesh.normals)
        {
            uv.z = texture_level(*position, *normal);
        }

        log::info!(
            "Built {}x{} terrain ({} quads, smooth normals: {})",
            mesh.width(),
            mesh.height(),
            mesh.quads_count(),
            self.smooth_normals
        );

        Ok(Terrain::new(mesh, self.normalize_coordinates))
    }

    /// Fill positions and texture coordinates by bilinear resampling.
    fn resample(&self, field: &dyn HeightField, mesh: &mut GridMesh) {
        let (src_width, src_height) = (field.width(), field.height());
        let (width, height) = (self.width, self.height);

        let height_ratio = src_height as f32 / height as f32;
        let width_ratio = src_width as f32 / width as f32;

        let sample = |row: usize, col: usize| {
            let value = field.sample(row, col);
            if self.normalize_coordinates {
                value / MAX_SAMPLE
            } else {
                value
            }
        };

        for i in 0..height {
            let source_i = i as f32 * height_ratio;
            let prev_i = (source_i.floor() as usize).min(src_height - 1);
            let next_i = (prev_i + 1).min(src_height - 1);
            let height_shift = source_i - prev_i as f32;

            for j in 0..width {
                let source_j = j as f32 * width_ratio;
                let prev_j = (source_j.floor() as usize).min(src_width - 1);
                let next_j = (prev_j + 1).min(src_width - 1);
                let width_shift = source_j - prev_j as f32;

                let elevation = sample(prev_i, prev_j)
                    .blend(sample(prev_i, next_j), width_shift)
                    .blend(
                        sample(next_i, prev_j).blend(sample(next_i, next_j), width_shift),
                        height_shift,
                    );

                let slot = i * width + j;
                mesh.coordinates[slot] = if self.normalize_coordinates {
                    Vec3::new(j as f32 / width as f32, i as f32 / height as f32, elevation)
                } else {
                    Vec3::new(j as f32, i as f32, elevation)
                };
                mesh.texture_coordinates[slot] = Vec3::new(
                    j as f32 / self.texture_tiling,
                    i as f32 / self.texture_tiling,
                    0.0,
                );
            }
        }
    }
}
