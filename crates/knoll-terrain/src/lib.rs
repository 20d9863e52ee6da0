//! Knoll Terrain - Heightmap-driven grid meshes and toroidal wrapping
//!
//! Resamples a height field onto a rectangular grid, triangulates it along a
//! fixed diagonal, smooths per-vertex normals, builds a tangent-space basis,
//! and can wrap the result onto a torus. Does not talk to any graphics API;
//! outputs raw vertex data and continuous surface queries for the renderer
//! and world logic to consume.

pub mod buffers;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod heightmap;
pub mod mesh;
mod sampling;
pub mod smoothing;
pub mod tangents;
pub mod terrain;
pub mod toric;

pub use buffers::VertexBuffers;
pub use builder::TerrainBuilder;
pub use classifier::{HeightBand, HeightBands};
pub use config::TerrainConfig;
pub use heightmap::{HeightField, Heightmap};
pub use mesh::{GridIndex, GridMesh, Quad, Topology, Triangle};
pub use terrain::{Terrain, TorusShape};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn flat_heightmap_generates_correct_mesh() {
        let hm = Heightmap::filled(4, 4, 128.0);
        let terrain = TerrainBuilder::matching(&hm).build(&hm).unwrap();
        let mesh = terrain.mesh();

        assert_eq!(mesh.vertex_count(), 4 * 4);
        assert_eq!(mesh.quads_count(), 3 * 3);
        assert_eq!(terrain.vertex_buffers().indices.len(), 3 * 3 * 6);
    }

    #[test]
    fn custom_height_field_is_accepted() {
        struct Dome;

        impl HeightField for Dome {
            fn width(&self) -> usize {
                5
            }
            fn height(&self) -> usize {
                5
            }
            fn sample(&self, row: usize, col: usize) -> f32 {
                let dr = row as f32 - 2.0;
                let dc = col as f32 - 2.0;
                (255.0 - 30.0 * (dr * dr + dc * dc)).max(0.0)
            }
        }

        let terrain = TerrainBuilder::matching(&Dome)
            .normalize_coordinates(true)
            .smooth_normals(true)
            .build(&Dome)
            .unwrap();

        let peak = terrain.at(Vec2::new(2.0, 2.0));
        assert!((peak.z - 1.0).abs() < 1e-6);

        // Symmetric dome: the summit normal is vertical
        let normal = terrain.normal_at(Vec2::new(2.0, 2.0)).normalize();
        assert!((normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn toric_terrain_keeps_texture_levels() {
        let hm = Heightmap::filled(4, 4, 0.0);
        let flat = TerrainBuilder::matching(&hm)
            .normalize_coordinates(true)
            .smooth_normals(true)
            .build_with(&hm, |_, _| 3.0)
            .unwrap();
        let toric = flat.wrap_toric(2.0, 0.5).unwrap();

        assert!(toric
            .mesh()
            .texture_coordinates()
            .iter()
            .all(|uv| uv.z == 3.0));
    }
}
