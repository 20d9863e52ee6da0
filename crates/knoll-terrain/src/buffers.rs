//! Flat vertex and index buffers for the rendering layer

use serde::Serialize;

use crate::mesh::GridMesh;
use crate::terrain::Terrain;

/// Per-vertex attribute arrays plus a triangle list.
///
/// Positions are unscaled grid coordinates; `scale` is carried separately so
/// it can go into the model matrix.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VertexBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texture_coordinates: Vec<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tangents: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
    pub scale: f32,
}

impl VertexBuffers {
    pub fn from_terrain(terrain: &Terrain) -> Self {
        let mesh = terrain.mesh();

        Self {
            positions: mesh.coordinates().iter().map(|v| v.to_array()).collect(),
            normals: mesh.normals().iter().map(|v| v.to_array()).collect(),
            texture_coordinates: mesh
                .texture_coordinates()
                .iter()
                .map(|v| v.to_array())
                .collect(),
            tangents: mesh
                .has_tangents()
                .then(|| mesh.tangents().iter().map(|v| v.to_array()).collect()),
            indices: triangle_indices(mesh),
            scale: terrain.scale(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Walk quads row-major and emit each triangle's vertices as `row * width + col`.
pub fn triangle_indices(mesh: &GridMesh) -> Vec<u32> {
    let width = mesh.width();
    let mut indices = Vec::with_capacity(mesh.quads_count() * 6);

    for triangle in mesh.triangles() {
        for index in triangle.indices {
            indices.push(index.flatten(width) as u32);
        }
    }

    indices
}
