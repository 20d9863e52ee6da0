//! Built terrains and their continuous surface queries

use glam::{Vec2, Vec3, Vec4};
use knoll_core::Result;
use serde::Deserialize;

use crate::buffers::VertexBuffers;
use crate::mesh::{GridIndex, GridMesh};
use crate::sampling::{bilinear, Blend, EdgeMode};
use crate::toric;

/// Torus the terrain is wrapped onto
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct TorusShape {
    /// Distance from the torus center to the middle of the tube
    pub radius: f32,
    /// Tube radius at zero elevation
    pub thickness: f32,
}

/// A fully built terrain: the grid mesh plus how to read it.
///
/// Flat terrains clamp queries to the grid border; toric terrains wrap them
/// periodically in both directions.
#[derive(Clone, Debug)]
pub struct Terrain {
    mesh: GridMesh,
    scale: f32,
    normalized_coordinates: bool,
    torus: Option<TorusShape>,
}

impl Terrain {
    pub(crate) fn new(mesh: GridMesh, normalized_coordinates: bool) -> Self {
        Self {
            mesh,
            scale: 1.0,
            normalized_coordinates,
            torus: None,
        }
    }

    pub(crate) fn wrapped(mesh: GridMesh, scale: f32, torus: TorusShape) -> Self {
        Self {
            mesh,
            scale,
            normalized_coordinates: false,
            torus: Some(torus),
        }
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn width(&self) -> usize {
        self.mesh.width()
    }

    pub fn height(&self) -> usize {
        self.mesh.height()
    }

    /// Whether positions lie in `[0, 1]` (required for [`Terrain::wrap_toric`])
    pub fn has_normalized_coordinates(&self) -> bool {
        self.normalized_coordinates
    }

    /// The torus this terrain was wrapped onto, if any
    pub fn torus(&self) -> Option<TorusShape> {
        self.torus
    }

    pub fn is_toric(&self) -> bool {
        self.torus.is_some()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// World position at grid position `(row, col)`, scaled.
    pub fn at(&self, position: Vec2) -> Vec3 {
        self.sample(position, |index| self.mesh.coordinate(index)) * self.scale
    }

    /// Interpolated vertex normal at grid position `(row, col)`
    pub fn normal_at(&self, position: Vec2) -> Vec3 {
        self.sample(position, |index| self.mesh.normal(index))
    }

    /// Interpolated tangent (xyz + handedness) at grid position `(row, col)`
    pub fn tangent_at(&self, position: Vec2) -> Vec4 {
        self.sample(position, |index| self.mesh.tangent(index))
    }

    /// Wrap this terrain onto a torus, leaving `self` untouched.
    pub fn wrap_toric(&self, radius: f32, thickness: f32) -> Result<Terrain> {
        toric::wrap(self, TorusShape { radius, thickness })
    }

    /// Flattened vertex attributes and triangle indices for upload
    pub fn vertex_buffers(&self) -> VertexBuffers {
        VertexBuffers::from_terrain(self)
    }

    /// Export geometry as scaled vertices and triangles for a physics trimesh.
    pub fn trimesh_data(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        let width = self.mesh.width();
        let vertices = self
            .mesh
            .coordinates()
            .iter()
            .map(|p| (*p * self.scale).to_array())
            .collect();
        let triangles = self
            .mesh
            .triangles()
            .map(|triangle| triangle.indices.map(|index| index.flatten(width) as u32))
            .collect();

        (vertices, triangles)
    }

    fn sample<T, F>(&self, position: Vec2, fetch: F) -> T
    where
        T: Blend,
        F: Fn(GridIndex) -> T,
    {
        bilinear(
            position,
            self.mesh.height(),
            self.mesh.width(),
            EdgeMode::for_topology(self.mesh.topology()),
            fetch,
        )
    }
}
