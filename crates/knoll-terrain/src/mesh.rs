//! Rectangular grid mesh storage and triangulation

use glam::{Vec3, Vec4};
use knoll_core::{KnollError, Result};

/// A vertex position in the grid, addressed by row and column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub row: usize,
    pub col: usize,
}

impl GridIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major slot of this vertex in a grid `width` columns wide.
    /// This is the index the vertex buffer layer expects.
    pub const fn flatten(self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// One triangle of a quad: three grid vertices plus a flat face normal
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub indices: [GridIndex; 3],
    pub normal: Vec3,
}

/// A grid cell, always split into exactly two triangles
pub type Quad = [Triangle; 2];

/// How the quad grid connects at the borders
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Borders are open; `(height-1) x (width-1)` quads.
    #[default]
    Planar,
    /// Last row/column connect back to the first; `height x width` quads.
    Toroidal,
}

/// Split the cell spanned by rows `i..next_i` and columns `j..next_j`
/// along the fixed diagonal.
fn canonical_quad(i: usize, j: usize, next_i: usize, next_j: usize) -> Quad {
    [
        Triangle {
            indices: [
                GridIndex::new(i, j),
                GridIndex::new(next_i, j),
                GridIndex::new(i, next_j),
            ],
            normal: Vec3::ZERO,
        },
        Triangle {
            indices: [
                GridIndex::new(i, next_j),
                GridIndex::new(next_i, j),
                GridIndex::new(next_i, next_j),
            ],
            normal: Vec3::ZERO,
        },
    ]
}

/// Flat normal of the triangle `(v0, v1, v2)`.
///
/// Uses `cross(v0 - v1, v0 - v2)`, which fixes the front-face winding of the
/// whole mesh. Zero-area triangles get a zero normal.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v0 - v1).cross(v0 - v2).normalize_or_zero()
}

/// A `width x height` grid of vertices and the quads connecting them.
///
/// All per-vertex grids are stored row-major; use [`GridIndex::flatten`] to
/// address them directly.
#[derive(Clone, Debug)]
pub struct GridMesh {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) topology: Topology,
    pub(crate) coordinates: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) texture_coordinates: Vec<Vec3>,
    pub(crate) tangents: Vec<Vec4>,
    pub(crate) has_tangents: bool,
    pub(crate) quad_rows: usize,
    pub(crate) quad_cols: usize,
    pub(crate) quads: Vec<Quad>,
}

impl GridMesh {
    /// Allocate a planar mesh with every vertex attribute zeroed and the
    /// quads laid out along the canonical diagonal.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(KnollError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let vertex_count = width * height;
        let quad_rows = height - 1;
        let quad_cols = width - 1;

        let mut quads = Vec::with_capacity(quad_rows * quad_cols);
        for i in 0..quad_rows {
            for j in 0..quad_cols {
                quads.push(canonical_quad(i, j, i + 1, j + 1));
            }
        }

        Ok(Self {
            width,
            height,
            topology: Topology::Planar,
            coordinates: vec![Vec3::ZERO; vertex_count],
            normals: vec![Vec3::ZERO; vertex_count],
            texture_coordinates: vec![Vec3::ZERO; vertex_count],
            tangents: vec![Vec4::ZERO; vertex_count],
            has_tangents: false,
            quad_rows,
            quad_cols,
            quads,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    pub fn quads_count(&self) -> usize {
        self.quad_rows * self.quad_cols
    }

    /// Number of quad rows (`height - 1` planar, `height` toroidal)
    pub fn quad_rows(&self) -> usize {
        self.quad_rows
    }

    /// Number of quad columns (`width - 1` planar, `width` toroidal)
    pub fn quad_cols(&self) -> usize {
        self.quad_cols
    }

    pub fn coordinates(&self) -> &[Vec3] {
        &self.coordinates
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texture_coordinates(&self) -> &[Vec3] {
        &self.texture_coordinates
    }

    pub fn tangents(&self) -> &[Vec4] {
        &self.tangents
    }

    /// Whether the tangent-space pass has filled [`GridMesh::tangents`]
    pub fn has_tangents(&self) -> bool {
        self.has_tangents
    }

    /// All quads, row-major
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn quad(&self, row: usize, col: usize) -> &Quad {
        &self.quads[row * self.quad_cols + col]
    }

    pub fn coordinate(&self, index: GridIndex) -> Vec3 {
        self.coordinates[index.flatten(self.width)]
    }

    pub fn normal(&self, index: GridIndex) -> Vec3 {
        self.normals[index.flatten(self.width)]
    }

    pub fn texture_coordinate(&self, index: GridIndex) -> Vec3 {
        self.texture_coordinates[index.flatten(self.width)]
    }

    pub fn tangent(&self, index: GridIndex) -> Vec4 {
        self.tangents[index.flatten(self.width)]
    }

    /// Iterate every triangle in quad order
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.quads.iter().flat_map(|quad| quad.iter())
    }

    /// Recompute the flat normal of every triangle from current coordinates.
    pub(crate) fn compute_face_normals(&mut self) {
        let width = self.width;
        let coordinates = &self.coordinates;

        for triangle in self.quads.iter_mut().flat_map(|quad| quad.iter_mut()) {
            let [a, b, c] = triangle.indices;
            triangle.normal = face_normal(
                coordinates[a.flatten(width)],
                coordinates[b.flatten(width)],
                coordinates[c.flatten(width)],
            );
        }
    }

    /// Give every vertex the flat normal of one triangle that contains it.
    ///
    /// Vertex `(i, j)` takes triangle 0 of the quad it anchors; vertices on
    /// the last row or column borrow from the neighbouring quad, and the
    /// far corner takes triangle 1 (the only triangle touching it).
    pub(crate) fn assign_flat_vertex_normals(&mut self) {
        if self.quads.is_empty() {
            return;
        }

        for i in 0..self.height {
            for j in 0..self.width {
                let qi = i.min(self.quad_rows - 1);
                let qj = j.min(self.quad_cols - 1);
                let far_corner = i > qi && j > qj;
                let quad = &self.quads[qi * self.quad_cols + qj];
                let triangle = if far_corner { &quad[1] } else { &quad[0] };
                self.normals[i * self.width + j] = triangle.normal;
            }
        }
    }

    /// Switch to toroidal topology: every vertex anchors a quad, and the last
    /// row and column connect back to the first.
    pub(crate) fn close_seams(&mut self) {
        let (width, height) = (self.width, self.height);

        self.quads = (0..height)
            .flat_map(|i| {
                (0..width).map(move |j| canonical_quad(i, j, (i + 1) % height, (j + 1) % width))
            })
            .collect();
        self.quad_rows = height;
        self.quad_cols = width;
        self.topology = Topology::Toroidal;
    }
}
