//! Per-vertex normal smoothing over the surrounding quads

use glam::Vec3;

use crate::mesh::{GridMesh, Topology};

/// Quad offsets `(col, row)` relative to the current quad, one row per corner
/// role (NW, NE, SW, SE). For every role, entry 0 is the quad above-left of
/// the vertex and entry 3 the quad below-right of it.
const QUAD_SHIFTS: [[(isize, isize); 4]; 4] = [
    [(-1, -1), (0, -1), (-1, 0), (0, 0)],
    [(0, -1), (1, -1), (0, 0), (1, 0)],
    [(-1, 0), (0, 0), (-1, 1), (0, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
];

/// Resolve a neighbouring quad coordinate, wrapping on toroidal meshes and
/// rejecting out-of-range cells on planar ones.
fn resolve(index: isize, len: usize, topology: Topology) -> Option<usize> {
    match topology {
        Topology::Planar => (index >= 0 && (index as usize) < len).then_some(index as usize),
        Topology::Toroidal => Some(index.rem_euclid(len as isize) as usize),
    }
}

/// Replace every vertex normal with the mean of the flat normals around it.
///
/// Triangle 0 of the above-left quad and triangle 1 of the below-right quad
/// do not touch the vertex and are left out. Zero-area triangles carry no
/// direction and are not counted.
pub fn smooth_normals(mesh: &mut GridMesh) {
    let rows = mesh.quad_rows;
    let cols = mesh.quad_cols;
    if rows == 0 || cols == 0 {
        return;
    }

    let width = mesh.width;
    let topology = mesh.topology;
    let quads = &mesh.quads;
    let normals = &mut mesh.normals;
    let mut visited = vec![false; normals.len()];

    for qi in 0..rows {
        for qj in 0..cols {
            let quad = &quads[qi * cols + qj];
            let corners = [
                quad[0].indices[0],
                quad[0].indices[2],
                quad[0].indices[1],
                quad[1].indices[2],
            ];

            for (role, corner) in corners.iter().enumerate() {
                let slot = corner.flatten(width);
                if visited[slot] {
                    continue;
                }
                visited[slot] = true;

                let mut sum = Vec3::ZERO;
                let mut count = 0u32;
                let mut add = |normal: Vec3| {
                    if normal != Vec3::ZERO {
                        sum += normal;
                        count += 1;
                    }
                };

                for (l, &(shift_col, shift_row)) in QUAD_SHIFTS[role].iter().enumerate() {
                    let Some(row) = resolve(qi as isize + shift_row, rows, topology) else {
                        continue;
                    };
                    let Some(col) = resolve(qj as isize + shift_col, cols, topology) else {
                        continue;
                    };

                    let neighbour = &quads[row * cols + col];
                    if l != 0 {
                        add(neighbour[0].normal);
                    }
                    if l != 3 {
                        add(neighbour[1].normal);
                    }
                }

                normals[slot] = if count > 0 {
                    sum / count as f32
                } else {
                    Vec3::ZERO
                };
            }
        }
    }

    log::debug!(
        "Smoothed {} vertex normals over {} quads",
        visited.iter().filter(|v| **v).count(),
        rows * cols
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::GridIndex;

    /// 3x3 grid whose triangle normals encode their position:
    /// quad (qi, qj), triangle t gets `(4*qi + 2*qj + t + 1, 0, 0)`.
    fn coded_mesh() -> GridMesh {
        let mut mesh = GridMesh::new(3, 3).unwrap();
        for qi in 0..2 {
            for qj in 0..2 {
                for t in 0..2 {
                    let code = (4 * qi + 2 * qj + t + 1) as f32;
                    mesh.quads[qi * 2 + qj][t].normal = Vec3::new(code, 0.0, 0.0);
                }
            }
        }
        mesh
    }

    #[test]
    fn interior_vertex_averages_its_six_triangles() {
        let mut mesh = coded_mesh();
        smooth_normals(&mut mesh);

        // Quad (0,0) keeps only triangle 1, quad (1,1) only triangle 0:
        // codes 2, 3, 4, 5, 6, 7.
        let center = mesh.normal(GridIndex::new(1, 1));
        assert!((center.x - 4.5).abs() < 1e-6);
    }

    #[test]
    fn border_and_corner_vertices_use_incident_triangles() {
        let mut mesh = coded_mesh();
        smooth_normals(&mut mesh);

        // Top-left corner touches only triangle 0 of quad (0,0)
        assert!((mesh.normal(GridIndex::new(0, 0)).x - 1.0).abs() < 1e-6);
        // Bottom-right corner touches only triangle 1 of quad (1,1)
        assert!((mesh.normal(GridIndex::new(2, 2)).x - 8.0).abs() < 1e-6);
        // Top edge (0,1): both triangles of quad (0,0), triangle 0 of (0,1)
        assert!((mesh.normal(GridIndex::new(0, 1)).x - 2.0).abs() < 1e-6);
        // Top-right corner (0,2): both triangles of quad (0,1)
        assert!((mesh.normal(GridIndex::new(0, 2)).x - 3.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_faces_smooth_to_the_same_normal() {
        let mut mesh = GridMesh::new(4, 4).unwrap();
        for triangle in mesh.quads.iter_mut().flat_map(|q| q.iter_mut()) {
            triangle.normal = Vec3::new(0.0, 0.0, -1.0);
        }
        smooth_normals(&mut mesh);

        for normal in mesh.normals() {
            assert_eq!(*normal, Vec3::new(0.0, 0.0, -1.0));
        }
    }

    #[test]
    fn toroidal_mesh_wraps_neighbours() {
        let mut mesh = GridMesh::new(3, 3).unwrap();
        mesh.close_seams();
        for (k, triangle) in mesh
            .quads
            .iter_mut()
            .flat_map(|q| q.iter_mut())
            .enumerate()
        {
            triangle.normal = Vec3::new(k as f32 + 1.0, 0.0, 0.0);
        }
        smooth_normals(&mut mesh);

        // On a torus every vertex sees six triangles; corner (0,0) sees
        // quads (2,2), (2,0), (0,2) and (0,0) through the seams.
        // Quad (r, c) has triangles numbered 2*(3r + c) + {1, 2}.
        let expected = (18.0 + 13.0 + 14.0 + 5.0 + 6.0 + 1.0) / 6.0;
        assert!((mesh.normal(GridIndex::new(0, 0)).x - expected).abs() < 1e-5);
    }

    #[test]
    fn zero_area_triangles_are_not_counted() {
        let mut mesh = GridMesh::new(2, 2).unwrap();
        mesh.quads[0][0].normal = Vec3::new(0.0, 0.0, -1.0);
        mesh.quads[0][1].normal = Vec3::ZERO;
        smooth_normals(&mut mesh);

        // Vertex (0,1) is shared by both triangles; only one has a direction
        assert_eq!(mesh.normal(GridIndex::new(0, 1)), Vec3::new(0.0, 0.0, -1.0));
    }
}
