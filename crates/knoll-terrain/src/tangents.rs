//! Tangent-space basis generation
//!
//! Lengyel, Eric. "Computing Tangent Space Basis Vectors for an Arbitrary
//! Mesh". Tangent and bitangent directions are solved per triangle from the
//! position and UV edges, summed per vertex, then orthogonalized against the
//! (already smoothed) vertex normal.

use glam::Vec3;
use knoll_core::{KnollError, Result};

use crate::mesh::GridMesh;

/// Fill `mesh.tangents` with `(tangent.xyz, handedness)` per vertex.
///
/// Fails with [`KnollError::DegenerateUv`] when a triangle's texture
/// coordinates have zero area; the mesh is left untouched in that case.
pub fn compute_tangents(mesh: &mut GridMesh) -> Result<()> {
    let width = mesh.width;
    let mut tangents = vec![Vec3::ZERO; mesh.coordinates.len()];
    let mut bitangents = vec![Vec3::ZERO; mesh.coordinates.len()];

    for triangle in mesh.triangles() {
        let [i1, i2, i3] = triangle.indices.map(|index| index.flatten(width));

        let v1 = mesh.coordinates[i1];
        let v2 = mesh.coordinates[i2];
        let v3 = mesh.coordinates[i3];
        let w1 = mesh.texture_coordinates[i1];
        let w2 = mesh.texture_coordinates[i2];
        let w3 = mesh.texture_coordinates[i3];

        let e1 = v2 - v1;
        let e2 = v3 - v1;

        let s1 = w2.x - w1.x;
        let s2 = w3.x - w1.x;
        let t1 = w2.y - w1.y;
        let t2 = w3.y - w1.y;

        let r = 1.0 / (s1 * t2 - s2 * t1);
        if !r.is_finite() {
            let corner = triangle.indices[0];
            return Err(KnollError::DegenerateUv {
                row: corner.row,
                col: corner.col,
            });
        }

        let s_direction = (e1 * t2 - e2 * t1) * r;
        let t_direction = (e2 * s1 - e1 * s2) * r;

        for slot in [i1, i2, i3] {
            tangents[slot] += s_direction;
            bitangents[slot] += t_direction;
        }
    }

    for (slot, out) in mesh.tangents.iter_mut().enumerate() {
        let normal = mesh.normals[slot];
        let tangent = tangents[slot];

        let orthogonal = (tangent - normal * normal.dot(tangent)).normalize_or_zero();
        let handedness = if normal.cross(tangent).dot(bitangents[slot]) < 0.0 {
            -1.0
        } else {
            1.0
        };
        *out = orthogonal.extend(handedness);
    }
    mesh.has_tangents = true;

    log::debug!(
        "Computed tangent space for {} vertices ({} triangles)",
        mesh.tangents.len(),
        mesh.quads_count() * 2
    );
    Ok(())
}
