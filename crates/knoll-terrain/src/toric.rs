//! Wrapping a flat terrain onto a torus

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use knoll_core::{KnollError, Result};

use crate::mesh::GridMesh;
use crate::smoothing::smooth_normals;
use crate::tangents::compute_tangents;
use crate::terrain::{Terrain, TorusShape};

/// How far seam vertices move towards their shared midpoint
const SEAM_BLEND: f32 = 0.99;

/// Produce a toric copy of `flat`.
///
/// Rows map to the poloidal angle and columns to the toroidal angle; the
/// tube radius grows with elevation. The grid is closed in both directions
/// and normals/tangents are rebuilt over the closed mesh.
pub fn wrap(flat: &Terrain, shape: TorusShape) -> Result<Terrain> {
    if flat.is_toric() {
        return Err(KnollError::LogicError(
            "Terrain is already wrapped onto a torus".to_string(),
        ));
    }
    if !flat.has_normalized_coordinates() {
        return Err(KnollError::LogicError(
            "Terrain should have normalized coordinates".to_string(),
        ));
    }
    if flat.width() < 2 || flat.height() < 2 {
        return Err(KnollError::InvalidArgument(format!(
            "toric wrap needs at least a 2x2 grid, got {}x{}",
            flat.width(),
            flat.height()
        )));
    }
    if !(shape.radius.is_finite() && shape.thickness.is_finite()) {
        return Err(KnollError::InvalidArgument(format!(
            "torus radius and thickness must be finite, got {} and {}",
            shape.radius, shape.thickness
        )));
    }

    let mut mesh = flat.mesh().clone();
    project(&mut mesh, shape);
    stitch_seams(&mut mesh.coordinates, mesh.width, mesh.height);

    mesh.close_seams();
    mesh.compute_face_normals();
    smooth_normals(&mut mesh);
    stitch_seams(&mut mesh.normals, mesh.width, mesh.height);
    compute_tangents(&mut mesh)?;

    log::info!(
        "Wrapped {}x{} terrain onto torus (radius {}, thickness {})",
        mesh.width(),
        mesh.height(),
        shape.radius,
        shape.thickness
    );

    Ok(Terrain::wrapped(mesh, flat.scale(), shape))
}

/// Move every vertex onto the torus surface.
fn project(mesh: &mut GridMesh, shape: TorusShape) {
    let (width, height) = (mesh.width, mesh.height);
    let step_v = TAU / (height as f32 - 1.0);
    let step_h = TAU / (width as f32 - 1.0);

    for i in 0..height {
        let phi = step_v * i as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..width {
            let psi = -PI + step_h * j as f32;
            let (sin_psi, cos_psi) = psi.sin_cos();

            let slot = i * width + j;
            let tube = shape.thickness + mesh.coordinates[slot].z * shape.radius / 2.0;
            let ring = shape.radius + tube * cos_phi;

            mesh.coordinates[slot] = Vec3::new(ring * cos_psi, ring * sin_psi, tube * sin_phi);
        }
    }
}

/// Pull the first/last column and first/last row pairs towards each other
/// so the seams close up.
fn stitch_seams(values: &mut [Vec3], width: usize, height: usize) {
    let mut blend = |a: usize, b: usize| {
        let midpoint = (values[a] + values[b]) * 0.5;
        values[a] = values[a].lerp(midpoint, SEAM_BLEND);
        values[b] = values[b].lerp(midpoint, SEAM_BLEND);
    };

    for i in 0..height {
        blend(i * width, i * width + width - 1);
    }
    for j in 0..width {
        blend(j, (height - 1) * width + j);
    }
}
