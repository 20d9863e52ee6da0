//! Surface query command

use anyhow::Result;
use glam::Vec2;

use super::load_terrain;

pub struct SampleArgs {
    pub heightmap: String,
    pub row: f32,
    pub col: f32,
    pub config: Option<String>,
}

pub fn run(args: SampleArgs) -> Result<()> {
    let terrain = load_terrain(&args.heightmap, args.config.as_deref())?;
    let position = Vec2::new(args.row, args.col);

    let at = terrain.at(position);
    let normal = terrain.normal_at(position);
    let tangent = terrain.tangent_at(position);

    println!("Sample at ({}, {}):", args.row, args.col);
    println!("  position: [{:.5}, {:.5}, {:.5}]", at.x, at.y, at.z);
    println!("  normal:   [{:.5}, {:.5}, {:.5}]", normal.x, normal.y, normal.z);
    println!(
        "  tangent:  [{:.5}, {:.5}, {:.5}, {:+}]",
        tangent.x, tangent.y, tangent.z, tangent.w
    );

    Ok(())
}
