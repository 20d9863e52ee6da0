//! Terrain build command

use anyhow::{Context, Result};

use super::load_terrain;

pub struct BuildArgs {
    pub heightmap: String,
    pub config: Option<String>,
    pub output: String,
    pub pretty: bool,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let terrain = load_terrain(&args.heightmap, args.config.as_deref())?;
    let buffers = terrain.vertex_buffers();

    let json = if args.pretty {
        serde_json::to_string_pretty(&buffers)?
    } else {
        serde_json::to_string(&buffers)?
    };
    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write '{}'", args.output))?;

    println!(
        "Terrain: {}x{} grid, {} vertices, {} triangles{}",
        terrain.width(),
        terrain.height(),
        buffers.vertex_count(),
        buffers.triangle_count(),
        if terrain.is_toric() { " (toric)" } else { "" }
    );
    println!(
        "  Tangents: {}",
        if buffers.tangents.is_some() { "yes" } else { "no" }
    );
    println!("  Scale: {}", buffers.scale);
    println!("Wrote {}", args.output);

    Ok(())
}
