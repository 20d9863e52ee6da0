//! CLI command implementations

pub mod build;
pub mod sample;

use std::path::Path;

use anyhow::{Context, Result};
use knoll_terrain::{Heightmap, Terrain, TerrainConfig};

/// Load the heightmap and config, then run the full terrain pipeline.
pub(crate) fn load_terrain(heightmap: &str, config: Option<&str>) -> Result<Terrain> {
    let heightmap = Heightmap::from_png(Path::new(heightmap))?;

    let config = match config {
        Some(path) => {
            log::debug!("Using terrain config '{}'", path);
            TerrainConfig::load(Path::new(path))?
        }
        None => TerrainConfig::default(),
    };

    config
        .build(&heightmap)
        .context("Failed to build terrain")
}
