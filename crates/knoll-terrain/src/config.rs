//! Terrain configuration, parsed from TOML

use std::path::Path;

use knoll_core::{KnollError, Result};
use serde::Deserialize;

use crate::builder::{TerrainBuilder, DEFAULT_TEXTURE_TILING};
use crate::classifier::HeightBands;
use crate::heightmap::HeightField;
use crate::terrain::{Terrain, TorusShape};

/// Configuration for terrain generation
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Output grid columns (defaults to the heightmap width)
    pub width: Option<usize>,
    /// Output grid rows (defaults to the heightmap height)
    pub height: Option<usize>,
    /// Positions in `[0, 1]`; required when `torus` is set
    pub normalize_coordinates: bool,
    /// Run normal smoothing and the tangent-space pass
    pub smooth_normals: bool,
    /// Multiplier applied to positions on read
    pub scale: f32,
    /// Grid vertices per texture repeat
    pub texture_tiling: f32,
    /// Wrap the terrain onto this torus after building
    pub torus: Option<TorusShape>,
    /// Texture level classification
    pub classifier: HeightBands,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            normalize_coordinates: true,
            smooth_normals: true,
            scale: 1.0,
            texture_tiling: DEFAULT_TEXTURE_TILING,
            torus: None,
            classifier: HeightBands::default(),
        }
    }
}

impl TerrainConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let with_path = |e: &dyn std::fmt::Display| {
            KnollError::ConfigError(format!("Failed to load '{}': {}", path.display(), e))
        };

        let source = std::fs::read_to_string(path).map_err(|e| with_path(&e))?;
        Self::from_toml_str(&source).map_err(|e| with_path(&e))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(KnollError::InvalidArgument(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if let Some(torus) = self.torus {
            if !self.normalize_coordinates {
                return Err(KnollError::LogicError(
                    "torus requires normalize_coordinates = true".to_string(),
                ));
            }
            if !(torus.radius.is_finite() && torus.radius > 0.0) {
                return Err(KnollError::InvalidArgument(format!(
                    "torus radius must be positive, got {}",
                    torus.radius
                )));
            }
        }
        Ok(())
    }

    /// Builder for `field` with this configuration's options
    pub fn builder(&self, field: &dyn HeightField) -> TerrainBuilder {
        TerrainBuilder::new(
            self.width.unwrap_or(field.width()),
            self.height.unwrap_or(field.height()),
        )
        .normalize_coordinates(self.normalize_coordinates)
        .smooth_normals(self.smooth_normals)
        .texture_tiling(self.texture_tiling)
    }

    /// Run the full pipeline: build, classify, scale, and wrap if configured.
    pub fn build(&self, field: &dyn HeightField) -> Result<Terrain> {
        self.validate()?;

        let mut terrain = self
            .builder(field)
            .build_with(field, |position, normal| {
                self.classifier.classify(position, normal)
            })?;
        terrain.set_scale(self.scale);

        match self.torus {
            Some(torus) => terrain.wrap_toric(torus.radius, torus.thickness),
            None => Ok(terrain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::Heightmap;

    #[test]
    fn empty_document_uses_defaults() {
        let config = TerrainConfig::from_toml_str("").unwrap();
        assert_eq!(config, TerrainConfig::default());
        assert!(config.normalize_coordinates);
        assert_eq!(config.texture_tiling, 15.0);
    }

    #[test]
    fn parses_full_document() {
        let config = TerrainConfig::from_toml_str(
            r#"
            width = 32
            height = 16
            normalize_coordinates = true
            smooth_normals = false
            scale = 4.0
            texture_tiling = 8.0

            [torus]
            radius = 2.0
            thickness = 0.5

            [classifier]
            steep_slope = 0.6
            steep_level = 3.0

            [[classifier.bands]]
            max_height = 0.3
            level = 0.0

            [[classifier.bands]]
            max_height = 1.0
            level = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.width, Some(32));
        assert_eq!(config.height, Some(16));
        assert!(!config.smooth_normals);
        assert_eq!(config.scale, 4.0);
        assert_eq!(
            config.torus,
            Some(TorusShape {
                radius: 2.0,
                thickness: 0.5
            })
        );
        assert_eq!(config.classifier.bands.len(), 2);
        assert_eq!(config.classifier.steep_slope, Some(0.6));
    }

    #[test]
    fn torus_without_normalization_is_a_logic_error() {
        let result = TerrainConfig::from_toml_str(
            r#"
            normalize_coordinates = false
            [torus]
            radius = 2.0
            thickness = 0.5
            "#,
        );
        assert!(matches!(result, Err(KnollError::LogicError(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("knoll-config-does-not-exist.toml");
        match TerrainConfig::load(&path) {
            Err(KnollError::ConfigError(message)) => {
                assert!(message.contains("knoll-config-does-not-exist.toml"));
            }
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_file_reports_path() {
        let path = std::env::temp_dir().join("knoll-config-invalid.toml");
        std::fs::write(&path, "scale = -1.0").unwrap();
        let result = TerrainConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        match result {
            Err(KnollError::ConfigError(message)) => {
                assert!(message.contains("knoll-config-invalid.toml"));
                assert!(message.contains("scale must be positive"));
            }
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_toml_is_reported() {
        let result = TerrainConfig::from_toml_str("scale = ");
        assert!(matches!(result, Err(KnollError::TomlParseError(_))));
    }

    #[test]
    fn build_applies_resolution_scale_and_levels() {
        let hm = Heightmap::from_raw((0..16).map(|k| (k * 16) as f32).collect(), 4, 4).unwrap();
        let config = TerrainConfig::from_toml_str(
            r#"
            width = 3
            height = 3
            scale = 2.0

            [[classifier.bands]]
            max_height = 0.5
            level = 0.0

            [[classifier.bands]]
            max_height = 1.0
            level = 1.0
            "#,
        )
        .unwrap();

        let terrain = config.build(&hm).unwrap();
        assert_eq!(terrain.width(), 3);
        assert_eq!(terrain.scale(), 2.0);
        assert!(!terrain.is_toric());

        for (uv, p) in terrain
            .mesh()
            .texture_coordinates()
            .iter()
            .zip(terrain.mesh().coordinates())
        {
            let expected = if p.z <= 0.5 { 0.0 } else { 1.0 };
            assert_eq!(uv.z, expected);
        }
    }

    #[test]
    fn build_wraps_when_torus_is_configured() {
        let hm = Heightmap::filled(6, 6, 100.0);
        let config = TerrainConfig::from_toml_str(
            r#"
            [torus]
            radius = 2.0
            thickness = 0.5
            "#,
        )
        .unwrap();

        let terrain = config.build(&hm).unwrap();
        assert!(terrain.is_toric());
        assert_eq!(terrain.mesh().quads_count(), 36);
    }
}
