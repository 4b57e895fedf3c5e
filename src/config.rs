use std::path::{Path, PathBuf};

use serde::Deserialize;
use strata_blocks::{BlocksConfig, BreakTable};
use strata_geom::Vec3;
use strata_world::{ChunkGenerator, EmptyGenerator, FlatGenerator, TerrainGenerator, WorldConfig};

use crate::collision::Walker;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Chunk meshes rebuilt per tick at most.
    pub rebuild_budget: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { rebuild_budget: 4 }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Empty,
    Flat,
    #[default]
    Terrain,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    /// Ground surface height for `flat`.
    pub ground_height: i32,
    /// Mean surface height and noise amplitude for `terrain`.
    pub base_height: i32,
    pub amplitude: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Terrain,
            ground_height: 8,
            base_height: 20,
            amplitude: 8.0,
        }
    }
}

impl GeneratorConfig {
    pub fn build(&self, seed: i32) -> Box<dyn ChunkGenerator> {
        match self.kind {
            GeneratorKind::Empty => Box::new(EmptyGenerator),
            GeneratorKind::Flat => Box::new(FlatGenerator::new(self.ground_height)),
            GeneratorKind::Terrain => {
                Box::new(TerrainGenerator::new(seed).with_shape(self.base_height, self.amplitude))
            }
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WalkerConfig {
    pub radius: f32,
    pub height: f32,
    pub eye_height: f32,
    pub speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        let w = Walker::new(Vec3::ZERO);
        Self {
            radius: w.radius,
            height: w.height,
            eye_height: w.eye_height,
            speed: w.speed,
            jump_speed: w.jump_speed,
            gravity: w.gravity,
        }
    }
}

impl WalkerConfig {
    pub fn spawn(&self, pos: Vec3) -> Walker {
        Walker {
            radius: self.radius,
            height: self.height,
            eye_height: self.eye_height,
            speed: self.speed,
            jump_speed: self.jump_speed,
            gravity: self.gravity,
            ..Walker::new(pos)
        }
    }
}

/// Engine settings, loadable from TOML. Every field is optional.
///
/// ```toml
/// [world]
/// seed = 42
/// render_distance = 6
///
/// [runtime]
/// rebuild_budget = 8
///
/// [generator]
/// kind = "flat"
/// ground_height = 10
///
/// [blocks.break_hits]
/// glass = 1
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub runtime: RuntimeConfig,
    pub generator: GeneratorConfig,
    pub blocks: BlocksConfig,
    pub walker: WalkerConfig,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.render_distance < 0 {
            return Err(ConfigError::Invalid(format!(
                "world.render_distance must be >= 0, got {}",
                self.world.render_distance
            )));
        }
        if self.world.min_chunk_y > self.world.max_chunk_y {
            return Err(ConfigError::Invalid(format!(
                "world.min_chunk_y ({}) exceeds world.max_chunk_y ({})",
                self.world.min_chunk_y, self.world.max_chunk_y
            )));
        }
        if self.runtime.rebuild_budget == 0 {
            return Err(ConfigError::Invalid(
                "runtime.rebuild_budget must be at least 1".into(),
            ));
        }
        let w = &self.walker;
        if !(w.radius > 0.0 && w.height > 0.0 && w.speed >= 0.0) {
            return Err(ConfigError::Invalid(
                "walker radius and height must be positive".into(),
            ));
        }
        self.break_table()?;
        Ok(())
    }

    /// Break table with the `[blocks]` overrides applied.
    pub fn break_table(&self) -> Result<BreakTable, ConfigError> {
        BreakTable::from_config(&self.blocks).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
