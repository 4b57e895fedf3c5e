use serde::Deserialize;
use std::collections::HashMap;

/// Block tuning loaded from TOML, keyed by block name.
///
/// ```toml
/// unbreakable = ["brick"]
///
/// [break_hits]
/// glass = 1
/// stone = 10
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BlocksConfig {
    #[serde(default)]
    pub break_hits: HashMap<String, u32>,
    #[serde(default)]
    pub unbreakable: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BlockConfigError {
    #[error("unknown block name `{0}`")]
    UnknownBlock(String),
    #[error("block `{0}` cannot require zero hits")]
    ZeroHits(String),
    #[error("invalid blocks config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BlocksConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, BlockConfigError> {
        Ok(toml::from_str(s)?)
    }
}
