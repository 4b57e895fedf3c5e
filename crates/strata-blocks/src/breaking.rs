use crate::config::{BlockConfigError, BlocksConfig};
use crate::types::BlockKind;

/// Hits required to break each block kind. `None` entries cannot be broken.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakTable {
    hits: [Option<u32>; BlockKind::COUNT],
}

impl Default for BreakTable {
    fn default() -> Self {
        let mut hits = [None; BlockKind::COUNT];
        for kind in BlockKind::ALL {
            hits[kind as usize] = kind.props().break_hits;
        }
        Self { hits }
    }
}

impl BreakTable {
    /// Default table with the config's overrides applied on top.
    pub fn from_config(cfg: &BlocksConfig) -> Result<Self, BlockConfigError> {
        let mut table = Self::default();
        for (name, &hits) in &cfg.break_hits {
            let kind = BlockKind::from_name(name)
                .ok_or_else(|| BlockConfigError::UnknownBlock(name.clone()))?;
            if hits == 0 {
                return Err(BlockConfigError::ZeroHits(name.clone()));
            }
            table.set(kind, Some(hits));
        }
        for name in &cfg.unbreakable {
            let kind = BlockKind::from_name(name)
                .ok_or_else(|| BlockConfigError::UnknownBlock(name.clone()))?;
            table.set(kind, None);
        }
        log::debug!(
            "break table: {} override(s), {} unbreakable",
            cfg.break_hits.len(),
            cfg.unbreakable.len()
        );
        Ok(table)
    }

    #[inline]
    pub fn required(&self, kind: BlockKind) -> Option<u32> {
        if kind.is_air() {
            return None;
        }
        self.hits[kind as usize]
    }

    /// Air is never breakable; `Some(0)` is stored as unbreakable.
    pub fn set(&mut self, kind: BlockKind, hits: Option<u32>) {
        if kind.is_air() {
            return;
        }
        self.hits[kind as usize] = hits.filter(|&h| h > 0);
    }

    #[inline]
    pub fn is_breakable(&self, kind: BlockKind) -> bool {
        self.required(kind).is_some()
    }
}
