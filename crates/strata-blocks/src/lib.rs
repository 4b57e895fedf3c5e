//! Block kinds, their static properties, and break thresholds.
#![forbid(unsafe_code)]

pub mod breaking;
pub mod config;
pub mod types;

pub use breaking::BreakTable;
pub use config::{BlockConfigError, BlocksConfig};
pub use types::{BlockKind, BlockProps};
