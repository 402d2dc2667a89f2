use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};
use crate::normalize::Normalization;

/// Entity name carried by the empty-grid marker.
pub const DEFAULT_EMPTY_GRID_LABEL: &str = "THE GRID IS EMPTY - NO DATA";

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Equality policy for scalar fields.
    pub normalization: Normalization,
    /// Entity name of the marker reported when both intermediate grids are empty.
    pub empty_grid_label: String,
    /// When `false`, two empty intermediate grids are not reported at all.
    pub report_empty_grid: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            normalization: Normalization::default(),
            empty_grid_label: DEFAULT_EMPTY_GRID_LABEL.to_string(),
            report_empty_grid: true,
        }
    }
}

impl DiffConfig {
    /// Raw equality everywhere, for audits that must flag formatting changes.
    pub fn strict() -> Self {
        Self {
            normalization: Normalization::strict(),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        toml::from_str(s).map_err(|e| DiffError::Config(e.to_string()))
    }
}
