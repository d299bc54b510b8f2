// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CORE_RADIATION_FRACTION, DEFAULT_CORE_RADIUS};
use crate::error::{FusionError, FusionResult};

/// User-facing impurity radiation configuration.
///
/// Every field is optional in JSON; absent fields take the same values
/// the table store is reset to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpurityConfig {
    /// Relative number density (n_imp / n_e) keyed by 2-character species
    /// label, e.g. `"He"` or `"W_"`. Species not listed keep their default.
    #[serde(default)]
    pub fractions: BTreeMap<String, f64>,
    /// Normalized radius bounding the core plasma region (default: 0.6)
    #[serde(default = "default_core_radius")]
    pub core_radius: f64,
    /// Fraction of core radiation subtracted from loss power (default: 1.0)
    #[serde(default = "default_core_radiation_fraction")]
    pub core_radiation_fraction: f64,
    /// Directory holding per-species Lz/Zav table files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_core_radius() -> f64 {
    DEFAULT_CORE_RADIUS
}
fn default_core_radiation_fraction() -> f64 {
    DEFAULT_CORE_RADIATION_FRACTION
}

impl Default for ImpurityConfig {
    fn default() -> Self {
        ImpurityConfig {
            fractions: BTreeMap::new(),
            core_radius: default_core_radius(),
            core_radiation_fraction: default_core_radiation_fraction(),
            data_dir: None,
        }
    }
}

impl ImpurityConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Range checks that do not need the species catalog.
    pub fn validate(&self) -> FusionResult<()> {
        for (label, &fraction) in &self.fractions {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(FusionError::ConfigError(format!(
                    "fraction for {label:?} must be finite and >= 0, got {fraction}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.core_radius) {
            return Err(FusionError::ConfigError(format!(
                "core_radius must lie in [0, 1], got {}",
                self.core_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.core_radiation_fraction) {
            return Err(FusionError::ConfigError(format!(
                "core_radiation_fraction must lie in [0, 1], got {}",
                self.core_radiation_fraction
            )));
        }
        Ok(())
    }
}
