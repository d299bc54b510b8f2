// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Impurity Table Loader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Text loader for per-species Lz / Zav tables.
//!
//! File format: one row per line, three whitespace-separated columns
//! `Te[keV]  Lz[W m^3]  Zav`. Blank lines and `#` comments are skipped.
//! Temperatures must be non-decreasing. A table longer than
//! `MAX_TABLE_LEN` is rejected, never truncated.

use std::path::{Path, PathBuf};

use fusion_types::config::ImpurityConfig;
use fusion_types::constants::MAX_TABLE_LEN;
use fusion_types::error::{FusionError, FusionResult};
use tracing::{debug, info, warn};

use crate::species::Species;
use crate::store::{ImpurityStore, TableRow};

/// File name of a species table, e.g. `"C__lz_zav.dat"`.
pub fn table_file_name(species: Species) -> String {
    format!("{}_lz_zav.dat", species.label())
}

/// Parse and validate a table without touching any store.
pub fn parse_table(species: Species, text: &str) -> FusionResult<Vec<TableRow>> {
    let mut rows: Vec<TableRow> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        if rows.len() == MAX_TABLE_LEN {
            return Err(FusionError::CapacityOverflow {
                species: species.label().to_string(),
                rows: MAX_TABLE_LEN + 1,
                capacity: MAX_TABLE_LEN,
            });
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(FusionError::TableFormat {
                line,
                message: format!("expected 3 columns, found {}", fields.len()),
            });
        }
        let mut values = [0.0_f64; 3];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse::<f64>().map_err(|e| FusionError::TableFormat {
                line,
                message: format!("{field:?}: {e}"),
            })?;
        }
        let [temperature_kev, lz_loss, zav] = values;

        if values.iter().any(|v| !v.is_finite()) {
            return Err(FusionError::PhysicsViolation(format!(
                "{species} line {line}: non-finite value"
            )));
        }
        if temperature_kev <= 0.0 {
            return Err(FusionError::PhysicsViolation(format!(
                "{species} line {line}: temperature must be > 0, got {temperature_kev}"
            )));
        }
        if lz_loss < 0.0 || zav < 0.0 {
            return Err(FusionError::PhysicsViolation(format!(
                "{species} line {line}: Lz and Zav must be >= 0"
            )));
        }
        if let Some(prev) = rows.last() {
            if temperature_kev < prev.temperature_kev {
                return Err(FusionError::PhysicsViolation(format!(
                    "{species} line {line}: temperature {temperature_kev} keV decreases from {} keV",
                    prev.temperature_kev
                )));
            }
        }

        rows.push(TableRow {
            temperature_kev,
            lz_loss,
            zav,
        });
    }
    Ok(rows)
}

/// Load one species table from `path` into its entry.
///
/// The entry is only modified once the file has parsed cleanly.
/// Returns the number of rows loaded.
pub fn load_species(
    store: &mut ImpurityStore,
    species: Species,
    path: impl AsRef<Path>,
) -> FusionResult<usize> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let rows = parse_table(species, &text)?;
    let n_rows = rows.len();

    let entry = store.entry_mut(species);
    entry.set_rows(rows)?;
    entry.fill_identity();
    debug!(species = %species, rows = n_rows, path = %path.display(), "loaded impurity table");
    Ok(n_rows)
}

/// Load every species whose table file exists in `dir`.
///
/// Missing files leave that species unloaded. Every file is parsed before
/// the store is touched, so a malformed file aborts the load with its
/// error and no entry changed.
pub fn load_directory(
    store: &mut ImpurityStore,
    dir: impl AsRef<Path>,
) -> FusionResult<Vec<Species>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(FusionError::ConfigError(format!(
            "impurity data directory not found: {}",
            dir.display()
        )));
    }

    let mut staged: Vec<(Species, Vec<TableRow>)> = Vec::new();
    for species in Species::ALL {
        let path: PathBuf = dir.join(table_file_name(species));
        if !path.is_file() {
            warn!(species = %species, path = %path.display(), "no impurity table file");
            continue;
        }
        let text = std::fs::read_to_string(&path)?;
        staged.push((species, parse_table(species, &text)?));
    }

    let mut loaded = Vec::with_capacity(staged.len());
    for (species, rows) in staged {
        let n_rows = rows.len();
        let entry = store.entry_mut(species);
        entry.set_rows(rows)?;
        entry.fill_identity();
        debug!(species = %species, rows = n_rows, "loaded impurity table");
        loaded.push(species);
    }
    info!(
        loaded = loaded.len(),
        dir = %dir.display(),
        "impurity radiation tables loaded"
    );
    Ok(loaded)
}

/// Build a store from a configuration: reset state, configured fractions
/// and core parameters, then tables from `data_dir` when set.
pub fn build_store(config: &ImpurityConfig) -> FusionResult<ImpurityStore> {
    let mut store = ImpurityStore::new();
    store.apply_config(config)?;
    if let Some(dir) = &config.data_dir {
        load_directory(&mut store, dir)?;
    }
    Ok(store)
}
