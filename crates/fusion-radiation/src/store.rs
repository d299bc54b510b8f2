// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Impurity Table Store
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-species Lz / Zav lookup tables for the impurity radiation model.
//!
//! Each species owns an independently sized row vector bounded by
//! `MAX_TABLE_LEN`. Fixed-capacity layout only exists at the interop
//! boundary (see [`crate::flat`]).
//!
//! The store is an explicit context object: build it with
//! [`ImpurityStore::new`] (already reset), hand it to the loader, then
//! share it read-only with the interpolation code.

use std::collections::BTreeSet;

use fusion_types::config::ImpurityConfig;
use fusion_types::constants::{
    DEFAULT_CORE_RADIATION_FRACTION, DEFAULT_CORE_RADIUS, KEV_TO_EV, MAX_TABLE_LEN, N_SPECIES,
    T_FLOOR_KEV,
};
use fusion_types::error::{FusionError, FusionResult};
use tracing::{debug, warn};

use crate::species::{Label, Species};

/// Default relative density per species: H = 1.0, He = 0.1, rest 0.
pub const DEFAULT_FRACTIONS: [f64; N_SPECIES] = [
    1.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// One tabulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    /// Electron temperature [keV]
    pub temperature_kev: f64,
    /// Radiative loss parameter Lz [W·m³]
    pub lz_loss: f64,
    /// Mean ionization state
    pub zav: f64,
}

/// User-configurable species labels and relative densities.
///
/// `fractions` is the only copy of the relative density in the store;
/// table entries look it up through their species index.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCatalog {
    pub labels: [Label; N_SPECIES],
    pub fractions: [f64; N_SPECIES],
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        SpeciesCatalog {
            labels: Species::ALL.map(Species::label),
            fractions: DEFAULT_FRACTIONS,
        }
    }
}

/// Lookup table and identity data for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    species: Species,
    pub label: Label,
    pub atomic_number: u32,
    /// [amu]
    pub atomic_mass: f64,
    rows: Vec<TableRow>,
}

impl TableEntry {
    fn empty(species: Species) -> Self {
        TableEntry {
            species,
            label: Label::BLANK,
            atomic_number: 0,
            atomic_mass: 0.0,
            rows: Vec::new(),
        }
    }

    /// Species this entry belongs to. Fixed at construction.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Number of valid rows; 0 means no data loaded.
    pub fn table_length(&self) -> usize {
        self.rows.len()
    }

    pub fn is_loaded(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn temperature_kev(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.temperature_kev)
    }

    pub fn lz_loss(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.lz_loss)
    }

    pub fn zav(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.zav)
    }

    /// Replace the whole table. More than `MAX_TABLE_LEN` rows is rejected
    /// and the entry is left untouched.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) -> FusionResult<()> {
        if rows.len() > MAX_TABLE_LEN {
            return Err(self.overflow(rows.len()));
        }
        self.rows = rows;
        Ok(())
    }

    /// Append one row. Fails once the table is at capacity.
    pub fn push_row(&mut self, row: TableRow) -> FusionResult<()> {
        if self.rows.len() >= MAX_TABLE_LEN {
            return Err(self.overflow(self.rows.len() + 1));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Copy label, Z and atomic mass from the species catalog.
    pub fn fill_identity(&mut self) {
        self.label = self.species.label();
        self.atomic_number = self.species.atomic_number();
        self.atomic_mass = self.species.atomic_mass();
    }

    /// Back to the unloaded state.
    pub fn clear(&mut self) {
        self.label = Label::BLANK;
        self.atomic_number = 0;
        self.atomic_mass = 0.0;
        self.rows.clear();
    }

    fn overflow(&self, rows: usize) -> FusionError {
        FusionError::CapacityOverflow {
            species: self.species.label().to_string(),
            rows,
            capacity: MAX_TABLE_LEN,
        }
    }
}

/// Outcome of a temperature validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureRange {
    Valid,
    /// Below the 30 eV floor of the coronal data (NaN included).
    BelowFloor,
}

/// Impurity radiation dataset shared by loader and interpolation code.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpurityStore {
    pub catalog: SpeciesCatalog,
    /// Normalized radius bounding the core plasma region.
    pub core_radius: f64,
    /// Fraction of core radiation subtracted from loss power.
    pub core_radiation_fraction: f64,
    /// Latched when any temperature check fell below the floor.
    pub too_low: bool,
    entries: [TableEntry; N_SPECIES],
}

impl Default for ImpurityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpurityStore {
    /// A store in the reset state.
    pub fn new() -> Self {
        ImpurityStore {
            catalog: SpeciesCatalog::default(),
            core_radius: DEFAULT_CORE_RADIUS,
            core_radiation_fraction: DEFAULT_CORE_RADIATION_FRACTION,
            too_low: false,
            entries: Species::ALL.map(TableEntry::empty),
        }
    }

    /// Restore defaults and drop every loaded table. Idempotent.
    pub fn reset(&mut self) {
        self.catalog = SpeciesCatalog::default();
        self.core_radius = DEFAULT_CORE_RADIUS;
        self.core_radiation_fraction = DEFAULT_CORE_RADIATION_FRACTION;
        self.too_low = false;
        for entry in self.entries.iter_mut() {
            entry.clear();
        }
        debug!("impurity table store reset");
    }

    pub fn entry(&self, species: Species) -> &TableEntry {
        &self.entries[species.index()]
    }

    pub fn entry_mut(&mut self, species: Species) -> &mut TableEntry {
        &mut self.entries[species.index()]
    }

    /// All entries in species index order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Relative density n_imp / n_e, read from the catalog.
    pub fn fraction(&self, species: Species) -> f64 {
        self.catalog.fractions[species.index()]
    }

    pub fn set_fraction(&mut self, species: Species, fraction: f64) -> FusionResult<()> {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(FusionError::PhysicsViolation(format!(
                "fraction of {species} must be finite and >= 0, got {fraction}"
            )));
        }
        self.catalog.fractions[species.index()] = fraction;
        Ok(())
    }

    /// Species with a non-empty table, in index order.
    pub fn loaded_species(&self) -> impl Iterator<Item = Species> + '_ {
        self.entries
            .iter()
            .filter(|e| e.is_loaded())
            .map(TableEntry::species)
    }

    /// Write fractions and core parameters from a configuration.
    ///
    /// Every label is resolved before anything is written, so an unknown
    /// label, or two labels naming one species (`"W"` and `"W_"`), leaves
    /// the store unchanged.
    pub fn apply_config(&mut self, config: &ImpurityConfig) -> FusionResult<()> {
        config.validate()?;
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::with_capacity(config.fractions.len());
        for (label, &fraction) in &config.fractions {
            let species = Species::from_label(label)?;
            if !seen.insert(species) {
                return Err(FusionError::ConfigError(format!(
                    "fraction for {species} given more than once (as {label:?})"
                )));
            }
            resolved.push((species, fraction));
        }
        for (species, fraction) in resolved {
            self.catalog.fractions[species.index()] = fraction;
        }
        self.core_radius = config.core_radius;
        self.core_radiation_fraction = config.core_radiation_fraction;
        Ok(())
    }

    /// Classify `t_kev` against the data validity floor. A `BelowFloor`
    /// result also latches `too_low` until the next reset.
    pub fn check_temperature(&mut self, t_kev: f64) -> TemperatureRange {
        if t_kev >= T_FLOOR_KEV {
            return TemperatureRange::Valid;
        }
        if !self.too_low {
            warn!(
                t_ev = t_kev * KEV_TO_EV,
                floor_ev = T_FLOOR_KEV * KEV_TO_EV,
                "temperature below impurity radiation validity floor"
            );
        }
        self.too_low = true;
        TemperatureRange::BelowFloor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_LABELS: [&str; N_SPECIES] = [
        "H_", "He", "Be", "C_", "N_", "O_", "Ne", "Si", "Ar", "Fe", "Ni", "Kr", "Xe", "W_",
    ];

    fn row(t: f64, lz: f64, z: f64) -> TableRow {
        TableRow {
            temperature_kev: t,
            lz_loss: lz,
            zav: z,
        }
    }

    fn carbon_rows() -> Vec<TableRow> {
        vec![
            row(0.03, 1e-34, 2.0),
            row(0.1, 5e-35, 4.0),
            row(1.0, 2e-35, 6.0),
        ]
    }

    fn assert_reset_state(store: &ImpurityStore) {
        for entry in store.entries() {
            assert_eq!(entry.table_length(), 0);
            assert!(entry.rows().is_empty());
            assert_eq!(entry.atomic_number, 0);
            assert_eq!(entry.atomic_mass, 0.0);
            assert!(entry.label.is_blank());
        }
        assert!(!store.too_low);
        assert_eq!(store.core_radius, 0.6);
        assert_eq!(store.core_radiation_fraction, 1.0);
        assert_eq!(
            store.catalog.fractions,
            [1.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
        let labels: Vec<&str> = store.catalog.labels.iter().map(Label::as_str).collect();
        assert_eq!(labels, EXPECTED_LABELS);
    }

    #[test]
    fn test_new_is_reset_state() {
        assert_reset_state(&ImpurityStore::new());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = ImpurityStore::new();
        once.entry_mut(Species::Neon).set_rows(carbon_rows()).unwrap();
        once.reset();
        let mut twice = once.clone();
        twice.reset();
        assert_eq!(once, twice);
        assert_reset_state(&twice);
    }

    #[test]
    fn test_reset_clears_loaded_species() {
        let mut store = ImpurityStore::new();
        let oxygen = store.entry_mut(Species::Oxygen);
        oxygen.fill_identity();
        for i in 0..10 {
            let t = 0.03 * (i + 1) as f64;
            oxygen.push_row(row(t, 1e-33, 1.0 + i as f64)).unwrap();
        }
        assert_eq!(store.entry(Species::Oxygen).table_length(), 10);
        store.too_low = true;
        store.core_radius = 0.3;
        store.core_radiation_fraction = 0.5;
        store.set_fraction(Species::Argon, 1e-3).unwrap();
        store.catalog.labels[0] = Label::new("Xx").unwrap();

        store.reset();
        assert_reset_state(&store);
        assert_eq!(store.entry(Species::Oxygen).species(), Species::Oxygen);
    }

    #[test]
    fn test_carbon_rows_roundtrip_without_contamination() {
        let mut store = ImpurityStore::new();
        store.entry_mut(Species::Carbon).set_rows(carbon_rows()).unwrap();

        let carbon = store.entry(Species::from_index(3).unwrap());
        assert_eq!(carbon.table_length(), 3);
        assert_eq!(carbon.temperature_kev().collect::<Vec<_>>(), [0.03, 0.1, 1.0]);
        assert_eq!(carbon.lz_loss().collect::<Vec<_>>(), [1e-34, 5e-35, 2e-35]);
        assert_eq!(carbon.zav().collect::<Vec<_>>(), [2.0, 4.0, 6.0]);

        let nitrogen = store.entry(Species::from_index(4).unwrap());
        assert_eq!(nitrogen.table_length(), 0);
        assert_eq!(nitrogen.atomic_number, 0);
        assert_eq!(store.loaded_species().collect::<Vec<_>>(), [Species::Carbon]);
    }

    #[test]
    fn test_set_rows_rejects_overflow() {
        let mut store = ImpurityStore::new();
        store.entry_mut(Species::Xenon).set_rows(carbon_rows()).unwrap();
        let too_many = vec![row(1.0, 1e-33, 10.0); MAX_TABLE_LEN + 1];
        let err = store.entry_mut(Species::Xenon).set_rows(too_many).unwrap_err();
        match err {
            FusionError::CapacityOverflow {
                species,
                rows,
                capacity,
            } => {
                assert_eq!(species, "Xe");
                assert_eq!(rows, MAX_TABLE_LEN + 1);
                assert_eq!(capacity, MAX_TABLE_LEN);
            }
            other => panic!("unexpected error: {other}"),
        }
        // previous table survives
        assert_eq!(store.entry(Species::Xenon).rows(), carbon_rows().as_slice());
    }

    #[test]
    fn test_push_row_stops_at_capacity() {
        let mut entry = TableEntry::empty(Species::Tungsten);
        for i in 0..MAX_TABLE_LEN {
            entry.push_row(row(0.03 + i as f64, 1e-32, 40.0)).unwrap();
        }
        assert_eq!(entry.table_length(), MAX_TABLE_LEN);
        assert!(matches!(
            entry.push_row(row(500.0, 1e-32, 74.0)),
            Err(FusionError::CapacityOverflow { rows: 201, .. })
        ));
        assert_eq!(entry.table_length(), MAX_TABLE_LEN);
    }

    #[test]
    fn test_fill_identity() {
        let mut entry = TableEntry::empty(Species::Krypton);
        entry.fill_identity();
        assert_eq!(entry.label.as_str(), "Kr");
        assert_eq!(entry.atomic_number, 36);
        assert!((entry.atomic_mass - 83.798).abs() < 1e-12);
    }

    #[test]
    fn test_fraction_reads_catalog() {
        let mut store = ImpurityStore::new();
        assert_eq!(store.fraction(Species::Hydrogen), 1.0);
        assert_eq!(store.fraction(Species::Helium), 0.1);
        store.set_fraction(Species::Tungsten, 5e-5).unwrap();
        assert_eq!(store.catalog.fractions[13], 5e-5);
        assert!(store.set_fraction(Species::Tungsten, -1.0).is_err());
        assert!(store.set_fraction(Species::Tungsten, f64::NAN).is_err());
        assert_eq!(store.fraction(Species::Tungsten), 5e-5);
    }

    #[test]
    fn test_apply_config() {
        let mut store = ImpurityStore::new();
        let mut cfg = ImpurityConfig {
            core_radius: 0.8,
            core_radiation_fraction: 0.6,
            ..ImpurityConfig::default()
        };
        cfg.fractions.insert("Ne".to_string(), 3e-3);
        cfg.fractions.insert("W".to_string(), 1e-5);
        store.apply_config(&cfg).unwrap();
        assert_eq!(store.fraction(Species::Neon), 3e-3);
        assert_eq!(store.fraction(Species::Tungsten), 1e-5);
        assert_eq!(store.fraction(Species::Helium), 0.1);
        assert_eq!(store.core_radius, 0.8);
        assert_eq!(store.core_radiation_fraction, 0.6);
    }

    #[test]
    fn test_apply_config_unknown_label_is_atomic() {
        let mut store = ImpurityStore::new();
        let mut cfg = ImpurityConfig::default();
        cfg.fractions.insert("Ar".to_string(), 1e-3);
        cfg.fractions.insert("Zz".to_string(), 1e-3);
        assert!(matches!(
            store.apply_config(&cfg),
            Err(FusionError::UnknownSpecies(_))
        ));
        assert_eq!(store, ImpurityStore::new());
    }

    #[test]
    fn test_apply_config_rejects_aliased_labels() {
        let mut store = ImpurityStore::new();
        let mut cfg = ImpurityConfig::default();
        cfg.fractions.insert("W".to_string(), 1e-4);
        cfg.fractions.insert("W_".to_string(), 1e-5);
        match store.apply_config(&cfg) {
            Err(FusionError::ConfigError(msg)) => assert!(msg.contains("W_")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(store.fraction(Species::Tungsten), 0.0);
        assert_eq!(store, ImpurityStore::new());
    }

    #[test]
    fn test_check_temperature_latches_too_low() {
        let mut store = ImpurityStore::new();
        assert_eq!(store.check_temperature(0.03), TemperatureRange::Valid);
        assert_eq!(store.check_temperature(10.0), TemperatureRange::Valid);
        assert!(!store.too_low);

        assert_eq!(store.check_temperature(0.02), TemperatureRange::BelowFloor);
        assert!(store.too_low);
        // a later valid query does not clear the latch
        assert_eq!(store.check_temperature(5.0), TemperatureRange::Valid);
        assert!(store.too_low);
        assert_eq!(store.check_temperature(f64::NAN), TemperatureRange::BelowFloor);

        store.reset();
        assert!(!store.too_low);
    }
}
