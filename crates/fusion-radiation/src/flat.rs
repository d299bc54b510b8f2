// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Fixed-Capacity Impurity Tables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flattened `[N_SPECIES, MAX_TABLE_LEN]` layout for foreign interfaces
//! that cannot carry per-species variable-length tables.
//!
//! Row `i` of each 2-D block belongs to `Species::ALL[i]`; only columns
//! `0..table_length[i]` are meaningful and everything past them is zero.

use fusion_types::constants::{MAX_TABLE_LEN, N_SPECIES};
use fusion_types::error::{FusionError, FusionResult};
use ndarray::{s, Array1, Array2, ArrayView1};

use crate::species::{Label, Species};
use crate::store::{ImpurityStore, TableRow};

#[derive(Debug, Clone, PartialEq)]
pub struct FlatImpurityTables {
    /// Entry labels as raw ASCII, blank when unloaded.
    pub labels: [[u8; 2]; N_SPECIES],
    pub atomic_number: [u32; N_SPECIES],
    pub atomic_mass: Array1<f64>,
    /// Relative density, copied from the species catalog.
    pub fraction: Array1<f64>,
    pub table_length: [usize; N_SPECIES],
    pub temperature_kev: Array2<f64>, // [N_SPECIES, MAX_TABLE_LEN]
    pub lz_loss: Array2<f64>,         // [N_SPECIES, MAX_TABLE_LEN]
    pub zav: Array2<f64>,             // [N_SPECIES, MAX_TABLE_LEN]
}

impl FlatImpurityTables {
    /// All-zero buffer with blank labels.
    pub fn zeroed() -> Self {
        FlatImpurityTables {
            labels: [Label::BLANK.as_bytes(); N_SPECIES],
            atomic_number: [0; N_SPECIES],
            atomic_mass: Array1::zeros(N_SPECIES),
            fraction: Array1::zeros(N_SPECIES),
            table_length: [0; N_SPECIES],
            temperature_kev: Array2::zeros((N_SPECIES, MAX_TABLE_LEN)),
            lz_loss: Array2::zeros((N_SPECIES, MAX_TABLE_LEN)),
            zav: Array2::zeros((N_SPECIES, MAX_TABLE_LEN)),
        }
    }

    /// Flatten a store. Fails if any entry is longer than the buffer.
    pub fn from_store(store: &ImpurityStore) -> FusionResult<Self> {
        let mut flat = Self::zeroed();
        for entry in store.entries() {
            let i = entry.species().index();
            let n = entry.table_length();
            if n > MAX_TABLE_LEN {
                return Err(overflow(entry.species(), n));
            }
            flat.labels[i] = entry.label.as_bytes();
            flat.atomic_number[i] = entry.atomic_number;
            flat.atomic_mass[i] = entry.atomic_mass;
            flat.fraction[i] = store.fraction(entry.species());
            flat.table_length[i] = n;
            for (j, row) in entry.rows().iter().enumerate() {
                flat.temperature_kev[[i, j]] = row.temperature_kev;
                flat.lz_loss[[i, j]] = row.lz_loss;
                flat.zav[[i, j]] = row.zav;
            }
        }
        Ok(flat)
    }

    /// Valid temperature column of one species.
    pub fn temperature_row(&self, species: Species) -> ArrayView1<'_, f64> {
        let i = species.index();
        let n = self.table_length[i].min(MAX_TABLE_LEN);
        self.temperature_kev.slice(s![i, ..n])
    }

    /// Valid rows of one species, bounded by `table_length`.
    pub fn rows(&self, species: Species) -> FusionResult<Vec<TableRow>> {
        let i = species.index();
        let n = self.table_length[i];
        if n > MAX_TABLE_LEN {
            return Err(overflow(species, n));
        }
        Ok((0..n)
            .map(|j| TableRow {
                temperature_kev: self.temperature_kev[[i, j]],
                lz_loss: self.lz_loss[[i, j]],
                zav: self.zav[[i, j]],
            })
            .collect())
    }

    /// Write this buffer back into `store`.
    ///
    /// Shapes, lengths, labels and fractions are all checked first; on
    /// error the store is left unchanged. The catalog labels, core
    /// parameters and `too_low` flag are not part of the buffer and are
    /// kept as they are.
    pub fn apply_to(&self, store: &mut ImpurityStore) -> FusionResult<()> {
        self.check_shapes()?;

        let mut staged = Vec::with_capacity(N_SPECIES);
        for species in Species::ALL {
            let i = species.index();
            let label = Label::from_bytes(&self.labels[i]).ok_or_else(|| {
                FusionError::InvalidLabel(String::from_utf8_lossy(&self.labels[i]).into_owned())
            })?;
            let fraction = self.fraction[i];
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(FusionError::PhysicsViolation(format!(
                    "fraction of {species} must be finite and >= 0, got {fraction}"
                )));
            }
            staged.push((species, label, fraction, self.rows(species)?));
        }

        for (species, label, fraction, rows) in staged {
            store.catalog.fractions[species.index()] = fraction;
            let entry = store.entry_mut(species);
            entry.set_rows(rows)?;
            entry.label = label;
            entry.atomic_number = self.atomic_number[species.index()];
            entry.atomic_mass = self.atomic_mass[species.index()];
        }
        Ok(())
    }

    fn check_shapes(&self) -> FusionResult<()> {
        let expected = [N_SPECIES, MAX_TABLE_LEN];
        for (name, block) in [
            ("temperature_kev", &self.temperature_kev),
            ("lz_loss", &self.lz_loss),
            ("zav", &self.zav),
        ] {
            if block.shape() != expected.as_slice() {
                return Err(FusionError::ConfigError(format!(
                    "{name} block has shape {:?}, expected {expected:?}",
                    block.shape()
                )));
            }
        }
        for (name, column) in [("atomic_mass", &self.atomic_mass), ("fraction", &self.fraction)] {
            if column.len() != N_SPECIES {
                return Err(FusionError::ConfigError(format!(
                    "{name} has length {}, expected {N_SPECIES}",
                    column.len()
                )));
            }
        }
        Ok(())
    }
}

fn overflow(species: Species, rows: usize) -> FusionError {
    FusionError::CapacityOverflow {
        species: species.label().to_string(),
        rows,
        capacity: MAX_TABLE_LEN,
    }
}
