// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Impurity Species
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed catalog of the 14 radiating impurity species.
//!
//! Index order is part of the interop contract with table loaders:
//! `Species::ALL[i].index() == i` and never changes.

use std::fmt;

use fusion_types::constants::N_SPECIES;
use fusion_types::error::{FusionError, FusionResult};

/// Two-character ASCII species label, e.g. `"H_"` or `"Ne"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label([u8; 2]);

impl Label {
    /// Blank label of an unloaded table entry.
    pub const BLANK: Label = Label(*b"  ");

    pub fn new(s: &str) -> FusionResult<Self> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| FusionError::InvalidLabel(s.to_string()))
    }

    /// Accepts exactly two printable ASCII bytes (space included).
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [a, b] if is_label_byte(*a) && is_label_byte(*b) => Some(Label([*a, *b])),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII.
        std::str::from_utf8(&self.0).unwrap_or("  ")
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

fn is_label_byte(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}

impl Default for Label {
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impurity ion species, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Hydrogen,
    Helium,
    Beryllium,
    Carbon,
    Nitrogen,
    Oxygen,
    Neon,
    Silicon,
    Argon,
    Iron,
    Nickel,
    Krypton,
    Xenon,
    Tungsten,
}

/// (label, Z, atomic mass [amu]) per species, in index order.
const SPECIES_DATA: [(&[u8; 2], u32, f64); N_SPECIES] = [
    (b"H_", 1, 1.00794),
    (b"He", 2, 4.002602),
    (b"Be", 4, 9.012182),
    (b"C_", 6, 12.0107),
    (b"N_", 7, 14.0067),
    (b"O_", 8, 15.9994),
    (b"Ne", 10, 20.1797),
    (b"Si", 14, 28.0855),
    (b"Ar", 18, 39.948),
    (b"Fe", 26, 55.845),
    (b"Ni", 28, 58.6934),
    (b"Kr", 36, 83.798),
    (b"Xe", 54, 131.293),
    (b"W_", 74, 183.84),
];

impl Species {
    pub const ALL: [Species; N_SPECIES] = [
        Species::Hydrogen,
        Species::Helium,
        Species::Beryllium,
        Species::Carbon,
        Species::Nitrogen,
        Species::Oxygen,
        Species::Neon,
        Species::Silicon,
        Species::Argon,
        Species::Iron,
        Species::Nickel,
        Species::Krypton,
        Species::Xenon,
        Species::Tungsten,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> FusionResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| FusionError::UnknownSpecies(format!("index {index}")))
    }

    pub fn label(self) -> Label {
        Label(*SPECIES_DATA[self.index()].0)
    }

    /// Nuclear charge Z.
    pub fn atomic_number(self) -> u32 {
        SPECIES_DATA[self.index()].1
    }

    /// Atomic mass [amu].
    pub fn atomic_mass(self) -> f64 {
        SPECIES_DATA[self.index()].2
    }

    /// Resolve a label such as `"C_"`, `"C"`, `"ne"` or `"W"`.
    ///
    /// The padding underscore is optional and matching ignores ASCII case.
    pub fn from_label(label: &str) -> FusionResult<Self> {
        let key = label.trim().trim_end_matches('_');
        Self::ALL
            .iter()
            .copied()
            .find(|s| {
                s.label()
                    .as_str()
                    .trim_end_matches('_')
                    .eq_ignore_ascii_case(key)
            })
            .filter(|_| !key.is_empty())
            .ok_or_else(|| FusionError::UnknownSpecies(label.to_string()))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
