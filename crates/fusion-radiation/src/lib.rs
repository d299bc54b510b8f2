// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Fusion Radiation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Impurity radiation data model.
//!
//! Per-species coronal Lz / Zav tables (H through W) indexed by electron
//! temperature, the loader that fills them, and the fixed-capacity
//! buffer used at foreign-interface boundaries.

pub mod flat;
pub mod loader;
pub mod species;
pub mod store;
