// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Number of impurity species (H through W). Fixed; species are addressed
/// by index `0..N_SPECIES`.
pub const N_SPECIES: usize = 14;

/// Row capacity of one species table at the fixed-capacity interop boundary.
/// A loader must never offer more rows than this.
pub const MAX_TABLE_LEN: usize = 200;

/// Lower validity limit of the coronal Lz/Zav data [keV] (30 eV).
pub const T_FLOOR_KEV: f64 = 0.03;

/// Default normalized radius bounding the core plasma region.
pub const DEFAULT_CORE_RADIUS: f64 = 0.6;

/// Default fraction of core-region radiation subtracted from loss power.
pub const DEFAULT_CORE_RADIATION_FRACTION: f64 = 1.0;

/// keV → eV
pub const KEV_TO_EV: f64 = 1.0e3;
