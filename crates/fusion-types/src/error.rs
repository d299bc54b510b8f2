// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Table capacity exceeded for {species}: {rows} rows offered, capacity is {capacity}")]
    CapacityOverflow {
        species: String,
        rows: usize,
        capacity: usize,
    },

    #[error("Unknown impurity species: {0}")]
    UnknownSpecies(String),

    #[error("Invalid species label {0:?}: expected exactly 2 ASCII characters")]
    InvalidLabel(String),

    #[error("Malformed table row at line {line}: {message}")]
    TableFormat { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FusionResult<T> = Result<T, FusionError>;
