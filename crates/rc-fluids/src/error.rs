//! Refrigerant property errors.

use rc_core::CoreError;
use thiserror::Error;

/// Result type for property lookups.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while resolving refrigerant properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Refrigerant id not known to any property source.
    #[error("Unknown refrigerant: {id}")]
    UnknownRefrigerant { id: String },

    /// A required column is absent from a property table.
    #[error("Property table for {refrigerant} is missing column '{column}'")]
    MissingColumn {
        refrigerant: String,
        column: &'static str,
    },

    /// Property table has no rows.
    #[error("Property table for {refrigerant} is empty")]
    EmptyTable { refrigerant: String },

    /// Table temperatures are not strictly increasing.
    #[error("Property table for {refrigerant} is not strictly increasing at T={temperature_k} K")]
    NonMonotonic {
        refrigerant: String,
        temperature_k: f64,
    },

    /// Query outside the refrigerant's valid envelope.
    #[error("{what} = {value} outside valid range [{min}, {max}] for {refrigerant}")]
    OutOfRange {
        refrigerant: String,
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Operation not supported by this source.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } => FluidError::NonPhysical { what },
            CoreError::InvalidArg { what } => FluidError::NonPhysical { what },
            CoreError::DegenerateInterval { what, .. } => FluidError::NonPhysical { what },
        }
    }
}
