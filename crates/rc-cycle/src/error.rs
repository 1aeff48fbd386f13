//! Error types for cycle solving and capillary sizing.

use crate::capillary::CapillaryCandidate;
use rc_core::CoreError;
use rc_fluids::FluidError;
use thiserror::Error;

/// Errors that abort a cycle solve. No partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    /// Missing, negative or inconsistent operating parameters.
    #[error("Invalid input: {what}")]
    InputValidation { what: String },

    /// Temperature outside the refrigerant's envelope.
    #[error("Out of range: {0}")]
    Range(FluidError),

    /// Unknown refrigerant, missing column, empty table or backend failure.
    #[error("Property lookup failed: {0}")]
    PropertyLookup(FluidError),

    #[error("Numeric degeneracy: {what}")]
    NumericDegeneracy { what: String },
}

pub type SolveResult<T> = Result<T, CycleError>;

impl From<FluidError> for CycleError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::OutOfRange { .. } => CycleError::Range(err),
            other => CycleError::PropertyLookup(other),
        }
    }
}

impl From<CoreError> for CycleError {
    fn from(err: CoreError) -> Self {
        CycleError::NumericDegeneracy {
            what: err.to_string(),
        }
    }
}

/// Errors from the capillary sizing step. These never invalidate the cycle they size.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid input: {what}")]
    InputValidation { what: String },

    #[error("Numeric degeneracy: {what}")]
    NumericDegeneracy { what: String },

    #[error("Sizing infeasible: {what}")]
    SizingInfeasible { what: String },

    /// Every catalog diameter fell outside the plausibility window.
    ///
    /// A kind of infeasibility kept apart from `SizingInfeasible` to carry the
    /// classified candidates; [`SizingError::is_infeasible`] matches both.
    #[error("No plausible length among {} diameters", .candidates.len())]
    NoPlausibleDiameter { candidates: Vec<CapillaryCandidate> },
}

impl SizingError {
    /// True for every error that means no usable tube exists for the operating point.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SizingError::SizingInfeasible { .. } | SizingError::NoPlausibleDiameter { .. }
        )
    }
}

pub type SizingResult<T> = Result<T, SizingError>;
