//! rc-cycle: vapor-compression cycle evaluation.
//!
//! Provides:
//! - Four-state cycle solver with isentropic or energy-balance compression
//! - Saturation dome sampling for pressure-enthalpy diagrams
//! - Capillary tube sizing over commercial diameters
//!
//! Every solver takes a `&dyn PropertySource`, so library-backed and
//! table-backed refrigerants share one code path.

pub mod capacity;
pub mod capillary;
pub mod compression;
pub mod constants;
pub mod error;
pub mod saturation;
pub mod solver;

#[cfg(test)]
mod test_support;

pub use capacity::{Capacity, CapacityUnit};
pub use capillary::{
    COMMERCIAL_DIAMETERS_MM, CapillaryCandidate, CapillaryInputs, CapillarySizing, Correlation,
    SizingOptions, Validity, commercial_diameters, size_capillary, size_capillary_for,
};
pub use compression::{CompressionModel, DEFAULT_DERATING};
pub use constants::{
    ConstantEntry, ConstantSource, ConstantTable, DEFAULT_CAPILLARY_CONSTANT, ResolvedConstant,
    resolve_constant,
};
pub use error::{CycleError, SizingError, SizingResult, SolveResult};
pub use saturation::{SaturationDome, SaturationPoint, dome_window, sample_saturation};
pub use solver::{
    CycleInputs, CycleResult, DEFAULT_DOME_SAMPLES, Fallback, SolverConfig,
    coefficient_of_performance, solve_cycle,
};
