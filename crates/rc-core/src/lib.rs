//! rc-core: shared foundation for the refrigeration cycle crates.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, tolerances, interpolation and sweep helpers)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
