//! rc-fluids: refrigerant property resolution.
//!
//! Provides:
//! - Refrigerant identity (library-backed or table-backed)
//! - Catalog of refrigerants the reference library resolves
//! - `PropertySource` trait consumed by the cycle solver
//! - CoolProp backend (via `rfluids`) for library refrigerants
//! - Interpolated saturation tables for custom blends
//!
//! # Example
//!
//! ```no_run
//! use rc_fluids::{LibraryFluid, LibrarySource, PropertySource};
//! use rc_core::units::k;
//!
//! let source = LibrarySource::new(LibraryFluid::R134a).unwrap();
//! let sat = source.saturation_at(k(273.15)).unwrap();
//! println!("Dew pressure: {} Pa", sat.p_dew.value);
//! ```

pub mod catalog;
pub mod coolprop;
pub mod error;
pub mod model;
pub mod refrigerant;
pub mod state;
pub mod table;

pub use catalog::{
    RefrigerantCatalogEntry, filter_library_catalog, find_library_fluid, library_catalog,
};
pub use coolprop::LibrarySource;
pub use error::{FluidError, FluidResult};
pub use model::{
    Envelope, IsentropicPoint, PhaseProps, PropertySource, SaturationBoundary, SaturationProps,
};
pub use refrigerant::{Backing, LibraryFluid, Refrigerant};
pub use state::ThermodynamicState;
pub use table::{DEFAULT_LIQUID_DENSITY, PropertyTable, TableRow, TableSource};
