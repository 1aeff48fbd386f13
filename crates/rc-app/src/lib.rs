//! Shared application service layer for the refrigeration cycle tools.
//!
//! Loads configuration and datasets into an immutable [`PropertyRegistry`],
//! then answers refrigerant listing, cycle, dome and capillary requests with
//! serializable reports. Front ends only parse arguments and print.

pub mod config;
pub mod dataset;
pub mod error;
pub mod registry;
pub mod report;
pub mod service;

pub use config::{AppConfig, CorrelationKind, SizingConfig, load_config};
pub use dataset::{load_constants, load_tables, parse_constants, parse_tables};
pub use error::{AppError, AppResult};
pub use registry::{PropertyRegistry, RefrigerantListing, SourceKind};
pub use report::{
    CandidateReport, CapillaryReport, CycleReport, DomeReport, PointReport, RefrigerantReport,
    SizingFailure, SizingReport, WinnerReport,
};
pub use service::{
    CapillaryRequest, CycleRequest, evaluate_cycle, list_refrigerants, sample_dome, size_capillary,
};
