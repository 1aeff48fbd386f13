//! Capillary correlation constants by refrigerant and capacity band.

use crate::error::{SizingError, SizingResult};
use tracing::warn;

/// Correlation constant used when no entry matches.
pub const DEFAULT_CAPILLARY_CONSTANT: f64 = 1.0e-4;

/// One constant, optionally limited to a capacity band `[min, max)` in watts.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantEntry {
    pub refrigerant: String,
    pub c: f64,
    pub min_capacity_w: Option<f64>,
    pub max_capacity_w: Option<f64>,
}

impl ConstantEntry {
    fn has_band(&self) -> bool {
        self.min_capacity_w.is_some() || self.max_capacity_w.is_some()
    }

    fn band_contains(&self, capacity_w: f64) -> bool {
        self.min_capacity_w.is_none_or(|lo| capacity_w >= lo)
            && self.max_capacity_w.is_none_or(|hi| capacity_w < hi)
    }
}

/// Lookup of the correlation constant for a refrigerant at a rated capacity.
pub trait ConstantSource: Send + Sync {
    fn constant_for(&self, refrigerant: &str, capacity_w: f64) -> Option<f64>;
}

/// Ids compare ignoring case and dashes, so `R-454B` matches `r454b`.
fn same_refrigerant(a: &str, b: &str) -> bool {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect::<String>()
    };
    norm(a) == norm(b)
}

/// In-memory constants table.
#[derive(Clone, Debug, Default)]
pub struct ConstantTable {
    entries: Vec<ConstantEntry>,
}

impl ConstantTable {
    pub fn new(entries: Vec<ConstantEntry>) -> SizingResult<Self> {
        for e in &entries {
            if !e.c.is_finite() || e.c <= 0.0 {
                return Err(SizingError::InputValidation {
                    what: format!(
                        "constant for {} must be positive, got {}",
                        e.refrigerant, e.c
                    ),
                });
            }
            if let (Some(lo), Some(hi)) = (e.min_capacity_w, e.max_capacity_w) {
                if lo >= hi {
                    return Err(SizingError::InputValidation {
                        what: format!(
                            "capacity band for {} is empty ({} W .. {} W)",
                            e.refrigerant, lo, hi
                        ),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ConstantEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConstantSource for ConstantTable {
    fn constant_for(&self, refrigerant: &str, capacity_w: f64) -> Option<f64> {
        let mut general = None;
        for entry in self
            .entries
            .iter()
            .filter(|e| same_refrigerant(&e.refrigerant, refrigerant))
        {
            if entry.has_band() {
                if entry.band_contains(capacity_w) {
                    return Some(entry.c);
                }
            } else if general.is_none() {
                general = Some(entry.c);
            }
        }
        general
    }
}

/// Constant actually used by a sizing run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConstant {
    pub value: f64,
    pub defaulted: bool,
}

/// Look up the constant, falling back to [`DEFAULT_CAPILLARY_CONSTANT`].
pub fn resolve_constant(
    source: &dyn ConstantSource,
    refrigerant: &str,
    capacity_w: f64,
) -> ResolvedConstant {
    match source.constant_for(refrigerant, capacity_w) {
        Some(value) => ResolvedConstant {
            value,
            defaulted: false,
        },
        None => {
            warn!(
                refrigerant,
                capacity_w,
                c = DEFAULT_CAPILLARY_CONSTANT,
                "no capillary constant, using default"
            );
            ResolvedConstant {
                value: DEFAULT_CAPILLARY_CONSTANT,
                defaulted: true,
            }
        }
    }
}
