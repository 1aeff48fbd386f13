//! Thermodynamic state of one cycle point.

use crate::error::{FluidError, FluidResult};
use rc_core::units::{Density, Pressure, SpecificEnthalpy, SpecificEntropy, Temperature};

/// Pressure, enthalpy and temperature of a cycle point, with optional density and entropy.
///
/// Immutable once built; the cycle result that produced it owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermodynamicState {
    p: Pressure,
    h: SpecificEnthalpy,
    t: Temperature,
    rho: Option<Density>,
    s: Option<SpecificEntropy>,
}

impl ThermodynamicState {
    /// Create a state from pressure, enthalpy and temperature.
    ///
    /// Validates that pressure and temperature are positive and finite and that
    /// enthalpy is finite.
    pub fn new(p: Pressure, h: SpecificEnthalpy, t: Temperature) -> FluidResult<Self> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(Self {
            p,
            h,
            t,
            rho: None,
            s: None,
        })
    }

    pub fn with_density(mut self, rho: Option<Density>) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_entropy(mut self, s: Option<SpecificEntropy>) -> Self {
        self.s = s;
        self
    }

    /// Get pressure.
    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Get specific enthalpy [J/kg].
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        self.h
    }

    /// Get temperature.
    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn density(&self) -> Option<Density> {
        self.rho
    }

    pub fn entropy(&self) -> Option<SpecificEntropy> {
        self.s
    }
}
