//! Property source trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::refrigerant::Refrigerant;
use rc_core::units::{
    Density, Pressure, SpecificEnthalpy, SpecificEntropy, SpecificHeatCapacity, Temperature,
};

/// Saturation properties at one temperature.
///
/// Bubble and dew pressures differ for zeotropic blends and coincide for pure fluids.
#[derive(Clone, Debug, PartialEq)]
pub struct SaturationProps {
    pub temperature: Temperature,
    /// Bubble-point pressure [Pa]
    pub p_bubble: Pressure,
    /// Dew-point pressure [Pa]
    pub p_dew: Pressure,
    /// Saturated-liquid enthalpy [J/kg]
    pub h_liquid: SpecificEnthalpy,
    /// Saturated-vapor enthalpy [J/kg]
    pub h_vapor: SpecificEnthalpy,
    /// Saturated-liquid entropy [J/(kg·K)]
    pub s_liquid: SpecificEntropy,
    /// Saturated-vapor entropy [J/(kg·K)]
    pub s_vapor: SpecificEntropy,
    /// Saturated-vapor specific heat [J/(kg·K)]
    pub cp_vapor: SpecificHeatCapacity,
    pub rho_liquid: Density,
    pub rho_vapor: Option<Density>,
    /// `rho_liquid` is the default value, not a tabulated or computed one.
    pub liquid_density_defaulted: bool,
}

/// Pressure and enthalpy on both saturation branches at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationBoundary {
    pub temperature: Temperature,
    pub p_bubble: Pressure,
    pub p_dew: Pressure,
    pub h_liquid: SpecificEnthalpy,
    pub h_vapor: SpecificEnthalpy,
}

impl From<&SaturationProps> for SaturationBoundary {
    fn from(sat: &SaturationProps) -> Self {
        Self {
            temperature: sat.temperature,
            p_bubble: sat.p_bubble,
            p_dew: sat.p_dew,
            h_liquid: sat.h_liquid,
            h_vapor: sat.h_vapor,
        }
    }
}

/// Single-phase properties at a (T, P) point.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseProps {
    pub h: SpecificEnthalpy,
    pub s: SpecificEntropy,
    pub rho: Option<Density>,
    pub density_defaulted: bool,
}

/// Point reached by an isentropic process, from a (P, s) inversion.
#[derive(Clone, Debug, PartialEq)]
pub struct IsentropicPoint {
    pub h: SpecificEnthalpy,
    pub t: Temperature,
}

/// Temperature range over which a source returns physically valid properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub t_min: Temperature,
    pub t_max: Temperature,
}

impl Envelope {
    pub fn contains(&self, t: Temperature) -> bool {
        t.value >= self.t_min.value && t.value <= self.t_max.value
    }

    /// Fail with `OutOfRange` when `t` is outside the envelope.
    pub fn check(&self, refrigerant: &Refrigerant, t: Temperature) -> FluidResult<()> {
        if self.contains(t) {
            return Ok(());
        }
        Err(FluidError::OutOfRange {
            refrigerant: refrigerant.id().to_string(),
            what: "temperature [K]",
            value: t.value,
            min: self.t_min.value,
            max: self.t_max.value,
        })
    }
}

/// Refrigerant property capability consumed by the cycle solver.
///
/// A source is bound to one refrigerant when it is constructed. Implementations
/// must be thread-safe (Send + Sync) so one snapshot can serve concurrent requests.
/// Queries outside [`PropertySource::envelope`] fail with [`FluidError::OutOfRange`].
pub trait PropertySource: Send + Sync {
    /// Get the source name (for debugging/logging).
    fn name(&self) -> &str;

    /// Refrigerant this source resolves.
    fn refrigerant(&self) -> &Refrigerant;

    /// Valid temperature range.
    fn envelope(&self) -> FluidResult<Envelope>;

    /// Saturation properties at temperature `t`.
    fn saturation_at(&self, t: Temperature) -> FluidResult<SaturationProps>;

    /// Saturation pressures and enthalpies at `t`, without the auxiliary
    /// properties of [`PropertySource::saturation_at`].
    fn saturation_boundary(&self, t: Temperature) -> FluidResult<SaturationBoundary> {
        self.saturation_at(t).map(|sat| SaturationBoundary::from(&sat))
    }

    /// Compressed-liquid properties at (`t`, `p`).
    ///
    /// Default uses the saturated liquid at `t`, which is what a source without a
    /// pressure axis can offer.
    fn subcooled_liquid(&self, t: Temperature, _p: Pressure) -> FluidResult<PhaseProps> {
        let sat = self.saturation_at(t)?;
        Ok(PhaseProps {
            h: sat.h_liquid,
            s: sat.s_liquid,
            rho: Some(sat.rho_liquid),
            density_defaulted: sat.liquid_density_defaulted,
        })
    }

    /// Superheated-vapor properties at (`t`, `p`).
    ///
    /// Default uses the saturated vapor at `t`.
    fn superheated_vapor(&self, t: Temperature, _p: Pressure) -> FluidResult<PhaseProps> {
        let sat = self.saturation_at(t)?;
        Ok(PhaseProps {
            h: sat.h_vapor,
            s: sat.s_vapor,
            rho: sat.rho_vapor,
            density_defaulted: false,
        })
    }

    /// Enthalpy and temperature at pressure `p` and entropy `s`.
    ///
    /// # Returns
    /// * `Some(Ok(point))` - Successfully inverted
    /// * `Some(Err(e))` - Inversion attempted but failed
    /// * `None` - Not supported by this source
    fn isentropic_state(
        &self,
        _p: Pressure,
        _s: SpecificEntropy,
    ) -> Option<FluidResult<IsentropicPoint>> {
        None
    }
}

/// Validation helpers for refrigerant properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: f64) -> FluidResult<f64> {
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(p)
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: f64) -> FluidResult<f64> {
        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(t)
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: f64) -> FluidResult<f64> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(rho)
    }

    /// Ensure specific heat capacity is positive and finite.
    pub fn validate_cp(cp: f64) -> FluidResult<f64> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        Ok(cp)
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<f64> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(h)
    }

    /// Ensure entropy is finite (can be negative).
    pub fn validate_entropy(s: f64) -> FluidResult<f64> {
        if !s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        Ok(s)
    }
}
