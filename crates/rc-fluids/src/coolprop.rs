//! CoolProp-backed property source for well-known refrigerants.

use crate::error::{FluidError, FluidResult};
use crate::model::{
    Envelope, IsentropicPoint, PhaseProps, PropertySource, SaturationBoundary, SaturationProps,
    validation,
};
use crate::refrigerant::{LibraryFluid, Refrigerant};
use rc_core::units::{Pressure, SpecificEntropy, Temperature, k, kg_m3, pa};
use rfluids::prelude::*;
use tracing::debug;

/// Reference-library source: real-gas properties from CoolProp (via `rfluids`).
///
/// The valid envelope `[Tmin, Tcrit]` is read once at construction.
///
/// Thread-safe: rfluids Fluid instances are created per query and never shared.
#[derive(Debug, Clone)]
pub struct LibrarySource {
    refrigerant: Refrigerant,
    fluid: LibraryFluid,
    envelope: Envelope,
}

fn backend_err(context: &str, err: impl std::fmt::Display) -> FluidError {
    FluidError::Backend {
        message: format!("rfluids error {}: {}", context, err),
    }
}

impl LibrarySource {
    /// Create a source for `fluid`, reading its temperature envelope from CoolProp.
    pub fn new(fluid: LibraryFluid) -> FluidResult<Self> {
        let mut undefined = Fluid::from(fluid.rfluids_pure());
        let t_min = undefined.min_temperature();
        let t_crit = undefined
            .critical_temperature()
            .map_err(|e| backend_err("getting critical temperature", e))?;
        validation::validate_temperature(t_min)?;
        validation::validate_temperature(t_crit)?;

        debug!(
            refrigerant = fluid.key(),
            t_min_k = t_min,
            t_crit_k = t_crit,
            "library source ready"
        );

        Ok(Self {
            refrigerant: Refrigerant::library(fluid),
            fluid,
            envelope: Envelope {
                t_min: k(t_min),
                t_max: k(t_crit),
            },
        })
    }

    /// Fluid on the saturation line at temperature `t_k` and vapor quality `q` (0 or 1).
    fn saturated(&self, t_k: f64, q: f64) -> FluidResult<Fluid> {
        Fluid::from(self.fluid.rfluids_pure())
            .in_state(FluidInput::temperature(t_k), FluidInput::quality(q))
            .map_err(|e| backend_err(&format!("at T={} K, Q={}", t_k, q), e))
    }

    /// Single-phase fluid at (P, T).
    fn at_pt(&self, p_pa: f64, t_k: f64) -> FluidResult<Fluid> {
        Fluid::from(self.fluid.rfluids_pure())
            .in_state(FluidInput::pressure(p_pa), FluidInput::temperature(t_k))
            .map_err(|e| backend_err(&format!("at P={} Pa, T={} K", p_pa, t_k), e))
    }

    fn phase_props(&self, mut fluid: Fluid) -> FluidResult<PhaseProps> {
        let h = fluid
            .enthalpy()
            .map_err(|e| backend_err("getting enthalpy", e))?;
        let s = fluid
            .entropy()
            .map_err(|e| backend_err("getting entropy", e))?;
        let rho = fluid
            .density()
            .map_err(|e| backend_err("getting density", e))?;

        Ok(PhaseProps {
            h: validation::validate_enthalpy(h)?,
            s: validation::validate_entropy(s)?,
            rho: Some(kg_m3(validation::validate_density(rho)?)),
            density_defaulted: false,
        })
    }

    /// Saturated-vapor cp; falls back to the vapor side just below the dew pressure
    /// when the backend refuses a derivative exactly on the saturation line.
    fn vapor_cp(&self, vapor: &mut Fluid, p_dew: f64, t_k: f64) -> FluidResult<f64> {
        match vapor.specific_heat() {
            Ok(cp) => validation::validate_cp(cp),
            Err(e) => {
                debug!(t_k, error = %e, "cp undefined on dew line, evaluating vapor side");
                let mut superheated = self.at_pt(p_dew * (1.0 - 1.0e-4), t_k)?;
                let cp = superheated
                    .specific_heat()
                    .map_err(|e| backend_err("getting vapor specific heat", e))?;
                validation::validate_cp(cp)
            }
        }
    }
}

impl PropertySource for LibrarySource {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn refrigerant(&self) -> &Refrigerant {
        &self.refrigerant
    }

    fn envelope(&self) -> FluidResult<Envelope> {
        Ok(self.envelope)
    }

    fn saturation_at(&self, t: Temperature) -> FluidResult<SaturationProps> {
        self.envelope.check(&self.refrigerant, t)?;
        let t_k = t.value;

        let mut liquid = self.saturated(t_k, 0.0)?;
        let p_bubble = liquid
            .pressure()
            .map_err(|e| backend_err("getting bubble pressure", e))?;
        let h_liquid = liquid
            .enthalpy()
            .map_err(|e| backend_err("getting liquid enthalpy", e))?;
        let s_liquid = liquid
            .entropy()
            .map_err(|e| backend_err("getting liquid entropy", e))?;
        let rho_liquid = liquid
            .density()
            .map_err(|e| backend_err("getting liquid density", e))?;

        let mut vapor = self.saturated(t_k, 1.0)?;
        let p_dew = vapor
            .pressure()
            .map_err(|e| backend_err("getting dew pressure", e))?;
        let h_vapor = vapor
            .enthalpy()
            .map_err(|e| backend_err("getting vapor enthalpy", e))?;
        let s_vapor = vapor
            .entropy()
            .map_err(|e| backend_err("getting vapor entropy", e))?;
        let rho_vapor = vapor
            .density()
            .map_err(|e| backend_err("getting vapor density", e))?;
        let cp_vapor = self.vapor_cp(&mut vapor, p_dew, t_k)?;

        Ok(SaturationProps {
            temperature: t,
            p_bubble: pa(validation::validate_pressure(p_bubble)?),
            p_dew: pa(validation::validate_pressure(p_dew)?),
            h_liquid: validation::validate_enthalpy(h_liquid)?,
            h_vapor: validation::validate_enthalpy(h_vapor)?,
            s_liquid: validation::validate_entropy(s_liquid)?,
            s_vapor: validation::validate_entropy(s_vapor)?,
            cp_vapor,
            rho_liquid: kg_m3(validation::validate_density(rho_liquid)?),
            rho_vapor: Some(kg_m3(validation::validate_density(rho_vapor)?)),
            liquid_density_defaulted: false,
        })
    }

    fn saturation_boundary(&self, t: Temperature) -> FluidResult<SaturationBoundary> {
        self.envelope.check(&self.refrigerant, t)?;
        let t_k = t.value;

        let mut liquid = self.saturated(t_k, 0.0)?;
        let p_bubble = liquid
            .pressure()
            .map_err(|e| backend_err("getting bubble pressure", e))?;
        let h_liquid = liquid
            .enthalpy()
            .map_err(|e| backend_err("getting liquid enthalpy", e))?;

        let mut vapor = self.saturated(t_k, 1.0)?;
        let p_dew = vapor
            .pressure()
            .map_err(|e| backend_err("getting dew pressure", e))?;
        let h_vapor = vapor
            .enthalpy()
            .map_err(|e| backend_err("getting vapor enthalpy", e))?;

        Ok(SaturationBoundary {
            temperature: t,
            p_bubble: pa(validation::validate_pressure(p_bubble)?),
            p_dew: pa(validation::validate_pressure(p_dew)?),
            h_liquid: validation::validate_enthalpy(h_liquid)?,
            h_vapor: validation::validate_enthalpy(h_vapor)?,
        })
    }

    fn subcooled_liquid(&self, t: Temperature, p: Pressure) -> FluidResult<PhaseProps> {
        self.envelope.check(&self.refrigerant, t)?;
        let p_pa = validation::validate_pressure(p.value)?;
        let fluid = self.at_pt(p_pa, t.value)?;
        self.phase_props(fluid)
    }

    fn superheated_vapor(&self, t: Temperature, p: Pressure) -> FluidResult<PhaseProps> {
        // Superheated vapor may legitimately sit above Tcrit, so only the lower bound applies.
        if t.value < self.envelope.t_min.value {
            return Err(FluidError::OutOfRange {
                refrigerant: self.refrigerant.id().to_string(),
                what: "temperature [K]",
                value: t.value,
                min: self.envelope.t_min.value,
                max: f64::INFINITY,
            });
        }
        let p_pa = validation::validate_pressure(p.value)?;
        let t_k = validation::validate_temperature(t.value)?;
        let fluid = self.at_pt(p_pa, t_k)?;
        self.phase_props(fluid)
    }

    fn isentropic_state(
        &self,
        p: Pressure,
        s: SpecificEntropy,
    ) -> Option<FluidResult<IsentropicPoint>> {
        let solve = || -> FluidResult<IsentropicPoint> {
            let p_pa = validation::validate_pressure(p.value)?;
            let s = validation::validate_entropy(s)?;
            let mut fluid = Fluid::from(self.fluid.rfluids_pure())
                .in_state(FluidInput::pressure(p_pa), FluidInput::entropy(s))
                .map_err(|e| backend_err(&format!("at P={} Pa, s={} J/(kg·K)", p_pa, s), e))?;
            let h = fluid
                .enthalpy()
                .map_err(|e| backend_err("getting discharge enthalpy", e))?;
            let t_k = fluid
                .temperature()
                .map_err(|e| backend_err("getting discharge temperature", e))?;
            Ok(IsentropicPoint {
                h: validation::validate_enthalpy(h)?,
                t: k(validation::validate_temperature(t_k)?),
            })
        };
        Some(solve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name_and_identity() {
        let source = LibrarySource::new(LibraryFluid::R134a).unwrap();
        assert_eq!(source.name(), "CoolProp");
        assert_eq!(source.refrigerant().id(), "R134a");
        assert!(!source.refrigerant().is_table_backed());
    }

    #[test]
    fn envelope_ends_at_critical_point() {
        let source = LibrarySource::new(LibraryFluid::R134a).unwrap();
        let env = source.envelope().unwrap();
        // R134a: Tcrit ≈ 374.21 K
        assert!(
            (env.t_max.value - 374.21).abs() < 0.5,
            "Tcrit = {}",
            env.t_max.value
        );
        assert!(env.t_min.value < 200.0);
    }

    #[test]
    fn above_critical_is_out_of_range() {
        let source = LibrarySource::new(LibraryFluid::R134a).unwrap();
        let err = source.saturation_at(k(400.0)).unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }

    #[test]
    fn supports_entropy_inversion() {
        let source = LibrarySource::new(LibraryFluid::R134a).unwrap();
        let sat = source.saturation_at(k(263.15)).unwrap();
        let point = source
            .isentropic_state(sat.p_dew, sat.s_vapor)
            .expect("library source inverts entropy")
            .unwrap();
        assert!((point.h - sat.h_vapor).abs() < 500.0);
    }
}
