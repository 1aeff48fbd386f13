//! Compressor discharge models.
//!
//! Sources that can invert (P, s) use the isentropic model. Sources that cannot
//! fall back to an energy balance around a derated Carnot COP.

use crate::error::{CycleError, SolveResult};
use rc_core::ensure_finite;
use rc_core::units::{Pressure, SpecificEnthalpy, SpecificEntropy, Temperature, k};
use rc_fluids::{PropertySource, SaturationProps};
use tracing::{debug, warn};

/// Derating applied to the Carnot COP by the energy-balance model.
pub const DEFAULT_DERATING: f64 = 0.75;

/// How the compressor discharge state was obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompressionModel {
    /// h3 = h(P3, s2)
    Isentropic,
    /// h3 = h2 + (h2 - h4) / (derating * Te / (Tc - Te))
    EnergyBalance { derating: f64 },
}

impl CompressionModel {
    pub fn name(&self) -> &'static str {
        match self {
            CompressionModel::Isentropic => "isentropic",
            CompressionModel::EnergyBalance { .. } => "energy_balance",
        }
    }
}

/// Compressor discharge enthalpy and temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Discharge {
    pub h: SpecificEnthalpy,
    pub t: Temperature,
    pub model: CompressionModel,
}

/// Isentropic discharge at `p3` from suction entropy `s2`.
///
/// `None` when the source has no entropy inversion.
pub fn isentropic_discharge(
    source: &dyn PropertySource,
    p3: Pressure,
    s2: SpecificEntropy,
) -> Option<SolveResult<Discharge>> {
    let point = source.isentropic_state(p3, s2)?;
    Some(point.map_err(CycleError::from).map(|point| {
        debug!(h3 = point.h, t3 = point.t.value, "isentropic discharge");
        Discharge {
            h: point.h,
            t: point.t,
            model: CompressionModel::Isentropic,
        }
    }))
}

/// Energy-balance discharge.
///
/// ```text
/// cop_real = derating * Te / (Tc - Te)
/// h3 = h2 + (h2 - h4) / cop_real
/// T3 = Tc + (h3 - h_vap(Tc)) / cp_vap(Tc)
/// ```
pub fn energy_balance_discharge(
    te: Temperature,
    tc: Temperature,
    h2: SpecificEnthalpy,
    h4: SpecificEnthalpy,
    sat_cond: &SaturationProps,
    derating: f64,
) -> SolveResult<Discharge> {
    let lift = tc.value - te.value;
    if lift <= 0.0 {
        return Err(CycleError::InputValidation {
            what: "condensing temperature must exceed evaporating temperature".into(),
        });
    }
    let cop_real = derating * te.value / lift;
    if !cop_real.is_finite() || cop_real <= 0.0 {
        return Err(CycleError::NumericDegeneracy {
            what: format!("derated Carnot COP is {}", cop_real),
        });
    }

    let h3 = ensure_finite(
        h2 + (h2 - h4) / cop_real,
        "energy-balance discharge enthalpy",
    )?;
    let t3 = ensure_finite(
        tc.value + (h3 - sat_cond.h_vapor) / sat_cond.cp_vapor,
        "energy-balance discharge temperature",
    )?;

    debug!(cop_real, h3, t3, "energy-balance discharge");
    Ok(Discharge {
        h: h3,
        t: k(t3),
        model: CompressionModel::EnergyBalance { derating },
    })
}

/// Pick the discharge model the source supports.
///
/// Returns the discharge and whether the energy-balance fallback was taken.
/// A failed inversion is an error, not a fallback.
pub fn discharge(
    source: &dyn PropertySource,
    te: Temperature,
    tc: Temperature,
    suction: (SpecificEnthalpy, SpecificEntropy),
    h4: SpecificEnthalpy,
    sat_cond: &SaturationProps,
    derating: f64,
) -> SolveResult<(Discharge, bool)> {
    let (h2, s2) = suction;
    match isentropic_discharge(source, sat_cond.p_bubble, s2) {
        Some(result) => Ok((result?, false)),
        None => {
            warn!(
                source = source.name(),
                refrigerant = source.refrigerant().id(),
                derating,
                "entropy inversion unavailable, using energy-balance compression"
            );
            let d = energy_balance_discharge(te, tc, h2, h4, sat_cond, derating)?;
            Ok((d, true))
        }
    }
}
