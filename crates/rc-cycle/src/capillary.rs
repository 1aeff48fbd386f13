//! Capillary tube sizing over a catalog of commercial diameters.
//!
//! Mass flow comes from the rated capacity and the evaporator enthalpy rise.
//! Each diameter then gets a length from one empirical correlation:
//!
//! ```text
//! orifice flow:  L     = (m_dot / (C * D^2.5 * sqrt(rho * dP)))^2
//!                m_dot = C * D^2.5 * sqrt(L) * sqrt(rho * dP)
//! linearized:    L     = dP * rho * D^4 * C * correction / m_dot
//! ```
//!
//! All quantities are SI: D and L in m, rho in kg/m³, dP in Pa, m_dot in kg/s.

use crate::capacity::Capacity;
use crate::constants::{ConstantSource, resolve_constant};
use crate::error::{SizingError, SizingResult};
use crate::solver::CycleResult;
use rc_core::units::constants::{PA_PER_BAR, SECONDS_PER_HOUR};
use rc_core::units::{
    Density, Length, MassRate, Power, Pressure, SpecificEnthalpy, kgps, m, pa, to_mm,
};
use tracing::{debug, info};

/// Commercial capillary inner diameters [mm].
pub const COMMERCIAL_DIAMETERS_MM: [f64; 14] = [
    0.70, 0.80, 0.85, 0.90, 1.00, 1.05, 1.10, 1.20, 1.25, 1.30, 1.40, 1.50, 1.60, 1.80,
];

/// Exponent of the length-diameter similarity law.
pub const SIMILARITY_EXPONENT: f64 = 4.6;

pub const DEFAULT_PLAUSIBLE_MAX_M: f64 = 100.0;
pub const DEFAULT_TARGET_LENGTH_M: f64 = 2.0;

/// Smallest evaporator enthalpy rise accepted as a mass-flow divisor [J/kg].
pub const MIN_ENTHALPY_RISE: f64 = 1.0e-6;

/// Catalog diameters as lengths.
pub fn commercial_diameters() -> Vec<Length> {
    COMMERCIAL_DIAMETERS_MM.iter().map(|mm| m(mm * 1.0e-3)).collect()
}

/// Tube length correlation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Correlation {
    /// Inverse-square orifice law.
    #[default]
    OrificeFlow,
    /// Linear D^4 law scaled by an empirical correction factor.
    Linearized { correction: f64 },
}

impl Correlation {
    pub fn name(&self) -> &'static str {
        match self {
            Correlation::OrificeFlow => "orifice_flow",
            Correlation::Linearized { .. } => "linearized",
        }
    }

    /// Whether lengths may be rescaled from one diameter with the similarity law.
    ///
    /// The orifice law already fixes `L ∝ D^-5`.
    pub fn supports_similarity(&self) -> bool {
        matches!(self, Correlation::Linearized { .. })
    }

    /// Tube length [m] for diameter `d` [m].
    pub fn length(&self, c: f64, d: f64, m_dot: f64, rho: f64, dp: f64) -> f64 {
        match self {
            Correlation::OrificeFlow => {
                let ratio = m_dot / (c * d.powf(2.5) * (rho * dp).sqrt());
                ratio * ratio
            }
            Correlation::Linearized { correction } => dp * rho * d.powi(4) * c * correction / m_dot,
        }
    }

    /// Mass flow [kg/s] through a tube of diameter `d` and length `l` [m].
    pub fn mass_flow(&self, c: f64, d: f64, l: f64, rho: f64, dp: f64) -> f64 {
        match self {
            Correlation::OrificeFlow => c * d.powf(2.5) * (rho * dp).sqrt() * l.sqrt(),
            Correlation::Linearized { correction } => dp * rho * d.powi(4) * c * correction / l,
        }
    }
}

/// Plausibility of a candidate length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Validity {
    /// Finite and inside `(0, plausible_max)`.
    Plausible,
    /// Finite but outside the window.
    Implausible,
    NonFinite,
}

impl Validity {
    pub fn name(&self) -> &'static str {
        match self {
            Validity::Plausible => "plausible",
            Validity::Implausible => "implausible",
            Validity::NonFinite => "non_finite",
        }
    }
}

/// One catalog diameter and the length the correlation gives it.
#[derive(Clone, Debug, PartialEq)]
pub struct CapillaryCandidate {
    pub diameter: Length,
    /// `None` only when the computed length is not finite.
    pub length: Option<Length>,
    pub validity: Validity,
}

impl CapillaryCandidate {
    fn classify(diameter: Length, length_m: f64, plausible_max_m: f64) -> Self {
        if !length_m.is_finite() {
            return Self {
                diameter,
                length: None,
                validity: Validity::NonFinite,
            };
        }
        let validity = if length_m > 0.0 && length_m < plausible_max_m {
            Validity::Plausible
        } else {
            Validity::Implausible
        };
        Self {
            diameter,
            length: Some(m(length_m)),
            validity,
        }
    }

    pub fn is_plausible(&self) -> bool {
        self.validity == Validity::Plausible
    }

    pub fn diameter_mm(&self) -> f64 {
        to_mm(self.diameter)
    }
}

/// Sizing settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingOptions {
    pub correlation: Correlation,
    /// Upper bound of the plausibility window [m]
    pub plausible_max_m: f64,
    /// Reference length used to pick a winner [m]
    pub target_length_m: Option<f64>,
    /// Rescale lengths from the winner with the similarity law.
    pub similarity_rescale: bool,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            correlation: Correlation::OrificeFlow,
            plausible_max_m: DEFAULT_PLAUSIBLE_MAX_M,
            target_length_m: Some(DEFAULT_TARGET_LENGTH_M),
            similarity_rescale: false,
        }
    }
}

impl SizingOptions {
    pub fn validate(&self) -> SizingResult<()> {
        let invalid = |what: String| Err(SizingError::InputValidation { what });
        if !self.plausible_max_m.is_finite() || self.plausible_max_m <= 0.0 {
            return invalid(format!(
                "plausible length bound must be positive, got {}",
                self.plausible_max_m
            ));
        }
        if let Some(target) = self.target_length_m {
            if !target.is_finite() || target <= 0.0 {
                return invalid(format!("target length must be positive, got {}", target));
            }
        }
        if let Correlation::Linearized { correction } = self.correlation {
            if !correction.is_finite() || correction <= 0.0 {
                return invalid(format!("correction factor must be positive, got {}", correction));
            }
        }
        Ok(())
    }
}

/// Cycle quantities the sizer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct CapillaryInputs {
    pub refrigerant: String,
    /// Evaporator inlet enthalpy
    pub h1: SpecificEnthalpy,
    /// Compressor suction enthalpy
    pub h2: SpecificEnthalpy,
    /// Evaporating pressure
    pub p1: Pressure,
    /// Condensing pressure
    pub p4: Pressure,
    /// Condenser outlet density
    pub rho4: Option<Density>,
}

impl CapillaryInputs {
    pub fn from_cycle(cycle: &CycleResult) -> Self {
        Self {
            refrigerant: cycle.refrigerant.id().to_string(),
            h1: cycle.state1().enthalpy(),
            h2: cycle.state2().enthalpy(),
            p1: cycle.state1().pressure(),
            p4: cycle.state4().pressure(),
            rho4: cycle.state4().density(),
        }
    }
}

/// Sizing table for every catalog diameter.
#[derive(Clone, Debug, PartialEq)]
pub struct CapillarySizing {
    pub refrigerant: String,
    pub capacity: Power,
    pub mass_flow: MassRate,
    pub delta_p: Pressure,
    pub density: Density,
    pub constant: f64,
    pub constant_defaulted: bool,
    pub correlation: Correlation,
    pub rescaled: bool,
    pub candidates: Vec<CapillaryCandidate>,
    winner: Option<usize>,
}

impl CapillarySizing {
    pub fn winner(&self) -> Option<&CapillaryCandidate> {
        self.winner.and_then(|i| self.candidates.get(i))
    }

    pub fn mass_flow_kg_h(&self) -> f64 {
        self.mass_flow.value * SECONDS_PER_HOUR
    }

    pub fn delta_p_bar(&self) -> f64 {
        self.delta_p.value / PA_PER_BAR
    }

    pub fn plausible(&self) -> impl Iterator<Item = &CapillaryCandidate> {
        self.candidates.iter().filter(|c| c.is_plausible())
    }
}

/// Size a capillary tube for an already solved cycle.
pub fn size_capillary(
    cycle: &CycleResult,
    capacity: &Capacity,
    constants: &dyn ConstantSource,
    options: &SizingOptions,
) -> SizingResult<CapillarySizing> {
    size_capillary_for(
        &CapillaryInputs::from_cycle(cycle),
        capacity,
        constants,
        options,
    )
}

/// Size a capillary tube from the cycle quantities it depends on.
pub fn size_capillary_for(
    inputs: &CapillaryInputs,
    capacity: &Capacity,
    constants: &dyn ConstantSource,
    options: &SizingOptions,
) -> SizingResult<CapillarySizing> {
    options.validate()?;

    let capacity_w = capacity.to_watts();
    let rise = inputs.h2 - inputs.h1;
    if !rise.is_finite() || rise.abs() < MIN_ENTHALPY_RISE {
        return Err(SizingError::NumericDegeneracy {
            what: format!("evaporator enthalpy rise is {} J/kg", rise),
        });
    }
    if rise < 0.0 {
        return Err(SizingError::SizingInfeasible {
            what: format!("evaporator enthalpy rise is negative ({} J/kg)", rise),
        });
    }
    let m_dot = capacity_w.value / rise;

    let dp = inputs.p4.value - inputs.p1.value;
    if !dp.is_finite() || dp <= 0.0 {
        return Err(SizingError::SizingInfeasible {
            what: format!("pressure drop must be positive, got {} Pa", dp),
        });
    }

    let rho = match inputs.rho4 {
        Some(rho) if rho.value.is_finite() && rho.value > 0.0 => rho,
        _ => {
            return Err(SizingError::SizingInfeasible {
                what: "condenser outlet density unavailable".into(),
            });
        }
    };

    let constant = resolve_constant(constants, &inputs.refrigerant, capacity_w.value);
    let correlation = options.correlation;
    debug!(
        m_dot,
        dp,
        rho = rho.value,
        c = constant.value,
        correlation = correlation.name(),
        "capillary sizing inputs"
    );

    let mut candidates: Vec<CapillaryCandidate> = commercial_diameters()
        .into_iter()
        .map(|d| {
            let l = correlation.length(constant.value, d.value, m_dot, rho.value, dp);
            CapillaryCandidate::classify(d, l, options.plausible_max_m)
        })
        .collect();

    if !candidates.iter().any(CapillaryCandidate::is_plausible) {
        return Err(SizingError::NoPlausibleDiameter { candidates });
    }

    let winner = options
        .target_length_m
        .and_then(|target| closest_to(&candidates, target));

    let rescaled = options.similarity_rescale && correlation.supports_similarity();
    if let (true, Some(w)) = (rescaled, winner) {
        rescale_from(&mut candidates, w, options.plausible_max_m);
    }

    let sizing = CapillarySizing {
        refrigerant: inputs.refrigerant.clone(),
        capacity: capacity_w,
        mass_flow: kgps(m_dot),
        delta_p: pa(dp),
        density: rho,
        constant: constant.value,
        constant_defaulted: constant.defaulted,
        correlation,
        rescaled: rescaled && winner.is_some(),
        candidates,
        winner,
    };

    info!(
        refrigerant = %sizing.refrigerant,
        mass_flow_kg_h = sizing.mass_flow_kg_h(),
        plausible = sizing.plausible().count(),
        winner_mm = sizing.winner().map(CapillaryCandidate::diameter_mm),
        "capillary sized"
    );

    Ok(sizing)
}

/// Index of the plausible candidate whose length is closest to `target` [m].
fn closest_to(candidates: &[CapillaryCandidate], target: f64) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_plausible())
        .filter_map(|(i, c)| c.length.map(|l| (i, (l.value - target).abs())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// `L(D) = L(D_w) * (D / D_w)^4.6` for every candidate but the winner.
fn rescale_from(candidates: &mut [CapillaryCandidate], winner: usize, plausible_max_m: f64) {
    let Some((d_w, l_w)) = candidates
        .get(winner)
        .and_then(|c| c.length.map(|l| (c.diameter.value, l.value)))
    else {
        return;
    };
    for (i, candidate) in candidates.iter_mut().enumerate() {
        if i == winner {
            continue;
        }
        let l = l_w * (candidate.diameter.value / d_w).powf(SIMILARITY_EXPONENT);
        *candidate = CapillaryCandidate::classify(candidate.diameter, l, plausible_max_m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::CapacityUnit;
    use crate::constants::{ConstantEntry, ConstantTable, DEFAULT_CAPILLARY_CONSTANT};
    use crate::solver::{CycleInputs, SolverConfig, solve_cycle};
    use crate::test_support::r454b_source;
    use rc_core::units::{k, kg_m3};

    fn constants(c: f64) -> ConstantTable {
        ConstantTable::new(vec![ConstantEntry {
            refrigerant: "R-454B".into(),
            c,
            min_capacity_w: None,
            max_capacity_w: None,
        }])
        .unwrap()
    }

    fn inputs() -> CapillaryInputs {
        CapillaryInputs {
            refrigerant: "R-454B".into(),
            h1: 261e3,
            h2: 410e3,
            p1: pa(2.61e5),
            p4: pa(23.74e5),
            rho4: Some(kg_m3(866.0)),
        }
    }

    fn watts_1000() -> Capacity {
        Capacity::new(1000.0, CapacityUnit::Watt).unwrap()
    }

    fn size_rated(inputs: &CapillaryInputs) -> SizingResult<CapillarySizing> {
        size_capillary_for(
            inputs,
            &watts_1000(),
            &constants(3.5),
            &SizingOptions::default(),
        )
    }

    #[test]
    fn catalog_is_fixed() {
        let d = commercial_diameters();
        assert_eq!(d.len(), 14);
        assert!((d[0].value - 0.7e-3).abs() < 1e-15);
        assert!((d[13].value - 1.8e-3).abs() < 1e-15);
    }

    #[test]
    fn sizes_solved_table_cycle() {
        let source = r454b_source();
        let cycle = solve_cycle(
            &source,
            &CycleInputs::new(k(243.15), k(313.15)),
            &SolverConfig::default(),
        )
        .unwrap();
        let sizing = size_capillary(
            &cycle,
            &watts_1000(),
            &constants(3.5),
            &SizingOptions::default(),
        )
        .unwrap();

        assert!((sizing.mass_flow.value - 1000.0 / 149e3).abs() < 1e-9);
        assert!(!sizing.constant_defaulted);
        assert_eq!(sizing.candidates.len(), 14);

        // 1.00 mm lands near 2 m with this constant
        let winner = sizing.winner().unwrap();
        assert!((winner.diameter_mm() - 1.0).abs() < 1e-9);
        let l = winner.length.unwrap().value;
        assert!(l > 1.5 && l < 2.5, "L = {}", l);
    }

    #[test]
    fn lengths_fall_with_diameter_for_orifice_law() {
        let sizing = size_rated(&inputs()).unwrap();
        let lengths: Vec<f64> = sizing
            .candidates
            .iter()
            .map(|c| c.length.unwrap().value)
            .collect();
        for pair in lengths.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn orifice_round_trip() {
        let sizing = size_rated(&inputs()).unwrap();
        for c in &sizing.candidates {
            let back = Correlation::OrificeFlow.mass_flow(
                sizing.constant,
                c.diameter.value,
                c.length.unwrap().value,
                sizing.density.value,
                sizing.delta_p.value,
            );
            assert!((back - sizing.mass_flow.value).abs() <= 1e-9 * sizing.mass_flow.value);
        }
    }

    #[test]
    fn orifice_mass_flow_recovers_rated_flow() {
        // R-454B-like operating point at the 1 mm winner.
        let law = Correlation::OrificeFlow;
        let (c, d, m_dot, rho, dp) = (3.5, 1.0e-3, 6.711e-3, 866.0, 2.113e6);
        let l = law.length(c, d, m_dot, rho, dp);
        assert!((l - 2.009).abs() < 0.01, "L = {}", l);

        let back = law.mass_flow(c, d, l, rho, dp);
        assert!((back - m_dot).abs() <= 1e-9 * m_dot, "m_dot = {}", back);

        // Longer tube passes more flow under this law.
        assert!(law.mass_flow(c, d, 2.0 * l, rho, dp) > m_dot);
    }

    #[test]
    fn default_constant_is_flagged_and_implausible() {
        let err = size_capillary_for(
            &inputs(),
            &watts_1000(),
            &ConstantTable::empty(),
            &SizingOptions::default(),
        )
        .unwrap_err();
        match err {
            SizingError::NoPlausibleDiameter { candidates } => {
                assert_eq!(candidates.len(), 14);
                assert!(candidates.iter().all(|c| c.validity == Validity::Implausible));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn default_constant_with_linearized_law() {
        let options = SizingOptions {
            correlation: Correlation::Linearized { correction: 1.0 },
            ..SizingOptions::default()
        };
        let sizing = size_capillary_for(
            &inputs(),
            &watts_1000(),
            &ConstantTable::empty(),
            &options,
        )
        .unwrap();
        assert!(sizing.constant_defaulted);
        assert_eq!(sizing.constant, DEFAULT_CAPILLARY_CONSTANT);
        assert_eq!(sizing.correlation.name(), "linearized");
    }

    #[test]
    fn non_positive_pressure_drop_is_infeasible() {
        let mut bad = inputs();
        bad.p4 = bad.p1;
        let err = size_rated(&bad).unwrap_err();
        assert!(matches!(err, SizingError::SizingInfeasible { .. }));
    }

    #[test]
    fn flat_enthalpy_is_degenerate() {
        let mut bad = inputs();
        bad.h2 = bad.h1;
        let err = size_rated(&bad).unwrap_err();
        assert!(matches!(err, SizingError::NumericDegeneracy { .. }));
    }

    #[test]
    fn negative_enthalpy_rise_is_infeasible() {
        let mut bad = inputs();
        bad.h2 = 200e3;
        let err = size_rated(&bad).unwrap_err();
        assert!(matches!(err, SizingError::SizingInfeasible { .. }));
    }

    #[test]
    fn missing_density_is_infeasible() {
        let mut bad = inputs();
        bad.rho4 = None;
        let err = size_rated(&bad).unwrap_err();
        assert!(matches!(err, SizingError::SizingInfeasible { .. }));
    }

    #[test]
    fn no_target_means_no_winner() {
        let options = SizingOptions {
            target_length_m: None,
            ..SizingOptions::default()
        };
        let sizing =
            size_capillary_for(&inputs(), &watts_1000(), &constants(3.5), &options).unwrap();
        assert!(sizing.winner().is_none());
    }

    #[test]
    fn implausible_lengths_are_kept_and_marked() {
        let options = SizingOptions {
            plausible_max_m: 2.0,
            ..SizingOptions::default()
        };
        let sizing =
            size_capillary_for(&inputs(), &watts_1000(), &constants(3.5), &options).unwrap();
        assert_eq!(sizing.candidates.len(), 14);
        assert!(sizing.candidates.iter().any(|c| c.validity == Validity::Implausible));
        assert!(sizing.winner().unwrap().is_plausible());
    }

    #[test]
    fn similarity_rescale_only_for_linearized() {
        let orifice = SizingOptions {
            similarity_rescale: true,
            ..SizingOptions::default()
        };
        let sizing =
            size_capillary_for(&inputs(), &watts_1000(), &constants(3.5), &orifice).unwrap();
        assert!(!sizing.rescaled);

        let linear = SizingOptions {
            correlation: Correlation::Linearized { correction: 1.0 },
            similarity_rescale: true,
            ..SizingOptions::default()
        };
        let sizing =
            size_capillary_for(&inputs(), &watts_1000(), &constants(7.0), &linear).unwrap();
        assert!(sizing.rescaled);

        let w = sizing.winner().unwrap();
        let (d_w, l_w) = (w.diameter.value, w.length.unwrap().value);
        let first = &sizing.candidates[0];
        let expected = l_w * (first.diameter.value / d_w).powf(SIMILARITY_EXPONENT);
        assert!((first.length.unwrap().value - expected).abs() < 1e-12);
    }

    #[test]
    fn bad_options_rejected() {
        let options = SizingOptions {
            correlation: Correlation::Linearized { correction: -1.0 },
            ..SizingOptions::default()
        };
        let err =
            size_capillary_for(&inputs(), &watts_1000(), &constants(3.5), &options).unwrap_err();
        assert!(matches!(err, SizingError::InputValidation { .. }));
    }

    #[test]
    fn report_helpers_convert_units() {
        let sizing = size_rated(&inputs()).unwrap();
        assert!((sizing.delta_p_bar() - 21.13).abs() < 1e-9);
        assert!((sizing.mass_flow_kg_h() - sizing.mass_flow.value * 3600.0).abs() < 1e-12);
    }
}
