//! Single-stage vapor-compression cycle solver.
//!
//! State numbering:
//! 1. evaporator inlet, after the expansion device
//! 2. compressor inlet
//! 3. compressor outlet
//! 4. condenser outlet

use crate::compression::{CompressionModel, DEFAULT_DERATING, discharge};
use crate::error::{CycleError, SolveResult};
use crate::saturation::{SaturationDome, sample_saturation};
use rc_core::units::{Temperature, k};
use rc_fluids::{FluidError, PropertySource, Refrigerant, ThermodynamicState};
use tracing::{debug, info, warn};

/// Default number of dome samples.
pub const DEFAULT_DOME_SAMPLES: usize = 50;

/// Solver settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub dome_samples: usize,
    /// Carnot COP derating used when the source cannot invert entropy.
    pub energy_balance_derating: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dome_samples: DEFAULT_DOME_SAMPLES,
            energy_balance_derating: DEFAULT_DERATING,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolveResult<()> {
        let d = self.energy_balance_derating;
        if !d.is_finite() || d <= 0.0 {
            return Err(CycleError::InputValidation {
                what: format!("energy-balance derating must be positive, got {}", d),
            });
        }
        Ok(())
    }
}

/// Operating point of the cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleInputs {
    pub evap_temp: Temperature,
    pub cond_temp: Temperature,
    /// Superheat at compressor inlet [K]
    pub superheat: f64,
    /// Subcooling at condenser outlet [K]
    pub subcooling: f64,
}

impl CycleInputs {
    pub fn new(evap_temp: Temperature, cond_temp: Temperature) -> Self {
        Self {
            evap_temp,
            cond_temp,
            superheat: 0.0,
            subcooling: 0.0,
        }
    }

    pub fn with_superheat(mut self, superheat: f64) -> Self {
        self.superheat = superheat;
        self
    }

    pub fn with_subcooling(mut self, subcooling: f64) -> Self {
        self.subcooling = subcooling;
        self
    }

    /// Check the operating point without touching any property source.
    pub fn validate(&self) -> SolveResult<()> {
        let te = self.evap_temp.value;
        let tc = self.cond_temp.value;
        let invalid = |what: String| Err(CycleError::InputValidation { what });

        if !te.is_finite() || te <= 0.0 {
            return invalid(format!("evaporating temperature must be positive, got {} K", te));
        }
        if !tc.is_finite() || tc <= 0.0 {
            return invalid(format!("condensing temperature must be positive, got {} K", tc));
        }
        if tc <= te {
            return invalid(format!(
                "condensing temperature ({} K) must exceed evaporating temperature ({} K)",
                tc, te
            ));
        }
        if !self.superheat.is_finite() || self.superheat < 0.0 {
            return invalid(format!("superheat must be >= 0, got {} K", self.superheat));
        }
        if !self.subcooling.is_finite() || self.subcooling < 0.0 {
            return invalid(format!("subcooling must be >= 0, got {} K", self.subcooling));
        }
        if tc - self.subcooling <= 0.0 {
            return invalid("subcooling exceeds condensing temperature".into());
        }
        Ok(())
    }
}

/// A substitution made while solving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// Condenser-outlet density is the default, not a property value.
    DefaultLiquidDensity,
    /// Source could not invert entropy; the energy-balance model was used.
    EnergyBalanceCompression,
}

impl Fallback {
    pub fn name(&self) -> &'static str {
        match self {
            Fallback::DefaultLiquidDensity => "default_liquid_density",
            Fallback::EnergyBalanceCompression => "energy_balance_compression",
        }
    }
}

/// Solved cycle: four states, COP and saturation dome.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleResult {
    pub refrigerant: Refrigerant,
    pub inputs: CycleInputs,
    states: [ThermodynamicState; 4],
    pub cop: f64,
    pub compression_model: CompressionModel,
    pub fallbacks: Vec<Fallback>,
    pub dome: SaturationDome,
}

impl CycleResult {
    /// State by cycle index, 1 through 4.
    pub fn state(&self, index: usize) -> Option<&ThermodynamicState> {
        index.checked_sub(1).and_then(|i| self.states.get(i))
    }

    pub fn states(&self) -> &[ThermodynamicState; 4] {
        &self.states
    }

    pub fn state1(&self) -> &ThermodynamicState {
        &self.states[0]
    }

    pub fn state2(&self) -> &ThermodynamicState {
        &self.states[1]
    }

    pub fn state3(&self) -> &ThermodynamicState {
        &self.states[2]
    }

    pub fn state4(&self) -> &ThermodynamicState {
        &self.states[3]
    }

    /// h2 - h1 [J/kg]
    pub fn refrigeration_effect(&self) -> f64 {
        self.state2().enthalpy() - self.state1().enthalpy()
    }

    /// h3 - h2 [J/kg]
    pub fn compressor_work(&self) -> f64 {
        self.state3().enthalpy() - self.state2().enthalpy()
    }

    /// h3 - h4 [J/kg]
    pub fn condenser_duty(&self) -> f64 {
        self.state3().enthalpy() - self.state4().enthalpy()
    }

    /// P3 / P2
    pub fn pressure_ratio(&self) -> f64 {
        self.state3().pressure().value / self.state2().pressure().value
    }

    pub fn used(&self, fallback: Fallback) -> bool {
        self.fallbacks.contains(&fallback)
    }
}

/// COP = (h2 - h1) / (h3 - h2), zero when the compressor does no work.
pub fn coefficient_of_performance(h1: f64, h2: f64, h3: f64) -> SolveResult<f64> {
    let work = h3 - h2;
    if work == 0.0 {
        return Ok(0.0);
    }
    let cop = (h2 - h1) / work;
    if !cop.is_finite() {
        return Err(CycleError::NumericDegeneracy {
            what: format!("COP is not finite (h1={}, h2={}, h3={})", h1, h2, h3),
        });
    }
    Ok(cop)
}

/// Solve the four cycle states, COP and saturation dome.
///
/// All-or-nothing: any failure aborts the solve.
pub fn solve_cycle(
    source: &dyn PropertySource,
    inputs: &CycleInputs,
    config: &SolverConfig,
) -> SolveResult<CycleResult> {
    config.validate()?;
    inputs.validate()?;

    let refrigerant = source.refrigerant().clone();
    let te = inputs.evap_temp;
    let tc = inputs.cond_temp;

    let envelope = source.envelope()?;
    envelope.check(&refrigerant, te)?;
    envelope.check(&refrigerant, tc)?;

    let sat_cond = source.saturation_at(tc)?;
    let sat_evap = source.saturation_at(te)?;
    let mut fallbacks = Vec::new();

    // State 4: condenser outlet
    let p4 = sat_cond.p_bubble;
    let (t4, h4, s4, rho4, rho4_defaulted) = if inputs.subcooling == 0.0 {
        (
            tc,
            sat_cond.h_liquid,
            sat_cond.s_liquid,
            sat_cond.rho_liquid,
            sat_cond.liquid_density_defaulted,
        )
    } else {
        let t4 = k(tc.value - inputs.subcooling);
        let liquid = source.subcooled_liquid(t4, p4)?;
        let rho = liquid.rho.ok_or_else(|| {
            CycleError::PropertyLookup(FluidError::MissingColumn {
                refrigerant: refrigerant.id().to_string(),
                column: "liquid_density",
            })
        })?;
        (t4, liquid.h, liquid.s, rho, liquid.density_defaulted)
    };
    if rho4_defaulted {
        warn!(
            refrigerant = refrigerant.id(),
            rho = rho4.value,
            "condenser outlet density defaulted"
        );
        fallbacks.push(Fallback::DefaultLiquidDensity);
    }
    let state4 = ThermodynamicState::new(p4, h4, t4)?
        .with_density(Some(rho4))
        .with_entropy(Some(s4));

    // State 1: isenthalpic expansion to evaporating pressure
    let p1 = sat_evap.p_dew;
    let state1 = ThermodynamicState::new(p1, h4, te)?;

    // State 2: compressor suction
    let (t2, h2, s2, rho2) = if inputs.superheat == 0.0 {
        (te, sat_evap.h_vapor, sat_evap.s_vapor, sat_evap.rho_vapor)
    } else {
        let t2 = k(te.value + inputs.superheat);
        let vapor = source.superheated_vapor(t2, p1)?;
        (t2, vapor.h, vapor.s, vapor.rho)
    };
    let state2 = ThermodynamicState::new(p1, h2, t2)?
        .with_density(rho2)
        .with_entropy(Some(s2));

    // State 3: compressor discharge
    let (d, fell_back) = discharge(
        source,
        te,
        tc,
        (h2, s2),
        h4,
        &sat_cond,
        config.energy_balance_derating,
    )?;
    if fell_back {
        fallbacks.push(Fallback::EnergyBalanceCompression);
    }
    if !d.t.value.is_finite() || d.t.value <= 0.0 {
        return Err(CycleError::NumericDegeneracy {
            what: format!("discharge temperature is {} K", d.t.value),
        });
    }
    let s3 = match d.model {
        CompressionModel::Isentropic => Some(s2),
        CompressionModel::EnergyBalance { .. } => None,
    };
    let state3 = ThermodynamicState::new(p4, d.h, d.t)?.with_entropy(s3);

    debug!(
        p1 = p1.value,
        h1 = h4,
        h2,
        h3 = d.h,
        p4 = p4.value,
        "cycle states"
    );

    let cop = coefficient_of_performance(state1.enthalpy(), h2, d.h)?;
    let dome = sample_saturation(source, te, tc, config.dome_samples)?;

    info!(
        refrigerant = refrigerant.id(),
        source = source.name(),
        model = d.model.name(),
        cop,
        "cycle solved"
    );

    Ok(CycleResult {
        refrigerant,
        inputs: inputs.clone(),
        states: [state1, state2, state3, state4],
        cop,
        compression_model: d.model,
        fallbacks,
        dome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingSource, r454b_source, r454b_source_no_density};

    fn base_inputs() -> CycleInputs {
        CycleInputs::new(k(243.15), k(313.15))
    }

    #[test]
    fn table_cycle_uses_energy_balance() {
        let source = r454b_source();
        let result = solve_cycle(&source, &base_inputs(), &SolverConfig::default()).unwrap();

        assert_eq!(
            result.compression_model,
            CompressionModel::EnergyBalance { derating: 0.75 }
        );
        assert!(result.used(Fallback::EnergyBalanceCompression));
        assert!(!result.used(Fallback::DefaultLiquidDensity));

        // h4 = 261 kJ/kg, h2 = 410 kJ/kg
        assert!((result.state4().enthalpy() - 261e3).abs() < 1e-6);
        assert!((result.state2().enthalpy() - 410e3).abs() < 1e-6);

        // energy balance makes COP equal to the derated Carnot COP
        let cop_real = 0.75 * 243.15 / 70.0;
        assert!((result.cop - cop_real).abs() < 1e-9, "cop = {}", result.cop);
        assert!(result.state3().temperature().value > 313.15);
    }

    #[test]
    fn cycle_invariants_hold() {
        let source = r454b_source();
        let inputs = base_inputs().with_superheat(5.0).with_subcooling(3.0);
        let r = solve_cycle(&source, &inputs, &SolverConfig::default()).unwrap();

        assert_eq!(r.state1().enthalpy(), r.state4().enthalpy());
        assert_eq!(r.state2().pressure(), r.state1().pressure());
        assert_eq!(r.state3().pressure(), r.state4().pressure());
        assert!(r.state1().pressure().value < r.state4().pressure().value);
        assert!((r.state2().temperature().value - 248.15).abs() < 1e-9);
        assert!((r.state4().temperature().value - 310.15).abs() < 1e-9);
    }

    #[test]
    fn subcooling_lowers_condenser_outlet_enthalpy() {
        let source = r454b_source();
        let config = SolverConfig::default();
        let plain = solve_cycle(&source, &base_inputs(), &config).unwrap();
        let sub = solve_cycle(&source, &base_inputs().with_subcooling(10.0), &config).unwrap();

        assert!(sub.state4().enthalpy() < plain.state4().enthalpy());
        // 30 °C row
        assert!((sub.state4().enthalpy() - 245e3).abs() < 1e-6);
        assert!(sub.refrigeration_effect() > plain.refrigeration_effect());
    }

    #[test]
    fn condenser_pressure_is_bubble_and_evaporator_is_dew() {
        let source = r454b_source();
        let r = solve_cycle(&source, &base_inputs(), &SolverConfig::default()).unwrap();
        assert!((r.state4().pressure().value - 23.74e5).abs() < 1e-3);
        assert!((r.state1().pressure().value - 2.61e5).abs() < 1e-3);
    }

    #[test]
    fn missing_density_is_flagged() {
        let source = r454b_source_no_density();
        let r = solve_cycle(&source, &base_inputs(), &SolverConfig::default()).unwrap();
        assert!(r.used(Fallback::DefaultLiquidDensity));
        assert_eq!(r.state4().density().map(|d| d.value), Some(1000.0));
    }

    #[test]
    fn inverted_temperatures_rejected_before_lookup() {
        let source = CountingSource::new(r454b_source());
        let inputs = CycleInputs::new(k(313.15), k(243.15));
        let err = solve_cycle(&source, &inputs, &SolverConfig::default()).unwrap_err();

        assert!(matches!(err, CycleError::InputValidation { .. }));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn equal_temperatures_rejected() {
        let source = CountingSource::new(r454b_source());
        let inputs = CycleInputs::new(k(273.15), k(273.15));
        assert!(matches!(
            solve_cycle(&source, &inputs, &SolverConfig::default()),
            Err(CycleError::InputValidation { .. })
        ));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn negative_superheat_rejected() {
        let source = r454b_source();
        let inputs = base_inputs().with_superheat(-1.0);
        assert!(matches!(
            solve_cycle(&source, &inputs, &SolverConfig::default()),
            Err(CycleError::InputValidation { .. })
        ));
    }

    #[test]
    fn evaporating_below_table_is_range_error() {
        let source = r454b_source();
        let inputs = CycleInputs::new(k(223.15), k(313.15));
        let err = solve_cycle(&source, &inputs, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, CycleError::Range(_)));
    }

    #[test]
    fn superheat_past_table_is_range_error() {
        let source = r454b_source();
        let inputs = CycleInputs::new(k(323.15), k(333.15)).with_superheat(20.0);
        let err = solve_cycle(&source, &inputs, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, CycleError::Range(_)));
    }

    #[test]
    fn bad_derating_rejected() {
        let source = r454b_source();
        let config = SolverConfig {
            energy_balance_derating: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_cycle(&source, &base_inputs(), &config),
            Err(CycleError::InputValidation { .. })
        ));
    }

    #[test]
    fn cop_zero_work_is_zero() {
        let idle = coefficient_of_performance(200e3, 400e3, 400e3).unwrap();
        assert_eq!(idle, 0.0);
        assert!((coefficient_of_performance(200e3, 400e3, 450e3).unwrap() - 4.0).abs() < 1e-12);
        assert!(coefficient_of_performance(f64::NAN, 400e3, 450e3).is_err());
    }

    #[test]
    fn state_indexing_is_one_based() {
        let source = r454b_source();
        let r = solve_cycle(&source, &base_inputs(), &SolverConfig::default()).unwrap();
        assert!(r.state(0).is_none());
        assert_eq!(r.state(1), Some(r.state1()));
        assert_eq!(r.state(4), Some(r.state4()));
        assert!(r.state(5).is_none());
        assert!(r.pressure_ratio() > 1.0);
        let rejected = r.refrigeration_effect() + r.compressor_work();
        assert!((r.condenser_duty() - rejected).abs() < 1e-6);
    }

    #[test]
    fn dome_is_attached() {
        let source = r454b_source();
        let r = solve_cycle(&source, &base_inputs(), &SolverConfig::default()).unwrap();
        assert!(!r.dome.is_empty());
        assert!(r.dome.len() <= DEFAULT_DOME_SAMPLES);
    }
}
