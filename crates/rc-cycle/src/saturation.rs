//! Saturation dome sampling for pressure-enthalpy diagrams.

use crate::error::{CycleError, SolveResult};
use rc_core::linspace;
use rc_core::units::{Pressure, SpecificEnthalpy, Temperature, k};
use rc_fluids::PropertySource;
use tracing::debug;

/// Fraction of the operating span added as margin on each side of the window.
const WINDOW_MARGIN: f64 = 0.375;

/// One point on a saturation branch.
#[derive(Clone, Debug, PartialEq)]
pub struct SaturationPoint {
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
}

/// Liquid and vapor saturation branches, temperature-ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaturationDome {
    /// Bubble pressure and saturated-liquid enthalpy
    pub liquid: Vec<SaturationPoint>,
    /// Dew pressure and saturated-vapor enthalpy
    pub vapor: Vec<SaturationPoint>,
}

impl SaturationDome {
    pub fn is_empty(&self) -> bool {
        self.liquid.is_empty() && self.vapor.is_empty()
    }

    pub fn len(&self) -> usize {
        self.liquid.len()
    }
}

/// Sampling window around the operating span `[te, tc]`.
///
/// ```text
/// span  = tc - te
/// start = te - 0.375 * span
/// end   = tc + 0.375 * span
/// ```
pub fn dome_window(te: Temperature, tc: Temperature) -> (Temperature, Temperature) {
    let span = tc.value - te.value;
    (
        k(te.value - WINDOW_MARGIN * span),
        k(tc.value + WINDOW_MARGIN * span),
    )
}

/// Sample `n` evenly spaced temperatures across the dome window.
///
/// Samples outside the source envelope are skipped, so each branch holds at most
/// `n` points and never a clamped one.
pub fn sample_saturation(
    source: &dyn PropertySource,
    te: Temperature,
    tc: Temperature,
    n: usize,
) -> SolveResult<SaturationDome> {
    if !te.value.is_finite() || !tc.value.is_finite() || tc.value <= te.value {
        return Err(CycleError::InputValidation {
            what: format!(
                "dome window needs Te < Tc (Te={} K, Tc={} K)",
                te.value, tc.value
            ),
        });
    }

    let envelope = source.envelope()?;
    let (start, end) = dome_window(te, tc);

    let mut dome = SaturationDome::default();
    let mut skipped = 0usize;
    for t_k in linspace(start.value, end.value, n) {
        let t = k(t_k);
        if !envelope.contains(t) {
            skipped += 1;
            continue;
        }
        let sat = source.saturation_boundary(t)?;
        dome.liquid.push(SaturationPoint {
            temperature: t,
            pressure: sat.p_bubble,
            enthalpy: sat.h_liquid,
        });
        dome.vapor.push(SaturationPoint {
            temperature: t,
            pressure: sat.p_dew,
            enthalpy: sat.h_vapor,
        });
    }

    debug!(
        refrigerant = source.refrigerant().id(),
        requested = n,
        kept = dome.len(),
        skipped,
        "saturation dome sampled"
    );

    Ok(dome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::r454b_source;
    use rc_fluids::{
        Envelope, FluidError, FluidResult, Refrigerant, SaturationBoundary, SaturationProps,
        TableSource,
    };

    /// Answers only the saturation boundary; full saturation queries fail.
    struct BoundaryOnly(TableSource);

    impl PropertySource for BoundaryOnly {
        fn name(&self) -> &str {
            "boundary-only"
        }

        fn refrigerant(&self) -> &Refrigerant {
            self.0.refrigerant()
        }

        fn envelope(&self) -> FluidResult<Envelope> {
            self.0.envelope()
        }

        fn saturation_at(&self, _t: Temperature) -> FluidResult<SaturationProps> {
            Err(FluidError::Backend {
                message: "auxiliary properties unavailable".into(),
            })
        }

        fn saturation_boundary(&self, t: Temperature) -> FluidResult<SaturationBoundary> {
            self.0.saturation_boundary(t)
        }
    }

    #[test]
    fn window_adds_margin_on_both_sides() {
        let (start, end) = dome_window(k(243.15), k(313.15));
        assert!((start.value - 216.9).abs() < 1e-9);
        assert!((end.value - 339.4).abs() < 1e-9);
    }

    #[test]
    fn samples_outside_table_are_skipped() {
        // Table covers 233.15..=333.15 K, window is 216.9..=339.4 K
        let source = r454b_source();
        let dome = sample_saturation(&source, k(243.15), k(313.15), 50).unwrap();

        assert!(dome.len() < 50);
        assert!(!dome.is_empty());
        assert_eq!(dome.liquid.len(), dome.vapor.len());
        for point in dome.liquid.iter().chain(dome.vapor.iter()) {
            assert!(point.temperature.value >= 233.15);
            assert!(point.temperature.value <= 333.15);
        }
    }

    #[test]
    fn branches_are_temperature_ascending() {
        let source = r454b_source();
        let dome = sample_saturation(&source, k(253.15), k(293.15), 50).unwrap();
        // Window 238.15..=308.15 K lies inside the table
        assert_eq!(dome.len(), 50);
        for pair in dome.vapor.windows(2) {
            assert!(pair[0].temperature.value < pair[1].temperature.value);
        }
        let (start, end) = dome_window(k(253.15), k(293.15));
        assert_eq!(dome.liquid[0].temperature, start);
        assert_eq!(dome.liquid[49].temperature, end);
    }

    #[test]
    fn liquid_branch_uses_bubble_pressure() {
        let source = r454b_source();
        let dome = sample_saturation(&source, k(253.15), k(293.15), 3).unwrap();
        for (liq, vap) in dome.liquid.iter().zip(dome.vapor.iter()) {
            assert!(liq.pressure.value >= vap.pressure.value);
            assert!(liq.enthalpy < vap.enthalpy);
        }
    }

    #[test]
    fn zero_and_one_sample() {
        let source = r454b_source();
        let empty = sample_saturation(&source, k(253.15), k(293.15), 0).unwrap();
        assert!(empty.is_empty());

        let single = sample_saturation(&source, k(253.15), k(293.15), 1).unwrap();
        assert_eq!(single.len(), 1);
        let (t_lo, _) = dome_window(k(253.15), k(293.15));
        assert_eq!(single.liquid[0].temperature, t_lo);
    }

    #[test]
    fn dome_needs_only_the_boundary() {
        let full = sample_saturation(&r454b_source(), k(253.15), k(293.15), 20).unwrap();
        let light =
            sample_saturation(&BoundaryOnly(r454b_source()), k(253.15), k(293.15), 20).unwrap();
        assert_eq!(full, light);
    }

    #[test]
    fn inverted_window_rejected() {
        let source = r454b_source();
        let err = sample_saturation(&source, k(293.15), k(253.15), 50).unwrap_err();
        assert!(matches!(err, CycleError::InputValidation { .. }));
    }
}
