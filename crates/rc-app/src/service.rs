//! Request handling: cycle evaluation, dome sampling and capillary sizing.

use crate::error::{AppError, AppResult};
use crate::registry::PropertyRegistry;
use crate::report::{
    CapillaryReport, CycleReport, DomeReport, RefrigerantReport, SizingFailure, SizingReport,
};
use rc_core::units::k;
use rc_cycle::{
    Capacity, CapacityUnit, CycleInputs, CycleResult, SizingResult, sample_saturation,
    size_capillary as size_tube, solve_cycle,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Cycle operating point as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleRequest {
    pub refrigerant: String,
    /// Evaporating temperature [K]
    pub evap_temp: f64,
    /// Condensing temperature [K]
    pub cond_temp: f64,
    /// Superheat [K]
    pub superheat: f64,
    /// Subcooling [K]
    pub subcooling: f64,
}

impl Default for CycleRequest {
    fn default() -> Self {
        Self {
            refrigerant: "R134a".to_string(),
            evap_temp: 243.15,
            cond_temp: 313.15,
            superheat: 0.0,
            subcooling: 0.0,
        }
    }
}

impl CycleRequest {
    pub fn inputs(&self) -> CycleInputs {
        CycleInputs::new(k(self.evap_temp), k(self.cond_temp))
            .with_superheat(self.superheat)
            .with_subcooling(self.subcooling)
    }

    fn check_refrigerant(&self) -> AppResult<()> {
        if self.refrigerant.trim().is_empty() {
            return Err(AppError::InvalidInput("refrigerant id is empty".to_string()));
        }
        Ok(())
    }
}

/// Cycle plus rated capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapillaryRequest {
    #[serde(flatten)]
    pub cycle: CycleRequest,
    pub power: f64,
    /// One of `W`, `HP`, `kcal/h`, `Btu/h`
    pub power_unit: String,
}

impl Default for CapillaryRequest {
    fn default() -> Self {
        Self {
            cycle: CycleRequest::default(),
            power: 1000.0,
            power_unit: CapacityUnit::Watt.symbol().to_string(),
        }
    }
}

impl CapillaryRequest {
    pub fn capacity(&self) -> SizingResult<Capacity> {
        let unit: CapacityUnit = self.power_unit.parse()?;
        Capacity::new(self.power, unit)
    }
}

/// Every refrigerant the registry can resolve, optionally narrowed by `query`.
pub fn list_refrigerants(
    registry: &PropertyRegistry,
    query: Option<&str>,
) -> Vec<RefrigerantReport> {
    let listings = match query {
        Some(q) => registry.search_refrigerants(q),
        None => registry.list_refrigerants(),
    };
    listings
        .into_iter()
        .map(|r| RefrigerantReport {
            id: r.id,
            display_name: r.display_name,
            source: r.kind.name().to_string(),
        })
        .collect()
}

fn solve(registry: &PropertyRegistry, request: &CycleRequest) -> AppResult<(CycleResult, String)> {
    request.check_refrigerant()?;
    // Reject bad operating points before resolving, which may start the backend.
    let inputs = request.inputs();
    inputs.validate()?;

    let source = registry.resolve(&request.refrigerant)?;
    let result = solve_cycle(source.as_ref(), &inputs, registry.solver())?;
    Ok((result, source.name().to_string()))
}

/// Solve a cycle and report its states, COP and saturation dome.
pub fn evaluate_cycle(
    registry: &PropertyRegistry,
    request: &CycleRequest,
) -> AppResult<CycleReport> {
    let (result, source) = solve(registry, request)?;
    Ok(CycleReport::from_result(&result, &source))
}

/// Sample the saturation dome around an operating span.
pub fn sample_dome(
    registry: &PropertyRegistry,
    request: &CycleRequest,
    samples: Option<usize>,
) -> AppResult<DomeReport> {
    request.check_refrigerant()?;
    let source = registry.resolve(&request.refrigerant)?;
    let n = samples.unwrap_or(registry.solver().dome_samples);
    let dome = sample_saturation(
        source.as_ref(),
        k(request.evap_temp),
        k(request.cond_temp),
        n,
    )?;
    Ok(DomeReport::from(&dome))
}

/// Solve a cycle, then size a capillary tube for it.
///
/// Cycle failures are errors. Sizing failures are returned inside the report
/// next to the cycle they belong to.
pub fn size_capillary(
    registry: &PropertyRegistry,
    request: &CapillaryRequest,
) -> AppResult<CapillaryReport> {
    let (result, source) = solve(registry, &request.cycle)?;
    let cycle = CycleReport::from_result(&result, &source);

    let options = registry.sizing();
    let sizing = request
        .capacity()
        .and_then(|capacity| size_tube(&result, &capacity, registry.constants(), options));

    let report = match sizing {
        Ok(sizing) => CapillaryReport {
            cycle,
            sizing: Some(SizingReport::from(&sizing)),
            sizing_error: None,
        },
        Err(err) => {
            warn!(
                refrigerant = %request.cycle.refrigerant,
                error = %err,
                "capillary sizing failed"
            );
            CapillaryReport {
                cycle,
                sizing: None,
                sizing_error: Some(SizingFailure::from(&err)),
            }
        }
    };

    info!(
        refrigerant = %report.cycle.refrigerant,
        sized = report.sizing.is_some(),
        "capillary request handled"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::parse_tables;
    use rc_cycle::{ConstantEntry, ConstantTable, CycleError};
    use std::path::Path;

    // R-454B, -40..=60 °C every 20 K
    const TABLE: &str = r#"
R-454B:
  - {temperature_c: -40, bubble_pressure_bar: 1.78, dew_pressure_bar: 1.70, liquid_enthalpy_kj_kg: 136, vapor_enthalpy_kj_kg: 405, liquid_entropy_kj_kg_k: 0.75, vapor_entropy_kj_kg_k: 1.90, vapor_cp_kj_kg_k: 0.95, liquid_density_kg_m3: 1150}
  - {temperature_c: -30, bubble_pressure_bar: 2.73, dew_pressure_bar: 2.61, liquid_enthalpy_kj_kg: 150, vapor_enthalpy_kj_kg: 410, liquid_entropy_kj_kg_k: 0.81, vapor_entropy_kj_kg_k: 1.88, vapor_cp_kj_kg_k: 1.00, liquid_density_kg_m3: 1120}
  - {temperature_c: 0, bubble_pressure_bar: 7.95, dew_pressure_bar: 7.69, liquid_enthalpy_kj_kg: 200, vapor_enthalpy_kj_kg: 422, liquid_entropy_kj_kg_k: 1.0, vapor_entropy_kj_kg_k: 1.83, vapor_cp_kj_kg_k: 1.16, liquid_density_kg_m3: 1025}
  - {temperature_c: 40, bubble_pressure_bar: 23.74, dew_pressure_bar: 23.26, liquid_enthalpy_kj_kg: 261, vapor_enthalpy_kj_kg: 427.5, liquid_entropy_kj_kg_k: 1.20, vapor_entropy_kj_kg_k: 1.77, vapor_cp_kj_kg_k: 1.66, liquid_density_kg_m3: 866}
  - {temperature_c: 60, bubble_pressure_bar: 37.3, dew_pressure_bar: 36.8, liquid_enthalpy_kj_kg: 296, vapor_enthalpy_kj_kg: 420, liquid_entropy_kj_kg_k: 1.31, vapor_entropy_kj_kg_k: 1.72, vapor_cp_kj_kg_k: 2.45, liquid_density_kg_m3: 755}
"#;

    fn registry(constants: ConstantTable) -> PropertyRegistry {
        let tables = parse_tables(Path::new("t.yaml"), TABLE).unwrap();
        PropertyRegistry::new(&AppConfig::default(), tables, constants)
    }

    fn r454b_request() -> CycleRequest {
        CycleRequest {
            refrigerant: "R-454B".to_string(),
            ..CycleRequest::default()
        }
    }

    #[test]
    fn request_defaults() {
        let req: CapillaryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.cycle.refrigerant, "R134a");
        assert_eq!(req.cycle.evap_temp, 243.15);
        assert_eq!(req.cycle.cond_temp, 313.15);
        assert_eq!(req.power, 1000.0);
        assert_eq!(req.power_unit, "W");
    }

    #[test]
    fn flattened_request_fields() {
        let json = r#"{"refrigerant": "R-454B", "superheat": 5, "power": 1, "power_unit": "HP"}"#;
        let req: CapillaryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cycle.refrigerant, "R-454B");
        assert_eq!(req.cycle.superheat, 5.0);
        assert!((req.capacity().unwrap().to_watts().value - 745.7).abs() < 1e-9);
    }

    #[test]
    fn table_cycle_report() {
        let report = evaluate_cycle(&registry(ConstantTable::empty()), &r454b_request()).unwrap();
        assert_eq!(report.refrigerant, "R-454B");
        assert_eq!(report.source, "table");
        assert_eq!(report.compression_model, "energy_balance");
        assert_eq!(
            report.fallbacks,
            vec!["energy_balance_compression".to_string()]
        );
        assert_eq!(report.points.len(), 4);
        let points = &report.points;
        assert_eq!(points["1"].enthalpy_j_kg, points["4"].enthalpy_j_kg);
        assert_eq!(points["2"].pressure_pa, points["1"].pressure_pa);
        assert!(!report.saturation.liquid.is_empty());
        assert!(report.cop > 0.0);
    }

    #[test]
    fn report_serializes_with_point_keys() {
        let report = evaluate_cycle(&registry(ConstantTable::empty()), &r454b_request()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["points"]["3"]["temperature_k"].is_number());
        assert!(json["points"]["1"].get("density_kg_m3").is_none());
        assert!(json["saturation"]["vapor"].is_array());
    }

    #[test]
    fn unknown_refrigerant_is_lookup_error() {
        let req = CycleRequest {
            refrigerant: "R-417A".to_string(),
            ..CycleRequest::default()
        };
        let err = evaluate_cycle(&registry(ConstantTable::empty()), &req).unwrap_err();
        assert!(matches!(err, AppError::Fluid(_)));
    }

    #[test]
    fn invalid_inputs_fail_before_resolution() {
        let req = CycleRequest {
            refrigerant: "NOT-A-FLUID".to_string(),
            evap_temp: 300.0,
            cond_temp: 280.0,
            ..CycleRequest::default()
        };
        let err = evaluate_cycle(&registry(ConstantTable::empty()), &req).unwrap_err();
        assert!(matches!(
            err,
            AppError::Cycle(CycleError::InputValidation { .. })
        ));
    }

    #[test]
    fn capillary_report_with_constant() {
        let constants = ConstantTable::new(vec![ConstantEntry {
            refrigerant: "R-454B".into(),
            c: 3.5,
            min_capacity_w: None,
            max_capacity_w: None,
        }])
        .unwrap();
        let req = CapillaryRequest {
            cycle: r454b_request(),
            ..CapillaryRequest::default()
        };
        let report = size_capillary(&registry(constants), &req).unwrap();
        let sizing = report.sizing.unwrap();
        assert!(report.sizing_error.is_none());
        assert_eq!(sizing.candidates.len(), 14);
        assert!(!sizing.constant_defaulted);
        assert_eq!(sizing.correlation, "orifice_flow");
        assert!((sizing.mass_flow_kg_h - sizing.mass_flow_kg_s * 3600.0).abs() < 1e-9);
        assert!(sizing.winner.is_some());
    }

    #[test]
    fn sizing_failure_keeps_cycle() {
        // Default constant makes every orifice-law length implausible
        let req = CapillaryRequest {
            cycle: r454b_request(),
            ..CapillaryRequest::default()
        };
        let report = size_capillary(&registry(ConstantTable::empty()), &req).unwrap();
        assert!(report.sizing.is_none());
        let failure = report.sizing_error.unwrap();
        assert_eq!(failure.kind, "no_plausible_diameter");
        assert_eq!(failure.candidates.len(), 14);
        assert_eq!(report.cycle.points.len(), 4);
    }

    #[test]
    fn bad_power_unit_is_sizing_failure() {
        let req = CapillaryRequest {
            cycle: r454b_request(),
            power_unit: "tons".to_string(),
            ..CapillaryRequest::default()
        };
        let report = size_capillary(&registry(ConstantTable::empty()), &req).unwrap();
        assert_eq!(report.sizing_error.unwrap().kind, "input_validation");
    }

    #[test]
    fn dome_sampling_respects_sample_count() {
        let dome = sample_dome(
            &registry(ConstantTable::empty()),
            &r454b_request(),
            Some(10),
        )
        .unwrap();
        assert!(dome.liquid.len() <= 10);
        assert_eq!(dome.liquid.len(), dome.vapor.len());
    }

    #[test]
    fn library_and_table_refrigerants_listed() {
        let list = list_refrigerants(&registry(ConstantTable::empty()), None);
        assert!(list.iter().any(|r| r.id == "R134a" && r.source == "library"));
        assert!(list.iter().any(|r| r.id == "R-454B" && r.source == "table"));
    }
}
