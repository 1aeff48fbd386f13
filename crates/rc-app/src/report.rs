//! Serializable reports produced by the service layer.

use rc_cycle::{
    CapillaryCandidate, CapillarySizing, CycleResult, SaturationDome, SaturationPoint, SizingError,
};
use rc_fluids::ThermodynamicState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cycle state point, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    pub pressure_pa: f64,
    pub enthalpy_j_kg: f64,
    pub temperature_k: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub density_kg_m3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entropy_j_kg_k: Option<f64>,
}

impl From<&ThermodynamicState> for PointReport {
    fn from(state: &ThermodynamicState) -> Self {
        Self {
            pressure_pa: state.pressure().value,
            enthalpy_j_kg: state.enthalpy(),
            temperature_k: state.temperature().value,
            density_kg_m3: state.density().map(|d| d.value),
            entropy_j_kg_k: state.entropy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomePointReport {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub enthalpy_j_kg: f64,
}

impl From<&SaturationPoint> for DomePointReport {
    fn from(p: &SaturationPoint) -> Self {
        Self {
            temperature_k: p.temperature.value,
            pressure_pa: p.pressure.value,
            enthalpy_j_kg: p.enthalpy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DomeReport {
    pub liquid: Vec<DomePointReport>,
    pub vapor: Vec<DomePointReport>,
}

impl From<&SaturationDome> for DomeReport {
    fn from(dome: &SaturationDome) -> Self {
        Self {
            liquid: dome.liquid.iter().map(DomePointReport::from).collect(),
            vapor: dome.vapor.iter().map(DomePointReport::from).collect(),
        }
    }
}

/// Solved cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub refrigerant: String,
    /// Property source that resolved the refrigerant
    pub source: String,
    pub evap_temp_k: f64,
    pub cond_temp_k: f64,
    pub superheat_k: f64,
    pub subcooling_k: f64,
    pub cop: f64,
    pub compression_model: String,
    pub fallbacks: Vec<String>,
    pub refrigeration_effect_j_kg: f64,
    pub compressor_work_j_kg: f64,
    pub condenser_duty_j_kg: f64,
    pub pressure_ratio: f64,
    /// Keyed "1" through "4"
    pub points: BTreeMap<String, PointReport>,
    pub saturation: DomeReport,
}

impl CycleReport {
    pub fn from_result(result: &CycleResult, source: &str) -> Self {
        let points = result
            .states()
            .iter()
            .enumerate()
            .map(|(i, state)| ((i + 1).to_string(), PointReport::from(state)))
            .collect();
        Self {
            refrigerant: result.refrigerant.id().to_string(),
            source: source.to_string(),
            evap_temp_k: result.inputs.evap_temp.value,
            cond_temp_k: result.inputs.cond_temp.value,
            superheat_k: result.inputs.superheat,
            subcooling_k: result.inputs.subcooling,
            cop: result.cop,
            compression_model: result.compression_model.name().to_string(),
            fallbacks: result.fallbacks.iter().map(|f| f.name().to_string()).collect(),
            refrigeration_effect_j_kg: result.refrigeration_effect(),
            compressor_work_j_kg: result.compressor_work(),
            condenser_duty_j_kg: result.condenser_duty(),
            pressure_ratio: result.pressure_ratio(),
            points,
            saturation: DomeReport::from(&result.dome),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub diameter_mm: f64,
    /// `null` when the correlation gave no finite length
    pub length_m: Option<f64>,
    pub validity: String,
}

impl From<&CapillaryCandidate> for CandidateReport {
    fn from(c: &CapillaryCandidate) -> Self {
        Self {
            diameter_mm: c.diameter_mm(),
            length_m: c.length.map(|l| l.value),
            validity: c.validity.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerReport {
    pub diameter_mm: f64,
    pub length_m: f64,
}

/// Capillary sizing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub refrigerant: String,
    pub capacity_w: f64,
    pub mass_flow_kg_s: f64,
    pub mass_flow_kg_h: f64,
    pub delta_p_pa: f64,
    pub delta_p_bar: f64,
    pub density_kg_m3: f64,
    pub constant: f64,
    pub constant_defaulted: bool,
    pub correlation: String,
    pub rescaled: bool,
    pub candidates: Vec<CandidateReport>,
    pub winner: Option<WinnerReport>,
}

impl From<&CapillarySizing> for SizingReport {
    fn from(s: &CapillarySizing) -> Self {
        let winner = s.winner().and_then(|w| {
            w.length.map(|l| WinnerReport {
                diameter_mm: w.diameter_mm(),
                length_m: l.value,
            })
        });
        Self {
            refrigerant: s.refrigerant.clone(),
            capacity_w: s.capacity.value,
            mass_flow_kg_s: s.mass_flow.value,
            mass_flow_kg_h: s.mass_flow_kg_h(),
            delta_p_pa: s.delta_p.value,
            delta_p_bar: s.delta_p_bar(),
            density_kg_m3: s.density.value,
            constant: s.constant,
            constant_defaulted: s.constant_defaulted,
            correlation: s.correlation.name().to_string(),
            rescaled: s.rescaled,
            candidates: s.candidates.iter().map(CandidateReport::from).collect(),
            winner,
        }
    }
}

/// Why sizing failed, with the classified candidates when there are any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingFailure {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub candidates: Vec<CandidateReport>,
}

impl From<&SizingError> for SizingFailure {
    fn from(err: &SizingError) -> Self {
        let (kind, candidates) = match err {
            SizingError::InputValidation { .. } => ("input_validation", Vec::new()),
            SizingError::NumericDegeneracy { .. } => ("numeric_degeneracy", Vec::new()),
            SizingError::SizingInfeasible { .. } => ("sizing_infeasible", Vec::new()),
            SizingError::NoPlausibleDiameter { candidates } => (
                "no_plausible_diameter",
                candidates.iter().map(CandidateReport::from).collect(),
            ),
        };
        Self {
            kind: kind.to_string(),
            message: err.to_string(),
            candidates,
        }
    }
}

/// Cycle plus its sizing outcome. A sizing failure never drops the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapillaryReport {
    pub cycle: CycleReport,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sizing: Option<SizingReport>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sizing_error: Option<SizingFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefrigerantReport {
    pub id: String,
    pub display_name: String,
    pub source: String,
}
