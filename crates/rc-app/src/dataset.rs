//! Property-table and capillary-constant datasets.
//!
//! Both files may be YAML or JSON, chosen by extension (`.json` is JSON,
//! anything else YAML). Table rows are written in engineering units and
//! converted to SI on load.

use crate::error::{AppError, AppResult};
use rc_core::units::constants::{J_PER_KJ, PA_PER_BAR, celsius_to_kelvin};
use rc_cycle::{ConstantEntry, ConstantTable};
use rc_fluids::{FluidError, PropertyTable, Refrigerant, TableRow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// One table row as written in a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableRowRecord {
    pub temperature_c: Option<f64>,
    pub bubble_pressure_bar: Option<f64>,
    pub dew_pressure_bar: Option<f64>,
    pub liquid_enthalpy_kj_kg: Option<f64>,
    pub vapor_enthalpy_kj_kg: Option<f64>,
    pub liquid_entropy_kj_kg_k: Option<f64>,
    pub vapor_entropy_kj_kg_k: Option<f64>,
    pub vapor_cp_kj_kg_k: Option<f64>,
    pub liquid_density_kg_m3: Option<f64>,
    pub vapor_density_kg_m3: Option<f64>,
}

impl TableRowRecord {
    fn to_si(&self, refrigerant: &str) -> Result<TableRow, FluidError> {
        let t_c = self.temperature_c.ok_or_else(|| FluidError::MissingColumn {
            refrigerant: refrigerant.to_string(),
            column: "temperature_c",
        })?;
        let bar = |v: Option<f64>| v.map(|v| v * PA_PER_BAR);
        let kj = |v: Option<f64>| v.map(|v| v * J_PER_KJ);

        Ok(TableRow {
            temperature_k: celsius_to_kelvin(t_c),
            p_bubble: bar(self.bubble_pressure_bar),
            p_dew: bar(self.dew_pressure_bar),
            h_liquid: kj(self.liquid_enthalpy_kj_kg),
            h_vapor: kj(self.vapor_enthalpy_kj_kg),
            s_liquid: kj(self.liquid_entropy_kj_kg_k),
            s_vapor: kj(self.vapor_entropy_kj_kg_k),
            cp_vapor: kj(self.vapor_cp_kj_kg_k),
            rho_liquid: self.liquid_density_kg_m3,
            rho_vapor: self.vapor_density_kg_m3,
        })
    }
}

/// One capillary constant as written in a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantRecord {
    pub refrigerant: String,
    pub c: f64,
    #[serde(default)]
    pub min_capacity_w: Option<f64>,
    #[serde(default)]
    pub max_capacity_w: Option<f64>,
}

fn dataset_err(path: &Path, message: impl Into<String>) -> AppError {
    AppError::Dataset {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> AppResult<T> {
    if is_json(path) {
        serde_json::from_str(content).map_err(|e| dataset_err(path, format!("invalid JSON: {}", e)))
    } else {
        serde_yaml::from_str(content).map_err(|e| dataset_err(path, format!("invalid YAML: {}", e)))
    }
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a table dataset: a map from refrigerant id to its rows.
///
/// `path` names the document in errors and picks the format.
pub fn parse_tables(path: &Path, content: &str) -> AppResult<Vec<PropertyTable>> {
    let document: BTreeMap<String, Vec<TableRowRecord>> = parse_document(path, content)?;

    let mut tables = Vec::with_capacity(document.len());
    for (id, records) in document {
        let rows = records
            .iter()
            .map(|r| r.to_si(&id))
            .collect::<Result<Vec<_>, _>>()?;
        tables.push(PropertyTable::new(Refrigerant::table(id), rows)?);
    }
    Ok(tables)
}

/// Load a table dataset from disk.
pub fn load_tables(path: &Path) -> AppResult<Vec<PropertyTable>> {
    let tables = parse_tables(path, &read(path)?)?;
    info!(path = %path.display(), tables = tables.len(), "property tables loaded");
    Ok(tables)
}

/// Parse a constants dataset: a list of `{refrigerant, c, min_capacity_w?, max_capacity_w?}`.
pub fn parse_constants(path: &Path, content: &str) -> AppResult<ConstantTable> {
    let records: Vec<ConstantRecord> = parse_document(path, content)?;
    let entries = records
        .into_iter()
        .map(|r| ConstantEntry {
            refrigerant: r.refrigerant,
            c: r.c,
            min_capacity_w: r.min_capacity_w,
            max_capacity_w: r.max_capacity_w,
        })
        .collect();
    ConstantTable::new(entries).map_err(|e| dataset_err(path, e.to_string()))
}

/// Load a constants dataset; a missing file gives an empty table.
pub fn load_constants(path: &Path) -> AppResult<ConstantTable> {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "constants dataset not found, every lookup will use the default"
        );
        return Ok(ConstantTable::empty());
    }
    let table = parse_constants(path, &read(path)?)?;
    info!(path = %path.display(), entries = table.entries().len(), "capillary constants loaded");
    Ok(table)
}
