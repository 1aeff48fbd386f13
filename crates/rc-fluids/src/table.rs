//! Tabulated saturation data for refrigerants the reference library does not carry.
//!
//! Properties are linearly interpolated in temperature between the two bracketing
//! rows. A query that lands exactly on a tabulated temperature returns that row.
//! Queries outside `[T_first, T_last]` are rejected, never clamped.

use crate::error::{FluidError, FluidResult};
use crate::model::{Envelope, PropertySource, SaturationProps};
use crate::refrigerant::Refrigerant;
use rc_core::lerp;
use rc_core::units::{Temperature, k, kg_m3, pa};
use tracing::warn;

/// Liquid density used when a table has no density column [kg/m³].
pub const DEFAULT_LIQUID_DENSITY: f64 = 1000.0;

/// One saturation row, SI units.
///
/// Required fields are `Option` so a loader can hand over what it parsed and let
/// [`PropertyTable::new`] report which column is missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    /// Temperature [K]
    pub temperature_k: f64,
    /// Bubble pressure [Pa]
    pub p_bubble: Option<f64>,
    /// Dew pressure [Pa]
    pub p_dew: Option<f64>,
    /// Saturated-liquid enthalpy [J/kg]
    pub h_liquid: Option<f64>,
    /// Saturated-vapor enthalpy [J/kg]
    pub h_vapor: Option<f64>,
    /// Saturated-liquid entropy [J/(kg·K)]
    pub s_liquid: Option<f64>,
    /// Saturated-vapor entropy [J/(kg·K)]
    pub s_vapor: Option<f64>,
    /// Saturated-vapor cp [J/(kg·K)]
    pub cp_vapor: Option<f64>,
    /// Saturated-liquid density [kg/m³], optional column
    pub rho_liquid: Option<f64>,
    /// Saturated-vapor density [kg/m³], optional column
    pub rho_vapor: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
enum Column {
    PBubble,
    PDew,
    HLiquid,
    HVapor,
    SLiquid,
    SVapor,
    CpVapor,
    RhoLiquid,
    RhoVapor,
}

impl Column {
    const REQUIRED: [Column; 7] = [
        Column::PBubble,
        Column::PDew,
        Column::HLiquid,
        Column::HVapor,
        Column::SLiquid,
        Column::SVapor,
        Column::CpVapor,
    ];

    fn name(self) -> &'static str {
        match self {
            Column::PBubble => "bubble_pressure",
            Column::PDew => "dew_pressure",
            Column::HLiquid => "liquid_enthalpy",
            Column::HVapor => "vapor_enthalpy",
            Column::SLiquid => "liquid_entropy",
            Column::SVapor => "vapor_entropy",
            Column::CpVapor => "vapor_cp",
            Column::RhoLiquid => "liquid_density",
            Column::RhoVapor => "vapor_density",
        }
    }

    fn get(self, row: &TableRow) -> Option<f64> {
        match self {
            Column::PBubble => row.p_bubble,
            Column::PDew => row.p_dew,
            Column::HLiquid => row.h_liquid,
            Column::HVapor => row.h_vapor,
            Column::SLiquid => row.s_liquid,
            Column::SVapor => row.s_vapor,
            Column::CpVapor => row.cp_vapor,
            Column::RhoLiquid => row.rho_liquid,
            Column::RhoVapor => row.rho_vapor,
        }
    }
}

/// Validated saturation table, sorted by strictly increasing temperature.
///
/// Immutable once built.
#[derive(Clone, Debug)]
pub struct PropertyTable {
    refrigerant: Refrigerant,
    rows: Vec<TableRow>,
    has_liquid_density: bool,
    has_vapor_density: bool,
}

impl PropertyTable {
    /// Build a table from unordered rows.
    ///
    /// # Errors
    /// * `EmptyTable` - no rows
    /// * `MissingColumn` - a required value is absent in any row, or an optional
    ///   density column is only partly filled
    /// * `NonMonotonic` - two rows share a temperature, or a temperature is not finite
    pub fn new(refrigerant: Refrigerant, mut rows: Vec<TableRow>) -> FluidResult<Self> {
        let id = refrigerant.id().to_string();
        if rows.is_empty() {
            return Err(FluidError::EmptyTable { refrigerant: id });
        }

        for row in &rows {
            if !row.temperature_k.is_finite() {
                return Err(FluidError::NonMonotonic {
                    refrigerant: id,
                    temperature_k: row.temperature_k,
                });
            }
        }
        rows.sort_by(|a, b| a.temperature_k.total_cmp(&b.temperature_k));
        for pair in rows.windows(2) {
            if pair[1].temperature_k <= pair[0].temperature_k {
                return Err(FluidError::NonMonotonic {
                    refrigerant: id,
                    temperature_k: pair[1].temperature_k,
                });
            }
        }

        for column in Column::REQUIRED {
            if rows.iter().any(|row| column.get(row).is_none()) {
                return Err(FluidError::MissingColumn {
                    refrigerant: id,
                    column: column.name(),
                });
            }
        }

        let has_liquid_density = optional_column(&id, &rows, Column::RhoLiquid)?;
        let has_vapor_density = optional_column(&id, &rows, Column::RhoVapor)?;
        if !has_liquid_density {
            warn!(
                refrigerant = %id,
                rho = DEFAULT_LIQUID_DENSITY,
                "no liquid density column, saturated liquid density will be defaulted"
            );
        }

        Ok(Self {
            refrigerant,
            rows,
            has_liquid_density,
            has_vapor_density,
        })
    }

    pub fn refrigerant(&self) -> &Refrigerant {
        &self.refrigerant
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn has_liquid_density(&self) -> bool {
        self.has_liquid_density
    }

    /// Tabulated temperature range.
    pub fn envelope(&self) -> Envelope {
        // `new` guarantees at least one row.
        let first = self.rows.first().map_or(0.0, |r| r.temperature_k);
        let last = self.rows.last().map_or(0.0, |r| r.temperature_k);
        Envelope {
            t_min: k(first),
            t_max: k(last),
        }
    }

    /// Interpolate one column at `t_k`, which must lie inside the envelope.
    fn value_at(&self, t_k: f64, column: Column) -> FluidResult<f64> {
        let idx = self.rows.partition_point(|row| row.temperature_k < t_k);
        let missing = || FluidError::MissingColumn {
            refrigerant: self.refrigerant.id().to_string(),
            column: column.name(),
        };

        let hi = self.rows.get(idx).ok_or_else(|| self.out_of_range(t_k))?;
        let y_hi = column.get(hi).ok_or_else(missing)?;
        if hi.temperature_k == t_k {
            return Ok(y_hi);
        }
        let lo = idx
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| self.out_of_range(t_k))?;
        let y_lo = column.get(lo).ok_or_else(missing)?;

        Ok(lerp(t_k, lo.temperature_k, hi.temperature_k, y_lo, y_hi)?)
    }

    fn out_of_range(&self, t_k: f64) -> FluidError {
        let env = self.envelope();
        FluidError::OutOfRange {
            refrigerant: self.refrigerant.id().to_string(),
            what: "temperature [K]",
            value: t_k,
            min: env.t_min.value,
            max: env.t_max.value,
        }
    }
}

/// An optional column must be filled in every row or in none.
fn optional_column(id: &str, rows: &[TableRow], column: Column) -> FluidResult<bool> {
    let filled = rows.iter().filter(|row| column.get(row).is_some()).count();
    if filled == 0 {
        Ok(false)
    } else if filled == rows.len() {
        Ok(true)
    } else {
        Err(FluidError::MissingColumn {
            refrigerant: id.to_string(),
            column: column.name(),
        })
    }
}

/// Table-backed property source.
#[derive(Clone, Debug)]
pub struct TableSource {
    table: PropertyTable,
}

impl TableSource {
    pub fn new(table: PropertyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PropertyTable {
        &self.table
    }
}

impl PropertySource for TableSource {
    fn name(&self) -> &str {
        "table"
    }

    fn refrigerant(&self) -> &Refrigerant {
        self.table.refrigerant()
    }

    fn envelope(&self) -> FluidResult<Envelope> {
        Ok(self.table.envelope())
    }

    fn saturation_at(&self, t: Temperature) -> FluidResult<SaturationProps> {
        let t_k = t.value;
        self.table.envelope().check(self.table.refrigerant(), t)?;
        let at = |column| self.table.value_at(t_k, column);

        let (rho_liquid, liquid_density_defaulted) = if self.table.has_liquid_density {
            (at(Column::RhoLiquid)?, false)
        } else {
            (DEFAULT_LIQUID_DENSITY, true)
        };
        let rho_vapor = if self.table.has_vapor_density {
            Some(kg_m3(at(Column::RhoVapor)?))
        } else {
            None
        };

        Ok(SaturationProps {
            temperature: t,
            p_bubble: pa(at(Column::PBubble)?),
            p_dew: pa(at(Column::PDew)?),
            h_liquid: at(Column::HLiquid)?,
            h_vapor: at(Column::HVapor)?,
            s_liquid: at(Column::SLiquid)?,
            s_vapor: at(Column::SVapor)?,
            cp_vapor: at(Column::CpVapor)?,
            rho_liquid: kg_m3(rho_liquid),
            rho_vapor,
            liquid_density_defaulted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t_k: f64, p: f64, h_l: f64, h_v: f64) -> TableRow {
        TableRow {
            temperature_k: t_k,
            p_bubble: Some(p * 1.02),
            p_dew: Some(p),
            h_liquid: Some(h_l),
            h_vapor: Some(h_v),
            s_liquid: Some(1000.0),
            s_vapor: Some(1800.0),
            cp_vapor: Some(1100.0),
            rho_liquid: None,
            rho_vapor: None,
        }
    }

    fn table_source(id: &str, rows: Vec<TableRow>) -> TableSource {
        TableSource::new(PropertyTable::new(Refrigerant::table(id), rows).unwrap())
    }

    fn table() -> PropertyTable {
        PropertyTable::new(
            Refrigerant::table("R-454B"),
            vec![
                row(263.15, 4.0e5, 164e3, 414.5e3),
                row(243.15, 1.7e5, 136e3, 405e3),
                row(253.15, 2.6e5, 150e3, 410e3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rows_are_sorted_on_construction() {
        let t = table();
        let temps: Vec<f64> = t.rows().iter().map(|r| r.temperature_k).collect();
        assert_eq!(temps, vec![243.15, 253.15, 263.15]);
        assert_eq!(t.envelope().t_min.value, 243.15);
        assert_eq!(t.envelope().t_max.value, 263.15);
    }

    #[test]
    fn exact_hit_returns_row() {
        let source = TableSource::new(table());
        let sat = source.saturation_at(k(253.15)).unwrap();
        assert_eq!(sat.p_dew.value, 2.6e5);
        assert_eq!(sat.h_vapor, 410e3);
    }

    #[test]
    fn midpoint_is_average() {
        let source = TableSource::new(table());
        let sat = source.saturation_at(k(248.15)).unwrap();
        assert!((sat.h_liquid - 143e3).abs() < 1e-6);
        assert!((sat.p_dew.value - 2.15e5).abs() < 1e-6);
    }

    #[test]
    fn outside_table_is_error() {
        let source = TableSource::new(table());
        for t in [243.0, 263.2] {
            let err = source.saturation_at(k(t)).unwrap_err();
            assert!(matches!(err, FluidError::OutOfRange { .. }), "T={t}");
        }
    }

    #[test]
    fn missing_density_uses_default_and_flags_it() {
        let source = TableSource::new(table());
        let sat = source.saturation_at(k(250.0)).unwrap();
        assert_eq!(sat.rho_liquid.value, DEFAULT_LIQUID_DENSITY);
        assert!(sat.liquid_density_defaulted);
        assert!(sat.rho_vapor.is_none());
    }

    #[test]
    fn tabulated_density_is_interpolated() {
        let mut rows = vec![row(243.15, 1.7e5, 136e3, 405e3), row(253.15, 2.6e5, 150e3, 410e3)];
        rows[0].rho_liquid = Some(1150.0);
        rows[1].rho_liquid = Some(1120.0);
        let source = table_source("R-454B", rows);
        let sat = source.saturation_at(k(248.15)).unwrap();
        assert!((sat.rho_liquid.value - 1135.0).abs() < 1e-9);
        assert!(!sat.liquid_density_defaulted);
    }

    #[test]
    fn empty_table_rejected() {
        let err = PropertyTable::new(Refrigerant::table("R-417A"), Vec::new()).unwrap_err();
        assert!(matches!(err, FluidError::EmptyTable { .. }));
    }

    #[test]
    fn duplicate_temperature_rejected() {
        let rows = vec![row(243.15, 1.7e5, 136e3, 405e3), row(243.15, 1.7e5, 136e3, 405e3)];
        let err = PropertyTable::new(Refrigerant::table("R-417A"), rows).unwrap_err();
        let FluidError::NonMonotonic { temperature_k, .. } = err else {
            panic!("expected a monotonicity error, got {err:?}");
        };
        assert_eq!(temperature_k, 243.15);
    }

    #[test]
    fn missing_required_column_is_named() {
        let mut rows = vec![row(243.15, 1.7e5, 136e3, 405e3), row(253.15, 2.6e5, 150e3, 410e3)];
        rows[1].cp_vapor = None;
        let err = PropertyTable::new(Refrigerant::table("R-417A"), rows).unwrap_err();
        let FluidError::MissingColumn { column, .. } = err else {
            panic!("expected a missing column error, got {err:?}");
        };
        assert_eq!(column, "vapor_cp");
    }

    #[test]
    fn partly_filled_density_rejected() {
        let mut rows = vec![row(243.15, 1.7e5, 136e3, 405e3), row(253.15, 2.6e5, 150e3, 410e3)];
        rows[0].rho_liquid = Some(1150.0);
        let err = PropertyTable::new(Refrigerant::table("R-417A"), rows).unwrap_err();
        let FluidError::MissingColumn { column, .. } = err else {
            panic!("expected a missing column error, got {err:?}");
        };
        assert_eq!(column, "liquid_density");
    }

    #[test]
    fn single_row_answers_only_its_temperature() {
        let source = table_source("R-450A", vec![row(253.15, 2.6e5, 150e3, 410e3)]);
        assert!(source.saturation_at(k(253.15)).is_ok());
        assert!(source.saturation_at(k(253.16)).is_err());
    }

    #[test]
    fn default_phase_props_come_from_saturation() {
        let source = TableSource::new(table());
        let liquid = source.subcooled_liquid(k(253.15), pa(1.0e6)).unwrap();
        assert_eq!(liquid.h, 150e3);
        assert!(liquid.density_defaulted);
        assert!(source.isentropic_state(pa(1.0e6), 1800.0).is_none());
    }
}
