//! Synthetic sources shared by unit tests.

use rc_core::units::{Pressure, SpecificEntropy, Temperature};
use rc_fluids::{
    Envelope, FluidResult, IsentropicPoint, PropertySource, PropertyTable, Refrigerant,
    SaturationProps, TableRow, TableSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};

// K, bar bubble, bar dew, kJ/kg liquid, kJ/kg vapor,
// kJ/(kg·K) liquid, vapor, cp vapor, kg/m³ liquid
const R454B: [[f64; 9]; 11] = [
    [233.15, 1.78, 1.70, 136.0, 405.0, 0.75, 1.90, 0.95, 1150.0],
    [243.15, 2.73, 2.61, 150.0, 410.0, 0.81, 1.88, 1.00, 1120.0],
    [253.15, 4.02, 3.86, 164.0, 414.5, 0.865, 1.86, 1.05, 1090.0],
    [263.15, 5.73, 5.52, 178.0, 418.5, 0.92, 1.845, 1.10, 1060.0],
    [273.15, 7.95, 7.69, 200.0, 422.0, 1.0, 1.83, 1.16, 1025.0],
    [283.15, 10.76, 10.44, 214.5, 424.8, 1.05, 1.815, 1.24, 990.0],
    [293.15, 14.26, 13.89, 229.5, 426.8, 1.10, 1.80, 1.34, 952.0],
    [303.15, 18.55, 18.12, 245.0, 427.8, 1.15, 1.785, 1.47, 912.0],
    [313.15, 23.74, 23.26, 261.0, 427.5, 1.20, 1.77, 1.66, 866.0],
    [323.15, 29.94, 29.42, 278.0, 425.3, 1.255, 1.75, 1.95, 815.0],
    [333.15, 37.3, 36.8, 296.0, 420.0, 1.31, 1.72, 2.45, 755.0],
];

pub(crate) fn r454b_rows(with_density: bool) -> Vec<TableRow> {
    R454B
        .iter()
        .map(|r| TableRow {
            temperature_k: r[0],
            p_bubble: Some(r[1] * 1.0e5),
            p_dew: Some(r[2] * 1.0e5),
            h_liquid: Some(r[3] * 1.0e3),
            h_vapor: Some(r[4] * 1.0e3),
            s_liquid: Some(r[5] * 1.0e3),
            s_vapor: Some(r[6] * 1.0e3),
            cp_vapor: Some(r[7] * 1.0e3),
            rho_liquid: with_density.then_some(r[8]),
            rho_vapor: None,
        })
        .collect()
}

/// R-454B table spanning -40..=60 °C, with liquid density.
pub(crate) fn r454b_source() -> TableSource {
    r454b_table(true)
}

/// Same table without the density column.
pub(crate) fn r454b_source_no_density() -> TableSource {
    r454b_table(false)
}

fn r454b_table(with_density: bool) -> TableSource {
    let table = PropertyTable::new(Refrigerant::table("R-454B"), r454b_rows(with_density));
    TableSource::new(table.unwrap())
}

/// Wraps a source and counts every property query.
pub(crate) struct CountingSource<S> {
    pub inner: S,
    pub calls: AtomicUsize,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl<S: PropertySource> PropertySource for CountingSource<S> {
    fn name(&self) -> &str {
        "counting"
    }

    fn refrigerant(&self) -> &Refrigerant {
        self.inner.refrigerant()
    }

    fn envelope(&self) -> FluidResult<Envelope> {
        self.hit();
        self.inner.envelope()
    }

    fn saturation_at(&self, t: Temperature) -> FluidResult<SaturationProps> {
        self.hit();
        self.inner.saturation_at(t)
    }

    fn isentropic_state(
        &self,
        p: Pressure,
        s: SpecificEntropy,
    ) -> Option<FluidResult<IsentropicPoint>> {
        self.hit();
        self.inner.isentropic_state(p, s)
    }
}
