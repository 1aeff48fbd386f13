// rc-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecificEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
pub type SpecificEntropy = f64;

/// Specific heat capacity [J/(kg·K)].
pub type SpecificHeatCapacity = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

/// Diameter or length expressed in millimeters, for display.
#[inline]
pub fn to_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

/// Conversion factors between engineering and SI units.
pub mod constants {
    /// 0 °C in kelvin.
    pub const ZERO_CELSIUS_K: f64 = 273.15;
    pub const PA_PER_BAR: f64 = 1.0e5;
    pub const J_PER_KJ: f64 = 1.0e3;
    pub const SECONDS_PER_HOUR: f64 = 3600.0;

    pub const W_PER_HP: f64 = 745.7;
    pub const W_PER_KCAL_H: f64 = 1.163;
    pub const W_PER_BTU_H: f64 = 0.2931;

    #[inline]
    pub fn celsius_to_kelvin(t_c: f64) -> f64 {
        t_c + ZERO_CELSIUS_K
    }

    #[inline]
    pub fn kelvin_to_celsius(t_k: f64) -> f64 {
        t_k - ZERO_CELSIUS_K
    }
}
