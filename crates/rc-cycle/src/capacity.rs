//! Rated cooling capacity and its units.

use crate::error::{SizingError, SizingResult};
use rc_core::units::constants::{W_PER_BTU_H, W_PER_HP, W_PER_KCAL_H};
use rc_core::units::{Power, watts};
use std::fmt;
use std::str::FromStr;

/// Units a cooling capacity may be given in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CapacityUnit {
    #[default]
    Watt,
    Horsepower,
    KcalPerHour,
    BtuPerHour,
}

impl CapacityUnit {
    pub const ALL: [CapacityUnit; 4] = [
        CapacityUnit::Watt,
        CapacityUnit::Horsepower,
        CapacityUnit::KcalPerHour,
        CapacityUnit::BtuPerHour,
    ];

    pub fn watts_per_unit(self) -> f64 {
        match self {
            CapacityUnit::Watt => 1.0,
            CapacityUnit::Horsepower => W_PER_HP,
            CapacityUnit::KcalPerHour => W_PER_KCAL_H,
            CapacityUnit::BtuPerHour => W_PER_BTU_H,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CapacityUnit::Watt => "W",
            CapacityUnit::Horsepower => "HP",
            CapacityUnit::KcalPerHour => "kcal/h",
            CapacityUnit::BtuPerHour => "Btu/h",
        }
    }
}

impl fmt::Display for CapacityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CapacityUnit {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "watt" | "watts" => Ok(CapacityUnit::Watt),
            "hp" => Ok(CapacityUnit::Horsepower),
            "kcal/h" => Ok(CapacityUnit::KcalPerHour),
            "btu/h" => Ok(CapacityUnit::BtuPerHour),
            _ => Err(SizingError::InputValidation {
                what: format!("unknown capacity unit '{}'", s),
            }),
        }
    }
}

/// Cooling capacity in its declared unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capacity {
    magnitude: f64,
    unit: CapacityUnit,
}

impl Capacity {
    /// Magnitude must be positive and finite.
    pub fn new(magnitude: f64, unit: CapacityUnit) -> SizingResult<Self> {
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(SizingError::InputValidation {
                what: format!("capacity must be positive, got {} {}", magnitude, unit),
            });
        }
        Ok(Self { magnitude, unit })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> CapacityUnit {
        self.unit
    }

    pub fn to_watts(&self) -> Power {
        watts(self.magnitude * self.unit.watts_per_unit())
    }
}
