//! Temperature conversions
//!
//! Celsius is the hub: Fahrenheit and Kelvin each have a direct affine
//! formula to and from Celsius, and reach each other through it. No check is
//! made for values below absolute zero.

use std::borrow::Cow;
use crate::dimension::{Dimension, Measure};
use crate::measurement::Measurement;
use crate::unit::{AnyUnit, TemperatureUnit};

const KELVIN_OFFSET: f64 = 273.15;

/// Marker for the temperature family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thermal;

impl Measure for Thermal {
    type Unit = TemperatureUnit;

    const DIMENSION: Dimension = Dimension::Temperature;

    fn convert(magnitude: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
        convert(magnitude, from, to)
    }

    fn symbol(unit: TemperatureUnit) -> Cow<'static, str> {
        Cow::Borrowed(unit.symbol())
    }

    fn erase(unit: TemperatureUnit) -> AnyUnit {
        AnyUnit::Temperature(unit)
    }
}

pub type Temperature = Measurement<Thermal>;

pub fn f_to_c(f: f64) -> f64 {
    (f - 32.0) * (5.0 / 9.0)
}

pub fn c_to_f(c: f64) -> f64 {
    c * 1.8 + 32.0
}

pub fn c_to_k(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

pub fn k_to_c(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

pub fn f_to_k(f: f64) -> f64 {
    c_to_k(f_to_c(f))
}

pub fn k_to_f(k: f64) -> f64 {
    c_to_f(k_to_c(k))
}

/// Convert between any two temperature units
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    use TemperatureUnit::*;

    match (from, to) {
        (Celsius, Fahrenheit) => c_to_f(value),
        (Celsius, Kelvin) => c_to_k(value),
        (Fahrenheit, Celsius) => f_to_c(value),
        (Fahrenheit, Kelvin) => f_to_k(value),
        (Kelvin, Celsius) => k_to_c(value),
        (Kelvin, Fahrenheit) => k_to_f(value),
        (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
    }
}

impl Measurement<Thermal> {
    pub fn celsius(&self) -> Temperature {
        self.convert_to(TemperatureUnit::Celsius)
    }

    pub fn fahrenheit(&self) -> Temperature {
        self.convert_to(TemperatureUnit::Fahrenheit)
    }

    pub fn kelvin(&self) -> Temperature {
        self.convert_to(TemperatureUnit::Kelvin)
    }
}
