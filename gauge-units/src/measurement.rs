//! Measurement type - a magnitude tagged with a unit of one family

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use serde::{Serialize, Deserialize};
use crate::dimension::{Dimension, Measure};
use crate::quantity::Quantity;

/// An immutable magnitude with a unit from the family `D`.
///
/// Every conversion hands back a new value; nothing here mutates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Measurement<D: Measure> {
    magnitude: f64,
    unit: D::Unit,
    #[serde(skip)]
    family: PhantomData<D>,
}

impl<D: Measure> Measurement<D> {
    pub fn new(magnitude: f64, unit: D::Unit) -> Self {
        Measurement { magnitude, unit, family: PhantomData }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> D::Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        D::DIMENSION
    }

    pub fn symbol(&self) -> Cow<'static, str> {
        D::symbol(self.unit)
    }

    /// Express this measurement in `target`. Asking for the current unit
    /// returns an equal value.
    pub fn convert_to(&self, target: D::Unit) -> Self {
        if target == self.unit {
            return *self;
        }
        Self::new(D::convert(self.magnitude, self.unit, target), target)
    }

    /// Magnitude truncated toward zero (saturating at the `i64` bounds)
    pub fn to_int(&self) -> i64 {
        self.magnitude.trunc() as i64
    }

    pub fn to_float(&self) -> f64 {
        self.magnitude
    }

    /// Compare with another measurement of the same family after bringing it
    /// into this unit, using a relative tolerance.
    pub fn is_close(&self, other: &Self, rel_tol: f64) -> bool {
        let theirs = other.convert_to(self.unit).magnitude;
        let scale = self.magnitude.abs().max(theirs.abs());
        (self.magnitude - theirs).abs() <= rel_tol * scale
    }

    /// Drop the static family, keeping the unit as a runtime tag
    pub fn erase(&self) -> Quantity {
        Quantity::new(self.magnitude, D::erase(self.unit))
    }
}

impl<D: Measure> From<Measurement<D>> for f64 {
    fn from(m: Measurement<D>) -> f64 {
        m.magnitude
    }
}

impl<D: Measure> fmt::Display for Measurement<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_magnitude(f, self.magnitude)?;
        write!(f, " {}", self.symbol())
    }
}

/// Write a magnitude the way measurements print it: shortest round-trip form
/// that always reads as a float ("1.0", "1.5", "1e-12"), unless the caller
/// asked for a fixed precision.
pub(crate) fn write_magnitude(f: &mut fmt::Formatter<'_>, magnitude: f64) -> fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{:.*}", precision, magnitude),
        None => write!(f, "{:?}", magnitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{ImperialDistanceUnit, StorageUnit, TemperatureUnit};
    use crate::{imperial, Storage, Temperature};

    #[test]
    fn test_accessors() {
        let s = Storage::new(1.5, StorageUnit::Kilobytes);
        assert_eq!(s.magnitude(), 1.5);
        assert_eq!(s.unit(), StorageUnit::Kilobytes);
        assert_eq!(s.dimension(), Dimension::Storage);
        assert_eq!(s.symbol(), "KB");
    }

    #[test]
    fn test_int_and_float() {
        let t = Temperature::new(-3.7, TemperatureUnit::Celsius);
        assert_eq!(t.to_int(), -3);
        assert_eq!(t.to_float(), -3.7);
        assert_eq!(f64::from(t), -3.7);
    }

    #[test]
    fn test_display() {
        let d = imperial::Distance::new(5280.0, ImperialDistanceUnit::Feet);
        assert_eq!(d.to_string(), "5280.0 ft");

        let s = Storage::new(1.5, StorageUnit::Kilobytes);
        assert_eq!(s.to_string(), "1.5 KB");

        let t = Temperature::new(100.0 / 3.0, TemperatureUnit::Celsius);
        assert_eq!(format!("{:.2}", t), "33.33 °C");
    }

    #[test]
    fn test_convert_to_same_unit_is_identity() {
        let d = imperial::Distance::new(12.5, ImperialDistanceUnit::Yards);
        assert_eq!(d.convert_to(ImperialDistanceUnit::Yards), d);
    }

    #[test]
    fn test_convert_returns_new_value() {
        let d = imperial::Distance::new(1.0, ImperialDistanceUnit::Miles);
        let feet = d.convert_to(ImperialDistanceUnit::Feet);
        assert_eq!(feet.magnitude(), 5280.0);
        assert_eq!(d.magnitude(), 1.0);
        assert_eq!(d.unit(), ImperialDistanceUnit::Miles);
    }

    #[test]
    fn test_is_close() {
        let a = Storage::new(1.0, StorageUnit::Megabytes);
        let b = Storage::new(1024.0, StorageUnit::Kilobytes);
        assert!(a.is_close(&b, 1e-12));
        let c = Storage::new(1000.0, StorageUnit::Kilobytes);
        assert!(!a.is_close(&c, 1e-3));
    }

    #[test]
    fn test_erase() {
        let q = Storage::new(2.0, StorageUnit::Gigabytes).erase();
        assert_eq!(q.value, 2.0);
        assert_eq!(q.unit.dimension(), Dimension::Storage);
    }

    #[test]
    fn test_serde() {
        let s = Storage::new(2.5, StorageUnit::Megabytes);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"magnitude":2.5,"unit":"megabytes"}"#);
        let back: Storage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
