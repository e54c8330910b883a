//! Metric prefix conversions for distance and volume
//!
//! One prefix table serves both families; they differ only in the unit
//! abbreviation ("m" or "l"). [`Area`] is narrower than its name suggests: it
//! exists for the cubic-centimetre projection of a volume and scales linearly
//! by prefix like the other two.

use std::borrow::Cow;
use crate::dimension::{Dimension, Measure};
use crate::imperial::{self, ImperialCapacity, ImperialLength};
use crate::measurement::Measurement;
use crate::unit::{AnyUnit, ImperialDistanceUnit, ImperialVolumeUnit, MetricPrefix};

/// Scale by a power of ten, dividing for negative powers so that values like
/// 1000 mm land exactly on 1 m.
fn shift(magnitude: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        magnitude * 10f64.powi(exponent)
    } else {
        magnitude / 10f64.powi(-exponent)
    }
}

pub fn to_base(magnitude: f64, unit: MetricPrefix) -> f64 {
    shift(magnitude, unit.exponent())
}

pub fn from_base(base: f64, target: MetricPrefix) -> f64 {
    shift(base, -target.exponent())
}

/// Convert between prefixes. Goes straight by the exponent difference, which
/// equals going through the base but keeps exact powers exact.
pub fn convert(magnitude: f64, from: MetricPrefix, to: MetricPrefix) -> f64 {
    shift(magnitude, from.exponent() - to.exponent())
}

pub fn metric_prefix(unit: MetricPrefix) -> &'static str {
    unit.glyph()
}

/// Marker for metric distance (meters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricLength;

/// Marker for metric volume (liters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCapacity;

/// Marker for the cubic-centimetre projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCubic;

impl Measure for MetricLength {
    type Unit = MetricPrefix;

    const DIMENSION: Dimension = Dimension::MetricDistance;

    fn convert(magnitude: f64, from: MetricPrefix, to: MetricPrefix) -> f64 {
        convert(magnitude, from, to)
    }

    fn symbol(unit: MetricPrefix) -> Cow<'static, str> {
        Cow::Owned(format!("{}m", unit.glyph()))
    }

    fn erase(unit: MetricPrefix) -> AnyUnit {
        AnyUnit::MetricDistance(unit)
    }
}

impl Measure for MetricCapacity {
    type Unit = MetricPrefix;

    const DIMENSION: Dimension = Dimension::MetricVolume;

    fn convert(magnitude: f64, from: MetricPrefix, to: MetricPrefix) -> f64 {
        convert(magnitude, from, to)
    }

    fn symbol(unit: MetricPrefix) -> Cow<'static, str> {
        Cow::Owned(format!("{}l", unit.glyph()))
    }

    fn erase(unit: MetricPrefix) -> AnyUnit {
        AnyUnit::MetricVolume(unit)
    }
}

impl Measure for MetricCubic {
    type Unit = MetricPrefix;

    const DIMENSION: Dimension = Dimension::MetricArea;

    fn convert(magnitude: f64, from: MetricPrefix, to: MetricPrefix) -> f64 {
        convert(magnitude, from, to)
    }

    fn symbol(unit: MetricPrefix) -> Cow<'static, str> {
        Cow::Owned(format!("{}m^3", unit.glyph()))
    }

    fn erase(unit: MetricPrefix) -> AnyUnit {
        AnyUnit::MetricArea(unit)
    }
}

pub type Distance = Measurement<MetricLength>;
pub type Volume = Measurement<MetricCapacity>;
pub type Area = Measurement<MetricCubic>;

impl Measurement<MetricLength> {
    pub fn picometers(&self) -> Distance {
        self.convert_to(MetricPrefix::Pico)
    }

    pub fn nanometers(&self) -> Distance {
        self.convert_to(MetricPrefix::Nano)
    }

    pub fn micrometers(&self) -> Distance {
        self.convert_to(MetricPrefix::Micro)
    }

    pub fn millimeters(&self) -> Distance {
        self.convert_to(MetricPrefix::Milli)
    }

    pub fn centimeters(&self) -> Distance {
        self.convert_to(MetricPrefix::Centi)
    }

    pub fn decimeters(&self) -> Distance {
        self.convert_to(MetricPrefix::Deci)
    }

    pub fn meters(&self) -> Distance {
        self.convert_to(MetricPrefix::Base)
    }

    pub fn decameters(&self) -> Distance {
        self.convert_to(MetricPrefix::Deca)
    }

    pub fn hectometers(&self) -> Distance {
        self.convert_to(MetricPrefix::Hecto)
    }

    pub fn kilometers(&self) -> Distance {
        self.convert_to(MetricPrefix::Kilo)
    }

    pub fn megameters(&self) -> Distance {
        self.convert_to(MetricPrefix::Mega)
    }

    pub fn gigameters(&self) -> Distance {
        self.convert_to(MetricPrefix::Giga)
    }

    pub fn terameters(&self) -> Distance {
        self.convert_to(MetricPrefix::Tera)
    }

    /// The same length in inches
    pub fn imperial(&self) -> Measurement<ImperialLength> {
        let inches = imperial::meters_to_inches(self.meters().magnitude());
        Measurement::new(inches, ImperialDistanceUnit::Inches)
    }
}

impl Measurement<MetricCapacity> {
    pub fn picoliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Pico)
    }

    pub fn nanoliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Nano)
    }

    pub fn microliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Micro)
    }

    pub fn milliliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Milli)
    }

    pub fn centiliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Centi)
    }

    pub fn deciliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Deci)
    }

    pub fn liters(&self) -> Volume {
        self.convert_to(MetricPrefix::Base)
    }

    pub fn decaliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Deca)
    }

    pub fn hectoliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Hecto)
    }

    pub fn kiloliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Kilo)
    }

    pub fn megaliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Mega)
    }

    pub fn gigaliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Giga)
    }

    pub fn teraliters(&self) -> Volume {
        self.convert_to(MetricPrefix::Tera)
    }

    /// The same volume in gallons
    pub fn imperial(&self) -> Measurement<ImperialCapacity> {
        let gallons = imperial::liters_to_gallons(self.liters().magnitude());
        Measurement::new(gallons, ImperialVolumeUnit::Gallons)
    }

    /// Cubic centimetres: one per millilitre
    pub fn cm3(&self) -> Area {
        Area::new(self.milliliters().magnitude(), MetricPrefix::Centi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_and_back() {
        assert_eq!(to_base(5.0, MetricPrefix::Kilo), 5000.0);
        assert_eq!(to_base(250.0, MetricPrefix::Centi), 2.5);
        assert_eq!(to_base(7.0, MetricPrefix::Base), 7.0);
        assert_eq!(from_base(5000.0, MetricPrefix::Kilo), 5.0);
        assert_eq!(from_base(1.0, MetricPrefix::Milli), 1000.0);
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert(1.0, MetricPrefix::Kilo, MetricPrefix::Milli), 1_000_000.0);
        assert_eq!(convert(1.0, MetricPrefix::Base, MetricPrefix::Pico), 1e12);
        assert_eq!(convert(1.0, MetricPrefix::Tera, MetricPrefix::Giga), 1000.0);
        assert_eq!(convert(3.0, MetricPrefix::Deca, MetricPrefix::Deca), 3.0);
    }

    #[test]
    fn test_round_trip() {
        let m = 42.125;
        for &from in &MetricPrefix::ALL {
            for &to in &MetricPrefix::ALL {
                let back = convert(convert(m, from, to), to, from);
                assert!(((back - m) / m).abs() < 1e-9, "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn test_prefix_glyphs() {
        assert_eq!(metric_prefix(MetricPrefix::Kilo), "k");
        assert_eq!(metric_prefix(MetricPrefix::Micro), "μ");
        assert_eq!(metric_prefix(MetricPrefix::Base), "");
    }

    #[test]
    fn test_distance_projections() {
        let d = Distance::new(1.5, MetricPrefix::Kilo);
        assert_eq!(d.meters().magnitude(), 1500.0);
        assert_eq!(d.centimeters().magnitude(), 150_000.0);
        assert_eq!(d.kilometers(), d);
        assert_eq!(d.to_string(), "1.5 km");
        assert_eq!(d.meters().to_string(), "1500.0 m");
    }

    #[test]
    fn test_volume_projections() {
        let v = Volume::new(2.0, MetricPrefix::Base);
        assert_eq!(v.milliliters().magnitude(), 2000.0);
        assert_eq!(v.deciliters().magnitude(), 20.0);
        assert_eq!(v.to_string(), "2.0 l");
    }

    #[test]
    fn test_cm3() {
        let v = Volume::new(0.25, MetricPrefix::Base);
        let cubic = v.cm3();
        assert_eq!(cubic.magnitude(), 250.0);
        assert_eq!(cubic.unit(), MetricPrefix::Centi);
        assert_eq!(cubic.to_string(), "250.0 cm^3");
    }

    #[test]
    fn test_to_imperial() {
        let inches = Distance::new(1.0, MetricPrefix::Base).imperial();
        assert_eq!(inches.unit(), ImperialDistanceUnit::Inches);
        assert!((inches.magnitude() - 39.37007874).abs() < 1e-9);

        let gallons = Volume::new(3.785411784, MetricPrefix::Base).imperial();
        assert_eq!(gallons.unit(), ImperialVolumeUnit::Gallons);
        assert!((gallons.magnitude() - 1.0).abs() < 1e-9);
    }
}
