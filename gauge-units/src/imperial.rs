//! Imperial distance and volume ladders
//!
//! Each family climbs a fixed ladder from its smallest unit (inches,
//! teaspoons). Going up multiplies by each rung's step, going down divides,
//! always passing through the canonical unit.

use std::borrow::Cow;
use crate::dimension::{Dimension, Measure};
use crate::measurement::Measurement;
use crate::metric::{MetricCapacity, MetricLength};
use crate::unit::{AnyUnit, ImperialDistanceUnit, ImperialVolumeUnit, MetricPrefix};

pub const INCHES_PER_METER: f64 = 39.37007874;
pub const GALLONS_PER_LITER: f64 = 0.26417205235815;

pub fn inches_to_meters(inches: f64) -> f64 {
    inches / INCHES_PER_METER
}

pub fn meters_to_inches(meters: f64) -> f64 {
    meters * INCHES_PER_METER
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons / GALLONS_PER_LITER
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters * GALLONS_PER_LITER
}

// ============ distance ============

pub fn to_inches(magnitude: f64, unit: ImperialDistanceUnit) -> f64 {
    ImperialDistanceUnit::ALL[..=unit as usize]
        .iter()
        .fold(magnitude, |acc, rung| acc * rung.step())
}

pub fn from_inches(inches: f64, target: ImperialDistanceUnit) -> f64 {
    ImperialDistanceUnit::ALL[..=target as usize]
        .iter()
        .fold(inches, |acc, rung| acc / rung.step())
}

pub fn convert_distance(magnitude: f64, from: ImperialDistanceUnit, to: ImperialDistanceUnit) -> f64 {
    from_inches(to_inches(magnitude, from), to)
}

// ============ volume ============

pub fn to_teaspoons(magnitude: f64, unit: ImperialVolumeUnit) -> f64 {
    ImperialVolumeUnit::ALL[..=unit as usize]
        .iter()
        .fold(magnitude, |acc, rung| acc * rung.step())
}

pub fn from_teaspoons(teaspoons: f64, target: ImperialVolumeUnit) -> f64 {
    ImperialVolumeUnit::ALL[..=target as usize]
        .iter()
        .fold(teaspoons, |acc, rung| acc / rung.step())
}

pub fn convert_volume(magnitude: f64, from: ImperialVolumeUnit, to: ImperialVolumeUnit) -> f64 {
    from_teaspoons(to_teaspoons(magnitude, from), to)
}

// ============ measurement types ============

/// Marker for imperial distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImperialLength;

/// Marker for imperial volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImperialCapacity;

impl Measure for ImperialLength {
    type Unit = ImperialDistanceUnit;

    const DIMENSION: Dimension = Dimension::ImperialDistance;

    fn convert(magnitude: f64, from: ImperialDistanceUnit, to: ImperialDistanceUnit) -> f64 {
        convert_distance(magnitude, from, to)
    }

    fn symbol(unit: ImperialDistanceUnit) -> Cow<'static, str> {
        Cow::Borrowed(unit.symbol())
    }

    fn erase(unit: ImperialDistanceUnit) -> AnyUnit {
        AnyUnit::ImperialDistance(unit)
    }
}

impl Measure for ImperialCapacity {
    type Unit = ImperialVolumeUnit;

    const DIMENSION: Dimension = Dimension::ImperialVolume;

    fn convert(magnitude: f64, from: ImperialVolumeUnit, to: ImperialVolumeUnit) -> f64 {
        convert_volume(magnitude, from, to)
    }

    fn symbol(unit: ImperialVolumeUnit) -> Cow<'static, str> {
        Cow::Borrowed(unit.symbol())
    }

    fn erase(unit: ImperialVolumeUnit) -> AnyUnit {
        AnyUnit::ImperialVolume(unit)
    }
}

pub type Distance = Measurement<ImperialLength>;
pub type Volume = Measurement<ImperialCapacity>;

impl Measurement<ImperialLength> {
    pub fn inches(&self) -> Distance {
        self.convert_to(ImperialDistanceUnit::Inches)
    }

    pub fn feet(&self) -> Distance {
        self.convert_to(ImperialDistanceUnit::Feet)
    }

    pub fn yards(&self) -> Distance {
        self.convert_to(ImperialDistanceUnit::Yards)
    }

    pub fn miles(&self) -> Distance {
        self.convert_to(ImperialDistanceUnit::Miles)
    }

    /// The same length in meters
    pub fn metric(&self) -> Measurement<MetricLength> {
        let meters = inches_to_meters(self.inches().magnitude());
        Measurement::new(meters, MetricPrefix::Base)
    }
}

impl Measurement<ImperialCapacity> {
    pub fn teaspoons(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Teaspoons)
    }

    pub fn tablespoons(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Tablespoons)
    }

    pub fn fluid_ounces(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::FluidOunces)
    }

    pub fn gills(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Gills)
    }

    pub fn cups(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Cups)
    }

    pub fn pints(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Pints)
    }

    pub fn quarts(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Quarts)
    }

    pub fn gallons(&self) -> Volume {
        self.convert_to(ImperialVolumeUnit::Gallons)
    }

    /// The same volume in liters
    pub fn metric(&self) -> Measurement<MetricCapacity> {
        let liters = gallons_to_liters(self.gallons().magnitude());
        Measurement::new(liters, MetricPrefix::Base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric;

    #[test]
    fn test_distance_ladder() {
        assert_eq!(to_inches(1.0, ImperialDistanceUnit::Miles), 63360.0);
        assert_eq!(to_inches(2.0, ImperialDistanceUnit::Feet), 24.0);
        assert_eq!(from_inches(36.0, ImperialDistanceUnit::Yards), 1.0);
        assert_eq!(convert_distance(3.0, ImperialDistanceUnit::Feet, ImperialDistanceUnit::Yards), 1.0);
    }

    #[test]
    fn test_distance_projections() {
        assert_eq!(Distance::new(1.0, ImperialDistanceUnit::Miles).feet().magnitude(), 5280.0);
        assert_eq!(Distance::new(36.0, ImperialDistanceUnit::Inches).yards().magnitude(), 1.0);
        assert_eq!(Distance::new(1760.0, ImperialDistanceUnit::Yards).miles().magnitude(), 1.0);
        let d = Distance::new(4.0, ImperialDistanceUnit::Feet);
        assert_eq!(d.feet(), d);
    }

    #[test]
    fn test_volume_ladder() {
        assert_eq!(Volume::new(1.0, ImperialVolumeUnit::Gallons).teaspoons().magnitude(), 768.0);
        assert_eq!(Volume::new(1.0, ImperialVolumeUnit::Cups).fluid_ounces().magnitude(), 8.0);
        assert_eq!(Volume::new(2.0, ImperialVolumeUnit::Pints).quarts().magnitude(), 1.0);
        assert_eq!(Volume::new(3.0, ImperialVolumeUnit::Teaspoons).tablespoons().magnitude(), 1.0);
        assert_eq!(Volume::new(1.0, ImperialVolumeUnit::Gills).tablespoons().magnitude(), 8.0);
    }

    #[test]
    fn test_round_trip() {
        let m = 17.3;
        for &from in &ImperialVolumeUnit::ALL {
            for &to in &ImperialVolumeUnit::ALL {
                let back = convert_volume(convert_volume(m, from, to), to, from);
                assert!(((back - m) / m).abs() < 1e-9);
            }
        }
        for &from in &ImperialDistanceUnit::ALL {
            for &to in &ImperialDistanceUnit::ALL {
                let back = convert_distance(convert_distance(m, from, to), to, from);
                assert!(((back - m) / m).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_bridges() {
        assert!((meters_to_inches(1.0) - 39.37007874).abs() < 1e-12);
        assert!((inches_to_meters(39.37007874) - 1.0).abs() < 1e-12);
        assert!((gallons_to_liters(1.0) - 3.785411784).abs() < 1e-6);
        assert!((liters_to_gallons(gallons_to_liters(2.0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_metric_distance_round_trip() {
        let meter = metric::Distance::new(1.0, MetricPrefix::Base);
        let inches = meter.imperial().inches();
        assert!((inches.magnitude() - 39.37007874).abs() < 1e-9);
        let back = inches.metric();
        assert_eq!(back.unit(), MetricPrefix::Base);
        assert!((back.magnitude() - 1.0).abs() < 1e-12);

        let mile = Distance::new(1.0, ImperialDistanceUnit::Miles).metric().kilometers();
        assert!((mile.magnitude() - 1.609344).abs() < 1e-6);
    }

    #[test]
    fn test_metric_volume() {
        let gallon = Volume::new(1.0, ImperialVolumeUnit::Gallons).metric();
        assert!((gallon.liters().magnitude() - 3.785411784).abs() < 1e-6);

        let cup = Volume::new(1.0, ImperialVolumeUnit::Cups).metric().milliliters();
        assert!((cup.magnitude() - 236.5882365).abs() < 1e-3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Volume::new(2.0, ImperialVolumeUnit::FluidOunces).to_string(), "2.0 fl oz");
        assert_eq!(Distance::new(3.0, ImperialDistanceUnit::Yards).to_string(), "3.0 yd");
    }
}
