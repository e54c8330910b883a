//! Gauge Units - typed measurement conversion
//!
//! Immutable measurements that pair a magnitude with a unit, and pure
//! conversions between units of the same family.
//!
//! Families:
//! - Storage (B, KB, MB, ... YB), powers of 1024, with best-fit simplify
//! - Temperature (°C, °F, K)
//! - Metric distance and volume (pm ... Tm, pl ... Tl), plus the cm^3 projection
//! - Imperial distance (in, ft, yd, mi)
//! - Imperial volume (tsp, Tbsp, fl oz, gill, cups, pints, qt, gal)
//!
//! Metric and imperial distance/volume are joined by fixed bridges
//! (39.37007874 in/m, 0.26417205235815 gal/l).
//!
//! The typed API ([`Measurement`] and its aliases) cannot fail. The runtime
//! API ([`AnyUnit`], [`Quantity`], the string functions) reports unknown
//! symbols and cross-dimension requests as [`ConversionError`].

mod dimension;
mod unit;
mod measurement;
mod quantity;
mod parse;
mod units;
mod convert;

pub mod storage;
pub mod temperature;
pub mod metric;
pub mod imperial;

pub use dimension::{Dimension, Measure};
pub use unit::{
    AnyUnit, ConversionError, ImperialDistanceUnit, ImperialVolumeUnit, MetricPrefix,
    StorageUnit, TemperatureUnit, UnitInfo,
};
pub use measurement::Measurement;
pub use quantity::Quantity;
pub use storage::Storage;
pub use temperature::Temperature;
pub use units::{UnitRegistry, UNITS};
pub use parse::{parse_conversion, parse_quantity_string, parse_unit};
pub use convert::{
    compatible, convert, convert_query, convertible, describe, simplify, to_base,
    UnitDescription,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_conversions() {
        let s = storage::simplify(1536.0, StorageUnit::Bytes);
        assert_eq!(s.to_string(), "1.5 KB");

        assert_eq!(imperial::Distance::new(1.0, ImperialDistanceUnit::Miles).feet().magnitude(), 5280.0);
        assert_eq!(imperial::Volume::new(1.0, ImperialVolumeUnit::Gallons).teaspoons().magnitude(), 768.0);

        let inches = metric::Distance::new(1.0, MetricPrefix::Base).imperial().inches();
        assert!((inches.magnitude() - 39.37007874).abs() < 1e-9);
    }

    #[test]
    fn test_typed_and_runtime_agree() {
        let typed = Temperature::new(451.0, TemperatureUnit::Fahrenheit).celsius();
        let runtime = convert(451.0, "°F", "°C").unwrap();
        assert_eq!(typed.erase(), runtime);
    }

    #[test]
    fn test_batch_projection() {
        let sizes: Vec<Storage> = [512.0, 2048.0, 5e9]
            .iter()
            .map(|&b| storage::simplify(b, StorageUnit::Bytes))
            .collect();
        let units: Vec<StorageUnit> = sizes.iter().map(|s| s.unit()).collect();
        assert_eq!(units, vec![StorageUnit::Bytes, StorageUnit::Kilobytes, StorageUnit::Gigabytes]);
    }
}
