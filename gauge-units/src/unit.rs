//! Unit tags with their conversion metadata
//!
//! Each unit family is a plain enum. Metadata lives in a static table indexed
//! by the enum discriminant, so the table order must match the declaration
//! order (checked in tests).

use std::borrow::Cow;
use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;
use crate::dimension::{Dimension, Measure};
use crate::{imperial, metric, storage, temperature};

/// Metadata record for a unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInfo<U> {
    pub unit: U,
    /// Display symbol; the bare glyph for metric prefixes
    pub symbol: &'static str,
    /// Plural name; the prefix word for metric prefixes
    pub name: &'static str,
    /// Power-of-1024 exponent for storage, power-of-ten exponent for metric
    /// prefixes, ratio to the previous rung for imperial ladders. Unused for
    /// temperature.
    pub scale: i32,
}

const fn info<U>(unit: U, symbol: &'static str, name: &'static str, scale: i32) -> UnitInfo<U> {
    UnitInfo { unit, symbol, name, scale }
}

// ============ storage ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    Petabytes,
    Exabytes,
    Zettabytes,
    Yottabytes,
}

static STORAGE_UNITS: [UnitInfo<StorageUnit>; 9] = [
    info(StorageUnit::Bytes, "B", "bytes", 0),
    info(StorageUnit::Kilobytes, "KB", "kilobytes", 1),
    info(StorageUnit::Megabytes, "MB", "megabytes", 2),
    info(StorageUnit::Gigabytes, "GB", "gigabytes", 3),
    info(StorageUnit::Terabytes, "TB", "terabytes", 4),
    info(StorageUnit::Petabytes, "PB", "petabytes", 5),
    info(StorageUnit::Exabytes, "EB", "exabytes", 6),
    info(StorageUnit::Zettabytes, "ZB", "zettabytes", 7),
    info(StorageUnit::Yottabytes, "YB", "yottabytes", 8),
];

impl StorageUnit {
    pub const ALL: [StorageUnit; 9] = [
        StorageUnit::Bytes,
        StorageUnit::Kilobytes,
        StorageUnit::Megabytes,
        StorageUnit::Gigabytes,
        StorageUnit::Terabytes,
        StorageUnit::Petabytes,
        StorageUnit::Exabytes,
        StorageUnit::Zettabytes,
        StorageUnit::Yottabytes,
    ];

    pub fn info(self) -> &'static UnitInfo<StorageUnit> {
        &STORAGE_UNITS[self as usize]
    }

    pub fn suffix(self) -> &'static str {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Power of 1024 relative to bytes
    pub fn exponent(self) -> i32 {
        self.info().scale
    }

    /// Byte count below which a simplified size stays in this unit
    pub fn threshold(self) -> f64 {
        storage::STEP.powi(self.exponent() + 1)
    }
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

// ============ temperature ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

static TEMPERATURE_UNITS: [UnitInfo<TemperatureUnit>; 3] = [
    info(TemperatureUnit::Celsius, "°C", "celsius", 0),
    info(TemperatureUnit::Fahrenheit, "°F", "fahrenheit", 0),
    info(TemperatureUnit::Kelvin, "K", "kelvin", 0),
];

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn info(self) -> &'static UnitInfo<TemperatureUnit> {
        &TEMPERATURE_UNITS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============ metric prefixes ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPrefix {
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Base,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
}

static METRIC_PREFIXES: [UnitInfo<MetricPrefix>; 13] = [
    info(MetricPrefix::Pico, "p", "pico", -12),
    info(MetricPrefix::Nano, "n", "nano", -9),
    info(MetricPrefix::Micro, "μ", "micro", -6),
    info(MetricPrefix::Milli, "m", "milli", -3),
    info(MetricPrefix::Centi, "c", "centi", -2),
    info(MetricPrefix::Deci, "d", "deci", -1),
    info(MetricPrefix::Base, "", "", 0),
    info(MetricPrefix::Deca, "da", "deca", 1),
    info(MetricPrefix::Hecto, "h", "hecto", 2),
    info(MetricPrefix::Kilo, "k", "kilo", 3),
    info(MetricPrefix::Mega, "M", "mega", 6),
    info(MetricPrefix::Giga, "G", "giga", 9),
    info(MetricPrefix::Tera, "T", "tera", 12),
];

impl MetricPrefix {
    pub const ALL: [MetricPrefix; 13] = [
        MetricPrefix::Pico,
        MetricPrefix::Nano,
        MetricPrefix::Micro,
        MetricPrefix::Milli,
        MetricPrefix::Centi,
        MetricPrefix::Deci,
        MetricPrefix::Base,
        MetricPrefix::Deca,
        MetricPrefix::Hecto,
        MetricPrefix::Kilo,
        MetricPrefix::Mega,
        MetricPrefix::Giga,
        MetricPrefix::Tera,
    ];

    pub fn info(self) -> &'static UnitInfo<MetricPrefix> {
        &METRIC_PREFIXES[self as usize]
    }

    /// Prefix glyph ("k", "μ"); empty for the unprefixed base
    pub fn glyph(self) -> &'static str {
        self.info().symbol
    }

    /// Prefix word ("kilo"); empty for the unprefixed base
    pub fn word(self) -> &'static str {
        self.info().name
    }

    /// Power of ten relative to the base unit
    pub fn exponent(self) -> i32 {
        self.info().scale
    }
}

// ============ imperial distance ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImperialDistanceUnit {
    Inches,
    Feet,
    Yards,
    Miles,
}

static IMPERIAL_DISTANCE_UNITS: [UnitInfo<ImperialDistanceUnit>; 4] = [
    info(ImperialDistanceUnit::Inches, "in", "inches", 1),
    info(ImperialDistanceUnit::Feet, "ft", "feet", 12),
    info(ImperialDistanceUnit::Yards, "yd", "yards", 3),
    info(ImperialDistanceUnit::Miles, "mi", "miles", 1760),
];

impl ImperialDistanceUnit {
    /// Ladder order, smallest first
    pub const ALL: [ImperialDistanceUnit; 4] = [
        ImperialDistanceUnit::Inches,
        ImperialDistanceUnit::Feet,
        ImperialDistanceUnit::Yards,
        ImperialDistanceUnit::Miles,
    ];

    pub fn info(self) -> &'static UnitInfo<ImperialDistanceUnit> {
        &IMPERIAL_DISTANCE_UNITS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// How many of the previous rung make one of this unit
    pub fn step(self) -> f64 {
        f64::from(self.info().scale)
    }
}

impl fmt::Display for ImperialDistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============ imperial volume ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImperialVolumeUnit {
    Teaspoons,
    Tablespoons,
    FluidOunces,
    Gills,
    Cups,
    Pints,
    Quarts,
    Gallons,
}

static IMPERIAL_VOLUME_UNITS: [UnitInfo<ImperialVolumeUnit>; 8] = [
    info(ImperialVolumeUnit::Teaspoons, "tsp", "teaspoons", 1),
    info(ImperialVolumeUnit::Tablespoons, "Tbsp", "tablespoons", 3),
    info(ImperialVolumeUnit::FluidOunces, "fl oz", "fluid ounces", 2),
    info(ImperialVolumeUnit::Gills, "gill", "gills", 4),
    info(ImperialVolumeUnit::Cups, "cups", "cups", 2),
    info(ImperialVolumeUnit::Pints, "pints", "pints", 2),
    info(ImperialVolumeUnit::Quarts, "qt", "quarts", 2),
    info(ImperialVolumeUnit::Gallons, "gal", "gallons", 4),
];

impl ImperialVolumeUnit {
    /// Ladder order, smallest first
    pub const ALL: [ImperialVolumeUnit; 8] = [
        ImperialVolumeUnit::Teaspoons,
        ImperialVolumeUnit::Tablespoons,
        ImperialVolumeUnit::FluidOunces,
        ImperialVolumeUnit::Gills,
        ImperialVolumeUnit::Cups,
        ImperialVolumeUnit::Pints,
        ImperialVolumeUnit::Quarts,
        ImperialVolumeUnit::Gallons,
    ];

    pub fn info(self) -> &'static UnitInfo<ImperialVolumeUnit> {
        &IMPERIAL_VOLUME_UNITS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// How many of the previous rung make one of this unit
    pub fn step(self) -> f64 {
        f64::from(self.info().scale)
    }
}

impl fmt::Display for ImperialVolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============ runtime unit ============

/// A unit of any family, tagged with its dimension.
///
/// Metric prefixes appear three times because the same prefix table serves
/// distance, volume and the cubic-centimetre projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "unit", rename_all = "snake_case")]
pub enum AnyUnit {
    Storage(StorageUnit),
    Temperature(TemperatureUnit),
    MetricDistance(MetricPrefix),
    MetricVolume(MetricPrefix),
    MetricArea(MetricPrefix),
    ImperialDistance(ImperialDistanceUnit),
    ImperialVolume(ImperialVolumeUnit),
}

impl AnyUnit {
    pub fn dimension(&self) -> Dimension {
        match self {
            AnyUnit::Storage(_) => Dimension::Storage,
            AnyUnit::Temperature(_) => Dimension::Temperature,
            AnyUnit::MetricDistance(_) => Dimension::MetricDistance,
            AnyUnit::MetricVolume(_) => Dimension::MetricVolume,
            AnyUnit::MetricArea(_) => Dimension::MetricArea,
            AnyUnit::ImperialDistance(_) => Dimension::ImperialDistance,
            AnyUnit::ImperialVolume(_) => Dimension::ImperialVolume,
        }
    }

    pub fn symbol(&self) -> Cow<'static, str> {
        match *self {
            AnyUnit::Storage(u) => storage::DataSize::symbol(u),
            AnyUnit::Temperature(u) => temperature::Thermal::symbol(u),
            AnyUnit::MetricDistance(u) => metric::MetricLength::symbol(u),
            AnyUnit::MetricVolume(u) => metric::MetricCapacity::symbol(u),
            AnyUnit::MetricArea(u) => metric::MetricCubic::symbol(u),
            AnyUnit::ImperialDistance(u) => imperial::ImperialLength::symbol(u),
            AnyUnit::ImperialVolume(u) => imperial::ImperialCapacity::symbol(u),
        }
    }

    /// Plural unit name ("kilobytes", "centimeters", "fluid ounces")
    pub fn name(&self) -> String {
        match *self {
            AnyUnit::Storage(u) => u.name().to_string(),
            AnyUnit::Temperature(u) => u.name().to_string(),
            AnyUnit::MetricDistance(p) => format!("{}meters", p.word()),
            AnyUnit::MetricVolume(p) => format!("{}liters", p.word()),
            AnyUnit::MetricArea(p) => format!("cubic {}meters", p.word()),
            AnyUnit::ImperialDistance(u) => u.name().to_string(),
            AnyUnit::ImperialVolume(u) => u.name().to_string(),
        }
    }

    /// Every unit that has a symbol of its own. The cubic projection is left
    /// out; it only exists as `metric::Volume::cm3`.
    pub fn all() -> Vec<AnyUnit> {
        let mut units = Vec::new();
        units.extend(StorageUnit::ALL.map(AnyUnit::Storage));
        units.extend(TemperatureUnit::ALL.map(AnyUnit::Temperature));
        units.extend(MetricPrefix::ALL.map(AnyUnit::MetricDistance));
        units.extend(MetricPrefix::ALL.map(AnyUnit::MetricVolume));
        units.extend(ImperialDistanceUnit::ALL.map(AnyUnit::ImperialDistance));
        units.extend(ImperialVolumeUnit::ALL.map(AnyUnit::ImperialVolume));
        units
    }

    /// Same dimension, so a plain conversion applies
    pub fn is_compatible(&self, other: &AnyUnit) -> bool {
        self.dimension() == other.dimension()
    }

    /// Same dimension, or a metric/imperial pair joined by a bridge
    pub fn is_convertible(&self, other: &AnyUnit) -> bool {
        self.is_compatible(other) || bridged(self.dimension(), other.dimension())
    }

    /// The unit every magnitude of this dimension is routed through
    pub fn base(&self) -> AnyUnit {
        match self {
            AnyUnit::Storage(_) => AnyUnit::Storage(StorageUnit::Bytes),
            AnyUnit::Temperature(_) => AnyUnit::Temperature(TemperatureUnit::Kelvin),
            AnyUnit::MetricDistance(_) => AnyUnit::MetricDistance(MetricPrefix::Base),
            AnyUnit::MetricVolume(_) => AnyUnit::MetricVolume(MetricPrefix::Base),
            AnyUnit::MetricArea(_) => AnyUnit::MetricArea(MetricPrefix::Base),
            AnyUnit::ImperialDistance(_) => AnyUnit::ImperialDistance(ImperialDistanceUnit::Inches),
            AnyUnit::ImperialVolume(_) => AnyUnit::ImperialVolume(ImperialVolumeUnit::Teaspoons),
        }
    }

    /// Convert a value from this unit to `target`
    pub fn convert(&self, value: f64, target: &AnyUnit) -> Result<f64, ConversionError> {
        use AnyUnit::*;

        let converted = match (*self, *target) {
            (Storage(a), Storage(b)) => storage::DataSize::convert(value, a, b),
            (Temperature(a), Temperature(b)) => temperature::convert(value, a, b),
            (MetricDistance(a), MetricDistance(b))
            | (MetricVolume(a), MetricVolume(b))
            | (MetricArea(a), MetricArea(b)) => metric::convert(value, a, b),
            (ImperialDistance(a), ImperialDistance(b)) => imperial::convert_distance(value, a, b),
            (ImperialVolume(a), ImperialVolume(b)) => imperial::convert_volume(value, a, b),

            // Cross-system bridges
            (MetricDistance(a), ImperialDistance(b)) => {
                let inches = imperial::meters_to_inches(metric::to_base(value, a));
                imperial::from_inches(inches, b)
            }
            (ImperialDistance(a), MetricDistance(b)) => {
                let meters = imperial::inches_to_meters(imperial::to_inches(value, a));
                metric::from_base(meters, b)
            }
            (MetricVolume(a), ImperialVolume(b)) => {
                let gallons = imperial::liters_to_gallons(metric::to_base(value, a));
                imperial::convert_volume(gallons, ImperialVolumeUnit::Gallons, b)
            }
            (ImperialVolume(a), MetricVolume(b)) => {
                let gallons = imperial::convert_volume(value, a, ImperialVolumeUnit::Gallons);
                metric::from_base(imperial::gallons_to_liters(gallons), b)
            }

            (from, to) => {
                debug!(from = %from, to = %to, "rejected cross-dimension conversion");
                return Err(ConversionError::IncompatibleDimensions {
                    from: from.symbol().into_owned(),
                    to: to.symbol().into_owned(),
                    from_dim: from.dimension(),
                    to_dim: to.dimension(),
                });
            }
        };

        Ok(converted)
    }
}

fn bridged(a: Dimension, b: Dimension) -> bool {
    matches!(
        (a, b),
        (Dimension::MetricDistance, Dimension::ImperialDistance)
            | (Dimension::ImperialDistance, Dimension::MetricDistance)
            | (Dimension::MetricVolume, Dimension::ImperialVolume)
            | (Dimension::ImperialVolume, Dimension::MetricVolume)
    )
}

impl fmt::Display for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Errors from the runtime (string and [`AnyUnit`]) layer.
///
/// The typed API cannot fail: a unit of the wrong family does not type-check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("cannot simplify {unit}: only storage sizes have a best-fit unit, not {dimension}")]
    NotSimplifiable { unit: String, dimension: Dimension },

    #[error("{value} {from} does not fit in {to}: result is out of range")]
    OutOfRange { value: f64, from: String, to: String },
}
