//! String-level conversion functions
//!
//! Thin entry points for callers holding unit symbols rather than typed
//! units: they parse, check dimensions and hand back a [`Quantity`].

use serde::Serialize;
use crate::parse::{parse_conversion, parse_unit};
use crate::quantity::Quantity;
use crate::unit::{AnyUnit, ConversionError};
use crate::Dimension;

/// Convert a value between two units given by symbol or name
///
/// ```
/// let feet = gauge_units::convert(1.0, "mi", "ft").unwrap();
/// assert_eq!(feet.value, 5280.0);
/// ```
pub fn convert(value: f64, from: &str, to: &str) -> Result<Quantity, ConversionError> {
    let from = parse_unit(from)?;
    let to = parse_unit(to)?;
    Quantity::new(value, from).convert_to(&to)
}

/// Evaluate a query like "5 km to mi"
pub fn convert_query(query: &str) -> Result<Quantity, ConversionError> {
    let (value, from, to) = parse_conversion(query)?;
    Quantity::new(value, from).convert_to(&to)
}

/// Best-fit unit for a storage size
pub fn simplify(value: f64, unit: &str) -> Result<Quantity, ConversionError> {
    Quantity::new(value, parse_unit(unit)?).simplify()
}

/// Express a value in the unit its dimension routes through
pub fn to_base(value: f64, unit: &str) -> Result<Quantity, ConversionError> {
    Quantity::new(value, parse_unit(unit)?).to_base()
}

/// Whether two units share a dimension
pub fn compatible(a: &str, b: &str) -> Result<bool, ConversionError> {
    Ok(parse_unit(a)?.is_compatible(&parse_unit(b)?))
}

/// Whether a value can move between two units, directly or over a
/// metric/imperial bridge
pub fn convertible(a: &str, b: &str) -> Result<bool, ConversionError> {
    Ok(parse_unit(a)?.is_convertible(&parse_unit(b)?))
}

/// Listing entry for a unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDescription {
    pub symbol: String,
    pub name: String,
    pub dimension: Dimension,
}

pub fn describe(unit: &AnyUnit) -> UnitDescription {
    UnitDescription {
        symbol: unit.symbol().into_owned(),
        name: unit.name(),
        dimension: unit.dimension(),
    }
}
