//! Quantity type - a value with a runtime unit

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::measurement::write_magnitude;
use crate::unit::{AnyUnit, ConversionError};
use crate::{storage, Dimension};

/// A value whose unit is only known at runtime (parsed from text, read off
/// the wire). Conversions can fail here, unlike on [`Measurement`](crate::Measurement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: AnyUnit,
}

impl Quantity {
    pub fn new(value: f64, unit: AnyUnit) -> Self {
        Quantity { value, unit }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Convert to another unit, crossing between metric and imperial where a
    /// bridge exists
    pub fn convert_to(&self, target: &AnyUnit) -> Result<Quantity, ConversionError> {
        let value = self.unit.convert(self.value, target)?;
        self.finite(Quantity::new(value, *target))
    }

    /// Express in the unit this dimension routes through
    pub fn to_base(&self) -> Result<Quantity, ConversionError> {
        self.convert_to(&self.unit.base())
    }

    /// Best-fit unit for a storage size
    pub fn simplify(&self) -> Result<Quantity, ConversionError> {
        match self.unit {
            AnyUnit::Storage(unit) => self.finite(storage::simplify(self.value, unit).erase()),
            other => Err(ConversionError::NotSimplifiable {
                unit: other.symbol().into_owned(),
                dimension: other.dimension(),
            }),
        }
    }

    /// A finite input can overflow on the way to a small unit
    fn finite(&self, result: Quantity) -> Result<Quantity, ConversionError> {
        if result.value.is_finite() {
            Ok(result)
        } else {
            Err(ConversionError::OutOfRange {
                value: self.value,
                from: self.unit.symbol().into_owned(),
                to: result.unit.symbol().into_owned(),
            })
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_magnitude(f, self.value)?;
        write!(f, " {}", self.unit)
    }
}
