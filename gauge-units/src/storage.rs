//! Storage sizes in powers of 1024
//!
//! Bytes are the canonical unit; every other unit is `1024^exponent` bytes.
//! [`simplify`] picks the most readable unit for a raw size.

use std::borrow::Cow;
use tracing::trace;
use crate::dimension::{Dimension, Measure};
use crate::measurement::Measurement;
use crate::unit::{AnyUnit, StorageUnit};

pub(crate) const STEP: f64 = 1024.0;

/// Marker for the storage family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSize;

impl Measure for DataSize {
    type Unit = StorageUnit;

    const DIMENSION: Dimension = Dimension::Storage;

    fn convert(magnitude: f64, from: StorageUnit, to: StorageUnit) -> f64 {
        from_bytes(to_bytes(magnitude, from), to)
    }

    fn symbol(unit: StorageUnit) -> Cow<'static, str> {
        Cow::Borrowed(unit.suffix())
    }

    fn erase(unit: StorageUnit) -> AnyUnit {
        AnyUnit::Storage(unit)
    }
}

pub type Storage = Measurement<DataSize>;

pub fn to_bytes(magnitude: f64, unit: StorageUnit) -> f64 {
    magnitude * STEP.powi(unit.exponent())
}

pub fn from_bytes(bytes: f64, target: StorageUnit) -> f64 {
    bytes / STEP.powi(target.exponent())
}

pub fn convert(magnitude: f64, from: StorageUnit, to: StorageUnit) -> Storage {
    Storage::new(DataSize::convert(magnitude, from, to), to)
}

/// Re-express a size in the smallest unit whose threshold it stays under,
/// falling back to yottabytes. Zero and negative sizes land on bytes.
pub fn simplify(magnitude: f64, unit: StorageUnit) -> Storage {
    let bytes = to_bytes(magnitude, unit);
    let target = StorageUnit::ALL
        .into_iter()
        .find(|candidate| bytes < candidate.threshold())
        .unwrap_or(StorageUnit::Yottabytes);

    trace!(bytes, unit = %target, "simplified storage size");
    Storage::new(from_bytes(bytes, target), target)
}

impl Measurement<DataSize> {
    pub fn simplified(&self) -> Storage {
        simplify(self.magnitude(), self.unit())
    }

    pub fn bytes(&self) -> Storage {
        self.convert_to(StorageUnit::Bytes)
    }

    pub fn kilobytes(&self) -> Storage {
        self.convert_to(StorageUnit::Kilobytes)
    }

    pub fn megabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Megabytes)
    }

    pub fn gigabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Gigabytes)
    }

    pub fn terabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Terabytes)
    }

    pub fn petabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Petabytes)
    }

    pub fn exabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Exabytes)
    }

    pub fn zettabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Zettabytes)
    }

    pub fn yottabytes(&self) -> Storage {
        self.convert_to(StorageUnit::Yottabytes)
    }
}
