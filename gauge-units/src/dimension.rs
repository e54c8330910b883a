//! Dimensions and the measure trait
//!
//! A dimension is a family of mutually convertible units. Every family has a
//! zero-sized marker type implementing [`Measure`]; that marker is what
//! [`Measurement`](crate::Measurement) is generic over, so a unit from the
//! wrong family is rejected by the type checker.

use std::borrow::Cow;
use std::fmt;
use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use crate::unit::AnyUnit;

/// Runtime tag for a unit family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Storage,
    Temperature,
    MetricDistance,
    MetricVolume,
    MetricArea,
    ImperialDistance,
    ImperialVolume,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Storage,
        Dimension::Temperature,
        Dimension::MetricDistance,
        Dimension::MetricVolume,
        Dimension::MetricArea,
        Dimension::ImperialDistance,
        Dimension::ImperialVolume,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Storage => "storage",
            Dimension::Temperature => "temperature",
            Dimension::MetricDistance => "metric distance",
            Dimension::MetricVolume => "metric volume",
            Dimension::MetricArea => "metric area",
            Dimension::ImperialDistance => "imperial distance",
            Dimension::ImperialVolume => "imperial volume",
        }
    }

    /// Look a dimension up by name. Accepts "metric distance",
    /// "metric_distance" and "metric-distance".
    pub fn from_name(name: &str) -> Option<Dimension> {
        let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
        Dimension::ALL.into_iter().find(|d| d.name() == normalized)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A unit family: its unit tag type and how magnitudes move between tags.
pub trait Measure: Copy + fmt::Debug + PartialEq + 'static {
    type Unit: Copy + Eq + fmt::Debug + Serialize + DeserializeOwned + 'static;

    const DIMENSION: Dimension;

    /// Convert a magnitude between two units of this family
    fn convert(magnitude: f64, from: Self::Unit, to: Self::Unit) -> f64;

    /// Display symbol of a unit in this family ("KB", "km", "°C")
    fn symbol(unit: Self::Unit) -> Cow<'static, str>;

    /// Erase the family into a runtime unit
    fn erase(unit: Self::Unit) -> AnyUnit;
}
