//! Unit registry - symbol and alias lookup for every unit

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};
use crate::unit::{AnyUnit, ImperialDistanceUnit, ImperialVolumeUnit, MetricPrefix, StorageUnit, TemperatureUnit};
use crate::Dimension;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units.
///
/// Symbols are matched exactly ("Mm" is not "mm"); aliases are matched after
/// lowercasing the input.
pub struct UnitRegistry {
    units: HashMap<String, AnyUnit>,
    aliases: HashMap<String, AnyUnit>,
    order: Vec<AnyUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
        };
        registry.register_all_units();
        debug!(
            units = registry.order.len(),
            symbols = registry.units.len(),
            aliases = registry.aliases.len(),
            "unit registry built"
        );
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<AnyUnit> {
        let symbol = symbol.trim();
        if let Some(unit) = self.units.get(symbol) {
            return Some(*unit);
        }
        self.aliases.get(&symbol.to_lowercase()).copied()
    }

    /// All units of one dimension, in ladder order
    pub fn by_dimension(&self, dimension: Dimension) -> Vec<AnyUnit> {
        self.order.iter()
            .copied()
            .filter(|u| u.dimension() == dimension)
            .collect()
    }

    /// Every registered unit, in registration order
    pub fn all(&self) -> &[AnyUnit] {
        &self.order
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn register(&mut self, unit: AnyUnit) {
        self.order.push(unit);
        self.symbol(&unit.symbol(), unit);
    }

    fn symbol(&mut self, symbol: &str, unit: AnyUnit) {
        if let Some(previous) = self.units.insert(symbol.to_string(), unit) {
            warn!(symbol, %previous, %unit, "unit symbol registered twice");
        }
    }

    fn alias(&mut self, alias: &str, unit: AnyUnit) {
        if let Some(previous) = self.aliases.insert(alias.to_lowercase(), unit) {
            if previous != unit {
                warn!(alias, %previous, %unit, "unit alias registered twice");
            }
        }
    }

    fn register_all_units(&mut self) {
        self.register_storage_units();
        self.register_temperature_units();
        self.register_metric_distance_units();
        self.register_metric_volume_units();
        self.register_imperial_distance_units();
        self.register_imperial_volume_units();
    }

    fn register_storage_units(&mut self) {
        for unit in StorageUnit::ALL {
            let any = AnyUnit::Storage(unit);
            self.register(any);
            self.alias(unit.name(), any);
            self.alias(unit.name().trim_end_matches('s'), any);
        }
    }

    fn register_temperature_units(&mut self) {
        for unit in TemperatureUnit::ALL {
            let any = AnyUnit::Temperature(unit);
            self.register(any);
            self.alias(unit.name(), any);
        }
        self.symbol("C", AnyUnit::Temperature(TemperatureUnit::Celsius));
        self.symbol("F", AnyUnit::Temperature(TemperatureUnit::Fahrenheit));
        self.alias("degc", AnyUnit::Temperature(TemperatureUnit::Celsius));
        self.alias("degf", AnyUnit::Temperature(TemperatureUnit::Fahrenheit));
        self.alias("centigrade", AnyUnit::Temperature(TemperatureUnit::Celsius));
    }

    fn register_metric_distance_units(&mut self) {
        for prefix in MetricPrefix::ALL {
            let any = AnyUnit::MetricDistance(prefix);
            self.register(any);
            for stem in ["meter", "meters", "metre", "metres"] {
                self.alias(&format!("{}{}", prefix.word(), stem), any);
            }
        }
        self.symbol("um", AnyUnit::MetricDistance(MetricPrefix::Micro));
        self.alias("micron", AnyUnit::MetricDistance(MetricPrefix::Micro));
        self.alias("microns", AnyUnit::MetricDistance(MetricPrefix::Micro));
    }

    fn register_metric_volume_units(&mut self) {
        for prefix in MetricPrefix::ALL {
            let any = AnyUnit::MetricVolume(prefix);
            self.register(any);
            self.symbol(&format!("{}L", prefix.glyph()), any);
            for stem in ["liter", "liters", "litre", "litres"] {
                self.alias(&format!("{}{}", prefix.word(), stem), any);
            }
        }
        self.symbol("ul", AnyUnit::MetricVolume(MetricPrefix::Micro));
        self.symbol("uL", AnyUnit::MetricVolume(MetricPrefix::Micro));
    }

    fn register_imperial_distance_units(&mut self) {
        use ImperialDistanceUnit::*;

        for unit in ImperialDistanceUnit::ALL {
            let any = AnyUnit::ImperialDistance(unit);
            self.register(any);
            self.alias(unit.name(), any);
        }
        self.alias("inch", AnyUnit::ImperialDistance(Inches));
        self.alias("foot", AnyUnit::ImperialDistance(Feet));
        self.alias("yard", AnyUnit::ImperialDistance(Yards));
        self.alias("mile", AnyUnit::ImperialDistance(Miles));
    }

    fn register_imperial_volume_units(&mut self) {
        use ImperialVolumeUnit::*;

        for unit in ImperialVolumeUnit::ALL {
            let any = AnyUnit::ImperialVolume(unit);
            self.register(any);
            self.alias(unit.name(), any);
        }
        self.symbol("tbsp", AnyUnit::ImperialVolume(Tablespoons));
        self.symbol("floz", AnyUnit::ImperialVolume(FluidOunces));
        self.symbol("cup", AnyUnit::ImperialVolume(Cups));
        self.symbol("pt", AnyUnit::ImperialVolume(Pints));
        self.alias("teaspoon", AnyUnit::ImperialVolume(Teaspoons));
        self.alias("tablespoon", AnyUnit::ImperialVolume(Tablespoons));
        self.alias("fluid ounce", AnyUnit::ImperialVolume(FluidOunces));
        self.alias("gill", AnyUnit::ImperialVolume(Gills));
        self.alias("pint", AnyUnit::ImperialVolume(Pints));
        self.alias("quart", AnyUnit::ImperialVolume(Quarts));
        self.alias("gallon", AnyUnit::ImperialVolume(Gallons));
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
