//! Sensor catalog
//!
//! The API accepts readings for a configured set of sensor types; requests
//! naming anything else get a 404. Each sensor carries a default unit
//! applied to readings that omit one.

use serde::{Deserialize, Serialize};

/// One known sensor type and its default unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensorSpec {
    /// Identifier used in URLs and storage (e.g., "temperature")
    pub name: String,
    /// Default unit for readings that omit one
    pub unit: String,
}

impl SensorSpec {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}

/// The set of sensor types the server accepts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SensorCatalog {
    sensors: Vec<SensorSpec>,
}

impl Default for SensorCatalog {
    fn default() -> Self {
        Self {
            sensors: vec![
                SensorSpec::new("temperature", "C"),
                SensorSpec::new("humidity", "%"),
                SensorSpec::new("light", "lux"),
            ],
        }
    }
}

impl SensorCatalog {
    pub fn new(sensors: Vec<SensorSpec>) -> Self {
        Self { sensors }
    }

    /// Whether a sensor type is known
    pub fn contains(&self, name: &str) -> bool {
        self.sensors.iter().any(|s| s.name == name)
    }

    /// Look up a sensor by name
    pub fn get(&self, name: &str) -> Option<&SensorSpec> {
        self.sensors.iter().find(|s| s.name == name)
    }

    /// Default unit for a sensor, if known
    pub fn unit_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.unit.as_str())
    }

    /// Iterate over the configured sensors
    pub fn iter(&self) -> impl Iterator<Item = &SensorSpec> {
        self.sensors.iter()
    }

    /// Names of the configured sensors
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sensors.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = SensorCatalog::default();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("temperature"));
        assert!(catalog.contains("humidity"));
        assert!(catalog.contains("light"));
        assert!(!catalog.contains("pressure"));
    }

    #[test]
    fn test_unit_lookup() {
        let catalog = SensorCatalog::default();

        assert_eq!(catalog.unit_for("temperature"), Some("C"));
        assert_eq!(catalog.unit_for("humidity"), Some("%"));
        assert_eq!(catalog.unit_for("light"), Some("lux"));
        assert_eq!(catalog.unit_for("pressure"), None);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = SensorCatalog::new(vec![SensorSpec::new("pressure", "hPa")]);

        assert!(catalog.contains("pressure"));
        assert!(!catalog.contains("temperature"));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["pressure"]);
    }

    #[test]
    fn test_catalog_toml_shape() {
        // Array-of-tables form used by the config file
        let parsed: Vec<SensorSpec> = toml::from_str::<toml::Value>(
            "[[sensors]]\nname = \"temperature\"\nunit = \"C\"\n",
        )
        .unwrap()
        .get("sensors")
        .cloned()
        .map(|v| v.try_into().unwrap())
        .unwrap();

        assert_eq!(parsed, vec![SensorSpec::new("temperature", "C")]);
    }
}
