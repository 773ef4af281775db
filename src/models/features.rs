//! Prediction inputs.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Named numeric inputs for one prediction call.
///
/// Entries keep insertion order and names are unique; serialization produces
/// the flat JSON map the predict endpoint expects. Transient: built per
/// request from live readings or manual form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    entries: Vec<(String, f64)>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a reading.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only readings whose name appears in `allowed`, in `allowed`
    /// order. Unknown reading names are ignored for forward compatibility
    /// with backend feature changes.
    pub fn from_readings(readings: &HashMap<String, f64>, allowed: &[String]) -> Self {
        let mut set = Self::new();
        for name in allowed {
            if let Some(value) = readings.get(name) {
                set.insert(name.clone(), *value);
            }
        }
        set
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, f64)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_readings_filters_and_preserves_feature_order() {
        let readings = HashMap::from([
            ("pm25".to_string(), 40.0),
            ("pm10".to_string(), 60.0),
            ("unknown_gas".to_string(), 3.0),
        ]);
        let allowed = vec!["pm10".to_string(), "pm25".to_string(), "o3".to_string()];
        let set = FeatureSet::from_readings(&readings, &allowed);

        let names: Vec<&str> = set.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["pm10", "pm25"]);
        assert_eq!(set.get("unknown_gas"), None);
    }

    #[test]
    fn insert_replaces_existing_entries() {
        let mut set = FeatureSet::new();
        set.insert("pm25", 10.0);
        set.insert("pm25", 12.5);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("pm25"), Some(12.5));
    }

    #[test]
    fn serializes_as_a_flat_map() {
        let set: FeatureSet = [("pm25".to_string(), 40.0), ("pm10".to_string(), 60.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&set).expect("serializable");
        assert_eq!(json, serde_json::json!({"pm25": 40.0, "pm10": 60.0}));
    }
}
