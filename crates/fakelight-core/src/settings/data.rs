use serde_json::{Map, Value};

use crate::error::SettingsError;

/// JSON-backed settings object.
///
/// Reads fall back from the user value to the default, then to the type's
/// zero value. A value of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsData {
    values: Map<String, Value>,
    defaults: Map<String, Value>,
}

impl SettingsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses user values from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(values) => Ok(Self {
                values,
                defaults: Map::new(),
            }),
            _ => Err(SettingsError::NotAnObject),
        }
    }

    /// Serializes the user values; defaults are not persisted.
    pub fn to_json(&self) -> String {
        Value::Object(self.values.clone()).to_string()
    }

    fn lookup(&self, key: &str) -> impl Iterator<Item = &Value> {
        self.values.get(key).into_iter().chain(self.defaults.get(key))
    }

    pub fn get_string(&self, key: &str) -> &str {
        self.lookup(key).find_map(Value::as_str).unwrap_or("")
    }

    pub fn get_double(&self, key: &str) -> f64 {
        self.lookup(key).find_map(Value::as_f64).unwrap_or(0.0)
    }

    /// Integer value; a float is truncated toward zero.
    pub fn get_int(&self, key: &str) -> i64 {
        self.lookup(key)
            .find_map(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.lookup(key).find_map(Value::as_bool).unwrap_or(false)
    }

    pub fn has_user_value(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_default_string(&mut self, key: &str, value: &str) {
        self.defaults.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_default_double(&mut self, key: &str, value: f64) {
        self.defaults.insert(key.to_owned(), Value::from(value));
    }

    pub fn set_default_int(&mut self, key: &str, value: i64) {
        self.defaults.insert(key.to_owned(), Value::from(value));
    }

    /// Removes the user value, exposing the default again.
    pub fn erase(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_value_wins_over_default() {
        let mut s = SettingsData::new();
        s.set_default_double("intensity", 1.0);
        assert_eq!(s.get_double("intensity"), 1.0);

        s.set_double("intensity", 2.5);
        assert_eq!(s.get_double("intensity"), 2.5);

        s.erase("intensity");
        assert_eq!(s.get_double("intensity"), 1.0);
    }

    #[test]
    fn missing_keys_read_as_zero() {
        let s = SettingsData::new();
        assert_eq!(s.get_string("source"), "");
        assert_eq!(s.get_double("contrast"), 0.0);
        assert_eq!(s.get_int("partitions"), 0);
        assert!(!s.get_bool("enabled"));
    }

    #[test]
    fn wrong_type_falls_through_to_default() {
        let mut s = SettingsData::new();
        s.set_default_int("partitions", 8);
        s.set_string("partitions", "many");
        assert_eq!(s.get_int("partitions"), 8);
    }

    #[test]
    fn int_reads_accept_floats() {
        let mut s = SettingsData::new();
        s.set_double("sub_divisions", 3.9);
        assert_eq!(s.get_int("sub_divisions"), 3);
    }

    #[test]
    fn json_keeps_user_values_only() {
        let mut s = SettingsData::from_json(r#"{"source":"LightA","intensity":2.0}"#).unwrap();
        s.set_default_int("partitions", 8);
        assert_eq!(s.get_string("source"), "LightA");

        let reloaded = SettingsData::from_json(&s.to_json()).unwrap();
        assert_eq!(reloaded.get_double("intensity"), 2.0);
        assert_eq!(reloaded.get_int("partitions"), 0);
    }

    #[test]
    fn json_root_must_be_an_object() {
        assert!(matches!(SettingsData::from_json("[1, 2]"), Err(SettingsError::NotAnObject)));
        assert!(matches!(SettingsData::from_json("{"), Err(SettingsError::Json(_))));
    }
}
