//! Resolved rule settings consumed by the catalog.
//!
//! Loading and merging configuration files is the job of `gitnext-config`;
//! this module only describes the already-resolved shape and how parameters
//! fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single rule parameter as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Integer view. Floats truncate toward zero; anything else is `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// Rule id → parameter name → value.
pub type ParamStore = BTreeMap<String, BTreeMap<String, ParamValue>>;

/// Everything the catalog needs from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub protected_branches: Vec<String>,
    pub disabled: BTreeSet<String>,
    pub parameters: ParamStore,
}

impl RuleSettings {
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.contains(rule_id)
    }

    fn param(&self, rule_id: &str, name: &str) -> Option<&ParamValue> {
        self.parameters.get(rule_id)?.get(name)
    }

    /// Integer parameter, or `default` when absent or not numeric.
    pub fn int_param(&self, rule_id: &str, name: &str, default: i64) -> i64 {
        self.param(rule_id, name)
            .and_then(ParamValue::as_int)
            .unwrap_or(default)
    }

    /// Non-negative count parameter, or `default` when absent, not numeric,
    /// or negative.
    pub fn count_param(&self, rule_id: &str, name: &str, default: u32) -> u32 {
        self.param(rule_id, name)
            .and_then(ParamValue::as_int)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn set_param(&mut self, rule_id: &str, name: &str, value: impl Into<ParamValue>) {
        self.parameters
            .entry(rule_id.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_param_falls_back_when_absent() {
        let settings = RuleSettings::default();
        assert_eq!(settings.int_param("R020", "max_commits", 3), 3);
    }

    #[test]
    fn int_param_reads_int_and_float() {
        let mut settings = RuleSettings::default();
        settings.set_param("R020", "max_commits", 5);
        assert_eq!(settings.int_param("R020", "max_commits", 3), 5);

        settings
            .parameters
            .get_mut("R020")
            .unwrap()
            .insert("max_commits".into(), ParamValue::Float(7.9));
        assert_eq!(settings.int_param("R020", "max_commits", 3), 7);
    }

    #[test]
    fn wrong_shape_uses_default() {
        let mut settings = RuleSettings::default();
        settings.set_param("R020", "max_commits", "lots");
        assert_eq!(settings.int_param("R020", "max_commits", 3), 3);
        assert_eq!(settings.count_param("R020", "max_commits", 3), 3);
    }

    #[test]
    fn negative_count_uses_default() {
        let mut settings = RuleSettings::default();
        settings.set_param("R022", "min_commits", -2);
        assert_eq!(settings.count_param("R022", "min_commits", 4), 4);
    }

    #[test]
    fn untagged_values_deserialize() {
        let settings: RuleSettings = serde_json::from_value(serde_json::json!({
            "disabled": ["R008"],
            "parameters": {
                "R020": { "max_commits": 2 },
                "R048": { "max_days": 21.0, "base": "develop" }
            }
        }))
        .unwrap();
        assert!(settings.is_disabled("R008"));
        assert!(!settings.is_disabled("R009"));
        assert_eq!(settings.int_param("R020", "max_commits", 3), 2);
        assert_eq!(settings.int_param("R048", "max_days", 14), 21);
        assert_eq!(
            settings.parameters["R048"]["base"],
            ParamValue::Text("develop".into())
        );
    }
}
