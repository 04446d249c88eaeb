use crate::config::CONFIG_ATTR;
use crate::{ConfigError, CounterState};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use web_sys::Element;

/// Raw attribute text as found on the mount element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttributes {
    pub config: Option<String>,
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl RawAttributes {
    pub fn from_element(element: &Element) -> Self {
        Self {
            config: element.get_attribute(CONFIG_ATTR),
            value: element.get_attribute("value"),
            min: element.get_attribute("min"),
            max: element.get_attribute("max"),
        }
    }
}

/// Optional JSON form of the configuration, e.g. `{"value": 3, "max": 25}`.
#[derive(Debug, Deserialize)]
struct JsonConfig {
    value: Option<Value>,
    min: Option<Value>,
    max: Option<Value>,
}

/// Only a JSON object is accepted; arrays would otherwise bind by position.
fn parse_json_config(text: &str) -> Result<JsonConfig, ConfigError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(ConfigError::InvalidJson(format!(
            "expected an object, got {}",
            value
        )));
    }
    serde_json::from_value(value).map_err(|e| ConfigError::InvalidJson(e.to_string()))
}

/// Coerce one attribute's text into an integer.
///
/// Missing or blank text yields `default`. Integral floats such as `"7.0"` are
/// accepted; fractional or non-numeric text is an error.
pub fn coerce_attribute(text: Option<&str>, default: i64, field: &str) -> Result<i64, ConfigError> {
    let trimmed = match text.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(t) => t,
    };

    if let Ok(val) = trimmed.parse::<i64>() {
        return Ok(val);
    }

    match trimmed.parse::<f64>() {
        Ok(val) => integral(val).ok_or_else(|| ConfigError::NotAnInteger {
            field: field.to_string(),
            text: trimmed.to_string(),
        }),
        Err(_) => Err(ConfigError::NotANumber {
            field: field.to_string(),
            text: trimmed.to_string(),
        }),
    }
}

fn integral(val: f64) -> Option<i64> {
    if val.is_finite() && val.fract() == 0.0 && val.abs() < i64::MAX as f64 {
        Some(val as i64)
    } else {
        None
    }
}

fn coerce_json(value: &Value, default: i64, field: &str) -> Result<i64, ConfigError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(|| ConfigError::NotAnInteger {
                field: field.to_string(),
                text: n.to_string(),
            }),
        Value::String(s) => coerce_attribute(Some(s), default, field),
        other => Err(ConfigError::NotANumber {
            field: field.to_string(),
            text: other.to_string(),
        }),
    }
}

/// Build the initial state from raw attributes.
///
/// Explicit attributes win over the JSON config. A malformed field keeps
/// whatever it had before (JSON value or default) and the error is returned
/// alongside the state.
pub fn parse_counter_config(raw: &RawAttributes) -> (CounterState, Vec<ConfigError>) {
    let mut errors = Vec::new();
    let mut state = CounterState::default();

    if let Some(text) = raw.config.as_deref().filter(|t| !t.trim().is_empty()) {
        match parse_json_config(text) {
            Ok(json) => {
                let fields = [
                    (json.value, "value", &mut state.value),
                    (json.min, "min", &mut state.min),
                    (json.max, "max", &mut state.max),
                ];
                for (val, field, slot) in fields {
                    if let Some(val) = val {
                        match coerce_json(&val, *slot, field) {
                            Ok(v) => *slot = v,
                            Err(e) => errors.push(e),
                        }
                    }
                }
            }
            Err(e) => errors.push(e),
        }
    }

    let fields = [
        (raw.value.as_deref(), "value", &mut state.value),
        (raw.min.as_deref(), "min", &mut state.min),
        (raw.max.as_deref(), "max", &mut state.max),
    ];
    for (text, field, slot) in fields {
        match coerce_attribute(text, *slot, field) {
            Ok(v) => *slot = v,
            Err(e) => errors.push(e),
        }
    }

    (state, errors)
}

/// `parse_counter_config`, logging every rejected field.
pub fn counter_state_from_attributes(raw: &RawAttributes) -> CounterState {
    let (state, errors) = parse_counter_config(raw);
    for err in &errors {
        warn!("{}; ignoring it", err);
    }
    if state.min > state.max {
        warn!("Counter min {} is above max {}", state.min, state.max);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_VALUE};

    fn attrs(value: Option<&str>, min: Option<&str>, max: Option<&str>) -> RawAttributes {
        RawAttributes {
            config: None,
            value: value.map(String::from),
            min: min.map(String::from),
            max: max.map(String::from),
        }
    }

    #[test]
    fn coerces_trimmed_and_integral_text() {
        assert_eq!(coerce_attribute(Some(" 7 "), 0, "value"), Ok(7));
        assert_eq!(coerce_attribute(Some("-3"), 0, "min"), Ok(-3));
        assert_eq!(coerce_attribute(Some("7.0"), 0, "max"), Ok(7));
        assert_eq!(coerce_attribute(Some("1e1"), 0, "max"), Ok(10));
    }

    #[test]
    fn blank_or_missing_uses_default() {
        assert_eq!(coerce_attribute(None, 4, "value"), Ok(4));
        assert_eq!(coerce_attribute(Some("   "), 4, "value"), Ok(4));
    }

    #[test]
    fn rejects_non_numbers_and_fractions() {
        assert!(matches!(
            coerce_attribute(Some("abc"), 0, "max"),
            Err(ConfigError::NotANumber { .. })
        ));
        assert!(matches!(
            coerce_attribute(Some("7.5"), 0, "max"),
            Err(ConfigError::NotAnInteger { .. })
        ));
        assert!(coerce_attribute(Some("NaN"), 0, "max").is_err());
        assert!(coerce_attribute(Some("inf"), 0, "max").is_err());
    }

    #[test]
    fn no_attributes_gives_defaults() {
        let (state, errors) = parse_counter_config(&RawAttributes::default());
        assert_eq!(state, CounterState::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn bad_field_falls_back_alone() {
        let (state, errors) = parse_counter_config(&attrs(Some("20"), Some("0"), Some("lots")));
        assert_eq!(state, CounterState::new(20, 0, DEFAULT_MAX));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn json_config_is_overridden_by_attributes() {
        let raw = RawAttributes {
            config: Some(r#"{"value": 3, "min": 1, "max": 25.0}"#.to_string()),
            value: Some("5".to_string()),
            min: None,
            max: None,
        };
        let (state, errors) = parse_counter_config(&raw);
        assert!(errors.is_empty());
        assert_eq!(state, CounterState::new(5, 1, 25));
    }

    #[test]
    fn json_strings_are_coerced_too() {
        let raw = RawAttributes {
            config: Some(r#"{"max": " 30 "}"#.to_string()),
            ..Default::default()
        };
        let (state, errors) = parse_counter_config(&raw);
        assert!(errors.is_empty());
        assert_eq!(state.max, 30);
    }

    #[test]
    fn malformed_json_is_ignored() {
        let raw = RawAttributes {
            config: Some("{value: 3".to_string()),
            max: Some("12".to_string()),
            ..Default::default()
        };
        let (state, errors) = parse_counter_config(&raw);
        assert_eq!(state, CounterState::new(DEFAULT_VALUE, DEFAULT_MIN, 12));
        assert!(matches!(errors.as_slice(), [ConfigError::InvalidJson(_)]));
    }

    #[test]
    fn bad_json_field_keeps_default() {
        let raw = RawAttributes {
            config: Some(r#"{"min": true, "max": 4.5}"#.to_string()),
            ..Default::default()
        };
        let (state, errors) = parse_counter_config(&raw);
        assert_eq!(state, CounterState::default());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn json_array_config_is_rejected() {
        let raw = RawAttributes {
            config: Some("[3, 1, 25]".to_string()),
            ..Default::default()
        };
        let (state, errors) = parse_counter_config(&raw);
        assert_eq!(state, CounterState::default());
        assert!(matches!(errors.as_slice(), [ConfigError::InvalidJson(_)]));
    }

    #[test]
    fn json_scalar_config_is_rejected() {
        let raw = RawAttributes {
            config: Some("21".to_string()),
            value: Some("4".to_string()),
            ..Default::default()
        };
        let (state, errors) = parse_counter_config(&raw);
        assert_eq!(state.value, 4);
        assert_eq!(errors.len(), 1);
    }
}
