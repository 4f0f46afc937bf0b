//! `serde_json::Value` walker that turns stored documents into links and rules.
//!
//! Stored data is owner-edited and may predate the current schema, so this
//! decoder never rejects a rule: numbers that are missing or malformed become
//! `0`, strings become `""`, and unknown rule types are carried through.

use serde_json::{Map, Value};

use crate::rule::{DeviceRule, Link, LocationRule, Rule, TimeRule, UnknownRule};

/// Decode a link document. Returns `None` if `value` is not an object.
///
/// The identifier is read from `id`, falling back to the document key `_id`
/// (plain string, number, or `{"$oid": "..."}`).
pub fn link_from_value(value: &Value) -> Option<Link> {
    let obj = value.as_object()?;

    Some(Link {
        id: coerce_id(obj.get("id").or_else(|| obj.get("_id"))),
        label: coerce_string(obj.get("label")),
        url: coerce_string(obj.get("url")),
        priority: coerce_count(obj.get("priority")),
        click_count: coerce_count(obj.get("clickCount")),
        rules: obj.get("rules").map(rules_from_value).unwrap_or_default(),
    })
}

/// Decode a rule list. Anything other than an array is an empty list.
pub fn rules_from_value(value: &Value) -> Vec<Rule> {
    match value {
        Value::Array(items) => items.iter().map(rule_from_value).collect(),
        _ => Vec::new(),
    }
}

/// Decode one rule. Never fails.
pub fn rule_from_value(value: &Value) -> Rule {
    let Some(obj) = value.as_object() else {
        return Rule::Unknown(UnknownRule::new(value.clone()));
    };

    let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    let empty = Map::new();
    let config = obj.get("config").and_then(Value::as_object).unwrap_or(&empty);

    match kind {
        "device" => Rule::Device(DeviceRule {
            allowed_device: coerce_string(config.get("allowedDevice")),
        }),
        "location" => Rule::Location(LocationRule {
            allowed_country: coerce_string(config.get("allowedCountry")),
        }),
        "time" => Rule::Time(TimeRule {
            start_hour: coerce_hour(config.get("startHour")),
            end_hour: coerce_hour(config.get("endHour")),
        }),
        _ => Rule::Unknown(UnknownRule::new(value.clone())),
    }
}

/// Coerce a counter-like field (priority, click count, visit count).
///
/// Accepts integers, floats (truncated) and numeric strings. Missing,
/// non-numeric, negative and non-finite input is `0`.
pub fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| float_to_count(n.as_f64())),
        Some(Value::String(s)) => float_to_count(s.trim().parse::<f64>().ok()),
        Some(Value::Bool(b)) => u64::from(*b),
        _ => 0,
    }
}

fn float_to_count(f: Option<f64>) -> u64 {
    match f {
        // `as` saturates at u64::MAX
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

fn coerce_hour(value: Option<&Value>) -> i64 {
    let f = match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return i;
            }
            n.as_f64()
        }
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => return i64::from(*b),
        _ => None,
    };
    match f {
        Some(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(obj)) => coerce_string(obj.get("$oid")),
        other => coerce_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_full_link() {
        let value = json!({
            "_id": {"$oid": "65f0c0ffee0000000000abcd"},
            "label": "Portfolio",
            "url": "https://me.example",
            "priority": 3,
            "clickCount": 12,
            "rules": [
                {"type": "device", "config": {"allowedDevice": "mobile"}},
                {"type": "time", "config": {"startHour": 9, "endHour": 17}}
            ]
        });
        let link = link_from_value(&value).unwrap();
        assert_eq!(link.id, "65f0c0ffee0000000000abcd");
        assert_eq!(link.label, "Portfolio");
        assert_eq!(link.priority, 3);
        assert_eq!(link.click_count, 12);
        assert_eq!(link.rules, vec![Rule::device("mobile"), Rule::time(9, 17)]);
    }

    #[test]
    fn counters_coerce_to_zero() {
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_count(Some(&json!("abc"))), 0);
        assert_eq!(coerce_count(Some(&json!(-4))), 0);
        assert_eq!(coerce_count(Some(&json!(null))), 0);
        assert_eq!(coerce_count(Some(&json!({"n": 1}))), 0);
    }

    #[test]
    fn counters_accept_numeric_forms() {
        assert_eq!(coerce_count(Some(&json!(5))), 5);
        assert_eq!(coerce_count(Some(&json!("7"))), 7);
        assert_eq!(coerce_count(Some(&json!(" 2.9 "))), 2);
        assert_eq!(coerce_count(Some(&json!(3.7))), 3);
        assert_eq!(coerce_count(Some(&json!(true))), 1);
    }

    #[test]
    fn missing_link_fields_default() {
        let link = link_from_value(&json!({})).unwrap();
        assert_eq!(link, Link::default());
    }

    #[test]
    fn non_object_link_is_rejected() {
        assert!(link_from_value(&json!([1, 2])).is_none());
        assert!(link_from_value(&json!(null)).is_none());
    }

    #[test]
    fn time_rule_missing_fields_default_to_zero() {
        let rule = rule_from_value(&json!({"type": "time"}));
        assert_eq!(rule, Rule::time(0, 0));

        let rule = rule_from_value(&json!({"type": "time", "config": {"startHour": "21"}}));
        assert_eq!(rule, Rule::time(21, 0));
    }

    #[test]
    fn device_rule_missing_field_is_empty() {
        let rule = rule_from_value(&json!({"type": "device", "config": {}}));
        assert_eq!(rule, Rule::device(""));
    }

    #[test]
    fn unrecognized_rules_are_kept() {
        let rule = rule_from_value(&json!({"type": "weather", "config": {"sunny": true}}));
        match rule {
            Rule::Unknown(u) => {
                assert_eq!(u.kind(), Some("weather"));
                assert_eq!(u.raw(), &json!({"type": "weather", "config": {"sunny": true}}));
            }
            other => panic!("expected unknown rule, got {other:?}"),
        }

        let rule = rule_from_value(&json!("device"));
        assert!(matches!(rule, Rule::Unknown(ref u) if u.kind().is_none()));
    }

    #[test]
    fn type_match_is_case_sensitive() {
        let rule = rule_from_value(&json!({"type": "Device", "config": {"allowedDevice": "mobile"}}));
        assert!(matches!(rule, Rule::Unknown(ref u) if u.kind() == Some("Device")));
    }

    #[test]
    fn rules_field_not_an_array() {
        let link = link_from_value(&json!({"label": "x", "rules": "device"})).unwrap();
        assert!(link.rules.is_empty());
    }
}
