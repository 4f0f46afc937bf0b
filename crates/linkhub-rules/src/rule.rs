//! Link, rule and visitor-context type definitions.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RulesError;
use crate::parser;

/// Payload of a `device` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRule {
    /// `"mobile"` or `"desktop"`. Any other value never matches.
    pub allowed_device: String,
}

/// Payload of a `location` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRule {
    /// Country code compared verbatim against the visitor's country.
    ///
    /// `"ALL"` is not a wildcard: it only matches a visitor whose resolved
    /// country is literally `"ALL"`. Omit the rule to allow every country.
    pub allowed_country: String,
}

/// Payload of a `time` rule: a half-open `[start_hour, end_hour)` window that
/// wraps past midnight when `start_hour > end_hour`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRule {
    pub start_hour: i64,
    pub end_hour: i64,
}

/// A rule of a type this engine does not evaluate.
///
/// Holds the stored entry verbatim so a sync writes it back unchanged; it
/// never hides a link.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownRule {
    raw: serde_json::Value,
}

impl UnknownRule {
    pub fn new(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    /// The entry's `type` string, if it has one.
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("type").and_then(serde_json::Value::as_str)
    }

    /// The stored entry as it was read.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// A visibility precondition attached to a link.
///
/// Serialized as `{ "type": ..., "config": { ... } }`. Deserialization never
/// fails: missing config fields take their defaults and unrecognized types
/// become [`Rule::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Device(DeviceRule),
    Location(LocationRule),
    Time(TimeRule),
    Unknown(UnknownRule),
}

/// The type tag of a rule, used to group rules on a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType<'a> {
    Device,
    Location,
    Time,
    Unknown(&'a str),
    /// An entry without a string `type`. Each one is its own group.
    Untyped,
}

impl RuleType<'_> {
    /// The wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            RuleType::Device => "device",
            RuleType::Location => "location",
            RuleType::Time => "time",
            RuleType::Unknown(kind) => kind,
            RuleType::Untyped => "",
        }
    }
}

impl fmt::Display for RuleType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Rule {
    /// A `device` rule allowing only `allowed`.
    pub fn device(allowed: impl Into<String>) -> Self {
        Rule::Device(DeviceRule {
            allowed_device: allowed.into(),
        })
    }

    /// A `location` rule allowing only `country`.
    pub fn location(country: impl Into<String>) -> Self {
        Rule::Location(LocationRule {
            allowed_country: country.into(),
        })
    }

    /// A `time` rule for the window `[start_hour, end_hour)`.
    pub fn time(start_hour: i64, end_hour: i64) -> Self {
        Rule::Time(TimeRule {
            start_hour,
            end_hour,
        })
    }

    pub fn rule_type(&self) -> RuleType<'_> {
        match self {
            Rule::Device(_) => RuleType::Device,
            Rule::Location(_) => RuleType::Location,
            Rule::Time(_) => RuleType::Time,
            Rule::Unknown(u) => match u.kind() {
                Some(kind) => RuleType::Unknown(kind),
                None => RuleType::Untyped,
            },
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Rule::Unknown(u) = self {
            return u.raw.serialize(serializer);
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.rule_type().as_str())?;
        match self {
            Rule::Device(cfg) => map.serialize_entry("config", cfg)?,
            Rule::Location(cfg) => map.serialize_entry("config", cfg)?,
            Rule::Time(cfg) => map.serialize_entry("config", cfg)?,
            Rule::Unknown(_) => {}
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(parser::rule_from_value(&value))
    }
}

/// A candidate destination on a hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub label: String,
    pub url: String,
    /// Ranking weight; higher sorts first.
    pub priority: u64,
    /// Owned by the click tracker; the engine only reads it.
    pub click_count: u64,
    pub rules: Vec<Rule>,
}

impl Link {
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: u64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_clicks(mut self, click_count: u64) -> Self {
        self.click_count = click_count;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        parser::link_from_value(&value).ok_or_else(|| D::Error::custom("link entry must be an object"))
    }
}

/// The fields of a link a public visitor gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

impl From<&Link> for PublicLink {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.clone(),
            label: link.label.clone(),
            url: link.url.clone(),
        }
    }
}

/// Device class derived from the visitor's user agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(DeviceClass::Mobile),
            "desktop" => Ok(DeviceClass::Desktop),
            other => Err(RulesError::Parse(format!("unknown device class: {other}"))),
        }
    }
}

/// Per-request facts rules are evaluated against. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorContext {
    pub device: DeviceClass,
    /// Best-effort country code; the configured unknown marker when unresolved.
    pub country: String,
    /// Visitor's local hour, 0–23.
    pub time_hour: u8,
}

impl VisitorContext {
    pub fn new(device: DeviceClass, country: impl Into<String>, time_hour: u8) -> Self {
        Self {
            device,
            country: country.into(),
            time_hour,
        }
    }
}
