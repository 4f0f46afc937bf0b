//! File-based hub snapshot provider.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RulesError;
use crate::parser;
use crate::rule::Link;

/// A hub and its links as exported by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSnapshot {
    pub title: String,
    pub description: String,
    pub visit_count: u64,
    pub links: Vec<Link>,
}

/// Provider that loads hub snapshots from local files.
pub struct FileProvider;

impl FileProvider {
    /// Load and parse a snapshot, picking the format from the file extension
    /// (`json`, `yaml`/`yml` or `toml`).
    pub fn load(path: &Path) -> Result<HubSnapshot, RulesError> {
        let format = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::parse(&content, format)?;
        debug!(
            path = %path.display(),
            links = snapshot.links.len(),
            "loaded hub snapshot"
        );
        Ok(snapshot)
    }

    /// Parse snapshot content from a string.
    ///
    /// The document is either a bare array of links or an object with
    /// optional `title`, `description`, `visitCount` and a `links` array.
    /// Link entries that are not objects are skipped.
    pub fn parse(content: &str, format: &str) -> Result<HubSnapshot, RulesError> {
        let value: Value = match format {
            "json" => serde_json::from_str(content)?,
            "yaml" | "yml" => serde_yaml::from_str(content)?,
            "toml" => toml::from_str(content)?,
            _ => return Err(RulesError::UnsupportedFormat(format.to_string())),
        };
        snapshot_from_value(&value)
    }
}

fn snapshot_from_value(value: &Value) -> Result<HubSnapshot, RulesError> {
    match value {
        Value::Array(items) => Ok(HubSnapshot {
            links: links_from_items(items),
            ..HubSnapshot::default()
        }),
        Value::Object(obj) => {
            let links = match obj.get("links") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => links_from_items(items),
                Some(_) => return Err(RulesError::Parse("'links' must be an array".into())),
            };
            Ok(HubSnapshot {
                title: obj
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                description: obj
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                visit_count: parser::coerce_count(obj.get("visitCount")),
                links,
            })
        }
        _ => Err(RulesError::Parse(
            "snapshot must be an array of links or an object".into(),
        )),
    }
}

fn links_from_items(items: &[Value]) -> Vec<Link> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let link = parser::link_from_value(item);
            if link.is_none() {
                warn!(index, "skipping link entry that is not an object");
            }
            link
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::rule::Rule;

    #[test]
    fn parse_json_array() {
        let content = r#"[
            {"id": "1", "label": "Blog", "url": "https://blog.example", "priority": 2},
            {"id": "2", "label": "Shop", "url": "https://shop.example", "clickCount": 4}
        ]"#;
        let snapshot = FileProvider::parse(content, "json").unwrap();
        assert_eq!(snapshot.links.len(), 2);
        assert_eq!(snapshot.visit_count, 0);
        assert_eq!(snapshot.links[0].priority, 2);
        assert_eq!(snapshot.links[1].click_count, 4);
    }

    #[test]
    fn parse_json_object() {
        let content = r#"{
            "title": "My hub",
            "visitCount": "40",
            "links": [
                {"id": "1", "label": "Blog", "url": "https://blog.example",
                 "rules": [{"type": "location", "config": {"allowedCountry": "IN"}}]},
                42
            ]
        }"#;
        let snapshot = FileProvider::parse(content, "json").unwrap();
        assert_eq!(snapshot.title, "My hub");
        assert_eq!(snapshot.description, "");
        assert_eq!(snapshot.visit_count, 40);
        assert_eq!(snapshot.links.len(), 1);
        assert_eq!(snapshot.links[0].rules, vec![Rule::location("IN")]);
    }

    #[test]
    fn parse_yaml() {
        let content = r#"
title: Night owl
links:
  - id: a
    label: Late show
    url: https://late.example
    rules:
      - type: time
        config: { startHour: 22, endHour: 5 }
"#;
        let snapshot = FileProvider::parse(content, "yaml").unwrap();
        assert_eq!(snapshot.links[0].rules, vec![Rule::time(22, 5)]);
    }

    #[test]
    fn parse_toml() {
        let content = r#"
title = "Toml hub"
visitCount = 3

[[links]]
id = "a"
label = "Docs"
url = "https://docs.example"
priority = 1

[[links.rules]]
type = "device"
config = { allowedDevice = "desktop" }
"#;
        let snapshot = FileProvider::parse(content, "toml").unwrap();
        assert_eq!(snapshot.visit_count, 3);
        assert_eq!(snapshot.links[0].rules, vec![Rule::device("desktop")]);
    }

    #[test]
    fn unsupported_format() {
        let result = FileProvider::parse("", "csv");
        assert!(matches!(result, Err(RulesError::UnsupportedFormat(_))));
    }

    #[test]
    fn links_must_be_array() {
        let result = FileProvider::parse(r#"{"links": {"id": "1"}}"#, "json");
        assert!(matches!(result, Err(RulesError::Parse(_))));
    }

    #[test]
    fn scalar_document_rejected() {
        assert!(FileProvider::parse("7", "json").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"label": "Only"}}]"#).unwrap();
        let snapshot = FileProvider::load(file.path()).unwrap();
        assert_eq!(snapshot.links[0].label, "Only");
    }

    #[test]
    fn load_missing_file() {
        let result = FileProvider::load(Path::new("/nonexistent/hub.json"));
        assert!(matches!(result, Err(RulesError::Io(_))));
    }
}
