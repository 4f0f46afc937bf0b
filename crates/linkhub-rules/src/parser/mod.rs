//! Tolerant decoding of links and rules from self-describing documents.

pub mod value;

pub use value::{coerce_count, link_from_value, rule_from_value, rules_from_value};
