//! Rule evaluation and ranking engine for linkhub.
//!
//! Decides which of a hub's links a visitor sees and in what order. Each
//! link carries visibility rules keyed by device class, country and local
//! hour. Rules of the same type are alternatives; different types must all
//! hold.
//!
//! # Architecture
//!
//! - **Rules**: `Rule` (device, location, time, unknown) and `Link`
//! - **Matchers**: `KeywordMatcher` (Aho-Corasick) for user agents,
//!   `HourWindow` for wrap-aware time windows
//! - **Engine**: `is_visible` filters, `rank` orders by priority, clicks
//!   and label
//! - **Normalization**: `normalize` keeps the newest rule of each type
//! - **Context**: `ContextResolver` derives a `VisitorContext` from request
//!   facts
//! - **Providers**: file-based hub snapshots (JSON, YAML, TOML)
//! - **Analytics**: visit/click summaries with CTR
//!
//! # Example
//!
//! ```
//! use linkhub_rules::{rank, DeviceClass, Link, Rule, VisitorContext};
//!
//! let links = vec![
//!     Link::new("1", "Blog", "https://blog.example"),
//!     Link::new("2", "App", "https://app.example")
//!         .with_priority(2)
//!         .with_rule(Rule::device("mobile")),
//!     Link::new("3", "Night", "https://night.example")
//!         .with_rule(Rule::time(22, 5)),
//! ];
//!
//! let ctx = VisitorContext::new(DeviceClass::Mobile, "US", 14);
//! let ranked = rank(&links, &ctx);
//! let labels: Vec<&str> = ranked.iter().map(|l| l.label.as_str()).collect();
//! assert_eq!(labels, ["App", "Blog"]);
//! ```

pub mod analytics;
pub mod collate;
pub mod context;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod provider;
pub mod rule;

pub use analytics::{HubStats, LinkStats, format_ctr, summarize};
pub use context::{AgentClassifier, Clock, ContextResolver, RequestFacts};
pub use engine::{compare_links, is_visible, rank, rank_view, rule_matches};
pub use error::RulesError;
pub use normalize::{normalize, prepare_for_sync};
pub use provider::{FileProvider, HubSnapshot};
pub use rule::{DeviceClass, Link, PublicLink, Rule, RuleType, VisitorContext};
