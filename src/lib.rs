//! # linkhub
//!
//! Rule-based visibility and ranking for link-in-bio hubs.
//!
//! ## Crates
//!
//! - [`linkhub_core`] - Shared defaults and project metadata
//! - [`linkhub_rules`] - Rules, ranking, normalization, visitor context, analytics
//! - [`linkhub_config`] - Configuration loading and validation

pub mod cli;

pub use linkhub_config as config;
pub use linkhub_core as core;
pub use linkhub_rules as rules;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use linkhub_config::{Config, load_config, validate_config};
    pub use linkhub_rules::{
        ContextResolver, DeviceClass, Link, Rule, RulesError, VisitorContext, normalize, rank,
        summarize,
    };
}
