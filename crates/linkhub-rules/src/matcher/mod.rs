//! Matchers backing individual rule predicates and user-agent sniffing.

pub mod agent;
pub mod time;

pub use agent::KeywordMatcher;
pub use time::HourWindow;
