//! Visitor-context derivation from raw request facts.
//!
//! The page-view collaborator hands over whatever it knows about the request
//! (user agent, geo-resolved country, a visitor-supplied hour) and gets back
//! the [`VisitorContext`] the engine evaluates rules against.

use std::fmt;
use std::str::FromStr;

use time::OffsetDateTime;
use tracing::debug;

use crate::error::RulesError;
use crate::matcher::KeywordMatcher;
use crate::rule::{DeviceClass, VisitorContext};

/// Classifies user agents by device class and crawler status.
#[derive(Debug)]
pub struct AgentClassifier {
    mobile: Option<KeywordMatcher>,
    bots: Option<KeywordMatcher>,
}

impl AgentClassifier {
    /// Build a classifier from keyword lists. Empty lists never match.
    pub fn new<S: AsRef<str>>(
        mobile_keywords: &[S],
        bot_keywords: &[S],
    ) -> Result<Self, RulesError> {
        Ok(Self {
            mobile: KeywordMatcher::new(mobile_keywords)?,
            bots: KeywordMatcher::new(bot_keywords)?,
        })
    }

    /// Build a classifier with the built-in keyword lists.
    pub fn with_defaults() -> Result<Self, RulesError> {
        Self::new(
            linkhub_core::DEFAULT_MOBILE_KEYWORDS,
            linkhub_core::DEFAULT_BOT_KEYWORDS,
        )
    }

    /// Mobile if the user agent contains any mobile keyword, desktop otherwise.
    pub fn classify(&self, user_agent: &str) -> DeviceClass {
        if self.mobile.as_ref().is_some_and(|m| m.matches(user_agent)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Returns true if the user agent looks like a crawler.
    pub fn is_bot(&self, user_agent: &str) -> bool {
        self.bots.as_ref().is_some_and(|m| m.matches(user_agent))
    }
}

/// Clock used for the fallback hour when the visitor did not send one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Server local time; UTC when the local offset cannot be determined.
    #[default]
    Local,
    Utc,
}

impl Clock {
    /// The current hour on this clock.
    pub fn hour(self) -> u8 {
        let now = match self {
            Clock::Local => OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            Clock::Utc => OffsetDateTime::now_utc(),
        };
        now.hour()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Clock::Local => "local",
            Clock::Utc => "utc",
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Clock {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Clock::Local),
            "utc" => Ok(Clock::Utc),
            other => Err(RulesError::Parse(format!("unknown clock: {other}"))),
        }
    }
}

/// What the page-view collaborator knows about one request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFacts<'a> {
    pub user_agent: Option<&'a str>,
    /// Country code from geo resolution, if any.
    pub country: Option<&'a str>,
    /// Raw visitor-supplied local hour, e.g. an `X-Visitor-Hour` header value.
    pub visitor_hour: Option<&'a str>,
}

/// Turns [`RequestFacts`] into a [`VisitorContext`].
#[derive(Debug)]
pub struct ContextResolver {
    classifier: AgentClassifier,
    unknown_country: String,
    clock: Clock,
}

impl ContextResolver {
    pub fn new(classifier: AgentClassifier, unknown_country: impl Into<String>, clock: Clock) -> Self {
        Self {
            classifier,
            unknown_country: unknown_country.into(),
            clock,
        }
    }

    pub fn classifier(&self) -> &AgentClassifier {
        &self.classifier
    }

    /// Resolve the context, reading the clock only if the visitor hour is
    /// missing or unusable.
    pub fn resolve(&self, facts: &RequestFacts<'_>) -> VisitorContext {
        let supplied = facts.visitor_hour.and_then(parse_visitor_hour);
        let hour = supplied.unwrap_or_else(|| self.clock.hour());
        self.build(facts, hour)
    }

    /// Resolve the context with an explicit fallback hour.
    pub fn resolve_at(&self, facts: &RequestFacts<'_>, fallback_hour: u8) -> VisitorContext {
        let hour = facts
            .visitor_hour
            .and_then(parse_visitor_hour)
            .unwrap_or(fallback_hour);
        self.build(facts, hour)
    }

    fn build(&self, facts: &RequestFacts<'_>, hour: u8) -> VisitorContext {
        let device = self.classifier.classify(facts.user_agent.unwrap_or(""));
        let country = match facts.country.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => self.unknown_country.clone(),
        };
        debug!(device = %device, country = %country, hour, "resolved visitor context");
        VisitorContext::new(device, country, hour)
    }
}

/// Parse a visitor-supplied hour.
///
/// Reads a leading integer (trailing text such as `"14h"` is ignored) and
/// accepts 0–23. Anything else is `None`.
pub fn parse_visitor_hour(raw: &str) -> Option<u8> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix(['+', '-']) {
        Some(rest) => (&raw[..1], rest),
        None => ("", raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || sign == "-" {
        return None;
    }
    let hour: u32 = digits[..end].parse().ok()?;
    u8::try_from(hour).ok().filter(|h| *h < 24)
}
