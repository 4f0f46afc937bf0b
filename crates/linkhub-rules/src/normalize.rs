//! Rule normalization applied when an owner saves a link.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::rule::{Link, Rule, RuleType};

/// Keep only the newest rule of each type.
///
/// Input order is chronological, so the last rule of a type wins. Survivors
/// keep the relative order of their positions in `rules`. Entries without a
/// type are all kept. Idempotent.
pub fn normalize(rules: &[Rule]) -> Vec<Rule> {
    let mut seen = FxHashSet::default();
    let mut kept: Vec<Rule> = rules
        .iter()
        .rev()
        .filter(|rule| match rule.rule_type() {
            RuleType::Untyped => true,
            kind => seen.insert(kind),
        })
        .cloned()
        .collect();
    kept.reverse();

    if kept.len() < rules.len() {
        debug!(
            total = rules.len(),
            dropped = rules.len() - kept.len(),
            "dropped superseded rules"
        );
    }
    kept
}

/// Prepare an edited link for persistence: trims `label` and `url` and
/// normalizes its rules. Counters are left untouched.
pub fn prepare_for_sync(mut link: Link) -> Link {
    let label = link.label.trim();
    if label.len() != link.label.len() {
        link.label = label.to_string();
    }
    let url = link.url.trim();
    if url.len() != link.url.len() {
        link.url = url.to_string();
    }
    link.rules = normalize(&link.rules);
    link
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::rule::UnknownRule;

    #[test]
    fn last_rule_of_each_type_wins() {
        let rules = vec![
            Rule::device("mobile"),
            Rule::location("IN"),
            Rule::device("desktop"),
            Rule::time(9, 17),
            Rule::location("US"),
        ];
        assert_eq!(
            normalize(&rules),
            vec![Rule::device("desktop"), Rule::time(9, 17), Rule::location("US")]
        );
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn already_unique_is_unchanged() {
        let rules = vec![Rule::time(22, 5), Rule::device("mobile"), Rule::location("DE")];
        assert_eq!(normalize(&rules), rules);
    }

    #[test]
    fn idempotent() {
        let rules = vec![
            Rule::time(1, 2),
            Rule::time(3, 4),
            Rule::device("mobile"),
            Rule::time(5, 6),
            Rule::device("desktop"),
        ];
        let once = normalize(&rules);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn at_most_one_rule_per_type() {
        let rules = vec![
            Rule::location("IN"),
            Rule::location("GB"),
            Rule::location("US"),
            Rule::device("mobile"),
            Rule::device("mobile"),
        ];
        let normalized = normalize(&rules);
        let types: HashSet<RuleType<'_>> = normalized.iter().map(Rule::rule_type).collect();
        assert_eq!(types.len(), normalized.len());
        assert_eq!(normalized, vec![Rule::location("US"), Rule::device("mobile")]);
    }

    #[test]
    fn unknown_types_group_by_name() {
        let unknown = |kind: &str, n: i64| {
            Rule::Unknown(UnknownRule::new(serde_json::json!({
                "type": kind,
                "config": { "n": n },
            })))
        };
        let rules = vec![unknown("referrer", 1), unknown("weather", 1), unknown("referrer", 2)];
        assert_eq!(
            normalize(&rules),
            vec![unknown("weather", 1), unknown("referrer", 2)]
        );
    }

    #[test]
    fn untyped_entries_are_all_kept() {
        let rules: Vec<Rule> = serde_json::from_value(serde_json::json!([
            "device",
            {"type": "referrer"},
            null,
            {"type": "referrer", "config": {"host": "a.example"}}
        ]))
        .unwrap();
        let normalized = normalize(&rules);
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            serde_json::json!(["device", null, {"type": "referrer", "config": {"host": "a.example"}}])
        );
    }

    /// Every sequence of up to `max_len` rules drawn from `pool`, with repeats.
    fn sequences(pool: &[Rule], max_len: usize) -> Vec<Vec<Rule>> {
        let mut all = vec![Vec::new()];
        let mut frontier = vec![Vec::new()];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for seq in &frontier {
                for rule in pool {
                    let mut longer: Vec<Rule> = seq.clone();
                    longer.push(rule.clone());
                    next.push(longer);
                }
            }
            all.extend(next.iter().cloned());
            frontier = next;
        }
        all
    }

    #[test]
    fn holds_for_every_small_rule_set() {
        let pool = vec![
            Rule::device("mobile"),
            Rule::device("desktop"),
            Rule::location("IN"),
            Rule::time(22, 5),
            Rule::Unknown(UnknownRule::new(serde_json::json!({"type": "referrer"}))),
        ];
        for rules in sequences(&pool, 5) {
            let once = normalize(&rules);
            assert_eq!(normalize(&once), once, "not idempotent for {rules:?}");

            let types: HashSet<RuleType<'_>> = once.iter().map(Rule::rule_type).collect();
            assert_eq!(types.len(), once.len(), "duplicate type for {rules:?}");

            // The survivor of each type is its last occurrence in the input.
            for kept in &once {
                let last = rules
                    .iter()
                    .rev()
                    .find(|r| r.rule_type() == kept.rule_type());
                assert_eq!(last, Some(kept));
            }
            let input_types: HashSet<RuleType<'_>> = rules.iter().map(Rule::rule_type).collect();
            assert_eq!(input_types, types);
        }
    }

    #[test]
    fn prepare_trims_and_normalizes() {
        let link = Link::new("l1", "  Shop ", " https://shop.example\n")
            .with_priority(4)
            .with_clicks(9)
            .with_rule(Rule::device("mobile"))
            .with_rule(Rule::device("desktop"));
        let prepared = prepare_for_sync(link);
        assert_eq!(prepared.label, "Shop");
        assert_eq!(prepared.url, "https://shop.example");
        assert_eq!(prepared.priority, 4);
        assert_eq!(prepared.click_count, 9);
        assert_eq!(prepared.rules, vec![Rule::device("desktop")]);
    }
}
