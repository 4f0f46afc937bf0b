//! Label collation for the final ranking tie-break.
//!
//! Labels compare with the CLDR root collation: punctuation and symbols
//! (emoji included) sort before digits, digits before letters, and accents
//! and case only break ties between otherwise equal letters. Labels the
//! collator considers equal fall back to code-point order, so only
//! identical labels compare equal.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "root collator unavailable, labels compare by code point");
            None
        }
    }
}

/// Compare two labels for display order.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        labels.sort_by(|a, b| compare_labels(a, b));
        labels
    }

    #[test]
    fn alphabetical() {
        assert_eq!(compare_labels("Apple", "Banana"), Ordering::Less);
        assert_eq!(compare_labels("Banana", "Apple"), Ordering::Greater);
    }

    #[test]
    fn case_does_not_dominate() {
        // Byte order would put "Zebra" before "apple".
        assert_eq!(compare_labels("apple", "Zebra"), Ordering::Less);
        assert_eq!(compare_labels("apple", "Apple"), Ordering::Less);
    }

    #[test]
    fn accents_are_secondary() {
        assert_eq!(compare_labels("résumé", "resume"), Ordering::Greater);
        assert_eq!(compare_labels("résumé", "rest"), Ordering::Greater);
        assert_eq!(compare_labels("résumé", "resumes"), Ordering::Less);
        assert_eq!(compare_labels("Éclair", "Donut"), Ordering::Greater);
    }

    #[test]
    fn symbol_and_emoji_labels_sort_before_letters() {
        assert_eq!(compare_labels("~Deals", "Apple"), Ordering::Less);
        assert_eq!(compare_labels("\u{1F525} Hot", "Apple"), Ordering::Less);
        assert_eq!(compare_labels("{beta}", "alpha"), Ordering::Less);
        assert_eq!(
            sorted(&["Apple", "~Deals", "\u{1F525} Hot"]),
            ["~Deals", "\u{1F525} Hot", "Apple"]
        );
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(compare_labels("2024 recap", "About"), Ordering::Less);
    }

    #[test]
    fn sharp_s_expands() {
        assert_eq!(compare_labels("Straße", "Strasz"), Ordering::Less);
        assert_eq!(compare_labels("Straße", "Strasa"), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_labels("Blog", "Blog archive"), Ordering::Less);
        assert_eq!(compare_labels("", "a"), Ordering::Less);
    }

    #[test]
    fn equal_only_when_identical() {
        assert_eq!(compare_labels("Docs", "Docs"), Ordering::Equal);
        assert_ne!(compare_labels("Docs", "docs"), Ordering::Equal);
        // Canonically equivalent, but not identical.
        assert_ne!(compare_labels("e\u{301}", "\u{e9}"), Ordering::Equal);
    }
}
