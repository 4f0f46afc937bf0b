//! Rule evaluation and ranking: decides which links a visitor sees and in
//! what order.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::collate::compare_labels;
use crate::matcher::HourWindow;
use crate::rule::{Link, Rule, RuleType, VisitorContext};

/// Check if a single rule is satisfied by the visitor.
///
/// Device and location compare exactly. Unknown rule types always pass.
pub fn rule_matches(rule: &Rule, ctx: &VisitorContext) -> bool {
    match rule {
        Rule::Device(cfg) => cfg.allowed_device == ctx.device.as_str(),
        Rule::Location(cfg) => cfg.allowed_country == ctx.country,
        Rule::Time(cfg) => HourWindow::from(cfg).contains(ctx.time_hour),
        Rule::Unknown(_) => true,
    }
}

/// Check if a link is visible to the visitor.
///
/// Rules are grouped by type: any rule in a group may satisfy it, and every
/// group present on the link must be satisfied. A link without rules is
/// always visible. Duplicate types are tolerated, so un-normalized rule
/// lists widen visibility rather than hide the link.
pub fn is_visible(link: &Link, ctx: &VisitorContext) -> bool {
    match link.rules.as_slice() {
        [] => true,
        [only] => rule_matches(only, ctx),
        rules => {
            let mut groups: FxHashMap<RuleType<'_>, bool> = FxHashMap::default();
            for rule in rules {
                let satisfied = groups.entry(rule.rule_type()).or_insert(false);
                if !*satisfied {
                    *satisfied = rule_matches(rule, ctx);
                }
            }
            groups.values().all(|&satisfied| satisfied)
        }
    }
}

/// Display order of two visible links: priority descending, then click
/// count descending, then label ascending.
pub fn compare_links(a: &Link, b: &Link) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.click_count.cmp(&a.click_count))
        .then_with(|| compare_labels(&a.label, &b.label))
}

/// Filter `links` for the visitor and sort the survivors, borrowing from
/// the input.
///
/// The sort is stable: links equal on every key keep their input order.
pub fn rank_view<'a>(links: &'a [Link], ctx: &VisitorContext) -> Vec<&'a Link> {
    let mut visible: Vec<&Link> = links.iter().filter(|link| is_visible(link, ctx)).collect();
    visible.sort_by(|a, b| compare_links(a, b));

    trace!(
        total = links.len(),
        visible = visible.len(),
        device = %ctx.device,
        country = %ctx.country,
        hour = ctx.time_hour,
        "ranked links"
    );
    visible
}

/// Filter and sort `links` for the visitor, returning owned copies.
///
/// Inputs are never modified.
pub fn rank(links: &[Link], ctx: &VisitorContext) -> Vec<Link> {
    rank_view(links, ctx).into_iter().cloned().collect()
}
