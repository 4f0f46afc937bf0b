//! Hub performance summary built from visit and click counters.

use serde::Serialize;

use crate::rule::Link;

/// Click performance of one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub id: String,
    pub label: String,
    pub url: String,
    pub total_clicks: u64,
    /// Clicks per hundred hub visits.
    pub ctr: f64,
}

/// Aggregated counters for a hub.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStats {
    pub total_visits: u64,
    pub total_clicks: u64,
    /// One entry per link, in input order.
    pub links: Vec<LinkStats>,
    /// Most-clicked link; `None` until some link has been clicked.
    pub top_link: Option<LinkStats>,
}

/// Summarize a hub's counters.
///
/// CTR is `clicks / visits * 100`, and `0` while the hub has no visits.
/// Clicks can exceed visits (repeat clicks), so CTR is not capped.
pub fn summarize(visit_count: u64, links: &[Link]) -> HubStats {
    let stats: Vec<LinkStats> = links
        .iter()
        .map(|link| LinkStats {
            id: link.id.clone(),
            label: link.label.clone(),
            url: link.url.clone(),
            total_clicks: link.click_count,
            ctr: click_through_rate(link.click_count, visit_count),
        })
        .collect();

    let total_clicks = links
        .iter()
        .fold(0u64, |acc, link| acc.saturating_add(link.click_count));

    // First link wins ties, so scan keeping only strictly larger counts.
    let top_link = stats
        .iter()
        .filter(|s| s.total_clicks > 0)
        .fold(None::<&LinkStats>, |best, s| match best {
            Some(b) if b.total_clicks >= s.total_clicks => Some(b),
            _ => Some(s),
        })
        .cloned();

    HubStats {
        total_visits: visit_count,
        total_clicks,
        links: stats,
        top_link,
    }
}

/// Clicks per hundred visits.
pub fn click_through_rate(clicks: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    clicks as f64 / visits as f64 * 100.0
}

/// Render a CTR for display, e.g. `"12.5%"`.
pub fn format_ctr(ctr: f64, precision: u8) -> String {
    format!("{:.*}%", usize::from(precision), ctr)
}
