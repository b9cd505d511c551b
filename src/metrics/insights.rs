// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of the externally generated insight feed. Messages are shown
//! as received; nothing here computes or rewrites them.

use crate::models::{Insight, InsightFeed, InsightKind};

fn marker(kind: &InsightKind) -> &'static str {
    match kind {
        InsightKind::Success => "[+]",
        InsightKind::Warning => "[!]",
        InsightKind::Info => "[i]",
        InsightKind::Other(_) => "[-]",
    }
}

pub fn render_insight(insight: &Insight) -> String {
    format!("{} {}", marker(&insight.kind), insight.message)
}

/// One line per insight, followed by the weekly averages when present
pub fn render_lines(feed: &InsightFeed) -> Vec<String> {
    let mut lines: Vec<String> = feed.insights.iter().map(render_insight).collect();

    if let Some(summary) = &feed.weekly_summary {
        lines.push(format!(
            "Weekly average: {:.0} g protein, {:.0} ml water",
            summary.avg_protein, summary.avg_water
        ));
    }

    lines
}
