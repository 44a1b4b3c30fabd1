use crate::client::api::TrackerApi;
use crate::models::TimelineEntry;
use crate::timestamps::parse_local;
use chrono::{Local, NaiveDateTime};
use std::fmt::Write;
use tracing::{error, warn};

pub const TIMELINE_EMPTY: &str = "No time entries yet for today.";
pub const TIMELINE_FAILED: &str = "Failed to load timeline.";
pub const ANALYTICS_EMPTY: &str = "No analytics data for this week yet.";
pub const ANALYTICS_FAILED: &str = "Failed to load analytics.";

/// Today's entries. Starts out empty until the first refresh.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    markup: String,
}

impl TimelineView {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub async fn refresh<A: TrackerApi>(&mut self, api: &A) {
        self.refresh_at(api, Local::now().naive_local()).await;
    }

    /// Refreshes with `now` as the current local time. Never fails: errors
    /// are logged and shown in place of the list.
    pub async fn refresh_at<A: TrackerApi>(&mut self, api: &A, now: NaiveDateTime) {
        self.markup = match api.timeline().await {
            Ok(entries) => render_timeline(&entries, now),
            Err(err) => {
                error!("error loading timeline: {err}");
                TIMELINE_FAILED.to_string()
            }
        };
    }
}

/// This week's hours per project.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsView {
    markup: String,
}

impl AnalyticsView {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub async fn refresh<A: TrackerApi>(&mut self, api: &A) {
        self.markup = match api.analytics().await {
            Ok(totals) => render_analytics(&totals),
            Err(err) => {
                error!("error loading analytics: {err}");
                ANALYTICS_FAILED.to_string()
            }
        };
    }
}

/// Lists the entries that started on `now`'s calendar day, in the order
/// given. Open entries run until `now`; entries with unreadable times are
/// left out.
pub fn render_timeline(entries: &[TimelineEntry], now: NaiveDateTime) -> String {
    let today = now.date();
    let mut items = String::new();
    for entry in entries {
        let start = match parse_local(&entry.start_time) {
            Ok(start) => start,
            Err(err) => {
                warn!(project = %entry.project_name, "skipping timeline entry: {err}");
                continue;
            }
        };
        if start.date() != today {
            continue;
        }
        let end = match entry.end_time.as_deref().map(parse_local).transpose() {
            Ok(end) => end.unwrap_or(now),
            Err(err) => {
                warn!(project = %entry.project_name, "skipping timeline entry: {err}");
                continue;
            }
        };
        let hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
        let _ = write!(
            items,
            "<li><strong>{}</strong>: {} - {} ({hours:.2} hours)</li>",
            escape_html(&entry.project_name),
            start.format("%H:%M:%S"),
            end.format("%H:%M:%S"),
        );
    }

    if items.is_empty() {
        return TIMELINE_EMPTY.to_string();
    }
    format!("<ul class=\"timeline-list\">{items}</ul>")
}

pub fn render_analytics(totals: &[(String, f64)]) -> String {
    if totals.is_empty() {
        return ANALYTICS_EMPTY.to_string();
    }

    let mut markup = String::from("<ul class=\"analytics-list\">");
    for (project, hours) in totals {
        let _ = write!(markup, "<li>{}: {hours:.2} hours</li>", escape_html(project));
    }
    markup.push_str("</ul>");
    markup
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
