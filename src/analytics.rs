use crate::models::TrackerData;
use crate::timestamps::parse_local;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTotal {
    pub project: String,
    pub hours: f64,
}

pub fn build_analytics(data: &TrackerData) -> Vec<ProjectTotal> {
    build_analytics_at(Local::now().naive_local(), data)
}

/// Hours per project for entries starting in the week containing `now`,
/// largest first. Open entries count up to `now`.
pub fn build_analytics_at(now: NaiveDateTime, data: &TrackerData) -> Vec<ProjectTotal> {
    let week_begin = week_start(now.date()).and_hms_opt(0, 0, 0).unwrap_or(now);
    let week_end = week_begin + Duration::days(7);

    let mut totals: Vec<ProjectTotal> = Vec::new();
    for entry in &data.entries {
        let start = match parse_local(&entry.start_time) {
            Ok(start) => start,
            Err(err) => {
                warn!(entry = entry.id, "skipping entry in analytics: {err}");
                continue;
            }
        };
        if start < week_begin || start >= week_end {
            continue;
        }

        let end = match entry.end_time.as_deref().map(parse_local).transpose() {
            Ok(end) => end.unwrap_or(now),
            Err(err) => {
                warn!(entry = entry.id, "skipping entry in analytics: {err}");
                continue;
            }
        };

        let Some(project) = data.project_name(entry.project_id) else {
            warn!(entry = entry.id, "entry references unknown project {}", entry.project_id);
            continue;
        };

        let hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
        match totals.iter_mut().find(|total| total.project == project) {
            Some(total) => total.hours += hours,
            None => totals.push(ProjectTotal {
                project: project.to_string(),
                hours,
            }),
        }
    }

    totals.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    totals
}

/// JSON object keyed by project; key order follows `totals`.
pub fn to_json_map(totals: &[ProjectTotal]) -> Map<String, Value> {
    totals
        .iter()
        .map(|total| (total.project.clone(), Value::from(total.hours)))
        .collect()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
