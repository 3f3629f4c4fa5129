//! Flat activity rows for export sheets.
//!
//! Projects raw issue payloads into the flat issue / worklog / comment rows
//! the renderers consume. Worklog and comment extraction filter by an
//! inclusive [`DateRange`]; rows with unusable timestamps are dropped with a
//! warning rather than failing the export.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::adf::adf_to_text;
use crate::raw::RawIssue;
use crate::DateRange;

/// Timestamp layout used by the tracker, e.g. `2026-03-05T14:30:00.000+0100`.
/// `%z` also accepts the colon form some deployments emit.
const TRACKER_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Placeholder for absent display values
const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Row Types
// ============================================================================

/// One row of the issue sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueRow {
    pub key: String,
    pub issue_type: String,
    pub summary: String,
    pub status: String,
    pub parent_summary: String,
}

/// One row of the worklog sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorklogRow {
    pub issue_key: String,
    pub issue_type: String,
    pub summary: String,
    pub status: String,
    pub author: String,
    /// Verbatim tracker duration string, e.g. `"2h 30m"`
    pub time_spent: String,
    /// Logged time in hours, rounded to two decimals
    pub time_spent_hours: f64,
    /// Civil date the work started, in the worklog's own timezone
    pub started_date: NaiveDate,
    /// Sprint label, `"{name} (ID: {id})"` or `"N/A"`
    pub sprint: String,
    pub comment: String,
}

/// One row of the comment sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRow {
    pub issue_key: String,
    pub summary: String,
    pub status: String,
    pub parent_summary: String,
    pub issue_type: String,
    /// Creation time normalized to UTC
    pub created: DateTime<Utc>,
    pub author: String,
    pub body: String,
}

// ============================================================================
// Extraction
// ============================================================================

/// Project issues into issue-sheet rows, preserving input order
pub fn issue_rows(issues: &[RawIssue]) -> Vec<IssueRow> {
    issues
        .iter()
        .map(|issue| IssueRow {
            key: issue.key.clone(),
            issue_type: issue_type_name(issue),
            summary: issue.fields.summary.clone().unwrap_or_default(),
            status: status_name(issue),
            parent_summary: parent_summary(issue),
        })
        .collect()
}

/// Extract worklog rows from issues carrying embedded worklog collections.
///
/// A worklog is kept when its `started` timestamp parses and its civil date
/// (in the worklog's own timezone) falls inside `range`.
pub fn worklog_rows(issues: &[RawIssue], range: &DateRange) -> Vec<WorklogRow> {
    let mut rows = Vec::new();
    for issue in issues {
        let Some(worklogs) = issue.fields.worklog.as_ref() else {
            continue;
        };
        for worklog in &worklogs.worklogs {
            let Some(started) = worklog.started.as_deref().and_then(parse_timestamp) else {
                warn!(issue = %issue.key, "worklog without usable start timestamp dropped");
                continue;
            };
            let started_date = started.date_naive();
            if !range.contains(started_date) {
                continue;
            }
            let seconds = worklog.time_spent_seconds.unwrap_or(0);
            rows.push(WorklogRow {
                issue_key: issue.key.clone(),
                issue_type: issue_type_name(issue),
                summary: issue.fields.summary.clone().unwrap_or_default(),
                status: status_name(issue),
                author: author_name(worklog.author.as_ref()),
                time_spent: worklog
                    .time_spent
                    .clone()
                    .unwrap_or_else(|| "0m".to_string()),
                time_spent_hours: round2(seconds as f64 / 3600.0),
                started_date,
                sprint: sprint_label(issue.fields.sprint.as_ref()),
                comment: worklog
                    .comment
                    .as_ref()
                    .map(adf_to_text)
                    .unwrap_or_default(),
            });
        }
    }
    rows
}

/// Extract comment rows from issues carrying embedded comment collections.
///
/// Comments are normalized to UTC and kept when their civil UTC date falls
/// inside `range` (end date inclusive).
pub fn comment_rows(issues: &[RawIssue], range: &DateRange) -> Vec<CommentRow> {
    let mut rows = Vec::new();
    for issue in issues {
        let Some(comments) = issue.fields.comment.as_ref() else {
            continue;
        };
        for comment in &comments.comments {
            let Some(created) = comment.created.as_deref().and_then(parse_timestamp) else {
                warn!(issue = %issue.key, "comment without usable creation timestamp dropped");
                continue;
            };
            let created = created.with_timezone(&Utc);
            if !range.contains(created.date_naive()) {
                continue;
            }
            rows.push(CommentRow {
                issue_key: issue.key.clone(),
                summary: issue.fields.summary.clone().unwrap_or_default(),
                status: status_name(issue),
                parent_summary: parent_summary(issue),
                issue_type: issue_type_name(issue),
                created,
                author: author_name(comment.author.as_ref()),
                body: comment.body.as_ref().map(adf_to_text).unwrap_or_default(),
            });
        }
    }
    rows
}

// ============================================================================
// Field Helpers
// ============================================================================

fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, TRACKER_TIMESTAMP).ok()
}

fn issue_type_name(issue: &RawIssue) -> String {
    issue
        .fields
        .issuetype
        .as_ref()
        .and_then(|t| t.name.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn status_name(issue: &RawIssue) -> String {
    issue
        .fields
        .status
        .as_ref()
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn parent_summary(issue: &RawIssue) -> String {
    issue
        .fields
        .parent
        .as_ref()
        .and_then(|p| p.fields.as_ref())
        .and_then(|f| f.summary.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn author_name(author: Option<&crate::raw::RawAuthor>) -> String {
    author
        .and_then(|a| a.display_name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Render the sprint field as `"{name} (ID: {id})"`.
///
/// The tracker delivers either a list of sprints (the last entry is the
/// most recent) or a single object; anything else degrades to its string
/// form, absence to `"N/A"`.
fn sprint_label(sprint: Option<&Value>) -> String {
    let Some(value) = sprint else {
        return NOT_AVAILABLE.to_string();
    };
    let entry = match value {
        Value::Array(items) => match items.last() {
            Some(last) => last,
            None => return NOT_AVAILABLE.to_string(),
        },
        other => other,
    };
    match entry {
        Value::Object(obj) => {
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(NOT_AVAILABLE);
            let id = obj
                .get("id")
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            format!("{name} (ID: {id})")
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::parse_issue_payload;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> DateRange {
        DateRange::new(date(2026, 3, 1), date(2026, 3, 31)).unwrap()
    }

    const WORKLOG_ISSUE: &str = r#"[{
        "key": "NG-21",
        "fields": {
            "summary": "Tune cache eviction",
            "issuetype": {"name": "Task"},
            "status": {"name": "In Review"},
            "sprint": [{"id": 88, "name": "Sprint 12"}],
            "worklog": {"worklogs": [
                {
                    "author": {"displayName": "Maria Rossi"},
                    "started": "2026-03-05T14:30:00.000+0100",
                    "timeSpent": "2h 30m",
                    "timeSpentSeconds": 9000
                },
                {
                    "author": {"displayName": "Luca Bianchi"},
                    "started": "2026-04-02T09:00:00.000+0200",
                    "timeSpent": "1h",
                    "timeSpentSeconds": 3600
                },
                {"timeSpent": "15m", "timeSpentSeconds": 900}
            ]}
        }
    }]"#;

    #[test]
    fn worklogs_filter_by_date_range() {
        let issues = parse_issue_payload(WORKLOG_ISSUE).unwrap();
        let rows = worklog_rows(&issues, &march());

        // April entry out of range; entry without timestamp dropped
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.issue_key, "NG-21");
        assert_eq!(row.author, "Maria Rossi");
        assert_eq!(row.time_spent, "2h 30m");
        assert_eq!(row.time_spent_hours, 2.5);
        assert_eq!(row.started_date, date(2026, 3, 5));
        assert_eq!(row.sprint, "Sprint 12 (ID: 88)");
    }

    #[test]
    fn worklog_hours_round_to_two_decimals() {
        // 1000 seconds = 0.2777... hours
        let payload = r#"[{
            "key": "NG-22",
            "fields": {"worklog": {"worklogs": [
                {"started": "2026-03-10T08:00:00.000+0000", "timeSpentSeconds": 1000}
            ]}}
        }]"#;
        let issues = parse_issue_payload(payload).unwrap();
        let rows = worklog_rows(&issues, &march());
        assert_eq!(rows[0].time_spent_hours, 0.28);
        assert_eq!(rows[0].author, "Unknown");
        assert_eq!(rows[0].sprint, "N/A");
    }

    #[test]
    fn timezone_offset_with_colon_parses() {
        let payload = r#"[{
            "key": "NG-23",
            "fields": {"worklog": {"worklogs": [
                {"started": "2026-03-15T23:30:00.000+03:00", "timeSpentSeconds": 600}
            ]}}
        }]"#;
        let issues = parse_issue_payload(payload).unwrap();
        let rows = worklog_rows(&issues, &march());
        // Date taken in the worklog's own timezone, not UTC
        assert_eq!(rows[0].started_date, date(2026, 3, 15));
    }

    #[test]
    fn comments_filter_by_utc_date() {
        let payload = r#"[{
            "key": "NG-24",
            "fields": {
                "summary": "Flaky pipeline",
                "issuetype": {"name": "Bug"},
                "status": {"name": "Done"},
                "parent": {"key": "NG-100", "fields": {"summary": "CI Hardening"}},
                "comment": {"comments": [
                    {
                        "author": {"displayName": "Paolo Gialli"},
                        "created": "2026-03-31T23:30:00.000-0300",
                        "body": {"content": [{"type": "paragraph", "content": [
                            {"type": "text", "text": "Retried, green now."}
                        ]}]}
                    },
                    {"author": {"displayName": "Maria Rossi"}, "created": "2026-02-28T10:00:00.000+0000"}
                ]}
            }
        }]"#;
        let issues = parse_issue_payload(payload).unwrap();
        let rows = comment_rows(&issues, &march());

        // -0300 comment lands on April 1 in UTC and drops out of range;
        // February comment is before the range
        assert!(rows.is_empty());

        let wide = DateRange::new(date(2026, 2, 1), date(2026, 4, 30)).unwrap();
        let rows = comment_rows(&issues, &wide);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].body, "Retried, green now.");
        assert_eq!(rows[0].parent_summary, "CI Hardening");
        assert_eq!(rows[1].body, "");
    }

    #[test]
    fn issue_rows_carry_na_defaults() {
        let payload = r#"[
            {"key": "NG-25", "fields": {"summary": "Orphan"}},
            {"key": "NG-26", "fields": {
                "summary": "Child",
                "issuetype": {"name": "Story"},
                "status": {"name": "To Do"},
                "parent": {"key": "NG-101", "fields": {"summary": "Billing"}}
            }}
        ]"#;
        let issues = parse_issue_payload(payload).unwrap();
        let rows = issue_rows(&issues);

        assert_eq!(rows[0].issue_type, "N/A");
        assert_eq!(rows[0].status, "N/A");
        assert_eq!(rows[0].parent_summary, "N/A");
        assert_eq!(rows[1].parent_summary, "Billing");
        assert_eq!(rows[1].issue_type, "Story");
    }

    #[test]
    fn sprint_label_shapes() {
        use serde_json::json;
        assert_eq!(sprint_label(None), "N/A");
        assert_eq!(sprint_label(Some(&json!([]))), "N/A");
        assert_eq!(
            sprint_label(Some(&json!({"id": 7, "name": "Sprint 7"}))),
            "Sprint 7 (ID: 7)"
        );
        assert_eq!(
            sprint_label(Some(&json!([
                {"id": 6, "name": "Sprint 6"},
                {"id": 7, "name": "Sprint 7"}
            ]))),
            "Sprint 7 (ID: 7)"
        );
        assert_eq!(sprint_label(Some(&json!("Board sprint"))), "Board sprint");
    }
}
