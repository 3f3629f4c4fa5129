//! Issue record normalizer.
//!
//! Converts one raw issue into a canonical [`IssueRecord`], applying the
//! story-point field fallback and the "No Epic" grouping rule. This step
//! never fails: absent data degrades to defaults.

use tracing::warn;

use crate::raw::{RawFields, RawIssue};
use crate::{IssueRecord, StatusCategory, NO_EPIC};

/// Default story-point field identifiers, tried in order.
///
/// The primary entry is the classic "Story Points" field; the secondary is
/// the team-managed "Story point estimate" field. Deployments with other
/// layouts supply their own list via [`FieldPolicy::new`].
pub const DEFAULT_STORY_POINT_FIELDS: [&str; 2] = ["customfield_10016", "customfield_10026"];

/// Field-resolution policy for the normalizer.
///
/// Story points resolve to the first candidate field that is present and
/// non-null: a deterministic fallback chain, not an average or sum.
#[derive(Clone, Debug)]
pub struct FieldPolicy {
    /// Story-point field identifiers, first non-null wins
    pub story_point_fields: Vec<String>,
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self {
            story_point_fields: DEFAULT_STORY_POINT_FIELDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl FieldPolicy {
    /// Build a policy from an ordered candidate list
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            story_point_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve story points from the candidate fields; absent or null on
    /// every candidate resolves to `0`.
    pub fn resolve_story_points(&self, fields: &RawFields) -> f64 {
        for id in &self.story_point_fields {
            if let Some(points) = fields.custom.get(id).and_then(|v| v.as_f64()) {
                return points;
            }
        }
        0.0
    }
}

/// Normalize one raw issue into a canonical record.
///
/// Epic resolution: a parent reference supplies the epic key and display
/// title; a parent without a title, or no parent at all, resolves to the
/// literal [`NO_EPIC`]. Negative story points are clamped to zero with a
/// warning; degraded data must never abort an extraction run.
pub fn normalize_issue(raw: &RawIssue, policy: &FieldPolicy) -> IssueRecord {
    let (epic_key, epic_name) = match &raw.fields.parent {
        Some(parent) => (
            parent.key.clone().unwrap_or_else(|| NO_EPIC.to_string()),
            parent
                .fields
                .as_ref()
                .and_then(|f| f.summary.clone())
                .unwrap_or_else(|| NO_EPIC.to_string()),
        ),
        None => (NO_EPIC.to_string(), NO_EPIC.to_string()),
    };

    let mut story_points = policy.resolve_story_points(&raw.fields);
    if story_points < 0.0 {
        warn!(
            issue = %raw.key,
            points = story_points,
            "negative story points clamped to zero"
        );
        story_points = 0.0;
    }

    let status = raw
        .fields
        .status
        .as_ref()
        .and_then(|s| s.status_category.as_ref())
        .and_then(|c| c.name.as_deref())
        .and_then(StatusCategory::parse);

    IssueRecord {
        key: raw.key.clone(),
        epic_key,
        epic_name,
        story_points,
        status,
    }
}

/// Normalize a whole issue sequence, preserving input order
pub fn normalize_all(issues: &[RawIssue], policy: &FieldPolicy) -> Vec<IssueRecord> {
    issues
        .iter()
        .map(|issue| normalize_issue(issue, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::parse_issue_payload;
    use pretty_assertions::assert_eq;

    fn normalize_one(json: &str) -> IssueRecord {
        let issues = parse_issue_payload(json).unwrap();
        normalize_issue(&issues[0], &FieldPolicy::default())
    }

    #[test]
    fn primary_field_wins_over_secondary() {
        let record = normalize_one(
            r#"[{
                "key": "NG-1",
                "fields": {"customfield_10016": 5, "customfield_10026": 8}
            }]"#,
        );
        assert_eq!(record.story_points, 5.0);
    }

    #[test]
    fn null_primary_falls_back_to_secondary() {
        let record = normalize_one(
            r#"[{
                "key": "NG-2",
                "fields": {"customfield_10016": null, "customfield_10026": 8}
            }]"#,
        );
        assert_eq!(record.story_points, 8.0);
    }

    #[test]
    fn both_fields_null_resolve_to_zero() {
        let record = normalize_one(
            r#"[{
                "key": "NG-3",
                "fields": {"customfield_10016": null, "customfield_10026": null}
            }]"#,
        );
        assert_eq!(record.story_points, 0.0);
    }

    #[test]
    fn absent_fields_resolve_to_zero() {
        let record = normalize_one(r#"[{"key": "NG-4", "fields": {}}]"#);
        assert_eq!(record.story_points, 0.0);
    }

    #[test]
    fn negative_points_clamp_to_zero() {
        let record = normalize_one(
            r#"[{"key": "NG-5", "fields": {"customfield_10016": -3}}]"#,
        );
        assert_eq!(record.story_points, 0.0);
    }

    #[test]
    fn parent_reference_resolves_epic_key_and_name() {
        let record = normalize_one(
            r#"[{
                "key": "NG-6",
                "fields": {
                    "parent": {"key": "NG-100", "fields": {"summary": "Auth Revamp"}}
                }
            }]"#,
        );
        assert_eq!(record.epic_key, "NG-100");
        assert_eq!(record.epic_name, "Auth Revamp");
    }

    #[test]
    fn parent_without_title_falls_back_to_no_epic_name() {
        let record = normalize_one(
            r#"[{
                "key": "NG-7",
                "fields": {"parent": {"key": "NG-100"}}
            }]"#,
        );
        assert_eq!(record.epic_key, "NG-100");
        assert_eq!(record.epic_name, NO_EPIC);
    }

    #[test]
    fn missing_parent_groups_under_no_epic() {
        let record = normalize_one(r#"[{"key": "NG-8", "fields": {}}]"#);
        assert_eq!(record.epic_key, NO_EPIC);
        assert_eq!(record.epic_name, NO_EPIC);
    }

    #[test]
    fn unrecognized_status_category_maps_to_none() {
        let record = normalize_one(
            r#"[{
                "key": "NG-9",
                "fields": {"status": {"statusCategory": {"name": "Parked"}}}
            }]"#,
        );
        assert_eq!(record.status, None);
    }

    #[test]
    fn status_category_passes_through() {
        let record = normalize_one(
            r#"[{
                "key": "NG-10",
                "fields": {"status": {"statusCategory": {"name": "Done"}}}
            }]"#,
        );
        assert_eq!(record.status, Some(StatusCategory::Done));
    }

    #[test]
    fn custom_policy_overrides_candidate_order() {
        let issues = parse_issue_payload(
            r#"[{
                "key": "NG-11",
                "fields": {"customfield_20000": 13, "customfield_10016": 5}
            }]"#,
        )
        .unwrap();
        let policy = FieldPolicy::new(["customfield_20000", "customfield_10016"]);
        let record = normalize_issue(&issues[0], &policy);
        assert_eq!(record.story_points, 13.0);
    }

    #[test]
    fn normalize_all_preserves_input_order() {
        let issues = parse_issue_payload(
            r#"[{"key": "NG-12"}, {"key": "NG-13"}, {"key": "NG-14"}]"#,
        )
        .unwrap();
        let records = normalize_all(&issues, &FieldPolicy::default());
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["NG-12", "NG-13", "NG-14"]);
    }
}
