//! Raw issue-tracker payload model.
//!
//! Serde types mirroring the subset of the tracker's REST JSON the pipeline
//! reads. Unknown `customfield_*` entries are retained in a flattened map so
//! the story-point field resolution can address them by identifier without
//! this crate hard-coding any deployment's field layout.

use serde::Deserialize;
use std::collections::HashMap;

use crate::PayloadError;

/// One raw issue as delivered by the search/sprint endpoints
#[derive(Clone, Debug, Deserialize)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: RawFields,
}

/// The `fields` object of a raw issue.
///
/// All members are optional: absent data degrades to defaults downstream,
/// never to an error.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawFields {
    pub summary: Option<String>,
    pub issuetype: Option<RawIssueType>,
    pub status: Option<RawStatus>,
    pub parent: Option<RawParent>,
    pub worklog: Option<RawWorklogs>,
    pub comment: Option<RawComments>,
    /// Sprint field: the tracker delivers either an object or a list
    pub sprint: Option<serde_json::Value>,
    /// Everything else, notably `customfield_*` story-point entries
    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawIssueType {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatus {
    pub name: Option<String>,
    pub status_category: Option<RawStatusCategory>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawStatusCategory {
    pub name: Option<String>,
}

/// Parent (epic) reference embedded in an issue
#[derive(Clone, Debug, Deserialize)]
pub struct RawParent {
    pub key: Option<String>,
    pub fields: Option<RawParentFields>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawParentFields {
    pub summary: Option<String>,
}

/// Worklog collection embedded under `fields.worklog`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawWorklogs {
    #[serde(default)]
    pub worklogs: Vec<RawWorklog>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWorklog {
    pub author: Option<RawAuthor>,
    /// Timestamp like `2026-03-05T14:30:00.000+0100`
    pub started: Option<String>,
    pub time_spent: Option<String>,
    pub time_spent_seconds: Option<i64>,
    /// Comment body in Atlassian Document Format
    pub comment: Option<serde_json::Value>,
}

/// Comment collection embedded under `fields.comment`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawComments {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawComment {
    pub author: Option<RawAuthor>,
    pub created: Option<String>,
    /// Body in Atlassian Document Format
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    pub display_name: Option<String>,
}

/// Envelope of one paginated search response
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchPage {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    pub total: Option<u64>,
    pub start_at: Option<u64>,
    pub max_results: Option<u64>,
}

/// Parse a saved issue payload.
///
/// Accepts either a bare issue array (the shape the pagination layer hands
/// over) or a single search-response envelope.
pub fn parse_issue_payload(text: &str) -> Result<Vec<RawIssue>, PayloadError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(ref obj) if obj.contains_key("issues") => {
            let page: RawSearchPage = serde_json::from_value(value)?;
            Ok(page.issues)
        }
        other => Err(PayloadError::Shape(format!(
            "expected an issue array or a search envelope, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
