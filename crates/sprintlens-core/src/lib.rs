//! # sprintlens-core
//!
//! Core domain model and traits for the sprintlens reporting engine.
//!
//! This crate provides:
//! - Domain types: `IssueRecord`, `EpicSummary`, chart tables, `ProgressReport`
//! - Raw payload types mirroring the issue tracker's REST JSON (`raw`)
//! - The issue record normalizer (`normalize`)
//! - Flat activity rows for worklogs and comments (`activity`)
//! - Core traits: `IssueSource`, `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use sprintlens_core::{IssueRecord, StatusCategory, NO_EPIC};
//!
//! let record = IssueRecord {
//!     key: "NG-42".into(),
//!     epic_key: NO_EPIC.into(),
//!     epic_name: NO_EPIC.into(),
//!     story_points: 3.0,
//!     status: Some(StatusCategory::InProgress),
//! };
//! assert_eq!(record.epic_key, "No Epic");
//! ```

pub mod activity;
pub mod adf;
pub mod normalize;
pub mod raw;

pub use activity::{comment_rows, issue_rows, worklog_rows, CommentRow, IssueRow, WorklogRow};
pub use normalize::{normalize_all, normalize_issue, FieldPolicy};
pub use raw::{parse_issue_payload, RawIssue};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for an issue (e.g. `"NG-42"`)
pub type IssueKey = String;

/// Unique identifier for an epic grouping
pub type EpicKey = String;

/// Synthetic epic key and display name for issues without a parent epic
pub const NO_EPIC: &str = "No Epic";

// ============================================================================
// Status Categories
// ============================================================================

/// Coarse workflow bucket an issue's fine-grained status maps into.
///
/// The upstream tracker reports exactly three category names; anything else
/// is carried as "unrecognized" (`None` at the record level) and never lands
/// in one of the three chart buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    ToDo,
    InProgress,
    Done,
}

impl StatusCategory {
    /// Parse an upstream category name, verbatim. No fuzzy matching:
    /// unrecognized names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "To Do" => Some(StatusCategory::ToDo),
            "In Progress" => Some(StatusCategory::InProgress),
            "Done" => Some(StatusCategory::Done),
            _ => None,
        }
    }

    /// Get the display string for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::ToDo => "To Do",
            StatusCategory::InProgress => "In Progress",
            StatusCategory::Done => "Done",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Issue Records
// ============================================================================

/// Canonical flat record derived from one raw issue.
///
/// Every record belongs to exactly one epic grouping key; issues without a
/// parent reference are grouped under the synthetic [`NO_EPIC`] key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Unique issue key
    pub key: IssueKey,
    /// Parent epic key, or [`NO_EPIC`]
    pub epic_key: EpicKey,
    /// Parent epic display name, or [`NO_EPIC`]
    pub epic_name: String,
    /// Resolved story points; missing points resolve to `0`, never null
    pub story_points: f64,
    /// Status category; `None` for unrecognized upstream values
    pub status: Option<StatusCategory>,
}

// ============================================================================
// Epic Summaries
// ============================================================================

/// Aggregated progress statistics for one epic.
///
/// Produced by the aggregation stage; `epic_name` is the display form
/// (truncated). Epics whose `total_points` would be zero are excluded from
/// every derived output and never materialize as a summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpicSummary {
    /// Epic grouping key (untruncated)
    pub epic_key: EpicKey,
    /// Display name, truncated for presentation
    pub epic_name: String,
    /// Story points in the `Done` category
    pub done_points: f64,
    /// Story points in the `In Progress` category
    pub in_progress_points: f64,
    /// Story points in the `To Do` category
    pub to_do_points: f64,
    /// Story points whose category was unrecognized. Kept out of every
    /// chart bucket but counted in `total_points` so totals conserve.
    pub unknown_points: f64,
    /// Sum of all member story points
    pub total_points: f64,
    /// `done_points / total_points * 100`; only defined because zero-total
    /// epics are filtered out before summaries are built
    pub completion_percent: f64,
}

// ============================================================================
// Chart Tables
// ============================================================================

/// Chart-type selector for the projection stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Horizontal bar of completion percentages
    Percentage,
    /// Stacked horizontal bar of the three point buckets
    Stacked,
    /// Pie of per-epic completion weights
    Composition,
}

/// One row of the percentage bar table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentageRow {
    pub epic_name: String,
    pub completion_percent: f64,
}

/// One row of the stacked bar table.
///
/// Field order is the stacking order: done innermost, to-do outermost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackedRow {
    pub epic_name: String,
    pub done_points: f64,
    pub in_progress_points: f64,
    pub to_do_points: f64,
}

/// One row of the composition pie table.
///
/// `weight` is the epic's own `done / total` ratio, not its share of a
/// cross-epic grand total. Slices therefore do not sum to 1 across epics;
/// this mirrors the upstream behavior on purpose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub epic_name: String,
    pub weight: f64,
}

/// The three chart tables derived from one ordered summary sequence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartTables {
    pub percentage: Vec<PercentageRow>,
    pub stacked: Vec<StackedRow>,
    pub composition: Vec<CompositionRow>,
}

// ============================================================================
// Progress Report
// ============================================================================

/// Named input set processed independently by the orchestrator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetName {
    /// Issues of the current sprint(s)
    Sprint,
    /// Epics matching the configured label filter
    LabeledEpics,
    /// All open epics
    OpenEpics,
}

impl SetName {
    /// Get the display string for this input set
    pub fn as_str(&self) -> &'static str {
        match self {
            SetName::Sprint => "Current Sprint",
            SetName::LabeledEpics => "Epics by Label",
            SetName::OpenEpics => "Open Epics",
        }
    }
}

impl std::fmt::Display for SetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-set aggregation output: ordered summaries plus their chart tables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetReport {
    pub set: SetName,
    /// Retained epic summaries, completion percent descending
    pub summaries: Vec<EpicSummary>,
    pub charts: ChartTables,
}

/// Full output of one orchestrator run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// One entry per present input set, in sprint / labeled / open order
    pub sets: Vec<SetReport>,
}

impl ProgressReport {
    /// Look up a set's report by name
    pub fn get(&self, set: SetName) -> Option<&SetReport> {
        self.sets.iter().find(|s| s.set == set)
    }
}

// ============================================================================
// Date Ranges
// ============================================================================

/// Inclusive civil date range for worklog/comment filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether `date` falls inside the range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ============================================================================
// Export Bundle
// ============================================================================

/// Everything a renderer needs for one export run.
///
/// Renderers consume this read-only; they never recompute aggregates.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportBundle {
    /// Aggregated progress views per input set
    pub report: ProgressReport,
    /// Flat issue rows for the issue sheet (may be empty)
    pub issues: Vec<IssueRow>,
    /// Flat worklog rows (may be empty)
    pub worklogs: Vec<WorklogRow>,
    /// Flat comment rows (may be empty)
    pub comments: Vec<CommentRow>,
}

// ============================================================================
// Traits
// ============================================================================

/// Supplier of raw issue payloads for the three named input sets.
///
/// This is the seam to the external API-client collaborator: implementations
/// may read saved payload files, an in-memory fixture, or anything else.
/// `sprint_issues` and `labeled_epic_issues` return `None` when that set was
/// not requested upstream; `open_epic_issues` is always present.
pub trait IssueSource {
    fn sprint_issues(&self) -> Result<Option<Vec<RawIssue>>, PayloadError>;

    fn labeled_epic_issues(&self) -> Result<Option<Vec<RawIssue>>, PayloadError>;

    fn open_epic_issues(&self) -> Result<Vec<RawIssue>, PayloadError>;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render an export bundle to the output format
    fn render(&self, bundle: &ExportBundle) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Payload loading/parsing error.
///
/// Only the loading boundary fails; once records exist, the aggregation
/// pipeline degrades silently instead of erroring.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized payload shape: {0}")]
    Shape(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
