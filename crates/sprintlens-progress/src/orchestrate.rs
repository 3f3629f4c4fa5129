//! Multi-source orchestration.
//!
//! Runs normalize → aggregate → project independently over each named input
//! set and assembles the [`ProgressReport`] the export layer consumes. Sets
//! share nothing: an empty or missing set never affects another, and a set
//! that retains zero epics still produces a defined (empty) entry.

use sprintlens_core::{
    normalize_all, FieldPolicy, IssueSource, PayloadError, ProgressReport, RawIssue, SetName,
    SetReport,
};

use crate::aggregate::aggregate_epics;
use crate::chart::ChartProjector;

/// Raw issues per named input set.
///
/// `sprint` and `labeled_epics` are optional; they exist only when a
/// sprint id / label filter was supplied upstream. `open_epics` is always
/// present (possibly empty).
#[derive(Clone, Debug, Default)]
pub struct IssueSets {
    pub sprint: Option<Vec<RawIssue>>,
    pub labeled_epics: Option<Vec<RawIssue>>,
    pub open_epics: Vec<RawIssue>,
}

/// Stateless pipeline driver for the three input sets.
///
/// ```rust
/// use sprintlens_progress::{IssueSets, Orchestrator};
///
/// let report = Orchestrator::new().run(&IssueSets::default());
/// // Only the always-present open-epics set appears, empty
/// assert_eq!(report.sets.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Orchestrator {
    policy: FieldPolicy,
    projector: ChartProjector,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom story-point field policy
    pub fn field_policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a custom chart projector (row caps etc.)
    pub fn projector(mut self, projector: ChartProjector) -> Self {
        self.projector = projector;
        self
    }

    /// Run the pipeline over every present input set.
    ///
    /// Holds no state between runs; each invocation recomputes everything
    /// from scratch and the sets are processed in isolation.
    pub fn run(&self, sets: &IssueSets) -> ProgressReport {
        let mut report = ProgressReport::default();
        if let Some(issues) = &sets.sprint {
            report.sets.push(self.run_set(SetName::Sprint, issues));
        }
        if let Some(issues) = &sets.labeled_epics {
            report.sets.push(self.run_set(SetName::LabeledEpics, issues));
        }
        report
            .sets
            .push(self.run_set(SetName::OpenEpics, &sets.open_epics));
        report
    }

    /// Pull the input sets from an [`IssueSource`] and run the pipeline
    pub fn run_source(&self, source: &dyn IssueSource) -> Result<ProgressReport, PayloadError> {
        let sets = IssueSets {
            sprint: source.sprint_issues()?,
            labeled_epics: source.labeled_epic_issues()?,
            open_epics: source.open_epic_issues()?,
        };
        Ok(self.run(&sets))
    }

    fn run_set(&self, set: SetName, issues: &[RawIssue]) -> SetReport {
        let records = normalize_all(issues, &self.policy);
        let summaries = aggregate_epics(&records);
        let charts = self.projector.tables(&summaries);
        SetReport {
            set,
            summaries,
            charts,
        }
    }
}
