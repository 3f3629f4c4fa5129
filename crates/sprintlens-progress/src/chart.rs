//! Chart table projection.
//!
//! Pure read-only views over the ordered epic summaries: no sums are
//! recomputed here, and the aggregator's ordering is preserved in every
//! table. Each table is capped at a configurable row count so charts stay
//! legible when a project carries many epics; the cap keeps the head of the
//! sequence, i.e. the highest-completion epics.

use sprintlens_core::{
    ChartKind, ChartTables, CompositionRow, EpicSummary, PercentageRow, StackedRow,
};

/// Default maximum number of rows per chart table
pub const DEFAULT_MAX_CHART_ROWS: usize = 20;

/// Projection configuration
#[derive(Clone, Copy, Debug)]
pub struct ChartConfig {
    /// Maximum rows per chart table
    pub max_rows: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_CHART_ROWS,
        }
    }
}

/// Chart data projector.
///
/// ```rust
/// use sprintlens_progress::ChartProjector;
///
/// let projector = ChartProjector::new().max_rows(10);
/// let tables = projector.tables(&[]);
/// assert!(tables.percentage.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ChartProjector {
    config: ChartConfig,
}

impl ChartProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-table row cap
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.config.max_rows = max_rows;
        self
    }

    /// Percentage bar table: one row per retained epic
    pub fn percentage(&self, summaries: &[EpicSummary]) -> Vec<PercentageRow> {
        self.visible(summaries)
            .map(|epic| PercentageRow {
                epic_name: epic.epic_name.clone(),
                completion_percent: epic.completion_percent,
            })
            .collect()
    }

    /// Stacked bar table; bucket order is fixed done → in progress → to do
    /// so stacking semantics survive any rendering backend.
    pub fn stacked(&self, summaries: &[EpicSummary]) -> Vec<StackedRow> {
        self.visible(summaries)
            .map(|epic| StackedRow {
                epic_name: epic.epic_name.clone(),
                done_points: epic.done_points,
                in_progress_points: epic.in_progress_points,
                to_do_points: epic.to_do_points,
            })
            .collect()
    }

    /// Composition pie table. Each slice weight is the epic's own
    /// `done / total` ratio, matching the upstream semantics verbatim.
    pub fn composition(&self, summaries: &[EpicSummary]) -> Vec<CompositionRow> {
        self.visible(summaries)
            .map(|epic| CompositionRow {
                epic_name: epic.epic_name.clone(),
                weight: epic.done_points / epic.total_points,
            })
            .collect()
    }

    /// Project one table by chart kind into its serialized form
    pub fn project(&self, kind: ChartKind, summaries: &[EpicSummary]) -> ChartTables {
        let mut tables = ChartTables::default();
        match kind {
            ChartKind::Percentage => tables.percentage = self.percentage(summaries),
            ChartKind::Stacked => tables.stacked = self.stacked(summaries),
            ChartKind::Composition => tables.composition = self.composition(summaries),
        }
        tables
    }

    /// All three tables for one summary sequence
    pub fn tables(&self, summaries: &[EpicSummary]) -> ChartTables {
        ChartTables {
            percentage: self.percentage(summaries),
            stacked: self.stacked(summaries),
            composition: self.composition(summaries),
        }
    }

    fn visible<'a>(
        &self,
        summaries: &'a [EpicSummary],
    ) -> impl Iterator<Item = &'a EpicSummary> {
        summaries.iter().take(self.config.max_rows)
    }
}
