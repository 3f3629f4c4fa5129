//! Epic aggregation.
//!
//! Groups issue records by epic, sums story points per status bucket, and
//! produces the ordered summary sequence every chart derives from. Ordering
//! is fully deterministic: completion percent descending, ties resolved by
//! the order each epic was first seen in the input.

use std::collections::HashMap;

use sprintlens_core::{EpicKey, EpicSummary, IssueRecord, StatusCategory};

/// Maximum epic display-name length before truncation
pub const EPIC_NAME_DISPLAY_LEN: usize = 40;

/// Truncate an epic name for display, appending `"..."` when it exceeds
/// `max_len` characters. Counts characters, not bytes, so multi-byte names
/// never split mid-character.
pub fn truncate_epic_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let mut truncated: String = name.chars().take(max_len).collect();
        truncated.push_str("...");
        truncated
    }
}

/// Running totals for one epic group
struct EpicAccumulator {
    epic_key: EpicKey,
    epic_name: String,
    done_points: f64,
    in_progress_points: f64,
    to_do_points: f64,
    unknown_points: f64,
    total_points: f64,
}

impl EpicAccumulator {
    fn new(epic_key: &str, epic_name: &str) -> Self {
        Self {
            epic_key: epic_key.to_string(),
            epic_name: epic_name.to_string(),
            done_points: 0.0,
            in_progress_points: 0.0,
            to_do_points: 0.0,
            unknown_points: 0.0,
            total_points: 0.0,
        }
    }

    fn add(&mut self, record: &IssueRecord) {
        match record.status {
            Some(StatusCategory::Done) => self.done_points += record.story_points,
            Some(StatusCategory::InProgress) => self.in_progress_points += record.story_points,
            Some(StatusCategory::ToDo) => self.to_do_points += record.story_points,
            // Unrecognized categories stay out of the chart buckets but
            // still count toward the total so point sums conserve
            None => self.unknown_points += record.story_points,
        }
        self.total_points += record.story_points;
    }

    fn into_summary(self) -> EpicSummary {
        let completion_percent = self.done_points / self.total_points * 100.0;
        EpicSummary {
            epic_key: self.epic_key,
            epic_name: self.epic_name,
            done_points: self.done_points,
            in_progress_points: self.in_progress_points,
            to_do_points: self.to_do_points,
            unknown_points: self.unknown_points,
            total_points: self.total_points,
            completion_percent,
        }
    }
}

/// Aggregate issue records into ordered epic summaries.
///
/// - Groups by `epic_key` in first-seen order; the first record of a group
///   also fixes the group's display name.
/// - Epics whose total is zero are excluded entirely: they appear in no
///   summary, percentage, or chart table.
/// - Retained summaries are sorted by completion percent descending; the
///   sort is stable, so equal percentages keep first-seen order.
/// - Display names are truncated only here, after all math is done.
///
/// Empty input yields an empty output; this function never fails.
pub fn aggregate_epics(records: &[IssueRecord]) -> Vec<EpicSummary> {
    let mut index: HashMap<EpicKey, usize> = HashMap::new();
    let mut groups: Vec<EpicAccumulator> = Vec::new();

    for record in records {
        let slot = match index.get(&record.epic_key) {
            Some(&slot) => slot,
            None => {
                groups.push(EpicAccumulator::new(&record.epic_key, &record.epic_name));
                index.insert(record.epic_key.clone(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].add(record);
    }

    let mut summaries: Vec<EpicSummary> = groups
        .into_iter()
        .filter(|group| group.total_points > 0.0)
        .map(EpicAccumulator::into_summary)
        .collect();

    summaries.sort_by(|a, b| b.completion_percent.total_cmp(&a.completion_percent));

    for summary in &mut summaries {
        summary.epic_name = truncate_epic_name(&summary.epic_name, EPIC_NAME_DISPLAY_LEN);
    }

    summaries
}
