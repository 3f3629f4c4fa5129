//! Integration tests for chart projection over orchestrated reports.

use pretty_assertions::assert_eq;
use sprintlens_core::{parse_issue_payload, RawIssue, SetName};
use sprintlens_progress::{ChartProjector, IssueSets, Orchestrator};

fn epic_fixture(count: usize) -> Vec<RawIssue> {
    // One fully-done issue per epic so completion percents tie at 100 and
    // the retained order equals discovery order
    let issues: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{
                    "key": "NG-{i}",
                    "fields": {{
                        "customfield_10016": {points},
                        "parent": {{"key": "NG-{epic}", "fields": {{"summary": "Epic {i}"}}}},
                        "status": {{"statusCategory": {{"name": "Done"}}}}
                    }}
                }}"#,
                points = i + 1,
                epic = 1000 + i,
            )
        })
        .collect();
    parse_issue_payload(&format!("[{}]", issues.join(","))).unwrap()
}

#[test]
fn all_three_tables_share_the_aggregator_order() {
    let sets = IssueSets {
        open_epics: epic_fixture(4),
        ..IssueSets::default()
    };
    let report = Orchestrator::new().run(&sets);
    let open = report.get(SetName::OpenEpics).unwrap();

    let from_percentage: Vec<&str> = open
        .charts
        .percentage
        .iter()
        .map(|r| r.epic_name.as_str())
        .collect();
    let from_stacked: Vec<&str> = open
        .charts
        .stacked
        .iter()
        .map(|r| r.epic_name.as_str())
        .collect();
    let from_composition: Vec<&str> = open
        .charts
        .composition
        .iter()
        .map(|r| r.epic_name.as_str())
        .collect();

    assert_eq!(from_percentage, from_stacked);
    assert_eq!(from_percentage, from_composition);
    assert_eq!(from_percentage, ["Epic 0", "Epic 1", "Epic 2", "Epic 3"]);
}

#[test]
fn configured_row_cap_applies_to_every_table() {
    let sets = IssueSets {
        open_epics: epic_fixture(30),
        ..IssueSets::default()
    };
    let report = Orchestrator::new()
        .projector(ChartProjector::new().max_rows(12))
        .run(&sets);
    let open = report.get(SetName::OpenEpics).unwrap();

    // Summaries stay complete; only the display tables are capped
    assert_eq!(open.summaries.len(), 30);
    assert_eq!(open.charts.percentage.len(), 12);
    assert_eq!(open.charts.stacked.len(), 12);
    assert_eq!(open.charts.composition.len(), 12);
}

#[test]
fn default_row_cap_is_twenty() {
    let sets = IssueSets {
        open_epics: epic_fixture(25),
        ..IssueSets::default()
    };
    let report = Orchestrator::new().run(&sets);
    let open = report.get(SetName::OpenEpics).unwrap();
    assert_eq!(open.charts.percentage.len(), 20);
}

#[test]
fn empty_set_produces_defined_empty_tables() {
    let sets = IssueSets {
        sprint: Some(Vec::new()),
        open_epics: Vec::new(),
        ..IssueSets::default()
    };
    let report = Orchestrator::new().run(&sets);

    for set_report in &report.sets {
        assert!(set_report.summaries.is_empty());
        assert!(set_report.charts.percentage.is_empty());
        assert!(set_report.charts.stacked.is_empty());
        assert!(set_report.charts.composition.is_empty());
    }
}

#[test]
fn composition_weights_are_independent_of_other_epics() {
    let payload = r#"[
        {"key": "NG-1", "fields": {
            "customfield_10016": 6,
            "parent": {"key": "NG-100", "fields": {"summary": "Auth"}},
            "status": {"statusCategory": {"name": "Done"}}
        }},
        {"key": "NG-2", "fields": {
            "customfield_10016": 2,
            "parent": {"key": "NG-100", "fields": {"summary": "Auth"}},
            "status": {"statusCategory": {"name": "To Do"}}
        }},
        {"key": "NG-3", "fields": {
            "customfield_10016": 100,
            "parent": {"key": "NG-200", "fields": {"summary": "Billing"}},
            "status": {"statusCategory": {"name": "Done"}}
        }}
    ]"#;
    let sets = IssueSets {
        open_epics: parse_issue_payload(payload).unwrap(),
        ..IssueSets::default()
    };
    let report = Orchestrator::new().run(&sets);
    let open = report.get(SetName::OpenEpics).unwrap();

    // Auth's weight is 6/8 regardless of Billing's 100 points
    let auth = open
        .charts
        .composition
        .iter()
        .find(|r| r.epic_name == "Auth")
        .unwrap();
    assert_eq!(auth.weight, 0.75);
}
