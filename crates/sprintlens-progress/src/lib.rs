//! # sprintlens-progress
//!
//! Progress aggregation engine: turns flat issue records into ordered
//! per-epic completion statistics and chart-ready tables.
//!
//! This crate provides:
//! - Epic aggregation with deterministic ordering (`aggregate`)
//! - Read-only chart table projection (`chart`)
//! - Multi-source orchestration over the named input sets (`orchestrate`)
//!
//! The whole pipeline is pure and synchronous: no I/O, no shared state
//! between invocations, and identical input always yields identical output.
//!
//! ## Example
//!
//! ```rust
//! use sprintlens_core::{IssueRecord, StatusCategory};
//! use sprintlens_progress::aggregate_epics;
//!
//! let records = vec![
//!     IssueRecord {
//!         key: "NG-1".into(),
//!         epic_key: "NG-100".into(),
//!         epic_name: "Auth".into(),
//!         story_points: 5.0,
//!         status: Some(StatusCategory::Done),
//!     },
//!     IssueRecord {
//!         key: "NG-2".into(),
//!         epic_key: "NG-100".into(),
//!         epic_name: "Auth".into(),
//!         story_points: 3.0,
//!         status: Some(StatusCategory::ToDo),
//!     },
//! ];
//!
//! let summaries = aggregate_epics(&records);
//! assert_eq!(summaries.len(), 1);
//! assert_eq!(summaries[0].completion_percent, 62.5);
//! ```

pub mod aggregate;
pub mod chart;
pub mod orchestrate;

pub use aggregate::{aggregate_epics, truncate_epic_name, EPIC_NAME_DISPLAY_LEN};
pub use chart::{ChartConfig, ChartProjector, DEFAULT_MAX_CHART_ROWS};
pub use orchestrate::{IssueSets, Orchestrator};
