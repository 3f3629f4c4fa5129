//! # sprintlens-render
//!
//! Rendering backends for sprintlens export bundles.
//!
//! This crate provides:
//! - Excel workbook rendering with native progress charts
//! - SVG progress-bar rendering
//! - Text-based output for the console
//! - Custom renderer trait (re-exported from core)
//!
//! ## Example
//!
//! ```rust,ignore
//! use sprintlens_core::Renderer;
//! use sprintlens_render::{ExcelRenderer, SvgProgressRenderer};
//!
//! // Excel report
//! let renderer = ExcelRenderer::new();
//! let xlsx_bytes = renderer.render(&bundle)?;
//! std::fs::write("JiraExport.xlsx", xlsx_bytes)?;
//!
//! // SVG progress bars
//! let svg_renderer = SvgProgressRenderer::new();
//! let svg = svg_renderer.render(&bundle)?;
//! ```

pub mod excel;
pub mod svg;

pub use excel::ExcelRenderer;
pub use svg::SvgProgressRenderer;

use sprintlens_core::{ExportBundle, RenderError, Renderer};

/// Plain text renderer for console output
#[derive(Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, bundle: &ExportBundle) -> Result<String, RenderError> {
        let mut out = String::new();
        for set_report in &bundle.report.sets {
            out.push_str(&format!("{}\n", set_report.set));
            if set_report.summaries.is_empty() {
                out.push_str("  (no epics with story points)\n");
                continue;
            }
            for epic in &set_report.summaries {
                out.push_str(&format!(
                    "  {:<43} {:>5.1}%  done {} / in progress {} / to do {}\n",
                    epic.epic_name,
                    epic.completion_percent,
                    epic.done_points,
                    epic.in_progress_points,
                    epic.to_do_points,
                ));
            }
        }
        if !bundle.worklogs.is_empty() {
            out.push_str(&format!("{} work logs\n", bundle.worklogs.len()));
        }
        if !bundle.comments.is_empty() {
            out.push_str(&format!("{} comments\n", bundle.comments.len()));
        }
        Ok(out)
    }
}
