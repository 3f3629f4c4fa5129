//! Excel report renderer.
//!
//! Produces the multi-sheet report workbook: flat Sprint Issues / Work
//! Logs / Comments sheets plus a Progress sheet
//! holding, per input set, the three chart tables with a native chart
//! anchored beside each. Sheets materialize only when their data is
//! present. Output is the workbook as an in-memory byte buffer; writing it
//! to disk is the caller's concern.

use rust_xlsxwriter::{
    Chart, ChartLegendPosition, ChartSolidFill, ChartType, Format, Workbook, Worksheet, XlsxError,
};
use sprintlens_core::{ExportBundle, RenderError, Renderer, SetReport};

/// Fill colors for the stacked progress series
const DONE_COLOR: &str = "#4CAF50";
const IN_PROGRESS_COLOR: &str = "#FFC107";
const TO_DO_COLOR: &str = "#2196F3";

/// Column the charts are anchored at, leaving the data blocks visible
const CHART_COL: u16 = 6;

/// A chart spans roughly this many sheet rows; data blocks shorter than
/// this advance the cursor far enough that charts never overlap
const CHART_ROW_SPAN: u32 = 15;

const PROGRESS_SHEET: &str = "Progress";

/// Excel report renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Chart width in pixels
    pub chart_width: u32,
    /// Chart height in pixels
    pub chart_height: u32,
    /// Whether to insert native charts next to the data blocks
    pub include_charts: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            chart_width: 520,
            chart_height: 300,
            include_charts: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width in pixels
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure chart height in pixels
    pub fn chart_height(mut self, height: u32) -> Self {
        self.chart_height = height;
        self
    }

    /// Emit data blocks only, without native charts
    pub fn no_charts(mut self) -> Self {
        self.include_charts = false;
        self
    }

    fn build(&self, bundle: &ExportBundle) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        if !bundle.issues.is_empty() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name("Sprint Issues")?;
            write_issue_sheet(worksheet, bundle, &header)?;
        }

        if !bundle.worklogs.is_empty() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name("Work Logs")?;
            write_worklog_sheet(worksheet, bundle, &header)?;
        }

        if !bundle.comments.is_empty() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name("Comments")?;
            write_comment_sheet(worksheet, bundle, &header)?;
        }

        if !bundle.report.sets.is_empty() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(PROGRESS_SHEET)?;
            worksheet.set_column_width(0, 44)?;
            let mut row = 0u32;
            for set_report in &bundle.report.sets {
                row = self.write_progress_set(worksheet, set_report, row, &header)?;
            }
        }

        workbook.save_to_buffer()
    }

    /// Write one input set's three data blocks and charts; returns the next
    /// free row.
    fn write_progress_set(
        &self,
        worksheet: &mut Worksheet,
        set_report: &SetReport,
        mut row: u32,
        header: &Format,
    ) -> Result<u32, XlsxError> {
        worksheet.write_string_with_format(row, 0, set_report.set.as_str(), header)?;
        row += 2;

        if set_report.summaries.is_empty() {
            worksheet.write_string(row, 0, "No epics with story points")?;
            return Ok(row + 3);
        }

        // Completion percentage block
        let charts = &set_report.charts;
        worksheet.write_string_with_format(row, 0, "Epic", header)?;
        worksheet.write_string_with_format(row, 1, "Completion %", header)?;
        for (i, entry) in charts.percentage.iter().enumerate() {
            let data_row = row + 1 + i as u32;
            worksheet.write_string(data_row, 0, &entry.epic_name)?;
            worksheet.write_number(data_row, 1, round1(entry.completion_percent))?;
        }
        if self.include_charts {
            let last = row + charts.percentage.len() as u32;
            let mut chart = Chart::new(ChartType::Bar);
            chart
                .add_series()
                .set_categories((PROGRESS_SHEET, row + 1, 0, last, 0))
                .set_values((PROGRESS_SHEET, row + 1, 1, last, 1))
                .set_name("Completion %");
            chart
                .title()
                .set_name(&format!("{} Progress (%)", set_report.set));
            chart.legend().set_hidden();
            chart.set_width(self.chart_width).set_height(self.chart_height);
            worksheet.insert_chart(row, CHART_COL, &chart)?;
        }
        row = self.advance(row, charts.percentage.len());

        // Stacked story-point block; column order fixes the stacking order
        worksheet.write_string_with_format(row, 0, "Epic", header)?;
        worksheet.write_string_with_format(row, 1, "Done", header)?;
        worksheet.write_string_with_format(row, 2, "In Progress", header)?;
        worksheet.write_string_with_format(row, 3, "To Do", header)?;
        for (i, entry) in charts.stacked.iter().enumerate() {
            let data_row = row + 1 + i as u32;
            worksheet.write_string(data_row, 0, &entry.epic_name)?;
            worksheet.write_number(data_row, 1, entry.done_points)?;
            worksheet.write_number(data_row, 2, entry.in_progress_points)?;
            worksheet.write_number(data_row, 3, entry.to_do_points)?;
        }
        if self.include_charts {
            let last = row + charts.stacked.len() as u32;
            let mut chart = Chart::new(ChartType::BarStacked);
            for (col, name, color) in [
                (1, "Done", DONE_COLOR),
                (2, "In Progress", IN_PROGRESS_COLOR),
                (3, "To Do", TO_DO_COLOR),
            ] {
                chart
                    .add_series()
                    .set_categories((PROGRESS_SHEET, row + 1, 0, last, 0))
                    .set_values((PROGRESS_SHEET, row + 1, col, last, col))
                    .set_name(name)
                    .set_format(ChartSolidFill::new().set_color(color));
            }
            chart
                .title()
                .set_name(&format!("{} Story Points", set_report.set));
            chart.legend().set_position(ChartLegendPosition::Bottom);
            chart.set_width(self.chart_width).set_height(self.chart_height);
            worksheet.insert_chart(row, CHART_COL, &chart)?;
        }
        row = self.advance(row, charts.stacked.len());

        // Composition block: each epic weighted by its own done/total ratio
        worksheet.write_string_with_format(row, 0, "Epic", header)?;
        worksheet.write_string_with_format(row, 1, "Done Share", header)?;
        for (i, entry) in charts.composition.iter().enumerate() {
            let data_row = row + 1 + i as u32;
            worksheet.write_string(data_row, 0, &entry.epic_name)?;
            worksheet.write_number(data_row, 1, entry.weight)?;
        }
        if self.include_charts {
            let last = row + charts.composition.len() as u32;
            let mut chart = Chart::new(ChartType::Pie);
            chart
                .add_series()
                .set_categories((PROGRESS_SHEET, row + 1, 0, last, 0))
                .set_values((PROGRESS_SHEET, row + 1, 1, last, 1))
                .set_name("Done Share");
            chart
                .title()
                .set_name(&format!("{} Composition", set_report.set));
            chart.set_width(self.chart_width).set_height(self.chart_height);
            worksheet.insert_chart(row, CHART_COL, &chart)?;
        }
        row = self.advance(row, charts.composition.len());

        Ok(row)
    }

    /// Advance past a data block, leaving room for the chart beside it
    fn advance(&self, row: u32, data_rows: usize) -> u32 {
        let block = 1 + data_rows as u32;
        let span = if self.include_charts {
            block.max(CHART_ROW_SPAN)
        } else {
            block
        };
        row + span + 2
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, bundle: &ExportBundle) -> Result<Vec<u8>, RenderError> {
        if bundle.report.sets.is_empty()
            && bundle.issues.is_empty()
            && bundle.worklogs.is_empty()
            && bundle.comments.is_empty()
        {
            return Err(RenderError::InvalidData("no data to export".into()));
        }
        self.build(bundle)
            .map_err(|e| RenderError::Format(format!("workbook generation failed: {e}")))
    }
}

fn write_issue_sheet(
    worksheet: &mut Worksheet,
    bundle: &ExportBundle,
    header: &Format,
) -> Result<(), XlsxError> {
    for (col, title) in ["Issue Key", "Issue Type", "Summary", "Status", "Parent Summary"]
        .iter()
        .enumerate()
    {
        worksheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    worksheet.set_column_width(2, 48)?;
    worksheet.set_column_width(4, 32)?;

    for (i, issue) in bundle.issues.iter().enumerate() {
        let row = 1 + i as u32;
        worksheet.write_string(row, 0, &issue.key)?;
        worksheet.write_string(row, 1, &issue.issue_type)?;
        worksheet.write_string(row, 2, &issue.summary)?;
        worksheet.write_string(row, 3, &issue.status)?;
        worksheet.write_string(row, 4, &issue.parent_summary)?;
    }
    Ok(())
}

fn write_worklog_sheet(
    worksheet: &mut Worksheet,
    bundle: &ExportBundle,
    header: &Format,
) -> Result<(), XlsxError> {
    for (col, title) in [
        "Issue Key",
        "Issue Type",
        "Summary",
        "Status",
        "Author",
        "Time Spent",
        "Time Spent (Hours)",
        "Date",
        "Sprint",
        "Comment",
    ]
    .iter()
    .enumerate()
    {
        worksheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    worksheet.set_column_width(2, 48)?;
    worksheet.set_column_width(9, 48)?;

    for (i, log) in bundle.worklogs.iter().enumerate() {
        let row = 1 + i as u32;
        worksheet.write_string(row, 0, &log.issue_key)?;
        worksheet.write_string(row, 1, &log.issue_type)?;
        worksheet.write_string(row, 2, &log.summary)?;
        worksheet.write_string(row, 3, &log.status)?;
        worksheet.write_string(row, 4, &log.author)?;
        worksheet.write_string(row, 5, &log.time_spent)?;
        worksheet.write_number(row, 6, log.time_spent_hours)?;
        worksheet.write_string(row, 7, &log.started_date.to_string())?;
        worksheet.write_string(row, 8, &log.sprint)?;
        worksheet.write_string(row, 9, &log.comment)?;
    }
    Ok(())
}

fn write_comment_sheet(
    worksheet: &mut Worksheet,
    bundle: &ExportBundle,
    header: &Format,
) -> Result<(), XlsxError> {
    for (col, title) in [
        "Issue Key",
        "Summary",
        "Status",
        "Parent Summary",
        "Issue Type",
        "Comment Date",
        "Comment Author",
        "Comment",
    ]
    .iter()
    .enumerate()
    {
        worksheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    worksheet.set_column_width(1, 48)?;
    worksheet.set_column_width(7, 60)?;

    for (i, comment) in bundle.comments.iter().enumerate() {
        let row = 1 + i as u32;
        worksheet.write_string(row, 0, &comment.issue_key)?;
        worksheet.write_string(row, 1, &comment.summary)?;
        worksheet.write_string(row, 2, &comment.status)?;
        worksheet.write_string(row, 3, &comment.parent_summary)?;
        worksheet.write_string(row, 4, &comment.issue_type)?;
        worksheet.write_string(
            row,
            5,
            &comment.created.format("%Y-%m-%d %H:%M:%S").to_string(),
        )?;
        worksheet.write_string(row, 6, &comment.author)?;
        worksheet.write_string(row, 7, &comment.body)?;
    }
    Ok(())
}

/// Completion percentages are written rounded to one decimal
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
