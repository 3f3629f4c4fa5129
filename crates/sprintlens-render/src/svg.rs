//! SVG progress-bar renderer.
//!
//! Renders one horizontal completion bar per retained epic, grouped by
//! input set. Useful for embedding a progress snapshot in docs or dashboards
//! without opening the workbook.

use svg::node::element::{Group, Rectangle, Text};
use svg::Document;

use sprintlens_core::{ExportBundle, PercentageRow, RenderError, Renderer, SetReport};

/// SVG progress chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgProgressRenderer {
    /// Width of the bar area (excluding labels) in pixels
    pub bar_width: u32,
    /// Height per epic row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Height of each set's title row
    pub title_height: u32,
    /// Fill color for the completed share of a bar
    pub bar_color: String,
    /// Fill color for the bar track
    pub track_color: String,
    /// Background color
    pub background_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgProgressRenderer {
    fn default() -> Self {
        Self {
            bar_width: 420,
            row_height: 26,
            label_width: 300,
            padding: 20,
            title_height: 34,
            bar_color: "#4CAF50".into(),
            track_color: "#ecf0f1".into(),
            background_color: "#ffffff".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgProgressRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure bar width
    pub fn bar_width(mut self, width: u32) -> Self {
        self.bar_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    fn total_width(&self) -> u32 {
        // Label column, bar, and a right gutter for the percent text
        self.padding * 2 + self.label_width + self.bar_width + 60
    }

    fn set_height(&self, set_report: &SetReport) -> u32 {
        let rows = set_report.charts.percentage.len().max(1) as u32;
        self.title_height + rows * self.row_height + self.padding / 2
    }

    fn render_row(&self, entry: &PercentageRow, x: u32, y: u32) -> Group {
        let mut group = Group::new().set("class", "epic");

        let bar_height = (self.row_height as f64 * 0.6) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;
        let text_y = y + self.row_height / 2 + self.font_size / 3;

        let label = Text::new(entry.epic_name.clone())
            .set("x", x)
            .set("y", text_y)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.text_color.as_str());
        group = group.add(label);

        let bar_x = x + self.label_width;
        let track = Rectangle::new()
            .set("x", bar_x)
            .set("y", bar_y)
            .set("width", self.bar_width)
            .set("height", bar_height)
            .set("rx", 3)
            .set("fill", self.track_color.as_str());
        group = group.add(track);

        let filled = (entry.completion_percent / 100.0 * self.bar_width as f64).round();
        if filled >= 1.0 {
            let fill = Rectangle::new()
                .set("x", bar_x)
                .set("y", bar_y)
                .set("width", filled)
                .set("height", bar_height)
                .set("rx", 3)
                .set("fill", self.bar_color.as_str());
            group = group.add(fill);
        }

        let percent = Text::new(format!("{:.1}%", entry.completion_percent))
            .set("x", bar_x + self.bar_width + 8)
            .set("y", text_y)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.text_color.as_str());
        group.add(percent)
    }

    fn render_set(&self, set_report: &SetReport, y_offset: u32) -> Group {
        let mut group = Group::new().set("class", "input-set");

        let title = Text::new(set_report.set.as_str())
            .set("x", self.padding)
            .set("y", y_offset + self.font_size + 6)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 3)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        group = group.add(title);

        if set_report.charts.percentage.is_empty() {
            let note = Text::new("No epics with story points")
                .set("x", self.padding)
                .set("y", y_offset + self.title_height + self.font_size)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size)
                .set("fill", self.text_color.as_str());
            return group.add(note);
        }

        for (i, entry) in set_report.charts.percentage.iter().enumerate() {
            let y = y_offset + self.title_height + i as u32 * self.row_height;
            group = group.add(self.render_row(entry, self.padding, y));
        }
        group
    }
}

impl Renderer for SvgProgressRenderer {
    type Output = String;

    fn render(&self, bundle: &ExportBundle) -> Result<String, RenderError> {
        if bundle.report.sets.is_empty() {
            return Err(RenderError::InvalidData("no progress data to render".into()));
        }

        let width = self.total_width();
        let height: u32 = self.padding * 2
            + bundle
                .report
                .sets
                .iter()
                .map(|s| self.set_height(s))
                .sum::<u32>();

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        let mut y = self.padding;
        for set_report in &bundle.report.sets {
            document = document.add(self.render_set(set_report, y));
            y += self.set_height(set_report);
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}
