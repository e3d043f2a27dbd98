use crate::core::Event;
use crate::filters::{DiscoverFilters, DistanceMode, FilterField};
use crate::formatting::{format_distance, DistanceDisplay, OutputFormatter};
use crate::state::DiscoverState;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

/// What the renderer needs to know about one filtering run.
pub struct FilterReport<'a> {
    pub state: &'a DiscoverState,
    pub total: usize,
    pub events: &'a [Event],
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &FilterReport<'_>) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &FilterReport<'_>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report.events)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write, F: OutputFormatter> {
    writer: W,
    formatter: F,
}

impl<W: Write, F: OutputFormatter> TerminalWriter<W, F> {
    pub fn new(writer: W, formatter: F) -> Self {
        Self { writer, formatter }
    }

    fn write_summary(&mut self, report: &FilterReport<'_>) -> anyhow::Result<()> {
        let line = format!(
            "{} of {} events match",
            report.events.len(),
            report.total
        );
        let line = if report.events.is_empty() {
            self.formatter.warning(&line)
        } else {
            self.formatter.success(&line)
        };
        writeln!(
            self.writer,
            "{} {}",
            line,
            self.formatter.dim(&describe_state(report.state))
        )?;
        Ok(())
    }
}

impl<W: Write, F: OutputFormatter> OutputWriter for TerminalWriter<W, F> {
    fn write_report(&mut self, report: &FilterReport<'_>) -> anyhow::Result<()> {
        if !report.events.is_empty() {
            writeln!(self.writer, "{}", self.formatter.header("Events"))?;
            writeln!(self.writer, "{}", render_table(report.events))?;
        }
        self.write_summary(report)
    }
}

/// Build the event table.
pub fn render_table(events: &[Event]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Title",
            "Category",
            "Distance",
            "Date",
            "Attendance",
            "Visibility",
        ]);

    for event in events {
        table.add_row(vec![
            event.title.clone(),
            event.category.clone(),
            distance_cell(event),
            date_cell(event),
            attendance_cell(event),
            event.visibility.to_string(),
        ]);
    }
    table
}

fn distance_cell(event: &Event) -> String {
    let display = event.distance_km().map(DistanceDisplay::from_km);
    format_distance(display.as_ref())
}

fn date_cell(event: &Event) -> String {
    event
        .scheduled_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn attendance_cell(event: &Event) -> String {
    match event.max_attendees {
        Some(max) => format!("{}/{}", event.attendees, max),
        None => event.attendees.to_string(),
    }
}

/// `field: value` for every filter field that differs from the default.
/// The radius is listed only while the distance filter is on.
fn active_filters(filters: &DiscoverFilters) -> Vec<String> {
    let defaults = DiscoverFilters::default();
    FilterField::all()
        .iter()
        .filter(|&&field| match field {
            FilterField::Distance => false,
            FilterField::Radius => filters.distance == DistanceMode::Radius,
            _ => filters.field_value(field) != defaults.field_value(field),
        })
        .map(|&field| match field {
            FilterField::Radius => format!("within {}km", filters.radius),
            _ => format!("{}: {}", field, filters.field_value(field)),
        })
        .collect()
}

fn describe_state(state: &DiscoverState) -> String {
    let mut parts = Vec::new();
    if !state.selected_categories.is_all() {
        parts.push(format!(
            "categories: {}",
            state.selected_categories.as_slice().join(", ")
        ));
    }
    if !state.search_query.trim().is_empty() {
        parts.push(format!("query: \"{}\"", state.search_query.trim()));
    }
    parts.extend(active_filters(&state.selected_filters));
    if parts.is_empty() {
        "(no filters)".to_string()
    } else {
        format!("({})", parts.join("; "))
    }
}
