use std::collections::BTreeSet;

use tracing::debug;

use crate::error::AppResult;
use crate::models::chart::{ChartKind, ChartTarget, SeriesDescriptor};
use crate::models::fragment::{Fragment, FragmentKind};
use crate::models::notification::Notification;
use crate::models::page::PageId;
use crate::services::chart_adapter::{ChartBackend, ChartRegistry, ChartUpdate};
use crate::services::dashboard_session::PageView;

const BAR_WIDTH: f64 = 30.0;

/// Plain-text chart surface. Only the charts of the page on screen have a
/// container.
#[derive(Debug, Default)]
pub struct TerminalChartBackend {
    mounted: BTreeSet<ChartTarget>,
}

impl TerminalChartBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartBackend for TerminalChartBackend {
    fn has_container(&self, target: ChartTarget) -> bool {
        self.mounted.contains(&target)
    }

    fn draw(&mut self, target: ChartTarget, descriptor: &SeriesDescriptor) -> AppResult<()> {
        debug!(
            target: "app::charts",
            chart = target.container_id(),
            points = descriptor.labels.len(),
            "terminal chart drawn"
        );
        Ok(())
    }

    fn page_shown(&mut self, page: PageId) {
        self.mounted = page.chart_targets().iter().copied().collect();
    }
}

pub fn render_fragment(fragment: &Fragment) -> String {
    if fragment.kind == FragmentKind::NoData {
        return format!("  ({})\n", fragment.title);
    }

    let mut heading = String::from("  ");
    if let Some(id) = fragment.entity_id {
        heading.push_str(&format!("#{id} "));
    }
    heading.push_str(&fragment.title);
    for badge in &fragment.badges {
        heading.push_str(&format!(" [{}]", badge.label));
    }

    let mut out = heading;
    out.push('\n');
    if let Some(subtitle) = fragment.subtitle.as_deref() {
        out.push_str(&format!("    {subtitle}\n"));
    }
    for field in &fragment.fields {
        match field.tone {
            Some(tone) => out.push_str(&format!(
                "    {}: {} ({})\n",
                field.label,
                field.value,
                tone.as_str()
            )),
            None => out.push_str(&format!("    {}: {}\n", field.label, field.value)),
        }
    }
    for item in &fragment.items {
        out.push_str(&format!("    - {item}\n"));
    }
    out
}

fn scale(value: f64, descriptor: &SeriesDescriptor, max: f64) -> usize {
    let (low, high) = descriptor.y_range.unwrap_or((0.0, max.max(1.0)));
    let span = (high - low).max(f64::EPSILON);
    let ratio = ((value - low) / span).clamp(0.0, 1.0);
    (ratio * BAR_WIDTH).round() as usize
}

pub fn render_chart(target: ChartTarget, descriptor: &SeriesDescriptor) -> String {
    let title = descriptor
        .title
        .clone()
        .unwrap_or_else(|| target.container_id().to_string());
    let mut out = format!("  [{}] {}\n", kind_label(descriptor.kind), title);

    let label_width = descriptor
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = descriptor
        .datasets
        .iter()
        .flat_map(|dataset| dataset.values.iter().copied())
        .fold(0.0_f64, f64::max);

    for dataset in descriptor.datasets.iter().filter(|dataset| !dataset.reference) {
        out.push_str(&format!("    {}\n", dataset.label));
        for (label, value) in descriptor.labels.iter().zip(&dataset.values) {
            let bar = "#".repeat(scale(*value, descriptor, max));
            let suffix = if descriptor.percent_axis { "%" } else { "" };
            out.push_str(&format!(
                "      {label:<label_width$} {bar} {value}{suffix}\n"
            ));
        }
    }
    for reference in descriptor.datasets.iter().filter(|dataset| dataset.reference) {
        if let Some(value) = reference.values.first() {
            out.push_str(&format!("    {}: {value}\n", reference.label));
        }
    }
    out
}

fn kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "linha",
        ChartKind::Bar => "barras",
        ChartKind::Doughnut => "rosca",
    }
}

pub fn render_page(view: &PageView, charts: &ChartRegistry) -> String {
    let mut out = format!("== {} ==\n", view.title);
    if let Some(error) = view.load_error.as_deref() {
        out.push_str(&format!("! {error}\n"));
    }
    for section in &view.sections {
        out.push_str(&format!("\n[{}]\n", section.name));
        if let Some(error) = section.error.as_deref() {
            out.push_str(&format!("  ! {error}\n"));
        }
        for fragment in &section.fragments {
            out.push_str(&render_fragment(fragment));
        }
    }
    for chart in &view.charts {
        out.push('\n');
        match (&chart.outcome, charts.current(chart.target)) {
            (ChartUpdate::Applied { .. }, Some(descriptor)) => {
                out.push_str(&render_chart(chart.target, descriptor));
            }
            (ChartUpdate::Skipped { reason }, _) => {
                out.push_str(&format!("  [{}] ignorado: {reason}\n", chart.container));
            }
            (ChartUpdate::Failed { error }, _) => {
                out.push_str(&format!("  [{}] falhou: {error}\n", chart.container));
            }
            (ChartUpdate::Applied { .. }, None) => {}
        }
    }
    out
}

pub fn render_modal(content: &Fragment) -> String {
    format!("\n-- Detalhes --\n{}", render_fragment(content))
}

pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| format!("[{}] {}\n", notification.level, notification.message))
        .collect()
}
