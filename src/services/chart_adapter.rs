use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppResult, RenderSkipped};
use crate::models::chart::{ChartData, ChartKind, ChartPeriod, ChartTarget, SeriesDescriptor};
use crate::models::page::PageId;

pub const PERFORMANCE_TARGET: f64 = 85.0;
pub const SATISFACTION_TARGET: f64 = 90.0;

/// Performance trend for one period; `None` when the data has no such period.
pub fn describe_performance(data: &ChartData, period: ChartPeriod) -> Option<SeriesDescriptor> {
    let series = data.performance.for_period(period)?;
    Some(
        SeriesDescriptor::new(ChartKind::Line, series.labels.clone())
            .with_dataset("Performance Média (%)", series.data.clone())
            .with_target("Meta (%)", PERFORMANCE_TARGET)
            .with_percent_range(70.0, 100.0),
    )
}

pub fn describe_departments(data: &ChartData) -> SeriesDescriptor {
    let departments = &data.departments;
    let mut descriptor = SeriesDescriptor::new(ChartKind::Bar, departments.labels.clone())
        .with_dataset("Performance (%)", departments.performance.clone());
    if let Some(satisfaction) = departments.satisfaction.as_ref() {
        descriptor = descriptor.with_dataset("Satisfação (%)", satisfaction.clone());
    }
    descriptor.with_percent_range(60.0, 100.0)
}

/// Satisfaction trend. With a performance series both are compared;
/// otherwise a 90% target line is drawn.
pub fn describe_satisfaction(data: &ChartData) -> SeriesDescriptor {
    let satisfaction = &data.satisfaction;
    let descriptor = SeriesDescriptor::new(ChartKind::Line, satisfaction.labels.clone())
        .with_dataset("Satisfação (%)", satisfaction.data.clone());
    let descriptor = match satisfaction.performance.as_ref() {
        Some(performance) => descriptor.with_dataset("Performance (%)", performance.clone()),
        None => descriptor.with_target("Meta (%)", SATISFACTION_TARGET),
    };
    descriptor.with_percent_range(70.0, 100.0)
}

pub fn describe_status(data: &ChartData) -> SeriesDescriptor {
    SeriesDescriptor::new(ChartKind::Doughnut, data.status.labels.clone())
        .with_title("Status dos Funcionários")
        .with_dataset("Funcionários", data.status.data.clone())
}

/// Descriptor for any chart target; only the performance chart depends on
/// the selected period.
pub fn describe(target: ChartTarget, data: &ChartData, period: ChartPeriod) -> Option<SeriesDescriptor> {
    match target {
        ChartTarget::Performance => describe_performance(data, period),
        ChartTarget::Department => Some(describe_departments(data)),
        ChartTarget::Satisfaction => Some(describe_satisfaction(data)),
        ChartTarget::Status => Some(describe_status(data)),
    }
}

/// Drawing surface for charts. Implementations decide which containers
/// currently exist.
pub trait ChartBackend: Send + Sync {
    fn has_container(&self, target: ChartTarget) -> bool;

    fn draw(&mut self, target: ChartTarget, descriptor: &SeriesDescriptor) -> AppResult<()>;

    fn page_shown(&mut self, _page: PageId) {}
}

/// Backend with no containers at all; every update is skipped.
#[derive(Debug, Default)]
pub struct NullChartBackend;

impl ChartBackend for NullChartBackend {
    fn has_container(&self, _target: ChartTarget) -> bool {
        false
    }

    fn draw(&mut self, _target: ChartTarget, _descriptor: &SeriesDescriptor) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ChartUpdate {
    Applied { revision: u64 },
    Skipped { reason: String },
    Failed { error: String },
}

impl ChartUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChartUpdate::Applied { .. })
    }
}

impl From<RenderSkipped> for ChartUpdate {
    fn from(skipped: RenderSkipped) -> Self {
        ChartUpdate::Skipped {
            reason: skipped.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ChartHandle {
    revision: u64,
    descriptor: SeriesDescriptor,
}

/// Keeps the current descriptor per chart target. Each target holds at most
/// one live chart; updating replaces it.
pub struct ChartRegistry {
    backend: Box<dyn ChartBackend>,
    handles: BTreeMap<ChartTarget, ChartHandle>,
    period: ChartPeriod,
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new(Box::new(NullChartBackend))
    }
}

impl ChartRegistry {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend,
            handles: BTreeMap::new(),
            period: ChartPeriod::default(),
        }
    }

    pub fn period(&self) -> ChartPeriod {
        self.period
    }

    pub fn backend(&self) -> &dyn ChartBackend {
        self.backend.as_ref()
    }

    pub fn page_shown(&mut self, page: PageId) {
        self.backend.page_shown(page);
    }

    pub fn update(&mut self, target: ChartTarget, descriptor: SeriesDescriptor) -> AppResult<ChartUpdate> {
        if !self.backend.has_container(target) {
            let skipped = RenderSkipped::new(format!(
                "container {} não encontrado",
                target.container_id()
            ));
            return Ok(skipped.into());
        }

        descriptor.validate()?;
        self.backend.draw(target, &descriptor)?;

        let revision = self
            .handles
            .get(&target)
            .map(|handle| handle.revision + 1)
            .unwrap_or(1);
        self.handles.insert(
            target,
            ChartHandle {
                revision,
                descriptor,
            },
        );
        debug!(target: "app::charts", chart = target.container_id(), revision, "chart updated");
        Ok(ChartUpdate::Applied { revision })
    }

    /// Draws every chart of a page from the given data. A failing chart does
    /// not stop the others.
    pub fn render_page(&mut self, page: PageId, data: &ChartData) -> Vec<(ChartTarget, ChartUpdate)> {
        let period = self.period;
        let mut outcomes = Vec::new();
        for target in page.chart_targets() {
            let outcome = match describe(*target, data, period) {
                Some(descriptor) => self.update(*target, descriptor).unwrap_or_else(|err| {
                    warn!(target: "app::charts", chart = target.container_id(), error = %err, "chart update failed");
                    ChartUpdate::Failed {
                        error: err.to_string(),
                    }
                }),
                None => RenderSkipped::new(format!("período {} sem dados", period.as_str())).into(),
            };
            outcomes.push((*target, outcome));
        }
        outcomes
    }

    /// Switches the performance chart period. A period missing from the data
    /// changes nothing.
    pub fn change_period(&mut self, period: ChartPeriod, data: &ChartData) -> AppResult<ChartUpdate> {
        let Some(descriptor) = describe_performance(data, period) else {
            return Ok(RenderSkipped::new(format!("período {} sem dados", period.as_str())).into());
        };
        let outcome = self.update(ChartTarget::Performance, descriptor)?;
        if outcome.is_applied() {
            self.period = period;
        }
        Ok(outcome)
    }

    pub fn current(&self, target: ChartTarget) -> Option<&SeriesDescriptor> {
        self.handles.get(&target).map(|handle| &handle.descriptor)
    }

    pub fn revision(&self, target: ChartTarget) -> u64 {
        self.handles.get(&target).map(|handle| handle.revision).unwrap_or(0)
    }
}
