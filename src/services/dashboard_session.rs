use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::chart::{ChartPeriod, ChartTarget};
use crate::models::employee::Employee;
use crate::models::fragment::Fragment;
use crate::models::notification::Notification;
use crate::models::page::PageId;
use crate::models::recommendation::Recommendation;
use crate::models::settings::DataSourceKind;
use crate::services::chart_adapter::{ChartBackend, ChartRegistry, ChartUpdate};
use crate::services::data_source::{build_data_source, AnalyticsSnapshot, DashboardSnapshot, DataSource};
use crate::services::domain_store::DomainStore;
use crate::services::filter_engine::{self, FilterField, PredicateSet};
use crate::services::modal_controller::{CloseReason, ModalController, ModalState};
use crate::services::navigator::{Navigator, PageToken};
use crate::services::notification_center::NotificationCenter;
use crate::services::settings_service::ResolvedSettings;
use crate::services::view_renderer::ViewRenderer;
use crate::utils::time::DateFormatter;

pub const DATA_LOADED_MESSAGE: &str = "Dados carregados com sucesso!";

/// Result of the fetch phase of a navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Dashboard(DashboardSnapshot),
    Employees(Vec<Employee>),
    Recommendations(Vec<Recommendation>),
    Analytics(AnalyticsSnapshot),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: &'static str,
    pub fragments: Vec<Fragment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Section {
    fn build<F>(name: &'static str, render: F) -> Self
    where
        F: FnOnce() -> AppResult<Vec<Fragment>>,
    {
        match render() {
            Ok(fragments) => Self {
                name,
                fragments,
                error: None,
            },
            Err(err) => {
                warn!(target: "app::session", section = name, error = %err, "section render failed");
                Self {
                    name,
                    fragments: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRender {
    pub target: ChartTarget,
    pub container: &'static str,
    pub outcome: ChartUpdate,
}

/// Everything shown for the active page after a navigation or re-render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: PageId,
    pub title: &'static str,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartRender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

impl PageView {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }
}

fn load_error_message(page: PageId) -> &'static str {
    match page {
        PageId::Employees => "Erro ao carregar funcionários",
        PageId::Recommendations => "Erro ao carregar recomendações",
        PageId::Analytics => "Erro ao carregar analytics",
        _ => "Erro ao carregar dados do dashboard",
    }
}

/// Page context: owns every collaborator and sequences navigation as
/// `begin` → `fetch` → `apply`.
pub struct DashboardSession {
    settings: ResolvedSettings,
    source: Arc<dyn DataSource>,
    store: DomainStore,
    navigator: Navigator,
    modal: ModalController,
    charts: ChartRegistry,
    notifications: NotificationCenter,
    renderer: ViewRenderer,
    employee_filter: PredicateSet,
    recommendation_filter: PredicateSet,
}

impl DashboardSession {
    pub fn new(
        settings: ResolvedSettings,
        source: Arc<dyn DataSource>,
        backend: Box<dyn ChartBackend>,
    ) -> Self {
        let renderer = ViewRenderer::new(DateFormatter::new(
            settings.timezone,
            settings.settings.date_format.clone(),
        ));
        let notifications = NotificationCenter::from_settings(&settings);
        Self {
            settings,
            source,
            store: DomainStore::new(),
            navigator: Navigator::new(),
            modal: ModalController::new(),
            charts: ChartRegistry::new(backend),
            notifications,
            renderer,
            employee_filter: PredicateSet::new(),
            recommendation_filter: PredicateSet::new(),
        }
    }

    pub fn from_settings(settings: ResolvedSettings, backend: Box<dyn ChartBackend>) -> AppResult<Self> {
        let source = build_data_source(&settings)?;
        Ok(Self::new(settings, source, backend))
    }

    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn employee_filter(&self) -> &PredicateSet {
        &self.employee_filter
    }

    pub fn recommendation_filter(&self) -> &PredicateSet {
        &self.recommendation_filter
    }

    /// Full navigation to a page id or URL fragment.
    pub async fn go_to(&mut self, page: &str) -> Option<PageView> {
        let token = self.begin(page);
        let data = self.fetch(token).await;
        self.apply(token, data)
    }

    /// Activates a page and returns the token its data must be applied with.
    pub fn begin(&mut self, page: &str) -> PageToken {
        let token = self.navigator.go_to(page);
        self.charts.page_shown(token.page);
        token
    }

    /// Loads the data a page depends on. Takes `&self` so several fetches
    /// may be in flight at once.
    pub async fn fetch(&self, token: PageToken) -> AppResult<PageData> {
        debug!(
            target: "app::session",
            page = token.page.as_str(),
            generation = token.generation,
            "fetch started"
        );
        let data = match token.page {
            PageId::Dashboard => PageData::Dashboard(self.source.load_dashboard().await?),
            PageId::Employees => PageData::Employees(self.source.load_employees().await?),
            PageId::Recommendations => {
                PageData::Recommendations(self.source.load_recommendations().await?)
            }
            PageId::Analytics => PageData::Analytics(self.source.load_analytics().await?),
            PageId::Settings | PageId::About => PageData::Empty,
        };
        Ok(data)
    }

    /// Stores fetched data and renders the page. Returns `None` when a newer
    /// navigation has happened since `token` was issued; nothing is stored or
    /// notified in that case.
    pub fn apply(&mut self, token: PageToken, data: AppResult<PageData>) -> Option<PageView> {
        if !self.navigator.is_current(token) {
            debug!(
                target: "app::session",
                page = token.page.as_str(),
                generation = token.generation,
                "discarding stale page data"
            );
            return None;
        }

        let data = match data {
            Ok(data) => data,
            Err(err) => {
                warn!(target: "app::session", page = token.page.as_str(), error = %err, "page load failed");
                self.notifications.error(load_error_message(token.page));
                let mut view = self.render_current(false);
                view.load_error = Some(err.to_string());
                return Some(view);
            }
        };

        let draw_charts = !token.page.chart_targets().is_empty();
        match data {
            PageData::Dashboard(snapshot) => {
                self.store.replace(snapshot.employees);
                self.store.replace(snapshot.recommendations);
                self.store.replace_summary(snapshot.metrics);
                self.store.replace_charts(snapshot.charts);
                if self.source.kind() == DataSourceKind::Static {
                    self.notifications.success(DATA_LOADED_MESSAGE);
                }
            }
            PageData::Employees(employees) => self.store.replace(employees),
            PageData::Recommendations(recommendations) => self.store.replace(recommendations),
            PageData::Analytics(snapshot) => {
                self.store.replace_analytics(snapshot.metrics);
                self.store.replace_charts(snapshot.charts);
            }
            PageData::Empty => {}
        }

        info!(target: "app::session", page = token.page.as_str(), "page rendered");
        Some(self.render_current(draw_charts))
    }

    /// Re-renders the active page from the store without fetching.
    pub fn refresh(&mut self) -> PageView {
        self.render_current(false)
    }

    fn render_current(&mut self, draw_charts: bool) -> PageView {
        let page = self.navigator.active();
        let sections = match page {
            PageId::Dashboard => vec![
                Section::build("metrics", || {
                    let summary = self
                        .store
                        .summary()
                        .ok_or_else(|| AppError::other("métricas ainda não carregadas"))?;
                    Ok(vec![self.renderer.render_summary(&summary)])
                }),
                Section::build("recommendations", || {
                    Ok(self
                        .renderer
                        .render_dashboard_recommendations(&self.store.recommendations()))
                }),
                Section::build("recentEmployees", || {
                    Ok(self.renderer.render_recent_employees(&self.store.employees()))
                }),
            ],
            PageId::Employees => vec![Section::build("employees", || {
                let employees = self.store.employees();
                let visible = filter_engine::apply(employees.as_slice(), &self.employee_filter);
                Ok(self.renderer.render_employees_grid(&visible))
            })],
            PageId::Recommendations => vec![Section::build("recommendations", || {
                let recommendations = self.store.recommendations();
                let visible =
                    filter_engine::apply(recommendations.as_slice(), &self.recommendation_filter);
                Ok(self.renderer.render_recommendations_grid(&visible))
            })],
            PageId::Analytics => vec![Section::build("analytics", || {
                let metrics = self
                    .store
                    .analytics()
                    .ok_or_else(|| AppError::other("analytics ainda não carregado"))?;
                Ok(vec![self.renderer.render_analytics_summary(&metrics)])
            })],
            PageId::Settings | PageId::About => Vec::new(),
        };

        let charts = match (draw_charts, self.store.charts()) {
            (true, Some(data)) => self
                .charts
                .render_page(page, &data)
                .into_iter()
                .map(|(target, outcome)| ChartRender {
                    target,
                    container: target.container_id(),
                    outcome,
                })
                .collect(),
            _ => Vec::new(),
        };

        PageView {
            page,
            title: page.title(),
            sections,
            charts,
            load_error: None,
        }
    }

    /// Replaces both filter sets without re-rendering; used before the first
    /// navigation.
    pub fn set_filters(&mut self, employees: PredicateSet, recommendations: PredicateSet) {
        self.employee_filter = employees;
        self.recommendation_filter = recommendations;
    }

    pub fn set_employee_filter(&mut self, field: FilterField, value: Option<String>) -> PageView {
        self.employee_filter.set(field, value);
        self.refresh()
    }

    pub fn search_employees(&mut self, query: Option<String>) -> PageView {
        self.employee_filter.set_search(query);
        self.refresh()
    }

    pub fn set_recommendation_filter(&mut self, field: FilterField, value: Option<String>) -> PageView {
        self.recommendation_filter.set(field, value);
        self.refresh()
    }

    pub fn search_recommendations(&mut self, query: Option<String>) -> PageView {
        self.recommendation_filter.set_search(query);
        self.refresh()
    }

    /// Redraws the performance chart for another period from stored data.
    pub fn change_performance_period(&mut self, period: ChartPeriod) -> AppResult<ChartUpdate> {
        match self.store.charts() {
            Some(data) => self.charts.change_period(period, &data),
            None => Ok(ChartUpdate::Skipped {
                reason: "dados de gráficos ainda não carregados".to_string(),
            }),
        }
    }

    /// The REST source serves each recommendation on its own endpoint; the
    /// static source answers from the loaded list.
    pub async fn open_recommendation(&mut self, id: u64) -> ModalState {
        match self.source.kind() {
            DataSourceKind::Api => {
                let lookup = self.source.load_recommendation(id).await;
                self.modal.open_with(lookup, &self.renderer, &self.notifications)
            }
            DataSourceKind::Static => {
                self.modal
                    .open(id, &self.store, &self.renderer, &self.notifications)
            }
        }
    }

    pub fn close_modal(&mut self, reason: CloseReason) {
        self.modal.close_with(reason);
    }

    pub fn dismiss_recommendation(&mut self) -> bool {
        self.modal.dismiss(&self.notifications)
    }

    pub fn accept_recommendation(&mut self) -> bool {
        self.modal.accept(&self.notifications)
    }

    pub fn active_notifications(&self) -> Vec<Notification> {
        self.notifications.active()
    }
}
