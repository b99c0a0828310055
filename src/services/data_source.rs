use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::chart::ChartData;
use crate::models::employee::{validate_employees, Employee};
use crate::models::metrics::{AnalyticsMetrics, DashboardPayload, MetricsSummary};
use crate::models::recommendation::Recommendation;
use crate::models::settings::DataSourceKind;
use crate::services::fetcher::{Fetcher, Resource};
use crate::services::settings_service::ResolvedSettings;

const STATIC_EMPLOYEES: &str = "data/employees.json";
const STATIC_RECOMMENDATIONS: &str = "data/recommendations.json";
const STATIC_CHARTS: &str = "data/charts.json";

const API_DASHBOARD: &str = "api/dashboard";
const API_EMPLOYEES: &str = "api/employees";
const API_RECOMMENDATIONS: &str = "api/recommendations";
const API_METRICS: &str = "api/metrics";

/// Everything the dashboard page needs, loaded as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub metrics: MetricsSummary,
    pub employees: Vec<Employee>,
    pub recommendations: Vec<Recommendation>,
    pub charts: ChartData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub metrics: AnalyticsMetrics,
    pub charts: ChartData,
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> DataSourceKind;

    async fn load_dashboard(&self) -> AppResult<DashboardSnapshot>;

    async fn load_employees(&self) -> AppResult<Vec<Employee>>;

    async fn load_recommendations(&self) -> AppResult<Vec<Recommendation>>;

    async fn load_analytics(&self) -> AppResult<AnalyticsSnapshot>;

    async fn load_recommendation(&self, id: u64) -> AppResult<Recommendation>;
}

pub fn build_data_source(settings: &ResolvedSettings) -> AppResult<Arc<dyn DataSource>> {
    let fetcher = Fetcher::from_base(&settings.settings.base, settings.http_timeout())?;
    info!(
        target: "app::fetch",
        source = settings.settings.source.as_str(),
        base = %settings.settings.base,
        "data source configured"
    );

    let source: Arc<dyn DataSource> = match settings.settings.source {
        DataSourceKind::Static => Arc::new(StaticDataSource::new(fetcher)),
        DataSourceKind::Api => Arc::new(ApiDataSource::new(fetcher)),
    };
    Ok(source)
}

/// Reads the pre-built `data/*.json` files; metrics are derived locally.
pub struct StaticDataSource {
    fetcher: Fetcher,
}

impl StaticDataSource {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::Static
    }

    async fn load_dashboard(&self) -> AppResult<DashboardSnapshot> {
        let employees_res = Resource::new(STATIC_EMPLOYEES);
        let recommendations_res = Resource::new(STATIC_RECOMMENDATIONS);
        let charts_res = Resource::new(STATIC_CHARTS);

        let (employees, recommendations, charts) = tokio::try_join!(
            self.fetcher.load::<Vec<Employee>>(&employees_res),
            self.fetcher.load::<Vec<Recommendation>>(&recommendations_res),
            self.fetcher.load::<ChartData>(&charts_res),
        )?;

        validate_employees(&employees)?;
        let metrics = MetricsSummary::from_employees(&employees);

        Ok(DashboardSnapshot {
            metrics,
            employees,
            recommendations,
            charts,
        })
    }

    async fn load_employees(&self) -> AppResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .fetcher
            .load(&Resource::new(STATIC_EMPLOYEES))
            .await?;
        validate_employees(&employees)?;
        Ok(employees)
    }

    async fn load_recommendations(&self) -> AppResult<Vec<Recommendation>> {
        Ok(self
            .fetcher
            .load(&Resource::new(STATIC_RECOMMENDATIONS))
            .await?)
    }

    async fn load_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        let employees_res = Resource::new(STATIC_EMPLOYEES);
        let charts_res = Resource::new(STATIC_CHARTS);

        let (employees, charts) = tokio::try_join!(
            self.fetcher.load::<Vec<Employee>>(&employees_res),
            self.fetcher.load::<ChartData>(&charts_res),
        )?;
        validate_employees(&employees)?;

        Ok(AnalyticsSnapshot {
            metrics: AnalyticsMetrics::from_employees(&employees),
            charts,
        })
    }

    async fn load_recommendation(&self, id: u64) -> AppResult<Recommendation> {
        self.load_recommendations()
            .await?
            .into_iter()
            .find(|rec| rec.id == id)
            .ok_or_else(|| AppError::not_found("recommendations", id))
    }
}

/// Talks to the REST backend. It has no chart endpoint, so charts come from
/// the bundled dataset.
pub struct ApiDataSource {
    fetcher: Fetcher,
}

impl ApiDataSource {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl DataSource for ApiDataSource {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::Api
    }

    async fn load_dashboard(&self) -> AppResult<DashboardSnapshot> {
        let payload: DashboardPayload = self.fetcher.load(&Resource::new(API_DASHBOARD)).await?;
        validate_employees(&payload.employees)?;

        Ok(DashboardSnapshot {
            metrics: payload.metrics,
            employees: payload.employees,
            recommendations: payload.recommendations,
            charts: ChartData::bundled()?,
        })
    }

    async fn load_employees(&self) -> AppResult<Vec<Employee>> {
        let employees: Vec<Employee> = self.fetcher.load(&Resource::new(API_EMPLOYEES)).await?;
        validate_employees(&employees)?;
        Ok(employees)
    }

    async fn load_recommendations(&self) -> AppResult<Vec<Recommendation>> {
        Ok(self
            .fetcher
            .load(&Resource::new(API_RECOMMENDATIONS))
            .await?)
    }

    async fn load_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        let metrics: AnalyticsMetrics = self.fetcher.load(&Resource::new(API_METRICS)).await?;
        Ok(AnalyticsSnapshot {
            metrics,
            charts: ChartData::bundled()?,
        })
    }

    async fn load_recommendation(&self, id: u64) -> AppResult<Recommendation> {
        let resource = Resource::new(format!("{API_RECOMMENDATIONS}/{id}"));
        Ok(self.fetcher.load(&resource).await?)
    }
}
