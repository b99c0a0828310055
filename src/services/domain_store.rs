use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::chart::ChartData;
use crate::models::employee::Employee;
use crate::models::metrics::{AnalyticsMetrics, MetricsSummary};
use crate::models::recommendation::Recommendation;

/// An entity kept in one of the store's collections.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> u64;

    fn slot(store: &DomainStore) -> &RwLock<Arc<Vec<Self>>>;
}

impl StoredEntity for Employee {
    const COLLECTION: &'static str = "employees";

    fn id(&self) -> u64 {
        self.id
    }

    fn slot(store: &DomainStore) -> &RwLock<Arc<Vec<Self>>> {
        &store.employees
    }
}

impl StoredEntity for Recommendation {
    const COLLECTION: &'static str = "recommendations";

    fn id(&self) -> u64 {
        self.id
    }

    fn slot(store: &DomainStore) -> &RwLock<Arc<Vec<Self>>> {
        &store.recommendations
    }
}

/// In-memory snapshot of the last successful loads. Collections are swapped
/// whole, so a reader holds either the old or the new `Arc`, never a mix.
#[derive(Default)]
pub struct DomainStore {
    employees: RwLock<Arc<Vec<Employee>>>,
    recommendations: RwLock<Arc<Vec<Recommendation>>>,
    charts: RwLock<Option<Arc<ChartData>>>,
    summary: RwLock<Option<MetricsSummary>>,
    analytics: RwLock<Option<AnalyticsMetrics>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace<E: StoredEntity>(&self, items: Vec<E>) {
        let count = items.len();
        *write(E::slot(self)) = Arc::new(items);
        debug!(target: "app::store", collection = E::COLLECTION, count, "collection replaced");
    }

    pub fn get<E: StoredEntity>(&self) -> Arc<Vec<E>> {
        Arc::clone(&read(E::slot(self)))
    }

    pub fn find_by_id<E: StoredEntity>(&self, id: u64) -> AppResult<E> {
        read(E::slot(self))
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(E::COLLECTION, id))
    }

    pub fn employees(&self) -> Arc<Vec<Employee>> {
        self.get::<Employee>()
    }

    pub fn recommendations(&self) -> Arc<Vec<Recommendation>> {
        self.get::<Recommendation>()
    }

    pub fn replace_charts(&self, charts: ChartData) {
        *write(&self.charts) = Some(Arc::new(charts));
    }

    pub fn charts(&self) -> Option<Arc<ChartData>> {
        read(&self.charts).clone()
    }

    pub fn replace_summary(&self, summary: MetricsSummary) {
        *write(&self.summary) = Some(summary);
    }

    pub fn summary(&self) -> Option<MetricsSummary> {
        *read(&self.summary)
    }

    pub fn replace_analytics(&self, metrics: AnalyticsMetrics) {
        *write(&self.analytics) = Some(metrics);
    }

    pub fn analytics(&self) -> Option<AnalyticsMetrics> {
        read(&self.analytics).clone()
    }
}
