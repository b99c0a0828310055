use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "quarter")]
    Quarter,
    #[serde(rename = "year")]
    Year,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::SixMonths => "6months",
            ChartPeriod::Quarter => "quarter",
            ChartPeriod::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "6months" => Some(ChartPeriod::SixMonths),
            "quarter" => Some(ChartPeriod::Quarter),
            "year" => Some(ChartPeriod::Year),
            _ => None,
        }
    }
}

impl Default for ChartPeriod {
    fn default() -> Self {
        ChartPeriod::SixMonths
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceSeries {
    ByPeriod(BTreeMap<ChartPeriod, LabeledSeries>),
    Single(LabeledSeries),
}

impl PerformanceSeries {
    /// A single series answers every period; per-period data may lack one.
    pub fn for_period(&self, period: ChartPeriod) -> Option<&LabeledSeries> {
        match self {
            PerformanceSeries::Single(series) => Some(series),
            PerformanceSeries::ByPeriod(map) => map.get(&period),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSeries {
    pub labels: Vec<String>,
    #[serde(alias = "data")]
    pub performance: Vec<f64>,
    #[serde(default)]
    pub satisfaction: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    #[serde(default)]
    pub performance: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub performance: PerformanceSeries,
    pub departments: DepartmentSeries,
    pub satisfaction: SatisfactionSeries,
    pub status: LabeledSeries,
}

const BUNDLED_CHARTS: &str = include_str!("../../assets/charts.json");

impl ChartData {
    /// Chart dataset shipped with the binary, used when the backend has no chart endpoint.
    pub fn bundled() -> AppResult<Self> {
        Ok(serde_json::from_str(BUNDLED_CHARTS)?)
    }
}

/// Chart containers known to the dashboard, keyed by their container id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartTarget {
    Performance,
    Department,
    Satisfaction,
    Status,
}

impl ChartTarget {
    pub fn container_id(&self) -> &'static str {
        match self {
            ChartTarget::Performance => "performanceChart",
            ChartTarget::Department => "departmentChart",
            ChartTarget::Satisfaction => "satisfactionChart",
            ChartTarget::Status => "statusChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDescriptor {
    pub label: String,
    pub values: Vec<f64>,
    /// Reference lines (targets) are drawn dashed by most backends.
    pub reference: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDescriptor {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
    pub percent_axis: bool,
}

impl SeriesDescriptor {
    pub fn new(kind: ChartKind, labels: Vec<String>) -> Self {
        Self {
            kind,
            title: None,
            labels,
            datasets: Vec::new(),
            y_range: None,
            percent_axis: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_dataset(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.datasets.push(DatasetDescriptor {
            label: label.into(),
            values,
            reference: false,
        });
        self
    }

    /// Adds a constant target line aligned with the labels.
    pub fn with_target(mut self, label: impl Into<String>, value: f64) -> Self {
        self.datasets.push(DatasetDescriptor {
            label: label.into(),
            values: vec![value; self.labels.len()],
            reference: true,
        });
        self
    }

    pub fn with_percent_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self.percent_axis = true;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        for dataset in &self.datasets {
            if dataset.values.len() != self.labels.len() {
                return Err(AppError::validation(format!(
                    "série '{}' tem {} valores para {} rótulos",
                    dataset.label,
                    dataset.values.len(),
                    self.labels.len()
                )));
            }
        }
        Ok(())
    }
}
