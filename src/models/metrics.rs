use serde::{Deserialize, Serialize};

use crate::models::employee::Employee;
use crate::models::recommendation::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_employees: usize,
    pub at_risk_employees: usize,
    pub average_performance: u32,
    pub average_satisfaction: u32,
}

impl MetricsSummary {
    /// Derives the dashboard counters from the full employee collection.
    pub fn from_employees(employees: &[Employee]) -> Self {
        let total_employees = employees.len();
        let at_risk_employees = employees.iter().filter(|emp| emp.is_at_risk()).count();

        Self {
            total_employees,
            at_risk_employees,
            average_performance: rounded_mean(employees.iter().map(|emp| emp.performance)),
            average_satisfaction: rounded_mean(employees.iter().map(|emp| emp.satisfaction)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetrics {
    #[serde(default)]
    pub turnover_rate: Option<f64>,
    #[serde(default)]
    pub engagement_score: Option<f64>,
    #[serde(default)]
    pub average_productivity: Option<u32>,
}

impl AnalyticsMetrics {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let average_productivity = if employees.is_empty() {
            None
        } else {
            Some(rounded_mean(employees.iter().map(|emp| emp.productivity)))
        };

        Self {
            turnover_rate: None,
            engagement_score: None,
            average_productivity,
        }
    }
}

/// Payload of the aggregated dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub metrics: MetricsSummary,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Mean rounded half away from zero; an empty input yields 0.
pub fn rounded_mean(values: impl Iterator<Item = u8>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), value| {
        (sum + u64::from(value), count + 1)
    });
    if count == 0 {
        return 0;
    }
    ((sum as f64 / count as f64).round()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::EmployeeStatus;

    fn employee(id: u64, performance: u8, satisfaction: u8) -> Employee {
        Employee {
            id,
            name: format!("Funcionário {id}"),
            position: None,
            department: None,
            status: EmployeeStatus::Active,
            performance,
            satisfaction,
            productivity: 70,
            avatar: None,
            last_activity: None,
        }
    }

    #[test]
    fn summary_counts_at_risk_and_rounds_means() {
        let employees = vec![
            employee(1, 92, 85),
            employee(2, 79, 90),
            employee(3, 88, 70),
            employee(4, 80, 80),
        ];

        let summary = MetricsSummary::from_employees(&employees);
        assert_eq!(summary.total_employees, 4);
        assert_eq!(summary.at_risk_employees, 2);
        // (92 + 79 + 88 + 80) / 4 = 84.75
        assert_eq!(summary.average_performance, 85);
        // (85 + 90 + 70 + 80) / 4 = 81.25
        assert_eq!(summary.average_satisfaction, 81);
    }

    #[test]
    fn empty_collection_yields_zeroes() {
        let summary = MetricsSummary::from_employees(&[]);
        assert_eq!(summary, MetricsSummary::default());
        assert_eq!(AnalyticsMetrics::from_employees(&[]).average_productivity, None);
    }

    #[test]
    fn rounded_mean_rounds_half_up() {
        assert_eq!(rounded_mean([80u8, 81].into_iter()), 81);
        assert_eq!(rounded_mean([80u8, 80, 81].into_iter()), 80);
    }
}
