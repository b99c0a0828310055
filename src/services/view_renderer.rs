use crate::models::employee::Employee;
use crate::models::fragment::{Fragment, FragmentAction, FragmentKind, Tone};
use crate::models::metrics::{AnalyticsMetrics, MetricsSummary};
use crate::models::recommendation::{AnalysisTone, Recommendation, RecommendationAnalysis};
use crate::utils::time::DateFormatter;

pub const NOT_SPECIFIED: &str = "Não especificado";
pub const NO_EMPLOYEES: &str = "Nenhum funcionário encontrado";
pub const NO_RECOMMENDATIONS: &str = "Nenhuma recomendação disponível";
pub const NO_ANALYSIS: &str = "Dados de análise não disponíveis";
pub const PROBLEM_NOT_SPECIFIED: &str = "Problema não especificado";
pub const REASON_NOT_SPECIFIED: &str = "Razão não especificada";
pub const ACTION_NOT_SPECIFIED: &str = "Ação não especificada";
pub const RESULT_NOT_SPECIFIED: &str = "Resultado não especificado";

const DASHBOARD_RECOMMENDATIONS: usize = 3;
const RECENT_EMPLOYEES: usize = 4;

pub fn format_percent(value: impl Into<u32>) -> String {
    format!("{}%", value.into())
}

pub fn performance_tone(performance: u8) -> Tone {
    match performance {
        90.. => Tone::Excellent,
        80..=89 => Tone::Good,
        70..=79 => Tone::Fair,
        _ => Tone::Poor,
    }
}

fn or_fallback(value: Option<&str>) -> String {
    or_fallback_with(value, NOT_SPECIFIED)
}

fn or_fallback_with(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

fn analysis_tone(tone: AnalysisTone) -> Tone {
    match tone {
        AnalysisTone::Positive => Tone::Positive,
        AnalysisTone::Negative => Tone::Negative,
        AnalysisTone::Neutral => Tone::Neutral,
    }
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Maps domain entities to view fragments. Every function is total over
/// well-formed input.
#[derive(Debug, Clone, Default)]
pub struct ViewRenderer {
    dates: DateFormatter,
}

impl ViewRenderer {
    pub fn new(dates: DateFormatter) -> Self {
        Self { dates }
    }

    pub fn render_employee_card(&self, employee: &Employee) -> Fragment {
        let last_activity = employee
            .last_activity
            .as_ref()
            .map(|ts| self.dates.format(ts))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        Fragment::new(FragmentKind::EmployeeCard, employee.name.clone())
            .with_entity(employee.id)
            .with_subtitle(or_fallback(employee.position.as_deref()))
            .with_image(employee.avatar.clone())
            .with_badge(employee.status.as_str(), employee.status.label())
            .with_field(
                "department",
                "Departamento",
                or_fallback(employee.department.as_deref()),
            )
            .with_toned_field(
                "performance",
                "Performance",
                format_percent(employee.performance),
                performance_tone(employee.performance),
            )
            .with_field(
                "satisfaction",
                "Satisfação",
                format_percent(employee.satisfaction),
            )
            .with_field(
                "productivity",
                "Produtividade",
                format_percent(employee.productivity),
            )
            .with_field("lastActivity", "Última atividade", last_activity)
    }

    pub fn render_employee_list_item(&self, employee: &Employee) -> Fragment {
        let subtitle = match (employee.position.as_deref(), employee.department.as_deref()) {
            (Some(position), Some(department)) => format!("{position} - {department}"),
            (position, _) => or_fallback(position),
        };

        Fragment::new(FragmentKind::EmployeeListItem, employee.name.clone())
            .with_entity(employee.id)
            .with_subtitle(subtitle)
            .with_image(employee.avatar.clone())
            .with_badge(employee.status.as_str(), employee.status.label())
            .with_toned_field(
                "performance",
                "Performance",
                format_percent(employee.performance),
                performance_tone(employee.performance),
            )
    }

    pub fn render_recommendation_card(&self, rec: &Recommendation) -> Fragment {
        Fragment::new(FragmentKind::RecommendationCard, rec.title.clone())
            .with_entity(rec.id)
            .with_subtitle(or_fallback(rec.description.as_deref()))
            .with_badge(rec.priority.as_str(), rec.priority.label())
            .with_field(
                "department",
                "Departamento",
                or_fallback(rec.department.as_deref()),
            )
            .with_field("impact", "Impacto", or_fallback(rec.impact.as_deref()))
            .with_field("action", "Ação", or_fallback(rec.action.as_deref()))
            .with_action(FragmentAction::OpenRecommendation(rec.id))
    }

    pub fn render_recommendation_list_item(&self, rec: &Recommendation) -> Fragment {
        Fragment::new(FragmentKind::RecommendationListItem, rec.title.clone())
            .with_entity(rec.id)
            .with_subtitle(or_fallback(rec.description.as_deref()))
            .with_badge(rec.priority.as_str(), rec.priority.long_label())
            .with_field(
                "department",
                "Departamento",
                or_fallback(rec.department.as_deref()),
            )
            .with_action(FragmentAction::OpenRecommendation(rec.id))
    }

    /// Modal body for one recommendation.
    pub fn render_recommendation_detail(&self, rec: &Recommendation) -> Fragment {
        let problem = rec
            .problem
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(rec.description.as_deref());
        let mut fragment = Fragment::new(FragmentKind::RecommendationDetail, rec.title.clone())
            .with_entity(rec.id)
            .with_subtitle(or_fallback_with(problem, PROBLEM_NOT_SPECIFIED))
            .with_badge(rec.priority.as_str(), rec.priority.long_label());

        if let Some(employee) = rec.employee.as_ref() {
            fragment = fragment
                .with_image(employee.avatar.clone())
                .with_field("employee", "Funcionário", employee.name.clone());
            let position = employee.position.as_deref();
            let department = employee.department.as_deref();
            if has_text(position) || has_text(department) {
                let role = format!("{} - {}", or_fallback(position), or_fallback(department));
                fragment = fragment.with_field("employeeRole", "Cargo", role);
            }
        }

        fragment = fragment
            .with_field(
                "department",
                "Departamento",
                or_fallback(rec.department.as_deref()),
            )
            .with_field("impact", "Impacto", or_fallback(rec.impact.as_deref()))
            .with_field("priority", "Prioridade", rec.priority.label());

        fragment = match rec.analysis.as_ref() {
            Some(RecommendationAnalysis::Items(items)) if !items.is_empty() => {
                items.iter().enumerate().fold(fragment, |acc, (index, item)| {
                    acc.with_toned_field(
                        format!("analysis.{index}"),
                        or_fallback(item.label.as_deref()),
                        item.value.clone().unwrap_or_else(|| "N/A".to_string()),
                        analysis_tone(item.tone),
                    )
                })
            }
            Some(RecommendationAnalysis::Text(text)) if !text.trim().is_empty() => {
                fragment.with_field("analysis", "Análise", text.trim())
            }
            _ => fragment.with_field("analysis", "Análise", NO_ANALYSIS),
        };

        let expected = if rec.expected_results.is_empty() {
            vec![RESULT_NOT_SPECIFIED.to_string()]
        } else {
            rec.expected_results.clone()
        };

        fragment
            .with_field(
                "reason",
                "Razão",
                or_fallback_with(rec.reason.as_deref(), REASON_NOT_SPECIFIED),
            )
            .with_field(
                "action",
                "Ação",
                or_fallback_with(rec.action.as_deref(), ACTION_NOT_SPECIFIED),
            )
            .with_field("timeline", "Timeline", or_fallback(rec.timeline.as_deref()))
            .with_items(expected)
    }

    pub fn render_summary(&self, metrics: &MetricsSummary) -> Fragment {
        Fragment::new(FragmentKind::MetricsSummary, "Resumo")
            .with_field(
                "totalEmployees",
                "Total de Funcionários",
                metrics.total_employees.to_string(),
            )
            .with_field(
                "averagePerformance",
                "Performance Média",
                format_percent(metrics.average_performance),
            )
            .with_field(
                "averageSatisfaction",
                "Satisfação Média",
                format_percent(metrics.average_satisfaction),
            )
            .with_field(
                "atRiskEmployees",
                "Funcionários em Risco",
                metrics.at_risk_employees.to_string(),
            )
    }

    pub fn render_analytics_summary(&self, metrics: &AnalyticsMetrics) -> Fragment {
        let turnover = metrics
            .turnover_rate
            .map(|rate| format!("{}%", format_decimal(rate)))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        let engagement = metrics
            .engagement_score
            .map(format_decimal)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        let productivity = metrics
            .average_productivity
            .map(format_percent)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        Fragment::new(FragmentKind::AnalyticsSummary, "Analytics")
            .with_field("turnoverRate", "Taxa de Turnover", turnover)
            .with_field("engagementScore", "Engajamento", engagement)
            .with_field("averageProductivity", "Produtividade Média", productivity)
    }

    /// Employee grid; an empty input yields one "no data" fragment.
    pub fn render_employees_grid(&self, employees: &[Employee]) -> Vec<Fragment> {
        if employees.is_empty() {
            return vec![Fragment::no_data(NO_EMPLOYEES)];
        }
        employees
            .iter()
            .map(|employee| self.render_employee_card(employee))
            .collect()
    }

    pub fn render_recommendations_grid(&self, recs: &[Recommendation]) -> Vec<Fragment> {
        if recs.is_empty() {
            return vec![Fragment::no_data(NO_RECOMMENDATIONS)];
        }
        recs.iter()
            .map(|rec| self.render_recommendation_card(rec))
            .collect()
    }

    /// First recommendations in source order, for the dashboard panel.
    pub fn render_dashboard_recommendations(&self, recs: &[Recommendation]) -> Vec<Fragment> {
        if recs.is_empty() {
            return vec![Fragment::no_data(NO_RECOMMENDATIONS)];
        }
        recs.iter()
            .take(DASHBOARD_RECOMMENDATIONS)
            .map(|rec| self.render_recommendation_list_item(rec))
            .collect()
    }

    /// Most recently active employees first; missing activity sorts last.
    pub fn render_recent_employees(&self, employees: &[Employee]) -> Vec<Fragment> {
        if employees.is_empty() {
            return vec![Fragment::no_data(NO_EMPLOYEES)];
        }
        let mut recent: Vec<&Employee> = employees.iter().collect();
        recent.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        recent
            .into_iter()
            .take(RECENT_EMPLOYEES)
            .map(|employee| self.render_employee_list_item(employee))
            .collect()
    }
}
