#[path = "../support/fixtures.rs"]
mod fixtures;

use hr_agent_app_lib::bindings::terminal::{self, TerminalChartBackend};
use hr_agent_app_lib::models::chart::{ChartPeriod, ChartTarget};
use hr_agent_app_lib::models::fragment::FragmentKind;
use hr_agent_app_lib::models::notification::NotificationLevel;
use hr_agent_app_lib::models::page::PageId;
use hr_agent_app_lib::services::chart_adapter::{ChartUpdate, NullChartBackend};
use hr_agent_app_lib::services::dashboard_session::{DashboardSession, DATA_LOADED_MESSAGE};
use hr_agent_app_lib::services::filter_engine::FilterField;
use httpmock::prelude::*;
use serde_json::json;

fn terminal_session(settings: hr_agent_app_lib::services::settings_service::ResolvedSettings) -> DashboardSession {
    DashboardSession::from_settings(settings, Box::new(TerminalChartBackend::new())).expect("session")
}

#[tokio::test]
async fn static_dashboard_renders_all_sections_and_one_success_toast() {
    let dir = fixtures::static_dir();
    let mut session = terminal_session(fixtures::static_settings(&dir));

    let view = session.go_to("#dashboard").await.expect("current view");
    assert_eq!(view.page, PageId::Dashboard);
    assert_eq!(view.title, "Dashboard");

    let metrics = view.section("metrics").expect("metrics section");
    let summary = &metrics.fragments[0];
    assert_eq!(summary.field("totalEmployees").unwrap().value, "5");
    assert_eq!(summary.field("averagePerformance").unwrap().value, "84%");

    let recommendations = view.section("recommendations").expect("recommendations");
    assert_eq!(recommendations.fragments.len(), 3);
    assert!(recommendations.fragments[0].contains_text("Alta Prioridade"));

    let recent = view.section("recentEmployees").expect("recent employees");
    let ids: Vec<Option<u64>> = recent.fragments.iter().map(|f| f.entity_id).collect();
    assert_eq!(ids, vec![Some(5), Some(1), Some(3), Some(2)]);

    assert_eq!(view.charts.len(), 1);
    assert_eq!(view.charts[0].target, ChartTarget::Performance);
    assert_eq!(view.charts[0].outcome, ChartUpdate::Applied { revision: 1 });

    let history = session.notifications().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].level, NotificationLevel::Success);
    assert_eq!(history[0].message, DATA_LOADED_MESSAGE);

    let text = terminal::render_page(&view, session.charts());
    assert!(text.contains("Performance Média (%)"));
}

#[tokio::test]
async fn employees_filters_rerender_without_refetch() {
    let dir = fixtures::static_dir();
    let mut session = terminal_session(fixtures::static_settings(&dir));
    let view = session.go_to("employees").await.expect("employees view");
    assert_eq!(view.section("employees").unwrap().fragments.len(), 5);

    // Removing the data files proves filtering works from the store alone.
    std::fs::remove_dir_all(dir.path().join("data")).expect("remove data");

    session.set_employee_filter(FilterField::Department, Some("Tecnologia".into()));
    let view = session.search_employees(Some("an".into()));
    let cards = &view.section("employees").unwrap().fragments;
    let ids: Vec<Option<u64>> = cards.iter().map(|f| f.entity_id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);
    assert!(cards.iter().all(|card| card.kind == FragmentKind::EmployeeCard));

    let view = session.set_employee_filter(FilterField::Status, Some("vacation".into()));
    let cards = &view.section("employees").unwrap().fragments;
    assert_eq!(cards.len(), 1);
    assert!(cards[0].is_no_data());
    assert_eq!(cards[0].title, "Nenhum funcionário encontrado");

    session.set_employee_filter(FilterField::Status, None);
    session.set_employee_filter(FilterField::Department, None);
    let view = session.search_employees(None);
    assert_eq!(view.section("employees").unwrap().fragments.len(), 5);
}

#[tokio::test]
async fn recommendation_filters_combine_priority_and_type() {
    let dir = fixtures::static_dir();
    let mut session = terminal_session(fixtures::static_settings(&dir));
    session.go_to("recommendations").await.expect("recommendations view");

    session.set_recommendation_filter(FilterField::Priority, Some("high".into()));
    let view = session.set_recommendation_filter(FilterField::Kind, Some("wellbeing".into()));
    let cards = &view.section("recommendations").unwrap().fragments;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].entity_id, Some(4));
}

#[tokio::test]
async fn api_empty_employee_list_renders_one_no_data_fragment() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut session = terminal_session(fixtures::api_settings(&server.base_url()));
    let view = session.go_to("employees").await.expect("employees view");

    let fragments = &view.section("employees").unwrap().fragments;
    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].is_no_data());
    assert_eq!(
        fragments
            .iter()
            .filter(|f| f.kind == FragmentKind::EmployeeCard)
            .count(),
        0
    );
    assert!(session.notifications().history().is_empty());
}

#[tokio::test]
async fn api_failure_emits_exactly_one_error_notification() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(404);
        })
        .await;

    let mut session = terminal_session(fixtures::api_settings(&server.base_url()));
    let view = session.go_to("employees").await.expect("current view");

    assert!(view
        .load_error
        .as_deref()
        .is_some_and(|error| error.contains("HTTP error! status: 404")));
    assert_eq!(session.notifications().count(NotificationLevel::Error), 1);
    assert_eq!(
        session.notifications().history()[0].message,
        "Erro ao carregar funcionários"
    );
    assert!(session.store().employees().is_empty());
}

#[tokio::test]
async fn api_dashboard_has_no_success_toast() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/dashboard");
            then.status(200).json_body(json!({
                "metrics": {
                    "totalEmployees": 180,
                    "atRiskEmployees": 8,
                    "averagePerformance": 85,
                    "averageSatisfaction": 88
                },
                "employees": [],
                "recommendations": []
            }));
        })
        .await;

    let mut session = terminal_session(fixtures::api_settings(&server.base_url()));
    let view = session.go_to("").await.expect("dashboard view");
    assert_eq!(view.page, PageId::Dashboard);
    assert_eq!(
        view.section("metrics").unwrap().fragments[0]
            .field("totalEmployees")
            .unwrap()
            .value,
        "180"
    );
    let recent = &view.section("recentEmployees").unwrap().fragments;
    assert_eq!(recent.len(), 1);
    assert!(recent[0].is_no_data());
    assert!(session.notifications().history().is_empty());
}

#[tokio::test]
async fn analytics_draws_three_charts_and_period_changes_redraw_performance() {
    let server = MockServer::start_async().await;
    let _metrics = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/metrics");
            then.status(200).json_body(json!({
                "turnoverRate": 12.5,
                "engagementScore": 7.8,
                "averageProductivity": 82
            }));
        })
        .await;
    let _dashboard = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/dashboard");
            then.status(200).json_body(json!({
                "metrics": {
                    "totalEmployees": 1, "atRiskEmployees": 0,
                    "averagePerformance": 90, "averageSatisfaction": 90
                }
            }));
        })
        .await;

    let mut session = terminal_session(fixtures::api_settings(&server.base_url()));
    let view = session.go_to("analytics").await.expect("analytics view");
    let summary = &view.section("analytics").unwrap().fragments[0];
    assert_eq!(summary.field("turnoverRate").unwrap().value, "12.5%");
    assert_eq!(view.charts.len(), 3);
    assert!(view.charts.iter().all(|chart| chart.outcome.is_applied()));

    // The performance container only exists on the dashboard.
    let skipped = session
        .change_performance_period(ChartPeriod::Quarter)
        .expect("period change");
    assert!(matches!(skipped, ChartUpdate::Skipped { .. }));

    session.go_to("dashboard").await.expect("dashboard view");
    assert_eq!(session.charts().revision(ChartTarget::Performance), 1);
    let applied = session
        .change_performance_period(ChartPeriod::Year)
        .expect("period change");
    assert_eq!(applied, ChartUpdate::Applied { revision: 2 });
    assert_eq!(session.charts().period(), ChartPeriod::Year);
    assert_eq!(
        session
            .charts()
            .current(ChartTarget::Performance)
            .unwrap()
            .labels
            .len(),
        12
    );
}

#[tokio::test]
async fn charts_without_containers_are_skipped_silently() {
    let dir = fixtures::static_dir();
    let mut session = DashboardSession::from_settings(
        fixtures::static_settings(&dir),
        Box::new(NullChartBackend),
    )
    .expect("session");

    let view = session.go_to("analytics").await.expect("analytics view");
    assert_eq!(view.charts.len(), 3);
    assert!(view
        .charts
        .iter()
        .all(|chart| matches!(chart.outcome, ChartUpdate::Skipped { .. })));
    assert!(session.charts().current(ChartTarget::Status).is_none());
    assert_eq!(session.notifications().count(NotificationLevel::Error), 0);
}

#[tokio::test]
async fn pages_without_data_render_no_sections() {
    let dir = fixtures::static_dir();
    let mut session = terminal_session(fixtures::static_settings(&dir));
    let view = session.go_to("#about").await.expect("about view");
    assert_eq!(view.title, "Sobre");
    assert!(view.sections.is_empty());
    assert!(view.charts.is_empty());
}
