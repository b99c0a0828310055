#[path = "../support/fixtures.rs"]
mod fixtures;

use std::time::Duration as StdDuration;

use hr_agent_app_lib::bindings::terminal::TerminalChartBackend;
use hr_agent_app_lib::models::page::PageId;
use hr_agent_app_lib::services::dashboard_session::DashboardSession;
use httpmock::prelude::*;

#[tokio::test]
async fn slow_response_for_an_abandoned_page_is_discarded() {
    let server = MockServer::start_async().await;
    let _slow = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200)
                .delay(StdDuration::from_millis(200))
                .json_body(fixtures::employees_json());
        })
        .await;
    let _fast = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/recommendations");
            then.status(200).json_body(fixtures::recommendations_json());
        })
        .await;

    let mut session = DashboardSession::from_settings(
        fixtures::api_settings(&server.base_url()),
        Box::new(TerminalChartBackend::new()),
    )
    .expect("session");

    let employees_token = session.begin("employees");
    let recommendations_token = session.begin("recommendations");

    let (employees, recommendations) = tokio::join!(
        session.fetch(employees_token),
        session.fetch(recommendations_token)
    );

    let view = session
        .apply(recommendations_token, recommendations)
        .expect("latest navigation renders");
    assert_eq!(view.page, PageId::Recommendations);
    assert_eq!(view.section("recommendations").unwrap().fragments.len(), 4);

    // The employees response arrived fine but belongs to an older navigation.
    assert!(employees.is_ok());
    assert!(session.apply(employees_token, employees).is_none());
    assert!(session.store().employees().is_empty());
    assert_eq!(session.navigator().active(), PageId::Recommendations);
}

#[tokio::test]
async fn stale_failure_does_not_notify() {
    let server = MockServer::start_async().await;
    let _broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/metrics");
            then.status(503);
        })
        .await;

    let mut session = DashboardSession::from_settings(
        fixtures::api_settings(&server.base_url()),
        Box::new(TerminalChartBackend::new()),
    )
    .expect("session");

    let analytics_token = session.begin("analytics");
    let analytics = session.fetch(analytics_token).await;
    assert!(analytics.is_err());

    session.begin("about");
    assert!(session.apply(analytics_token, analytics).is_none());
    assert!(session.notifications().history().is_empty());
}

#[tokio::test]
async fn reentering_the_same_page_only_applies_the_latest_fetch() {
    let dir = fixtures::static_dir();
    let mut session = DashboardSession::from_settings(
        fixtures::static_settings(&dir),
        Box::new(TerminalChartBackend::new()),
    )
    .expect("session");

    let first = session.begin("dashboard");
    let first_data = session.fetch(first).await;
    let second = session.begin("dashboard");
    let second_data = session.fetch(second).await;

    assert!(session.apply(first, first_data).is_none());
    assert!(session.notifications().history().is_empty());

    let view = session.apply(second, second_data).expect("latest applies");
    assert_eq!(view.page, PageId::Dashboard);
    assert_eq!(session.notifications().history().len(), 1);
}
