#[path = "../support/fixtures.rs"]
mod fixtures;

use hr_agent_app_lib::bindings::terminal::TerminalChartBackend;
use hr_agent_app_lib::models::notification::NotificationLevel;
use hr_agent_app_lib::models::fragment::Tone;
use hr_agent_app_lib::services::dashboard_session::DashboardSession;
use hr_agent_app_lib::services::modal_controller::{
    CloseReason, ModalState, ACCEPTED_MESSAGE, DETAIL_ERROR_MESSAGE, DISMISSED_MESSAGE,
    NOT_FOUND_MESSAGE,
};
use httpmock::prelude::*;
use serde_json::json;

async fn static_session(dir: &tempfile::TempDir) -> DashboardSession {
    let mut session = DashboardSession::from_settings(
        fixtures::static_settings(dir),
        Box::new(TerminalChartBackend::new()),
    )
    .expect("session");
    session.go_to("recommendations").await.expect("recommendations view");
    session
}

#[tokio::test]
async fn open_then_accept_closes_with_one_success() {
    let dir = fixtures::static_dir();
    let mut session = static_session(&dir).await;

    assert_eq!(session.open_recommendation(1).await, ModalState::Open(1));
    let content = session.modal().content().expect("modal content");
    assert!(content.contains_text("Programa de Mentoria"));
    assert!(content.contains_text("Alta Prioridade"));
    assert!(content.contains_text("Aumento de 15% na satisfação"));

    assert!(session.accept_recommendation());
    assert_eq!(session.modal().state(), ModalState::Closed);

    let history = session.notifications().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].level, NotificationLevel::Success);
    assert_eq!(history[0].message, ACCEPTED_MESSAGE);
    assert_eq!(session.store().recommendations().len(), 4);
}

#[tokio::test]
async fn dismiss_emits_info_and_repeated_decisions_do_nothing() {
    let dir = fixtures::static_dir();
    let mut session = static_session(&dir).await;

    session.open_recommendation(2).await;
    assert!(session.dismiss_recommendation());
    assert!(!session.dismiss_recommendation());
    assert!(!session.accept_recommendation());

    let history = session.notifications().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].level, NotificationLevel::Info);
    assert_eq!(history[0].message, DISMISSED_MESSAGE);
}

#[tokio::test]
async fn unknown_id_stays_closed_with_exactly_one_error() {
    let dir = fixtures::static_dir();
    let mut session = static_session(&dir).await;

    assert_eq!(session.open_recommendation(404).await, ModalState::Closed);
    assert!(session.modal().content().is_none());
    assert_eq!(session.notifications().count(NotificationLevel::Error), 1);
    assert_eq!(session.notifications().history()[0].message, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn escape_and_outside_click_close_the_modal() {
    let dir = fixtures::static_dir();
    let mut session = static_session(&dir).await;

    session.open_recommendation(3).await;
    session.close_modal(CloseReason::Escape);
    assert!(!session.modal().is_open());

    session.open_recommendation(3).await;
    session.close_modal(CloseReason::OutsideClick);
    session.close_modal(CloseReason::Button);
    assert!(!session.modal().is_open());
    assert!(session.notifications().history().is_empty());
}

#[tokio::test]
async fn api_detail_is_fetched_per_recommendation() {
    let server = MockServer::start_async().await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/recommendations/5");
            then.status(200).json_body(json!({
                "id": 5,
                "title": "Revisão salarial",
                "description": "Colaborador com oferta externa",
                "problem": "Risco de saída",
                "priority": "high",
                "analysis": [
                    {"label": "Satisfação", "value": "68%", "type": "negative"},
                    {"label": "Performance", "value": "91%", "type": "positive"}
                ],
                "expectedResult": "Retenção do colaborador",
                "employee": {
                    "id": 9, "name": "Marcos", "position": "Engenheiro",
                    "department": "Tecnologia", "status": "at-risk",
                    "performance": 91, "satisfaction": 68, "productivity": 85
                }
            }));
        })
        .await;
    let _missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/recommendations/6");
            then.status(404);
        })
        .await;

    let mut session = DashboardSession::from_settings(
        fixtures::api_settings(&server.base_url()),
        Box::new(TerminalChartBackend::new()),
    )
    .expect("session");

    assert_eq!(session.open_recommendation(5).await, ModalState::Open(5));
    detail.assert_async().await;
    let content = session.modal().content().expect("detail content");
    assert!(content.contains_text("Marcos"));
    assert_eq!(content.subtitle.as_deref(), Some("Risco de saída"));
    assert_eq!(content.field("analysis.0").unwrap().tone, Some(Tone::Negative));
    assert_eq!(content.field("analysis.1").unwrap().tone, Some(Tone::Positive));
    assert_eq!(content.items, vec!["Retenção do colaborador".to_string()]);

    assert_eq!(session.open_recommendation(6).await, ModalState::Closed);
    assert_eq!(session.notifications().count(NotificationLevel::Error), 1);
    assert_eq!(session.notifications().history()[0].message, DETAIL_ERROR_MESSAGE);
}
