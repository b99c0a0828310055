use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::fragment::Fragment;
use crate::models::recommendation::Recommendation;
use crate::services::domain_store::DomainStore;
use crate::services::notification_center::NotificationCenter;
use crate::services::view_renderer::ViewRenderer;

pub const DISMISSED_MESSAGE: &str = "Recomendação dispensada";
pub const ACCEPTED_MESSAGE: &str = "Recomendação aceita! Ação será agendada.";
pub const NOT_FOUND_MESSAGE: &str = "Recomendação não encontrada";
pub const DETAIL_ERROR_MESSAGE: &str = "Erro ao carregar detalhes da recomendação";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum ModalState {
    Closed,
    Open(u64),
}

/// How the user asked to leave the modal. All of them close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Escape,
    OutsideClick,
}

/// Recommendation detail modal. Decisions are acknowledged with a
/// notification only; the store is never mutated from here.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    content: Option<Fragment>,
}

impl Default for ModalState {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        match self.content.as_ref().and_then(|content| content.entity_id) {
            Some(id) => ModalState::Open(id),
            None => ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&Fragment> {
        self.content.as_ref()
    }

    /// Opens the modal for a recommendation already held in the store.
    pub fn open(
        &mut self,
        id: u64,
        store: &DomainStore,
        renderer: &ViewRenderer,
        notifications: &NotificationCenter,
    ) -> ModalState {
        self.open_with(store.find_by_id::<Recommendation>(id), renderer, notifications)
    }

    /// Opens the modal from an already-resolved lookup, such as the API
    /// detail endpoint. Failures leave the modal closed and raise one error
    /// notification.
    pub fn open_with(
        &mut self,
        lookup: AppResult<Recommendation>,
        renderer: &ViewRenderer,
        notifications: &NotificationCenter,
    ) -> ModalState {
        match lookup {
            Ok(recommendation) => {
                debug!(target: "app::modal", id = recommendation.id, "modal opened");
                self.content = Some(renderer.render_recommendation_detail(&recommendation));
            }
            Err(err) => {
                warn!(target: "app::modal", error = %err, "recommendation detail unavailable");
                self.content = None;
                let message = match err {
                    AppError::NotFound { .. } => NOT_FOUND_MESSAGE,
                    _ => DETAIL_ERROR_MESSAGE,
                };
                notifications.error(message);
            }
        }
        self.state()
    }

    pub fn close(&mut self) {
        if self.content.take().is_some() {
            debug!(target: "app::modal", "modal closed");
        }
    }

    pub fn close_with(&mut self, reason: CloseReason) {
        debug!(target: "app::modal", ?reason, "close requested");
        self.close();
    }

    pub fn dismiss(&mut self, notifications: &NotificationCenter) -> bool {
        self.decide(notifications, false)
    }

    pub fn accept(&mut self, notifications: &NotificationCenter) -> bool {
        self.decide(notifications, true)
    }

    fn decide(&mut self, notifications: &NotificationCenter, accepted: bool) -> bool {
        let ModalState::Open(id) = self.state() else {
            return false;
        };
        if accepted {
            notifications.success(ACCEPTED_MESSAGE);
        } else {
            notifications.info(DISMISSED_MESSAGE);
        }
        debug!(target: "app::modal", id, accepted, "recommendation decided");
        self.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationLevel;
    use crate::models::recommendation::Priority;

    fn store_with(ids: &[u64]) -> DomainStore {
        let store = DomainStore::new();
        let recs = ids
            .iter()
            .map(|id| Recommendation {
                id: *id,
                title: format!("Recomendação {id}"),
                description: None,
                problem: None,
                department: None,
                priority: Priority::Medium,
                kind: None,
                impact: None,
                analysis: None,
                reason: None,
                action: None,
                timeline: None,
                expected_results: Vec::new(),
                employee: None,
            })
            .collect();
        store.replace::<Recommendation>(recs);
        store
    }

    #[test]
    fn missing_recommendation_keeps_modal_closed_with_one_error() {
        let store = store_with(&[1, 2]);
        let notifications = NotificationCenter::default();
        let mut modal = ModalController::new();

        let state = modal.open(42, &store, &ViewRenderer::default(), &notifications);
        assert_eq!(state, ModalState::Closed);
        assert!(modal.content().is_none());
        assert_eq!(notifications.count(NotificationLevel::Error), 1);
        assert_eq!(notifications.history()[0].message, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn accept_and_dismiss_close_and_notify() {
        let store = store_with(&[1, 2]);
        let notifications = NotificationCenter::default();
        let renderer = ViewRenderer::default();
        let mut modal = ModalController::new();

        assert_eq!(modal.open(2, &store, &renderer, &notifications), ModalState::Open(2));
        assert!(modal.content().unwrap().contains_text("Recomendação 2"));
        assert!(modal.accept(&notifications));
        assert_eq!(modal.state(), ModalState::Closed);

        modal.open(1, &store, &renderer, &notifications);
        assert!(modal.dismiss(&notifications));

        let history = notifications.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, ACCEPTED_MESSAGE);
        assert_eq!(history[0].level, NotificationLevel::Success);
        assert_eq!(history[1].message, DISMISSED_MESSAGE);
        assert_eq!(history[1].level, NotificationLevel::Info);
        assert_eq!(store.recommendations().len(), 2);
    }

    #[test]
    fn decisions_without_an_open_modal_are_noops() {
        let notifications = NotificationCenter::default();
        let mut modal = ModalController::new();
        assert!(!modal.accept(&notifications));
        assert!(!modal.dismiss(&notifications));
        modal.close();
        modal.close_with(CloseReason::Escape);
        assert!(notifications.history().is_empty());
    }
}
