use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration as StdDuration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::notification::{Notification, NotificationLevel};
use crate::services::settings_service::ResolvedSettings;

const CHANNEL_CAPACITY: usize = 64;
/// Oldest history entries are dropped past this size.
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    expires_at: Instant,
}

/// Transient, stacking toasts. Visible entries expire on their own; every
/// emitted notification is also kept in a bounded `history` for
/// non-interactive output.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    visible: Arc<Mutex<VecDeque<Entry>>>,
    history: Arc<Mutex<VecDeque<Notification>>>,
    tx: broadcast::Sender<Notification>,
    success_display: StdDuration,
    error_display: StdDuration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn prune(entries: &mut VecDeque<Entry>, now: Instant) {
    entries.retain(|entry| entry.expires_at > now);
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(StdDuration::from_secs(3), StdDuration::from_secs(5))
    }
}

impl NotificationCenter {
    pub fn new(success_display: StdDuration, error_display: StdDuration) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            visible: Arc::new(Mutex::new(VecDeque::new())),
            history: Arc::new(Mutex::new(VecDeque::new())),
            tx,
            success_display,
            error_display,
        }
    }

    pub fn from_settings(settings: &ResolvedSettings) -> Self {
        Self::new(settings.success_display(), settings.error_display())
    }

    pub fn display_for(&self, level: NotificationLevel) -> StdDuration {
        match level {
            NotificationLevel::Error => self.error_display,
            NotificationLevel::Info | NotificationLevel::Success => self.success_display,
        }
    }

    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) -> Notification {
        let message = message.into();
        let display = self.display_for(level);
        let notification = Notification {
            id: Uuid::new_v4(),
            message,
            level,
            created_at: Utc::now(),
            display_ms: display.as_millis() as u64,
        };

        match level {
            NotificationLevel::Error => {
                warn!(target: "app::notify", level = level.as_str(), message = %notification.message, "notification")
            }
            _ => {
                info!(target: "app::notify", level = level.as_str(), message = %notification.message, "notification")
            }
        }

        {
            let mut visible = lock(&self.visible);
            let now = Instant::now();
            prune(&mut visible, now);
            visible.push_back(Entry {
                notification: notification.clone(),
                expires_at: now + display,
            });
        }
        {
            let mut history = lock(&self.history);
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back(notification.clone());
        }

        // No subscribers is not an error.
        let _ = self.tx.send(notification.clone());

        self.schedule_expiry(display);
        notification
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.notify(message, NotificationLevel::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.notify(message, NotificationLevel::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.notify(message, NotificationLevel::Error)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Notifications still on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        let mut visible = lock(&self.visible);
        prune(&mut visible, Instant::now());
        visible
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// The most recent notifications, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        lock(&self.history).iter().cloned().collect()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        lock(&self.history)
            .iter()
            .filter(|notification| notification.level == level)
            .count()
    }

    fn schedule_expiry(&self, display: StdDuration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let visible = Arc::clone(&self.visible);
        handle.spawn(async move {
            tokio::time::sleep(display).await;
            let mut entries = lock(&visible);
            let before = entries.len();
            prune(&mut entries, Instant::now());
            debug!(
                target: "app::notify",
                expired = before - entries.len(),
                "notifications expired"
            );
        });
    }
}
