use std::path::Path;
use std::time::Duration as StdDuration;

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::{AppSettings, DataSourceKind};
use crate::utils::time::is_valid_pattern;

const ENV_SOURCE: &str = "HR_AGENT_SOURCE";
const ENV_BASE: &str = "HR_AGENT_BASE";
const ENV_TIMEZONE: &str = "HR_AGENT_TIMEZONE";
const ENV_DATE_FORMAT: &str = "HR_AGENT_DATE_FORMAT";
const ENV_HTTP_TIMEOUT: &str = "HR_AGENT_HTTP_TIMEOUT_SECS";
const ENV_LOG_DIR: &str = "HR_AGENT_LOG_DIR";

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub source: Option<DataSourceKind>,
    pub base: Option<String>,
    pub timezone: Option<String>,
    pub log_dir: Option<String>,
}

/// Settings after validation, with parsed values ready for the services.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: AppSettings,
    pub timezone: Tz,
}

impl ResolvedSettings {
    pub fn http_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.settings.http_timeout_secs)
    }

    pub fn success_display(&self) -> StdDuration {
        StdDuration::from_millis(self.settings.success_toast_ms)
    }

    pub fn error_display(&self) -> StdDuration {
        StdDuration::from_millis(self.settings.error_toast_ms)
    }
}

pub struct SettingsService;

impl SettingsService {
    /// Defaults, then the YAML file, then `HR_AGENT_*` variables, then overrides.
    pub fn load(
        config_path: Option<&Path>,
        overrides: SettingsOverrides,
    ) -> AppResult<ResolvedSettings> {
        let mut settings = match config_path {
            Some(path) => Self::read_file(path)?,
            None => AppSettings::default(),
        };

        Self::apply_env(&mut settings, |key| std::env::var(key).ok())?;
        Self::apply_overrides(&mut settings, overrides);
        Self::resolve(settings)
    }

    pub fn read_file(path: &Path) -> AppResult<AppSettings> {
        let raw = std::fs::read_to_string(path)?;
        let settings: AppSettings = serde_yaml::from_str(&raw)?;
        debug!(target: "app::settings", path = %path.display(), "settings file loaded");
        Ok(settings)
    }

    pub fn apply_env<F>(settings: &mut AppSettings, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SOURCE) {
            settings.source = DataSourceKind::parse(&value).ok_or_else(|| {
                AppError::config(format!("{ENV_SOURCE} deve ser 'static' ou 'api' (recebido '{value}')"))
            })?;
        }

        if let Some(value) = lookup(ENV_BASE).filter(|value| !value.trim().is_empty()) {
            settings.base = value.trim().to_string();
        }

        if let Some(value) = lookup(ENV_TIMEZONE).filter(|value| !value.trim().is_empty()) {
            settings.timezone = value.trim().to_string();
        }

        if let Some(value) = lookup(ENV_DATE_FORMAT).filter(|value| !value.trim().is_empty()) {
            settings.date_format = value;
        }

        if let Some(value) = lookup(ENV_HTTP_TIMEOUT) {
            match value.trim().parse::<u64>() {
                Ok(secs) => settings.http_timeout_secs = secs,
                Err(err) => {
                    warn!(
                        target: "app::settings",
                        error = %err,
                        value = %value,
                        "ignoring invalid HTTP timeout"
                    );
                }
            }
        }

        if let Some(value) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
            settings.log_dir = Some(value);
        }

        Ok(())
    }

    pub fn apply_overrides(settings: &mut AppSettings, overrides: SettingsOverrides) {
        if let Some(source) = overrides.source {
            settings.source = source;
        }
        if let Some(base) = overrides.base {
            settings.base = base;
        }
        if let Some(timezone) = overrides.timezone {
            settings.timezone = timezone;
        }
        if let Some(log_dir) = overrides.log_dir {
            settings.log_dir = Some(log_dir);
        }
    }

    pub fn resolve(settings: AppSettings) -> AppResult<ResolvedSettings> {
        if settings.base.trim().is_empty() {
            return Err(AppError::config("a origem dos dados não pode ser vazia"));
        }
        if settings.http_timeout_secs == 0 {
            return Err(AppError::config("o timeout HTTP deve ser maior que zero"));
        }
        if settings.success_toast_ms == 0 || settings.error_toast_ms == 0 {
            return Err(AppError::config("a duração das notificações deve ser maior que zero"));
        }
        if !is_valid_pattern(&settings.date_format) {
            return Err(AppError::config(format!(
                "formato de data inválido '{}'",
                settings.date_format
            )));
        }

        let timezone: Tz = settings
            .timezone
            .parse()
            .map_err(|err| AppError::config(format!("fuso horário inválido '{}': {err}", settings.timezone)))?;

        Ok(ResolvedSettings { settings, timezone })
    }
}
