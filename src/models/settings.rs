use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Pre-built JSON files (`data/*.json`).
    Static,
    /// REST endpoints (`api/*`).
    Api,
}

impl DataSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceKind::Static => "static",
            DataSourceKind::Api => "api",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "static" => Some(DataSourceKind::Static),
            "api" => Some(DataSourceKind::Api),
            _ => None,
        }
    }
}

impl Default for DataSourceKind {
    fn default() -> Self {
        DataSourceKind::Static
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub source: DataSourceKind,
    /// Either an `http(s)://` base URL or a local directory.
    pub base: String,
    pub timezone: String,
    pub date_format: String,
    pub http_timeout_secs: u64,
    pub success_toast_ms: u64,
    pub error_toast_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            source: DataSourceKind::Static,
            base: "public".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            http_timeout_secs: 30,
            success_toast_ms: 3_000,
            error_toast_ms: 5_000,
            log_dir: None,
        }
    }
}
