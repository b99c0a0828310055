use std::fmt;

use thiserror::Error;
use tracing::{debug, error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// Underlying reason a single fetch attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCause {
    Network(String),
    Status(u16),
    Io(String),
    Parse(String),
}

impl FetchCause {
    pub fn code(&self) -> &'static str {
        match self {
            FetchCause::Network(_) => "NETWORK",
            FetchCause::Status(_) => "HTTP_STATUS",
            FetchCause::Io(_) => "IO",
            FetchCause::Parse(_) => "PARSE",
        }
    }
}

impl fmt::Display for FetchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchCause::Network(reason) => write!(f, "falha de rede: {reason}"),
            FetchCause::Status(status) => write!(f, "HTTP error! status: {status}"),
            FetchCause::Io(reason) => write!(f, "falha de leitura: {reason}"),
            FetchCause::Parse(reason) => write!(f, "resposta inválida: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("falha ao carregar {resource}: {cause}")]
pub struct FetchError {
    pub resource: String,
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(resource: impl Into<String>, cause: FetchCause) -> Self {
        let resource = resource.into();
        warn!(
            target: "app::fetch",
            %resource,
            code = cause.code(),
            cause = %cause,
            "fetch failed"
        );
        Self { resource, cause }
    }

    pub fn status(&self) -> Option<u16> {
        match self.cause {
            FetchCause::Status(status) => Some(status),
            _ => None,
        }
    }
}

/// A widget could not be drawn because its container is not on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("renderização ignorada: {reason}")]
pub struct RenderSkipped {
    pub reason: String,
}

impl RenderSkipped {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(target: "app::render", %reason, "render skipped");
        Self { reason }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("registro não encontrado: {collection} #{id}")]
    NotFound { collection: String, id: u64 },

    #[error(transparent)]
    RenderSkipped(#[from] RenderSkipped),

    #[error("validação falhou: {message}")]
    Validation { message: String },

    #[error("configuração inválida: {message}")]
    Config { message: String },

    #[error("erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(collection: impl Into<String>, id: u64) -> Self {
        let collection = collection.into();
        warn!(target: "app::store", %collection, id, "record not found");
        AppError::NotFound { collection, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::config", %message, "configuration error");
        AppError::Config { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    pub fn is_render_skipped(&self) -> bool {
        matches!(self, AppError::RenderSkipped(_))
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            AppError::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(error: serde_yaml::Error) -> Self {
        AppError::config(error.to_string())
    }
}
