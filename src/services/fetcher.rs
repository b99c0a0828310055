use std::path::{Path, PathBuf};
use std::time::{Duration as StdDuration, Instant};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, AppResult, FetchCause, FetchError};

/// Where a resource lives, relative to the configured base.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    path: String,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: path.trim_start_matches('/').to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone)]
enum Transport {
    Http {
        client: reqwest::Client,
        base_url: String,
    },
    Files {
        root: PathBuf,
    },
}

/// Single-attempt loader over HTTP or the local filesystem.
#[derive(Debug, Clone)]
pub struct Fetcher {
    transport: Transport,
}

impl Fetcher {
    pub fn http(base_url: impl Into<String>, timeout: StdDuration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("falha ao iniciar o cliente HTTP: {err}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            transport: Transport::Http { client, base_url },
        })
    }

    pub fn files(root: impl Into<PathBuf>) -> Self {
        Self {
            transport: Transport::Files { root: root.into() },
        }
    }

    /// `http://` and `https://` bases use HTTP, anything else is a directory.
    pub fn from_base(base: &str, timeout: StdDuration) -> AppResult<Self> {
        let trimmed = base.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::http(trimmed, timeout)
        } else {
            Ok(Self::files(trimmed))
        }
    }

    pub fn describe(&self, resource: &Resource) -> String {
        match &self.transport {
            Transport::Http { base_url, .. } => format!("{}/{}", base_url, resource.path()),
            Transport::Files { root } => root.join(resource.path()).display().to_string(),
        }
    }

    pub async fn load<T>(&self, resource: &Resource) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let bytes = match &self.transport {
            Transport::Http { client, base_url } => {
                Self::read_http(client, base_url, resource).await?
            }
            Transport::Files { root } => Self::read_file(root, resource).await?,
        };

        let parsed = serde_json::from_slice::<T>(&bytes)
            .map_err(|err| FetchError::new(resource.path(), FetchCause::Parse(err.to_string())))?;

        debug!(
            target: "app::fetch",
            resource = %resource.path(),
            bytes = bytes.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "resource loaded"
        );

        Ok(parsed)
    }

    async fn read_http(
        client: &reqwest::Client,
        base_url: &str,
        resource: &Resource,
    ) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/{}", base_url, resource.path());
        let response = client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|err| FetchError::new(resource.path(), FetchCause::Network(err.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                resource.path(),
                FetchCause::Status(status.as_u16()),
            ));
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|err| FetchError::new(resource.path(), FetchCause::Network(err.to_string())))
    }

    async fn read_file(root: &Path, resource: &Resource) -> Result<Vec<u8>, FetchError> {
        let path = root.join(resource.path());
        tokio::fs::read(&path)
            .await
            .map_err(|err| FetchError::new(resource.path(), FetchCause::Io(err.to_string())))
    }
}
