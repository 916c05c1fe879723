use crate::domain::ports::{ConfigProvider, DeleteTransport};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 以 reqwest 對後端送出 DELETE
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AdminError::InvalidConfigValueError {
            field: "server.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(client_build_error)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.timeout_seconds().map(Duration::from_secs),
        )
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AdminError::PreconditionViolation {
                message: format!("Cannot build request URL for '{}': {}", path, e),
            })
    }
}

#[async_trait]
impl DeleteTransport for HttpTransport {
    async fn delete(&self, path: &str) -> Result<u16> {
        let url = self.resolve(path)?;
        tracing::debug!("Sending DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("DELETE {} answered {}", path, status);
        Ok(status.as_u16())
    }
}

// client 建不起來是設定問題，不是連線失敗
fn client_build_error(e: reqwest::Error) -> AdminError {
    AdminError::ConfigError {
        message: format!("Cannot build HTTP client: {}", e),
    }
}
