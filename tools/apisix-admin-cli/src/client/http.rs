use super::error::ClientError;
use super::models::{ImportResponse, LastImportResponse};
use crate::config::ContextConfig;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Header carrying the admin credential on every request
pub const API_HEADER_KEY: &str = "X-API-KEY";
pub const YAML_CONTENT_TYPE: &str = "application/x-yaml";

pub const IMPORT_PATH: &str = "/apisix/admin/import";
pub const LAST_IMPORT_PATH: &str = "/apisix/admin/import/last";
pub const EXPORT_PATH: &str = "/apisix/admin/export";

/// Admin API operations the import/export panel relies on
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetch the time of the last successful import
    async fn last_import(&self) -> Result<LastImportResponse, ClientError>;

    /// Upload a YAML document verbatim
    async fn import_yaml(
        &self,
        content: String,
    ) -> Result<ImportResponse, ClientError>;

    /// Download the current configuration as opaque bytes
    async fn export(&self) -> Result<Bytes, ClientError>;

    /// Replace the credential used for subsequent requests
    fn set_admin_key(&mut self, admin_key: String);
}

/// HTTP client for the APISIX admin API
pub struct HttpClient {
    client: Client,
    base_url: String,
    admin_key: String,
}

impl HttpClient {
    /// Create a new HTTP client from a resolved context
    pub fn new(context: &ContextConfig) -> Result<Self, ClientError> {
        let base_url = context
            .admin_url
            .as_ref()
            .ok_or_else(|| ClientError::config_error("Admin API URL not configured"))?;
        let admin_key = context.admin_key.clone().unwrap_or_default();
        let timeout = context.timeout_secs.map(Duration::from_secs);
        Self::with_base_url(base_url, admin_key, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        admin_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let parsed: ::http::Uri = base_url
            .parse()
            .map_err(|e| ClientError::invalid_url(format!("{base_url}: {e}")))?;
        if parsed.scheme().is_none() || parsed.host().is_none() {
            return Err(ClientError::invalid_url(format!(
                "{base_url}: expected scheme and host, e.g. http://127.0.0.1:9180"
            )));
        }

        let mut builder = Client::builder()
            .user_agent(concat!("apisix-admin-cli/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key: admin_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fail on non-success status, keeping the body text as the detail
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::api_error(status.as_u16(), error_text))
        }
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(response: Response) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = Self::check_status(response).await?;
        let text = response.text().await.map_err(ClientError::RequestFailed)?;
        serde_json::from_str(&text).map_err(ClientError::SerializationError)
    }
}

#[async_trait]
impl AdminApi for HttpClient {
    async fn last_import(&self) -> Result<LastImportResponse, ClientError> {
        let url = self.url(LAST_IMPORT_PATH);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .header(API_HEADER_KEY, &self.admin_key)
            .send()
            .await
            .map_err(ClientError::RequestFailed)?;
        Self::handle_response(response).await
    }

    async fn import_yaml(
        &self,
        content: String,
    ) -> Result<ImportResponse, ClientError> {
        let url = self.url(IMPORT_PATH);
        debug!("POST {url} ({} bytes)", content.len());
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, YAML_CONTENT_TYPE)
            .header(API_HEADER_KEY, &self.admin_key)
            .body(content)
            .send()
            .await
            .map_err(ClientError::RequestFailed)?;
        Self::handle_response(response).await
    }

    async fn export(&self) -> Result<Bytes, ClientError> {
        let url = self.url(EXPORT_PATH);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .header(API_HEADER_KEY, &self.admin_key)
            .send()
            .await
            .map_err(ClientError::RequestFailed)?;
        let response = Self::check_status(response).await?;
        response.bytes().await.map_err(ClientError::RequestFailed)
    }

    fn set_admin_key(&mut self, admin_key: String) {
        self.admin_key = admin_key;
    }
}
