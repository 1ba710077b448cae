//! Orthanc REST client
//!
//! HTTP implementation of [`OrthancApi`] on top of `reqwest`, with basic
//! authentication and retries for transient failures.

use super::api::OrthancApi;
use super::models::{FindRequest, InstanceTags, ModifyRequest, ModifyResponse, SystemInfo};
use crate::config::OrthancConfig;
use crate::domain::ids::OrthancId;
use crate::domain::resources::{Instance, Patient, ResourceLevel, Series, Study};
use crate::domain::{InspectorError, OrthancError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Orthanc REST client
///
/// # Example
///
/// ```no_run
/// use study_inspector::adapters::orthanc::{OrthancApi, OrthancClient};
/// use study_inspector::config::OrthancConfig;
///
/// # async fn example() -> study_inspector::domain::Result<()> {
/// let client = OrthancClient::new(OrthancConfig::default())?;
/// let system = client.system().await?;
/// println!("Orthanc {}", system.version);
/// # Ok(())
/// # }
/// ```
pub struct OrthancClient {
    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Orthanc configuration
    config: OrthancConfig,
}

impl OrthancClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(config: OrthancConfig) -> Result<Self> {
        let base_url = config.normalized_base_url().to_string();
        url::Url::parse(&base_url).map_err(|e| {
            InspectorError::Configuration(format!("Invalid Orthanc base URL '{base_url}': {e}"))
        })?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for Orthanc requests");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            InspectorError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Whether credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.auth_header_value().is_some()
    }

    /// Build the basic authorization header value
    fn auth_header_value(&self) -> Option<String> {
        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => {
                let credentials = format!("{}:{}", username, password.expose_secret().as_ref());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }
        request
    }

    /// Sends a request and maps transport failures and error statuses
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                OrthancError::Timeout(format!("{path}: {e}"))
            } else {
                OrthancError::ConnectionFailed(format!("{path}: {e}"))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, path, body).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.retry_request(path, || async {
            let response = self.send(self.request(Method::GET, path), path).await?;
            decode_json(response, path).await
        })
        .await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        self.retry_request(path, || async {
            let request = self.request(Method::POST, path).json(body);
            let response = self.send(request, path).await?;
            decode_json(response, path).await
        })
        .await
    }

    /// Retry a request with exponential backoff
    ///
    /// Only errors flagged as retryable are retried; `max_retries` bounds the
    /// total number of attempts.
    async fn retry_request<F, T, Fut>(&self, path: &str, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_attempts = self.config.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    let retryable = matches!(&e, InspectorError::Orthanc(err) if err.is_retryable());
                    if !retryable || attempt >= max_attempts {
                        tracing::debug!(path = %path, attempt, error = %e, "Orthanc request failed");
                        return Err(e);
                    }

                    let delay_ms = self.config.retry.delay_for_attempt(attempt);
                    crate::log_retry_attempt!(attempt, max_attempts, delay_ms, e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

/// Maps a non-success HTTP status to an [`OrthancError`]
fn map_status(status: StatusCode, path: &str, body: String) -> OrthancError {
    let message = if body.trim().is_empty() {
        path.to_string()
    } else {
        format!("{path}: {}", body.trim())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            OrthancError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => OrthancError::ResourceNotFound(path.to_string()),
        s if s.is_server_error() => OrthancError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => OrthancError::ClientError {
            status: s.as_u16(),
            message,
        },
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        InspectorError::Orthanc(OrthancError::InvalidResponse(format!("{path}: {e}")))
    })
}

#[async_trait]
impl OrthancApi for OrthancClient {
    async fn system(&self) -> Result<SystemInfo> {
        self.get_json("/system").await
    }

    async fn find_patients(&self, query: &FindRequest) -> Result<Vec<Patient>> {
        tracing::debug!(query = ?query.query, "Querying Orthanc for patients");
        let patients: Vec<Patient> = self.post_json("/tools/find", query).await?;
        tracing::debug!(count = patients.len(), "Patient query returned");
        Ok(patients)
    }

    async fn patient_studies(&self, patient: &OrthancId) -> Result<Vec<Study>> {
        self.get_json(&format!("/patients/{patient}/studies")).await
    }

    async fn study_series(&self, study: &OrthancId) -> Result<Vec<Series>> {
        self.get_json(&format!("/studies/{study}/series")).await
    }

    async fn series_instances(&self, series: &OrthancId) -> Result<Vec<Instance>> {
        self.get_json(&format!("/series/{series}/instances")).await
    }

    async fn instance_tags(&self, instance: &OrthancId) -> Result<InstanceTags> {
        self.get_json(&format!("/instances/{instance}/tags")).await
    }

    async fn instance_file(&self, instance: &OrthancId) -> Result<Vec<u8>> {
        let path = format!("/instances/{instance}/file");
        let bytes = self
            .retry_request(&path, || async {
                let request = self
                    .request(Method::GET, &path)
                    .header("Accept", "application/dicom");
                let response = self.send(request, &path).await?;
                response.bytes().await.map_err(|e| {
                    InspectorError::Orthanc(OrthancError::ConnectionFailed(format!(
                        "{path}: {e}"
                    )))
                })
            })
            .await?;

        tracing::debug!(orthanc_id = %instance, size = bytes.len(), "Downloaded instance file");
        Ok(bytes.to_vec())
    }

    async fn modify(
        &self,
        level: ResourceLevel,
        id: &OrthancId,
        request: &ModifyRequest,
    ) -> Result<ModifyResponse> {
        let path = format!("/{}/{}/modify", level.path_segment(), id);
        tracing::info!(
            level = %level,
            orthanc_id = %id,
            tags = ?request.replace.keys().collect::<Vec<_>>(),
            keep_source = request.keep_source,
            "Sending modification to Orthanc"
        );
        self.post_json(&path, request).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
