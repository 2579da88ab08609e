use std::time::Duration;

use docintel_core::{BatchResponse, UploadRequest, UploadResponse};
use docintel_logging::{docintel_debug, docintel_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::form::{form_fields, FILE_FIELD, PDF_MIME};
use crate::{FailureKind, HealthStatus, RequestError};

const UPLOAD_PATH: &str = "api/upload";
const COLLECTIONS_PATH: &str = "api/challenge1b";
const REPROCESS_PATH: &str = "api/challenge1b/reprocess";
const HEALTH_PATH: &str = "api/health";
const DOWNLOAD_PATH: &str = "api/download/";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Root of the service; endpoint paths are resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Processing a large PDF in advanced mode takes minutes.
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

/// The request-issuing side of the three flows.
///
/// Implementations return `Ok` for every response whose body decodes, even
/// when the service reports `success: false`; `Err` is reserved for
/// transport and decoding failures.
#[async_trait::async_trait]
pub trait DocumentService: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, RequestError>;

    async fn run_collections(&self) -> Result<BatchResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ServiceSettings,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Absolute link to a stored result; the token is used verbatim.
    pub fn download_url(&self, result_file: &str) -> Result<Url, RequestError> {
        self.endpoint(&format!("{DOWNLOAD_PATH}{result_file}"))
    }

    /// Re-runs the full collection pipeline instead of serving cached results.
    pub async fn reprocess_collections(&self) -> Result<BatchResponse, RequestError> {
        self.get_json(REPROCESS_PATH).await
    }

    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        self.get_json(HEALTH_PATH).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        let mut base = self.settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let url = self.endpoint(path)?;
        docintel_debug!("GET {}", url);
        let response = self
            .build_client()?
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    /// Decodes the body as JSON regardless of status: the service reports
    /// failures as `{ "error": ... }` with 4xx/5xx codes.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RequestError> {
        let status = response.status().as_u16();
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        docintel_debug!("response status={} bytes={}", status, body.len());
        serde_json::from_slice(&body)
            .map_err(|err| RequestError::new(FailureKind::MalformedBody { status }, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DocumentService for ReqwestService {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, RequestError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        let file = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str(PDF_MIME)
            .map_err(|err| RequestError::new(FailureKind::InvalidForm, err.to_string()))?;
        let form = form_fields(request)
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(FILE_FIELD, file);

        docintel_info!(
            "POST {} file={} bytes={} mode={:?} variant={:?}",
            url,
            request.file.name,
            request.file.bytes.len(),
            request.mode,
            request.variant
        );
        let response = self
            .build_client()?
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    async fn run_collections(&self) -> Result<BatchResponse, RequestError> {
        self.get_json(COLLECTIONS_PATH).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
