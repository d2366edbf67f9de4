use super::error::EtlError;
use super::types::{ExecuteRequest, ExecuteResponse, Transformation};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

const LIST_ENDPOINT: &str = "listar-transformaciones";
const EXECUTE_ENDPOINT: &str = "ejecutar-etl";

/// The two calls the launcher makes against the ETL backend.
#[async_trait]
pub trait EtlBackend: Send + Sync {
    async fn list_transformations(&self) -> Result<Vec<Transformation>, EtlError>;
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, EtlError>;
}

#[derive(Clone)]
pub struct HttpEtlClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEtlClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, EtlError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = backend_error_message(&body).unwrap_or_else(|| status.to_string());
            warn!("Backend answered {}: {}", status, message);
            return Err(EtlError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| EtlError::Decode(e.to_string()))
    }
}

/// Pulls `error` (or `message`) out of a failed response body.
fn backend_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
impl EtlBackend for HttpEtlClient {
    async fn list_transformations(&self) -> Result<Vec<Transformation>, EtlError> {
        let url = self.url(LIST_ENDPOINT);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let transformations: Vec<Transformation> = Self::read_json(response).await?;
        info!("Backend listed {} transformations", transformations.len());
        Ok(transformations)
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, EtlError> {
        let url = self.url(EXECUTE_ENDPOINT);
        info!(
            ktr_path = %request.ktr_path,
            fecha_inicio = ?request.fecha_inicio,
            fecha_fin = ?request.fecha_fin,
            "POST {}",
            url
        );
        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json(response).await
    }
}
