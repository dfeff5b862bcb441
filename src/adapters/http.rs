use crate::domain::model::{PredictionRequest, PredictionResult};
use crate::domain::ports::{ConfigProvider, PredictionService};
use crate::utils::error::{PredictError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// [`PredictionService`] backed by a JSON-over-HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: Client,
    url: String,
}

impl HttpPredictionService {
    pub fn new(config: &impl ConfigProvider) -> Self {
        Self::with_client(Client::new(), config.predict_url())
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        tracing::debug!("POST {} with {:?}", self.url, request);

        // .json() 會自動帶上 Content-Type: application/json
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);

        if !status.is_success() {
            return Err(PredictError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<PredictionResult>(&body).map_err(|e| PredictError::Parse {
            message: e.to_string(),
        })
    }
}
