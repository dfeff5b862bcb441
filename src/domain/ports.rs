use crate::domain::model::{PredictionRequest, PredictionResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn predict_path(&self) -> &str;

    /// Full URL the prediction request is posted to.
    fn predict_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url().trim_end_matches('/'),
            self.predict_path()
        )
    }
}

/// Remote collaborator that turns property attributes into model predictions.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult>;
}
