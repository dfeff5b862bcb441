pub mod form;
pub mod orchestrator;
pub mod prediction_form;

pub use crate::domain::model::{FieldName, FormState, PredictionRequest, PredictionResult};
pub use crate::domain::ports::{ConfigProvider, PredictionService};
pub use crate::utils::error::Result;
