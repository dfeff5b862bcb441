pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod prompt;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::http::HttpPredictionService;
pub use config::toml_config::TomlConfig;
pub use core::{
    orchestrator::{RequestLifecycle, RequestOrchestrator, SubmitOutcome},
    prediction_form::{FormView, PredictionForm},
};
pub use utils::error::{PredictError, Result};
