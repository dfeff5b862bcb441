use super::toml_config::TomlConfig;
use crate::domain::model::FieldName;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "house-price")]
#[command(about = "Submit property attributes to a house price prediction service")]
pub struct CliConfig {
    /// Square footage
    #[arg(long, allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Number of bedrooms
    #[arg(long, allow_hyphen_values = true)]
    pub bedrooms: Option<String>,

    /// Property age in years
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Location rank (1-10)
    #[arg(long, allow_hyphen_values = true)]
    pub location: Option<String>,

    /// Base URL of the prediction service (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request path of the prediction endpoint (overrides the config file)
    #[arg(long)]
    pub predict_path: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Prompt on stdin for fields not given as flags
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_log: bool,
}

impl CliConfig {
    /// Field values given on the command line, in form order.
    pub fn field_values(&self) -> Vec<(FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|name| {
                let value = match name {
                    FieldName::Size => &self.size,
                    FieldName::Bedrooms => &self.bedrooms,
                    FieldName::Age => &self.age,
                    FieldName::Location => &self.location,
                };
                value.as_deref().map(|v| (name, v))
            })
            .collect()
    }

    /// 載入設定檔 (若有指定)，再套用命令列覆蓋設定
    pub fn service_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.service.base_url = endpoint.clone();
        }
        if let Some(path) = &self.predict_path {
            config.service.predict_path = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parses_field_flags_as_raw_text() {
        let config = CliConfig::parse_from([
            "house-price",
            "--size",
            "2500",
            "--bedrooms",
            "three",
            "--age",
            "-1",
        ]);

        assert_eq!(
            config.field_values(),
            vec![
                (FieldName::Size, "2500"),
                (FieldName::Bedrooms, "three"),
                (FieldName::Age, "-1"),
            ]
        );
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_defaults_to_local_service() {
        let config = CliConfig::parse_from(["house-price"]);
        let service = config.service_config().unwrap();
        assert_eq!(service.predict_url(), "http://127.0.0.1:5000/api/predict");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[service]\nbase_url = \"https://file.example.com\"\npredict_path = \"/predict\"\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = CliConfig::parse_from([
            "house-price",
            "--config",
            path.as_str(),
            "--endpoint",
            "http://localhost:8080",
        ]);
        let service = config.service_config().unwrap();

        assert_eq!(service.predict_url(), "http://localhost:8080/predict");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = CliConfig::parse_from(["house-price", "--endpoint", "localhost"]);
        assert!(config.service_config().is_err());
    }
}
