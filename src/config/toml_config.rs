use crate::core::ConfigProvider;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_request_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PREDICT_PATH: &str = "/api/predict";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub predict_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                predict_path: None,
            },
            logging: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PREDICT_API_URL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_log(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn predict_path(&self) -> &str {
        self.service
            .predict_path
            .as_deref()
            .unwrap_or(DEFAULT_PREDICT_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.base_url", &self.service.base_url)?;
        validate_request_path("service.predict_path", self.predict_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[service]
base_url = "https://predict.example.com"
predict_path = "/v2/predict"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://predict.example.com");
        assert_eq!(config.predict_path(), "/v2/predict");
        assert_eq!(config.predict_url(), "https://predict.example.com/v2/predict");
        assert!(config.verbose());
        assert!(!config.json_log());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_predict_path_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
base_url = "http://localhost:5000/"
"#,
        )
        .unwrap();

        assert_eq!(config.predict_path(), DEFAULT_PREDICT_PATH);
        assert_eq!(config.predict_url(), "http://localhost:5000/api/predict");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOUSE_PRICE_TEST_BASE_URL", "https://test.api.com");

        let config = TomlConfig::from_toml_str(
            r#"
[service]
base_url = "${HOUSE_PRICE_TEST_BASE_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "https://test.api.com");

        std::env::remove_var("HOUSE_PRICE_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[service]
base_url = "http://localhost:5000"
predict_path = "api/predict"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_service_section_is_config_error() {
        let err = TomlConfig::from_toml_str("[logging]\njson = true\n").unwrap_err();
        assert!(matches!(err, PredictError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nbase_url = \"https://api.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }
}
