use thiserror::Error;

/// Generic message shown to the user for any failed prediction request.
pub const BACKEND_UNAVAILABLE_MESSAGE: &str = "Backend not running or CORS issue.";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Prediction service responded with status {status}")]
    Service { status: u16 },

    #[error("Malformed prediction response: {message}")]
    Parse { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown form field: {name}")]
    UnknownField { name: String },
}

/// Coarse classification kept for logs; users only see the collapsed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Service,
    Parse,
    Config,
    Input,
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Transport(_) => ErrorKind::Transport,
            PredictError::Service { .. } => ErrorKind::Service,
            PredictError::Parse { .. } | PredictError::Serialization(_) => ErrorKind::Parse,
            PredictError::Io(_)
            | PredictError::ConfigError { .. }
            | PredictError::InvalidConfigValueError { .. } => ErrorKind::Config,
            PredictError::UnknownField { .. } => ErrorKind::Input,
        }
    }

    /// Whether this error came out of a prediction request cycle.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Transport | ErrorKind::Service | ErrorKind::Parse
        )
    }

    /// Message suitable for showing to an end user.
    ///
    /// Request failures are deliberately collapsed into one generic message;
    /// the distinct kinds only surface in logs.
    pub fn user_friendly_message(&self) -> String {
        if self.is_request_failure() {
            BACKEND_UNAVAILABLE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Transport | ErrorKind::Service | ErrorKind::Parse => {
                "Check that the prediction service is running and reachable at the configured endpoint"
            }
            ErrorKind::Config => "Check the configuration file and command line flags",
            ErrorKind::Input => "Use one of: size, bedrooms, age, location",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_share_one_user_message() {
        let service = PredictError::Service { status: 500 };
        let parse = PredictError::Parse {
            message: "expected value".to_string(),
        };

        assert_eq!(service.user_friendly_message(), BACKEND_UNAVAILABLE_MESSAGE);
        assert_eq!(parse.user_friendly_message(), BACKEND_UNAVAILABLE_MESSAGE);
        assert_eq!(service.kind(), ErrorKind::Service);
        assert_eq!(parse.kind(), ErrorKind::Parse);
    }

    #[test]
    fn config_errors_keep_their_detail() {
        let err = PredictError::InvalidConfigValueError {
            field: "service.base_url".to_string(),
            value: "nope".to_string(),
            reason: "Invalid URL format".to_string(),
        };

        assert!(!err.is_request_failure());
        assert!(err.user_friendly_message().contains("service.base_url"));
    }
}
