use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatusError {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Markup parsing error: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to save grants to {path}")]
    PersistError { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Parse,
    Persist,
    Config,
}

impl ScrapeError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchError { .. } | Self::HttpStatusError { .. } | Self::UrlError(_) => {
                ErrorCategory::Fetch
            }
            Self::ParseError { .. } => ErrorCategory::Parse,
            Self::IoError(_) | Self::SerializationError(_) | Self::PersistError { .. } => {
                ErrorCategory::Persist
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => "Check network connectivity and that the site is reachable",
            ErrorCategory::Parse => "The site layout may have changed; review the page markup",
            ErrorCategory::Persist => "Check that the output directory exists and is writable",
            ErrorCategory::Config => "Review the command line flags or the TOML configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
