use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidiqError {
    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("Authentication failed (HTTP {status}): {message}")]
    AuthError { status: u16, message: String },

    #[error("Rate limit exceeded (HTTP 429): {message}")]
    RateLimitError { message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    #[error("Unexpected response data: {message}")]
    DataError { message: String },

    #[error("Invalid JSON response: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Auth,
    RateLimit,
    Network,
    Data,
    Io,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl VidiqError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::DataError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputError { .. } => ErrorCategory::Input,
            Self::AuthError { .. } => ErrorCategory::Auth,
            Self::RateLimitError { .. } => ErrorCategory::RateLimit,
            Self::NetworkError(_) => ErrorCategory::Network,
            Self::HttpStatusError { status, .. } if *status >= 500 => ErrorCategory::Network,
            Self::HttpStatusError { .. } | Self::DataError { .. } | Self::JsonError(_) => {
                ErrorCategory::Data
            }
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::RateLimit | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Auth | ErrorCategory::Io | ErrorCategory::Config => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether invoking the same call again, possibly after a longer delay,
    /// can succeed. Nothing in this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Pass a non-empty keyword and output path",
            ErrorCategory::Auth => {
                "Refresh the vidIQ bearer token and pass it via --token or VIDIQ_TOKEN"
            }
            ErrorCategory::RateLimit => "Increase the delay between requests and try again later",
            ErrorCategory::Network => "Check network connectivity and re-run the command",
            ErrorCategory::Data => {
                "The API returned no usable data for this keyword; try a different spelling"
            }
            ErrorCategory::Io => "Check that the output path exists and is writable",
            ErrorCategory::Config => "Review the configuration file and command-line options",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::AuthError { .. } => "The vidIQ token was rejected".to_string(),
            Self::RateLimitError { .. } => "vidIQ is rate limiting requests".to_string(),
            Self::NetworkError(e) if e.is_timeout() => "The request to vidIQ timed out".to_string(),
            Self::NetworkError(_) => "Could not reach the vidIQ API".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VidiqError>;
