use crate::core::levels::LevelThresholds;
use crate::domain::model::RelatedOptions;
use crate::utils::error::{Result, VidiqError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.vidiq.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_DELAY_SECONDS: f64 = 1.0;
pub const DEFAULT_LIMIT: usize = 300;
const MAX_DELAY_SECONDS: f64 = 3600.0;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    format!("vidiq-api-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_delay_seconds() -> f64 {
    DEFAULT_DELAY_SECONDS
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Everything the client needs, passed in explicitly. Nothing here is read
/// from the environment unless a TOML file asks for it with `${VAR}`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub auth_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: f64,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub related: RelatedOptions,
    #[serde(default)]
    pub thresholds: LevelThresholds,
}

impl ClientConfig {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            base_url: default_base_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: default_user_agent(),
            delay_seconds: DEFAULT_DELAY_SECONDS,
            limit: DEFAULT_LIMIT,
            related: RelatedOptions::default(),
            thresholds: LevelThresholds::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_delay_seconds(mut self, delay_seconds: f64) -> Self {
        self.delay_seconds = delay_seconds;
        self
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VidiqError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed)
            .map_err(|e| VidiqError::config(format!("TOML parsing error: {}", e)))
    }

    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_seconds).unwrap_or(Duration::ZERO)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() || self.auth_token.starts_with("${") {
            return Err(VidiqError::MissingConfigError {
                field: "auth_token".to_string(),
            });
        }
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        validation::validate_range("delay_seconds", self.delay_seconds, 0.0, MAX_DELAY_SECONDS)?;
        validation::validate_positive_number("limit", self.limit as u64, 1)?;
        validation::validate_non_empty_string("related.group", &self.related.group)?;
        self.thresholds.validate()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("delay_seconds", &self.delay_seconds)
            .field("limit", &self.limit)
            .field("related", &self.related)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url, "https://api.vidiq.com");
        assert_eq!(config.delay(), Duration::from_secs(1));
        assert_eq!(config.limit, 300);
        assert_eq!(config.related.group, "v5");
        assert_eq!(config.thresholds, LevelThresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, VidiqError::MissingConfigError { .. }));
    }

    #[test]
    fn test_parse_toml_with_partial_sections() {
        let toml_content = r#"
auth_token = "abc"
base_url = "http://localhost:9000"
delay_seconds = 0.5
thresholds = [10.0, 30.0, 50.0, 70.0]

[related]
min_related_score = 40
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.auth_token, "abc");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.delay(), Duration::from_millis(500));
        assert_eq!(config.related.min_related_score, 40);
        assert_eq!(config.related.group, "v5");
        assert_eq!(config.thresholds.bounds(), &[10.0, 30.0, 50.0, 70.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VIDIQ_CONFIG_TEST_TOKEN", "from-env");

        let config =
            ClientConfig::from_toml_str(r#"auth_token = "${VIDIQ_CONFIG_TEST_TOKEN}""#).unwrap();
        assert_eq!(config.auth_token, "from-env");

        std::env::remove_var("VIDIQ_CONFIG_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_placeholder_fails_validation() {
        let config =
            ClientConfig::from_toml_str(r#"auth_token = "${VIDIQ_CONFIG_TEST_UNSET_VAR}""#)
                .unwrap();
        assert_eq!(config.auth_token, "${VIDIQ_CONFIG_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_url = ClientConfig::new("t").with_base_url("invalid-url");
        assert!(bad_url.validate().is_err());

        let negative_delay = ClientConfig::new("t").with_delay_seconds(-1.0);
        assert!(negative_delay.validate().is_err());

        let mut bad_thresholds = ClientConfig::new("t");
        bad_thresholds.thresholds = serde_json::from_str("[50.0, 40.0, 60.0, 80.0]").unwrap();
        assert!(bad_thresholds.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"auth_token = \"file-token\"\nlimit = 25\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.auth_token, "file-token");
        assert_eq!(config.limit, 25);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
