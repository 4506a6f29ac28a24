use crate::config::ClientConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vidiq-api")]
#[command(about = "YouTube keyword research with the vidIQ API", version)]
pub struct CliArgs {
    /// vidIQ bearer token
    #[arg(long, env = "VIDIQ_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// TOML configuration file; command-line options override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Seconds to wait before each request
    #[arg(long)]
    pub delay: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Analyze one keyword's volume, competition and overall score
    Analyze { keyword: String },

    /// Analyze several keywords; failures are reported per keyword
    Batch {
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// List related keywords
    Related {
        keyword: String,
        #[arg(long)]
        min_score: Option<i64>,
        #[arg(long)]
        group: Option<String>,
    },

    /// List matching keywords (permutations)
    Matching {
        keyword: String,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List question keywords
    Questions {
        keyword: String,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export related, matching and question keywords to one CSV file
    Export {
        keyword: String,
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export related, matching and question keywords to one CSV file each
    ExportSeparate {
        keyword: String,
        #[arg(short = 'd', long)]
        output_dir: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl CliArgs {
    /// Loads the config file when given, applies command-line overrides and
    /// validates the result.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::new(self.token.clone().unwrap_or_default()),
        };

        if let Some(token) = &self.token {
            config.auth_token = token.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(delay) = self.delay {
            config.delay_seconds = delay;
        }

        match &self.command {
            Command::Related {
                min_score, group, ..
            } => {
                if let Some(min_score) = min_score {
                    config.related.min_related_score = *min_score;
                }
                if let Some(group) = group {
                    config.related.group = group.clone();
                }
            }
            Command::Matching { limit, .. }
            | Command::Questions { limit, .. }
            | Command::Export { limit, .. }
            | Command::ExportSeparate { limit, .. } => {
                if let Some(limit) = limit {
                    config.limit = *limit;
                }
            }
            Command::Analyze { .. } | Command::Batch { .. } => {}
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_export_command() {
        let args = CliArgs::try_parse_from([
            "vidiq-api",
            "--token",
            "abc",
            "--delay",
            "0",
            "export",
            "cats",
            "--output",
            "cats.csv",
            "--limit",
            "50",
        ])
        .unwrap();

        match &args.command {
            Command::Export {
                keyword,
                output,
                limit,
            } => {
                assert_eq!(keyword, "cats");
                assert_eq!(output.as_deref(), Some("cats.csv"));
                assert_eq!(*limit, Some(50));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let config = args.client_config().unwrap();
        assert_eq!(config.auth_token, "abc");
        assert_eq!(config.limit, 50);
        assert_eq!(config.delay(), Duration::ZERO);
    }

    #[test]
    fn test_batch_requires_keywords() {
        assert!(CliArgs::try_parse_from(["vidiq-api", "--token", "abc", "batch"]).is_err());
    }

    #[test]
    fn test_related_overrides() {
        let args = CliArgs::try_parse_from([
            "vidiq-api",
            "--token",
            "abc",
            "related",
            "cats",
            "--min-score",
            "40",
            "--group",
            "v4",
        ])
        .unwrap();

        let config = args.client_config().unwrap();
        assert_eq!(config.related.min_related_score, 40);
        assert_eq!(config.related.group, "v4");
    }

    #[test]
    fn test_token_overrides_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"auth_token = \"from-file\"\ndelay_seconds = 2.0\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let args = CliArgs::try_parse_from([
            "vidiq-api",
            "--config",
            path.as_str(),
            "--token",
            "from-cli",
            "analyze",
            "cats",
        ])
        .unwrap();

        let config = args.client_config().unwrap();
        assert_eq!(config.auth_token, "from-cli");
        assert_eq!(config.delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let args = CliArgs::try_parse_from([
            "vidiq-api",
            "--token",
            "abc",
            "--delay=-1",
            "analyze",
            "cats",
        ])
        .unwrap();
        assert!(args.client_config().is_err());
    }
}
