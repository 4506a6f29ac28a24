//! Client for the vidIQ YouTube keyword research API.
//!
//! [`KeywordAnalyzer`] analyzes single keywords and batches, and fetches
//! related, matching and question keywords. [`CsvExporter`] writes those
//! collections to CSV. Configuration is always explicit: build a
//! [`ClientConfig`] with a token and hand it to the constructors.
//!
//! ```no_run
//! use std::time::Duration;
//! use vidiq_api::{ClientConfig, KeywordAnalyzer};
//!
//! # async fn run() -> vidiq_api::Result<()> {
//! let analyzer = KeywordAnalyzer::from_config(&ClientConfig::new("token"))?;
//! let result = analyzer.analyze_keyword("youtube SEO", Duration::from_secs(1)).await?;
//! println!("{}: {}", result.keyword, result.levels.overall_level);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliArgs, Command};
pub use crate::config::ClientConfig;

pub use crate::adapters::{http::VidiqClient, storage::LocalStorage};
pub use crate::core::{
    analyzer::KeywordAnalyzer,
    exporter::{CsvExporter, ExportOptions},
    levels::LevelThresholds,
};
pub use crate::domain::model::{
    BatchEntry, BatchResult, CsvRow, KeywordCollection, KeywordKind, KeywordLevels,
    KeywordMetrics, KeywordResult, KeywordSuggestion, Level, RelatedOptions,
};
pub use crate::utils::error::{Result, VidiqError};
