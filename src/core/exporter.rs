use crate::config::ClientConfig;
use crate::core::analyzer::KeywordAnalyzer;
use crate::domain::model::{CsvRow, KeywordCollection, KeywordKind, CSV_HEADER};
use crate::domain::ports::{KeywordSource, Storage};
use crate::utils::error::{Result, VidiqError};
use crate::utils::validation::{validate_keyword, validate_path};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub delay: Duration,
    pub limit: usize,
}

impl ExportOptions {
    pub fn new(delay: Duration, limit: usize) -> Self {
        Self { delay, limit }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.delay(), config.limit)
    }
}

/// Fetches related, matching and question keywords for one source keyword
/// and writes them as CSV through a `Storage`.
pub struct CsvExporter<S: KeywordSource, St: Storage> {
    analyzer: KeywordAnalyzer<S>,
    storage: St,
}

impl<S: KeywordSource, St: Storage> CsvExporter<S, St> {
    pub fn new(analyzer: KeywordAnalyzer<S>, storage: St) -> Self {
        Self { analyzer, storage }
    }

    pub fn analyzer(&self) -> &KeywordAnalyzer<S> {
        &self.analyzer
    }

    pub fn storage(&self) -> &St {
        &self.storage
    }

    async fn fetch_all(
        &self,
        keyword: &str,
        options: &ExportOptions,
    ) -> Result<Vec<KeywordCollection>> {
        let mut collections = Vec::with_capacity(KeywordKind::ALL.len());
        for kind in KeywordKind::ALL {
            let mut collection = self
                .analyzer
                .fetch_collection(kind, keyword, options.limit, options.delay)
                .await?;
            collection.items.truncate(options.limit);
            collections.push(collection);
        }
        Ok(collections)
    }

    /// Writes all three collections into one file, rows tagged by type.
    /// Without `output_path` the file lands in the storage root under a
    /// timestamped name.
    pub async fn export_to_csv(
        &self,
        keyword: &str,
        options: &ExportOptions,
        output_path: Option<&str>,
    ) -> Result<String> {
        let keyword = validate_keyword(keyword)?;
        if let Some(path) = output_path {
            validate_path("output_path", path)?;
        }

        let collections = self.fetch_all(keyword, options).await?;
        let rows: Vec<CsvRow> = collections.iter().flat_map(rows_from_collection).collect();
        let data = encode_rows(&rows)?;

        let path = match output_path {
            Some(path) => path.to_string(),
            None => default_file_name(keyword, "keywords", &file_stamp()),
        };
        let written = self.storage.write_file(&path, &data).await?;

        tracing::info!("📄 Exported {} rows for '{}' to {}", rows.len(), keyword, written);
        Ok(written)
    }

    /// Writes one file per collection type into `output_dir` (the storage
    /// root when `None`).
    pub async fn export_separate_csvs(
        &self,
        keyword: &str,
        options: &ExportOptions,
        output_dir: Option<&str>,
    ) -> Result<BTreeMap<KeywordKind, String>> {
        let keyword = validate_keyword(keyword)?;
        if let Some(dir) = output_dir {
            validate_path("output_dir", dir)?;
        }

        let collections = self.fetch_all(keyword, options).await?;
        let stamp = file_stamp();
        let mut paths = BTreeMap::new();

        for collection in &collections {
            let rows = rows_from_collection(collection);
            let data = encode_rows(&rows)?;

            let name = default_file_name(keyword, collection.kind.file_label(), &stamp);
            let path = match output_dir {
                Some(dir) => Path::new(dir).join(&name).to_string_lossy().into_owned(),
                None => name,
            };
            let written = self.storage.write_file(&path, &data).await?;

            tracing::info!(
                "📁 Exported {} {} rows to {}",
                rows.len(),
                collection.kind,
                written
            );
            paths.insert(collection.kind, written);
        }

        Ok(paths)
    }
}

pub fn rows_from_collection(collection: &KeywordCollection) -> Vec<CsvRow> {
    collection
        .items
        .iter()
        .map(|item| CsvRow {
            keyword: item.keyword.clone(),
            kind: collection.kind,
            score: item.score,
            volume: item.volume,
            competition: item.competition,
            source_keyword: collection.keyword.clone(),
            timestamp: collection.timestamp.clone(),
        })
        .collect()
}

/// Header row first, even when `rows` is empty.
pub fn encode_rows(rows: &[CsvRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| VidiqError::IoError(e.into_error()))
}

fn file_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn slugify(keyword: &str) -> String {
    let mut slug = String::with_capacity(keyword.len());
    for c in keyword.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "keyword".to_string()
    } else {
        slug.to_string()
    }
}

fn default_file_name(keyword: &str, label: &str, stamp: &str) -> String {
    format!("{}_{}_{}.csv", slugify(keyword), label, stamp)
}
