use crate::adapters::http::VidiqClient;
use crate::config::ClientConfig;
use crate::core::levels::LevelThresholds;
use crate::domain::model::{
    timestamp_now, KeywordCollection, KeywordKind, KeywordResult, KeywordSuggestion,
    RelatedOptions,
};
use crate::domain::ports::KeywordSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_keyword;
use std::time::Duration;

/// Single-keyword operations: metric analysis and the three keyword
/// collections. Every call waits `delay` before its request.
pub struct KeywordAnalyzer<S: KeywordSource> {
    source: S,
    thresholds: LevelThresholds,
    related_options: RelatedOptions,
}

impl KeywordAnalyzer<VidiqClient> {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = VidiqClient::new(config)?;
        Ok(Self::new(client)
            .with_thresholds(config.thresholds)
            .with_related_options(config.related.clone()))
    }
}

impl<S: KeywordSource> KeywordAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            thresholds: LevelThresholds::default(),
            related_options: RelatedOptions::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: LevelThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_related_options(mut self, options: RelatedOptions) -> Self {
        self.related_options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn thresholds(&self) -> &LevelThresholds {
        &self.thresholds
    }

    pub async fn analyze_keyword(&self, keyword: &str, delay: Duration) -> Result<KeywordResult> {
        let keyword = validate_keyword(keyword)?;
        pause(delay).await;

        let data = self.source.keyword_metrics(keyword).await?;
        let levels = self.thresholds.classify_metrics(&data);
        tracing::debug!(
            "Analyzed '{}': volume={} competition={} overall={} ({})",
            keyword,
            data.volume,
            data.competition,
            data.overall,
            levels.overall_level
        );

        Ok(KeywordResult {
            keyword: keyword.to_string(),
            timestamp: timestamp_now(),
            data,
            levels,
        })
    }

    pub async fn related_keywords(
        &self,
        keyword: &str,
        delay: Duration,
    ) -> Result<KeywordCollection> {
        self.related_keywords_with(keyword, &self.related_options, delay)
            .await
    }

    pub async fn related_keywords_with(
        &self,
        keyword: &str,
        options: &RelatedOptions,
        delay: Duration,
    ) -> Result<KeywordCollection> {
        let keyword = validate_keyword(keyword)?;
        pause(delay).await;
        let items = self.source.related_keywords(keyword, options).await?;
        Ok(collection(keyword, KeywordKind::Related, items))
    }

    pub async fn matching_keywords(
        &self,
        keyword: &str,
        limit: usize,
        delay: Duration,
    ) -> Result<KeywordCollection> {
        let keyword = validate_keyword(keyword)?;
        pause(delay).await;
        let items = self.source.matching_keywords(keyword, limit).await?;
        Ok(collection(keyword, KeywordKind::Matching, items))
    }

    pub async fn question_keywords(
        &self,
        keyword: &str,
        limit: usize,
        delay: Duration,
    ) -> Result<KeywordCollection> {
        let keyword = validate_keyword(keyword)?;
        pause(delay).await;
        let items = self.source.question_keywords(keyword, limit).await?;
        Ok(collection(keyword, KeywordKind::Question, items))
    }

    /// Fetches one collection by kind. `limit` is not sent for related
    /// keywords, whose endpoint has no such parameter.
    pub async fn fetch_collection(
        &self,
        kind: KeywordKind,
        keyword: &str,
        limit: usize,
        delay: Duration,
    ) -> Result<KeywordCollection> {
        match kind {
            KeywordKind::Related => self.related_keywords(keyword, delay).await,
            KeywordKind::Matching => self.matching_keywords(keyword, limit, delay).await,
            KeywordKind::Question => self.question_keywords(keyword, limit, delay).await,
        }
    }
}

fn collection(keyword: &str, kind: KeywordKind, items: Vec<KeywordSuggestion>) -> KeywordCollection {
    tracing::info!("Found {} {} keywords for '{}'", items.len(), kind, keyword);
    KeywordCollection {
        keyword: keyword.to_string(),
        timestamp: timestamp_now(),
        kind,
        items,
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
