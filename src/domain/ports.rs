use crate::domain::model::{KeywordMetrics, KeywordSuggestion, RelatedOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Upstream keyword data, already validated into typed values.
///
/// Implementations issue exactly one request per call and never sleep;
/// pacing belongs to the caller.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn keyword_metrics(&self, keyword: &str) -> Result<KeywordMetrics>;

    async fn related_keywords(
        &self,
        keyword: &str,
        options: &RelatedOptions,
    ) -> Result<Vec<KeywordSuggestion>>;

    async fn matching_keywords(&self, keyword: &str, limit: usize)
        -> Result<Vec<KeywordSuggestion>>;

    async fn question_keywords(&self, keyword: &str, limit: usize)
        -> Result<Vec<KeywordSuggestion>>;
}

/// Export sink. The exporter only ever writes.
pub trait Storage: Send + Sync {
    /// Writes `data` and returns the resolved location.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
