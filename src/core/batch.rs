use crate::core::analyzer::KeywordAnalyzer;
use crate::domain::model::{BatchEntry, BatchResult};
use crate::domain::ports::KeywordSource;
use std::time::Duration;

impl<S: KeywordSource> KeywordAnalyzer<S> {
    /// Analyzes each keyword in order. Failures are recorded per keyword and
    /// never stop the run; a repeated keyword keeps its first result and is
    /// not requested again.
    pub async fn analyze_keywords<K: AsRef<str>>(
        &self,
        keywords: &[K],
        delay: Duration,
    ) -> BatchResult {
        let mut results = BatchResult::new();

        for keyword in keywords {
            let keyword = keyword.as_ref();
            if results.contains_key(keyword) {
                tracing::debug!("Skipping duplicate keyword '{}'", keyword);
                continue;
            }

            let entry = match self.analyze_keyword(keyword, delay).await {
                Ok(result) => {
                    tracing::info!("✅ Analyzed: {}", keyword);
                    BatchEntry::Success(result)
                }
                Err(e) => {
                    tracing::warn!("❌ Failed: {} - {}", keyword, e);
                    BatchEntry::Failure {
                        error: e.to_string(),
                    }
                }
            };
            results.insert_first(keyword, entry);
        }

        tracing::info!(
            "Batch complete: {} keywords, {} failed",
            results.len(),
            results.failures().count()
        );
        results
    }
}
