use crate::config::ClientConfig;
use crate::domain::model::{KeywordMetrics, KeywordSuggestion, RelatedOptions};
use crate::domain::ports::KeywordSource;
use crate::utils::error::{Result, VidiqError};
use crate::utils::validation::{validate_url, Validate};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use url::Url;

pub const HOTTERSEARCH_PATH: &str = "v0/hottersearch";
pub const KEYWORD_SEARCH_PATH: &str = "xwords/keyword_search/";
pub const RELATED_SEARCH_PATH: &str = "xwords/hottersearch";

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Authenticated HTTP client for the vidIQ keyword endpoints.
pub struct VidiqClient {
    client: Client,
    base_url: Url,
}

impl VidiqClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut base_url = validate_url("base_url", &config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.auth_token.trim()))
            .map_err(|_| VidiqError::InvalidConfigValueError {
                field: "auth_token".to_string(),
                value: "<redacted>".to_string(),
                reason: "Token contains characters that are not valid in an HTTP header"
                    .to_string(),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| VidiqError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| VidiqError::config(format!("Invalid endpoint path '{}': {}", path, e)))
    }

    /// Issues one GET and returns the decoded JSON body.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("Making API request to: {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        check_status(status, &body)?;

        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let trimmed = body.trim();
    let message = if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
    };

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VidiqError::AuthError {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => VidiqError::RateLimitError { message },
        _ => VidiqError::HttpStatusError {
            status: status.as_u16(),
            message,
        },
    })
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(obj) => obj.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

fn metric(entry: &Map<String, Value>, key: &str) -> f64 {
    match entry.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Finds the `search_stats.compvol` entry for `keyword`, trying the keyword
/// as given, then lower, upper and title case.
pub(crate) fn extract_metrics(keyword: &str, body: &Value) -> Result<KeywordMetrics> {
    let search_stats = body
        .get("search_stats")
        .filter(|v| !is_empty_payload(v))
        .ok_or_else(|| VidiqError::data(format!("No data returned for keyword: {}", keyword)))?;

    let empty = Map::new();
    let compvol = search_stats
        .get("compvol")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let variations = [
        keyword.to_string(),
        keyword.to_lowercase(),
        keyword.to_uppercase(),
        title_case(keyword),
    ];

    let entry = variations
        .iter()
        .find_map(|variant| {
            compvol
                .get(variant)
                .and_then(Value::as_object)
                .filter(|obj| !obj.is_empty())
        })
        .ok_or_else(|| {
            let available: Vec<&str> = compvol.keys().map(String::as_str).collect();
            VidiqError::data(format!(
                "No analysis data found for keyword: {}. Available keywords: {:?}",
                keyword, available
            ))
        })?;

    Ok(KeywordMetrics {
        volume: metric(entry, "volume"),
        competition: metric(entry, "competition"),
        estimated_monthly_search: metric(entry, "estimated_monthly_search"),
        overall: metric(entry, "overall"),
    })
}

fn suggestions_from(items: Option<&Value>) -> Vec<KeywordSuggestion> {
    let Some(items) = items.and_then(Value::as_array) else {
        return Vec::new();
    };

    let suggestions: Vec<KeywordSuggestion> =
        items.iter().filter_map(KeywordSuggestion::from_value).collect();
    let dropped = items.len() - suggestions.len();
    if dropped > 0 {
        tracing::warn!("Skipped {} upstream items without a keyword", dropped);
    }
    suggestions
}

pub(crate) fn extract_related(body: &Value) -> Vec<KeywordSuggestion> {
    let items = body
        .get("keywords")
        .or_else(|| body.get("related_keywords"))
        .or_else(|| body.get("search_stats").and_then(|s| s.get("related")));
    suggestions_from(items)
}

impl VidiqClient {
    async fn keyword_search(
        &self,
        keyword: &str,
        part: &str,
        limit: usize,
        empty_message: &str,
    ) -> Result<Vec<KeywordSuggestion>> {
        let body = self
            .get_json(
                KEYWORD_SEARCH_PATH,
                &[
                    ("term", keyword.to_string()),
                    ("part", part.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        if is_empty_payload(&body) {
            return Err(VidiqError::data(format!("{}: {}", empty_message, keyword)));
        }

        let mut items = suggestions_from(body.get(part));
        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait]
impl KeywordSource for VidiqClient {
    async fn keyword_metrics(&self, keyword: &str) -> Result<KeywordMetrics> {
        let body = self
            .get_json(
                HOTTERSEARCH_PATH,
                &[
                    ("q", keyword.to_string()),
                    ("im", "4.5".to_string()),
                    ("group", "V5".to_string()),
                    ("src", String::new()),
                ],
            )
            .await?;
        extract_metrics(keyword, &body)
    }

    async fn related_keywords(
        &self,
        keyword: &str,
        options: &RelatedOptions,
    ) -> Result<Vec<KeywordSuggestion>> {
        let body = self
            .get_json(
                RELATED_SEARCH_PATH,
                &[
                    ("q", keyword.to_string()),
                    ("min_related_score", options.min_related_score.to_string()),
                    ("group", options.group.clone()),
                ],
            )
            .await?;

        if is_empty_payload(&body) {
            return Err(VidiqError::data(format!(
                "No related keywords found for: {}",
                keyword
            )));
        }
        Ok(extract_related(&body))
    }

    async fn matching_keywords(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<KeywordSuggestion>> {
        self.keyword_search(keyword, "permutations", limit, "No matching keywords found for")
            .await
    }

    async fn question_keywords(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<KeywordSuggestion>> {
        self.keyword_search(keyword, "questions", limit, "No questions found for")
            .await
    }
}
