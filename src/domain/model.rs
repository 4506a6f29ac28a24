use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Raw metric values for one keyword, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub volume: f64,
    pub competition: f64,
    pub estimated_monthly_search: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::VeryLow,
        Level::Low,
        Level::Medium,
        Level::High,
        Level::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::VeryLow => "Very Low",
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLevels {
    pub volume_level: Level,
    pub competition_level: Level,
    pub overall_level: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub timestamp: String,
    pub data: KeywordMetrics,
    pub levels: KeywordLevels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Success(KeywordResult),
    Failure { error: String },
}

impl BatchEntry {
    pub fn result(&self) -> Option<&KeywordResult> {
        match self {
            BatchEntry::Success(result) => Some(result),
            BatchEntry::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BatchEntry::Success(_) => None,
            BatchEntry::Failure { error } => Some(error),
        }
    }
}

/// Per-keyword outcome of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    entries: Vec<(String, BatchEntry)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` unless `keyword` already has one. Returns whether it was stored.
    pub fn insert_first(&mut self, keyword: &str, entry: BatchEntry) -> bool {
        if self.contains_key(keyword) {
            return false;
        }
        self.entries.push((keyword.to_string(), entry));
        true
    }

    pub fn contains_key(&self, keyword: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == keyword)
    }

    pub fn get(&self, keyword: &str) -> Option<&BatchEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BatchEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn successes(&self) -> impl Iterator<Item = &KeywordResult> {
        self.entries.iter().filter_map(|(_, entry)| entry.result())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, entry)| entry.error().map(|e| (k.as_str(), e)))
    }
}

impl Serialize for BatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, entry) in &self.entries {
            map.serialize_entry(keyword, entry)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    Related,
    Matching,
    Question,
}

impl KeywordKind {
    /// Export order.
    pub const ALL: [KeywordKind; 3] = [
        KeywordKind::Related,
        KeywordKind::Matching,
        KeywordKind::Question,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordKind::Related => "related",
            KeywordKind::Matching => "matching",
            KeywordKind::Question => "question",
        }
    }

    pub fn file_label(&self) -> &'static str {
        match self {
            KeywordKind::Related => "related_keywords",
            KeywordKind::Matching => "matching_keywords",
            KeywordKind::Question => "questions",
        }
    }
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a related, matching or question collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub score: Option<f64>,
    pub volume: Option<f64>,
    pub competition: Option<f64>,
}

impl KeywordSuggestion {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            score: None,
            volume: None,
            competition: None,
        }
    }

    /// Reads an upstream item, which is either a bare string or an object.
    /// Returns `None` when no keyword text can be found.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.trim())),
            serde_json::Value::Object(obj) => {
                let keyword = ["keyword", "term", "text"]
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())?;
                Some(Self {
                    keyword: keyword.to_string(),
                    score: first_number(obj, &["score", "related_score"]),
                    volume: first_number(obj, &["volume"]),
                    competition: first_number(obj, &["competition"]),
                })
            }
            _ => None,
        }
    }
}

fn first_number(obj: &serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(|v| v.as_f64()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCollection {
    pub keyword: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: KeywordKind,
    pub items: Vec<KeywordSuggestion>,
}

impl KeywordCollection {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedOptions {
    pub min_related_score: i64,
    pub group: String,
}

impl Default for RelatedOptions {
    fn default() -> Self {
        Self {
            min_related_score: 0,
            group: "v5".to_string(),
        }
    }
}

pub const CSV_HEADER: [&str; 7] = [
    "keyword",
    "type",
    "score",
    "volume",
    "competition",
    "source_keyword",
    "timestamp",
];

/// Field order matches `CSV_HEADER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: KeywordKind,
    pub score: Option<f64>,
    pub volume: Option<f64>,
    pub competition: Option<f64>,
    pub source_keyword: String,
    pub timestamp: String,
}
