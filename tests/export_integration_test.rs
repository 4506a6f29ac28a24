use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use vidiq_api::{
    ClientConfig, CsvExporter, CsvRow, ExportOptions, KeywordAnalyzer, KeywordKind, LocalStorage,
    VidiqClient, VidiqError,
};

fn keywords(prefix: &str, count: usize) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|i| {
            json!({
                "keyword": format!("{} {}", prefix, i),
                "score": i as f64,
                "volume": 10.0 * i as f64,
                "competition": 5.5
            })
        })
        .collect()
}

fn mock_collections(server: &MockServer, sizes: [usize; 3]) {
    server.mock(|when, then| {
        when.method(GET).path("/xwords/hottersearch");
        then.status(200)
            .json_body(json!({"keywords": keywords("related", sizes[0])}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/xwords/keyword_search/")
            .query_param("part", "permutations");
        then.status(200)
            .json_body(json!({"permutations": keywords("matching", sizes[1])}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/xwords/keyword_search/")
            .query_param("part", "questions");
        then.status(200)
            .json_body(json!({"questions": keywords("question", sizes[2])}));
    });
}

fn exporter_for(server: &MockServer, dir: &TempDir) -> CsvExporter<VidiqClient, LocalStorage> {
    let config = ClientConfig::new("test_token").with_base_url(server.base_url());
    let analyzer = KeywordAnalyzer::from_config(&config).unwrap();
    CsvExporter::new(analyzer, LocalStorage::new(dir.path()))
}

fn read_rows(path: &str) -> (Vec<String>, Vec<CsvRow>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader.deserialize::<CsvRow>().map(|r| r.unwrap()).collect();
    (header, rows)
}

#[tokio::test]
async fn test_combined_export_writes_header_and_rows() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_collections(&server, [10, 20, 5]);

    let exporter = exporter_for(&server, &temp_dir);
    let path = exporter
        .export_to_csv(
            "cats",
            &ExportOptions::new(Duration::ZERO, 50),
            Some("cats_keywords.csv"),
        )
        .await
        .unwrap();

    assert!(path.ends_with("cats_keywords.csv"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 36);

    let (header, rows) = read_rows(&path);
    assert_eq!(
        header,
        vec!["keyword", "type", "score", "volume", "competition", "source_keyword", "timestamp"]
    );
    assert_eq!(rows.len(), 35);

    let matching: Vec<&CsvRow> = rows
        .iter()
        .filter(|r| r.kind == KeywordKind::Matching)
        .collect();
    assert_eq!(matching.len(), 20);
    assert_eq!(matching[2].keyword, "matching 3");
    assert_eq!(matching[2].score, Some(3.0));
    assert_eq!(matching[2].volume, Some(30.0));
    assert_eq!(matching[2].competition, Some(5.5));
    assert_eq!(matching[2].source_keyword, "cats");
}

#[tokio::test]
async fn test_separate_export_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_collections(&server, [4, 6, 2]);

    let exporter = exporter_for(&server, &temp_dir);
    let paths = exporter
        .export_separate_csvs(
            "Cat Videos",
            &ExportOptions::new(Duration::ZERO, 5),
            Some("keyword_exports"),
        )
        .await
        .unwrap();

    assert!(temp_dir.path().join("keyword_exports").is_dir());
    assert_eq!(paths.len(), 3);

    let (_, related) = read_rows(&paths[&KeywordKind::Related]);
    let (_, matching) = read_rows(&paths[&KeywordKind::Matching]);
    let (_, questions) = read_rows(&paths[&KeywordKind::Question]);
    assert_eq!(related.len(), 4);
    assert_eq!(matching.len(), 5);
    assert_eq!(questions.len(), 2);
    assert!(paths[&KeywordKind::Question].contains("cat_videos_questions_"));
}

#[tokio::test]
async fn test_unwritable_target_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("occupied");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let server = MockServer::start();
    mock_collections(&server, [1, 1, 1]);

    let exporter = exporter_for(&server, &temp_dir);
    let err = exporter
        .export_separate_csvs("cats", &ExportOptions::new(Duration::ZERO, 5), Some("occupied"))
        .await
        .unwrap_err();

    assert!(matches!(err, VidiqError::IoError(_)));
}
