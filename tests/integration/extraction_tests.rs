//! Integration tests for the extraction pipeline
//!
//! Orchestrator properties are checked with stub content analyzers; the
//! end-to-end paths use wiremock to serve real pages.

use async_trait::async_trait;
use phishing_features::config::{Config, ExtractorConfig, InputSource, LexicalConfig, OutputConfig};
use phishing_features::content::{
    ContentAnalyzer, ContentFeatures, ContentOutcome, FetchFailure, FetchSettings,
    HttpContentAnalyzer,
};
use phishing_features::extractor::{extract, Extractor, FeatureRecord, SkipCause};
use phishing_features::input::{Label, LabeledUrl};
use phishing_features::lexical::LexicalAnalyzer;
use phishing_features::output::{read_records, write_records};
use phishing_features::InputError;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_features() -> ContentFeatures {
    ContentFeatures {
        script_count: 2,
        hidden_elements_count: 1,
        suspicious_scripts_count: 0,
        response_time: 0.12,
        server_header: "stub-server".to_string(),
    }
}

/// Fails for a fixed set of URLs and succeeds for the rest
struct StubAnalyzer {
    failing: HashSet<String>,
}

impl StubAnalyzer {
    fn all_succeed() -> Self {
        Self {
            failing: HashSet::new(),
        }
    }

    fn failing(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ContentAnalyzer for StubAnalyzer {
    async fn analyze(&self, url: &str) -> ContentOutcome {
        if self.failing.contains(url) {
            ContentOutcome::Failed {
                reason: FetchFailure::Timeout,
            }
        } else {
            ContentOutcome::Fetched(page_features())
        }
    }
}

/// Records every visit and the peak number of concurrent calls
#[derive(Default)]
struct CountingAnalyzer {
    visits: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    fail_every: Option<usize>,
}

#[async_trait]
impl ContentAnalyzer for CountingAnalyzer {
    async fn analyze(&self, url: &str) -> ContentOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        *self
            .visits
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let index: usize = url
            .trim_start_matches("https://host")
            .trim_end_matches(".test/")
            .parse()
            .unwrap();

        // Vary latency so completion order differs from input order
        tokio::time::sleep(Duration::from_millis(((index * 7) % 13) as u64)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.fail_every {
            Some(n) if index % n == 0 => ContentOutcome::Failed {
                reason: FetchFailure::Connect("refused".to_string()),
            },
            _ => ContentOutcome::Fetched(page_features()),
        }
    }
}

/// Panics for URLs containing "boom"
struct PanickingAnalyzer;

#[async_trait]
impl ContentAnalyzer for PanickingAnalyzer {
    async fn analyze(&self, url: &str) -> ContentOutcome {
        if url.contains("boom") {
            panic!("analyzer bug while handling {}", url);
        }
        ContentOutcome::Fetched(page_features())
    }
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn extractor_with(analyzer: Arc<dyn ContentAnalyzer>, pool_size: usize) -> Extractor {
    Extractor::with_analyzer(LexicalAnalyzer::default(), analyzer, pool_size)
}

fn numbered_batch(count: usize) -> Vec<LabeledUrl> {
    (0..count)
        .map(|i| {
            let label = if i % 2 == 0 {
                Label::Phishing
            } else {
                Label::Legitimate
            };
            LabeledUrl::new(format!("https://host{}.test/", i), label)
        })
        .collect()
}

fn find_by_label(records: &[FeatureRecord], label: Label) -> &FeatureRecord {
    records
        .iter()
        .find(|r| r.label == label)
        .expect("Missing record for label")
}

#[tokio::test]
async fn test_two_urls_both_succeed() {
    let extractor = extractor_with(Arc::new(StubAnalyzer::all_succeed()), 30);

    let report = extractor
        .run(vec![
            LabeledUrl::new("http://a.test/confirm-account", Label::Phishing),
            LabeledUrl::new("https://b.test", Label::Legitimate),
        ])
        .await;

    assert_eq!(report.records.len(), 2);

    let phishing = find_by_label(&report.records, Label::Phishing);
    assert!(phishing.lexical.suspicious_words_count >= 1);
    assert_eq!(phishing.lexical.domain, "a");
    assert!(!phishing.lexical.is_https);

    let legitimate = find_by_label(&report.records, Label::Legitimate);
    assert!(legitimate.lexical.is_https);
    assert_eq!(legitimate.lexical.domain, "b");
    assert_eq!(legitimate.content, page_features());
}

#[tokio::test]
async fn test_timed_out_url_dropped_and_logged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<script>eval(x)</script>")
                .insert_header("server", "fast-server"),
        )
        .mount(&mock_server)
        .await;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let analyzer = HttpContentAnalyzer::new(&FetchSettings {
        timeout: Duration::from_millis(300),
        user_agent: "Mozilla/5.0".to_string(),
    })
    .expect("Failed to build analyzer");
    let extractor = extractor_with(Arc::new(analyzer), 30);

    let slow_url = format!("{}/slow", mock_server.uri());
    let fast_url = format!("{}/fast", mock_server.uri());
    let report = extractor
        .run(vec![
            LabeledUrl::new(slow_url.clone(), Label::Phishing),
            LabeledUrl::new(fast_url.clone(), Label::Legitimate),
        ])
        .await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].label, Label::Legitimate);
    assert_eq!(report.records[0].content.server_header, "fast-server");
    assert_eq!(report.records[0].content.suspicious_scripts_count, 1);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url, slow_url);
    assert_eq!(report.skipped[0].cause, SkipCause::FetchFailed);

    let output = logs.contents();
    assert!(
        output.contains(&slow_url),
        "Expected a log entry for {}, got:\n{}",
        slow_url,
        output
    );
    assert!(output.contains("Skipping URL due to failed response"));
}

#[tokio::test]
async fn test_hundred_urls_visited_exactly_once() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let extractor = extractor_with(analyzer.clone(), 30);

    let report = extractor.run(numbered_batch(100)).await;

    let visits = analyzer.visits.lock().unwrap();
    assert_eq!(visits.len(), 100);
    assert!(visits.values().all(|&count| count == 1));

    assert_eq!(report.records.len(), 100);
    let domains: HashSet<_> = report
        .records
        .iter()
        .map(|r| r.lexical.domain.clone())
        .collect();
    assert_eq!(domains.len(), 100);

    let peak = analyzer.peak.load(Ordering::SeqCst);
    assert!(peak <= 30, "Pool bound exceeded: {} in flight", peak);
    assert!(peak > 1, "Expected concurrent execution, peak was {}", peak);

    assert_eq!(report.stats.total, 100);
    assert_eq!(report.stats.accepted, 100);
}

#[tokio::test]
async fn test_hundred_urls_with_failures_accounted() {
    let analyzer = Arc::new(CountingAnalyzer {
        fail_every: Some(10),
        ..CountingAnalyzer::default()
    });
    let extractor = extractor_with(analyzer.clone(), 30);

    let report = extractor.run(numbered_batch(100)).await;

    assert_eq!(analyzer.visits.lock().unwrap().len(), 100);
    assert_eq!(report.records.len(), 90);
    assert_eq!(report.skipped.len(), 10);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.cause == SkipCause::FetchFailed));
    assert_eq!(
        report.stats.accepted + report.stats.fetch_failed + report.stats.crashed,
        report.stats.total
    );
}

#[tokio::test]
async fn test_single_failure_reduces_accepted_by_one() {
    let batch = vec![
        LabeledUrl::new("https://one.test", Label::Legitimate),
        LabeledUrl::new("https://two.test/update", Label::Phishing),
        LabeledUrl::new("https://three.test", Label::Legitimate),
    ];

    let control = extractor_with(Arc::new(StubAnalyzer::all_succeed()), 2)
        .run(batch.clone())
        .await;
    let with_failure = extractor_with(
        Arc::new(StubAnalyzer::failing(&["https://two.test/update"])),
        2,
    )
    .run(batch)
    .await;

    assert_eq!(control.records.len(), 3);
    assert_eq!(with_failure.records.len(), control.records.len() - 1);
    assert!(with_failure
        .records
        .iter()
        .all(|r| r.lexical.domain != "two"));
}

#[tokio::test]
async fn test_panicking_task_isolated() {
    let extractor = extractor_with(Arc::new(PanickingAnalyzer), 4);

    let report = extractor
        .run(vec![
            LabeledUrl::new("https://fine.test", Label::Legitimate),
            LabeledUrl::new("https://boom.test", Label::Phishing),
            LabeledUrl::new("https://also-fine.test", Label::Legitimate),
        ])
        .await;

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.stats.crashed, 1);
    assert_eq!(report.stats.fetch_failed, 0);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url, "https://boom.test");
    match &report.skipped[0].cause {
        SkipCause::Crashed(message) => assert!(message.contains("analyzer bug")),
        other => panic!("Expected a crash, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pool_size_one_processes_everything() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let extractor = extractor_with(analyzer.clone(), 1);

    let report = extractor.run(numbered_batch(10)).await;

    assert_eq!(report.records.len(), 10);
    assert_eq!(analyzer.peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_records_round_trip_through_json() {
    let extractor = extractor_with(Arc::new(StubAnalyzer::all_succeed()), 8);
    let report = extractor.run(numbered_batch(20)).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("features.json");
    write_records(&path, &report.records).unwrap();
    let mut loaded = read_records(&path).unwrap();

    let mut original = report.records.clone();
    original.sort_by(|a, b| a.lexical.domain.cmp(&b.lexical.domain));
    loaded.sort_by(|a, b| a.lexical.domain.cmp(&b.lexical.domain));
    assert_eq!(loaded, original);
}

#[tokio::test]
async fn test_unreadable_input_is_fatal() {
    let extractor = extractor_with(Arc::new(StubAnalyzer::all_succeed()), 4);

    let result = extractor
        .run_sources(&[InputSource {
            path: "/nonexistent/phishing_urls.txt".to_string(),
            default_label: 1,
        }])
        .await;

    assert!(matches!(result, Err(InputError::Io { .. })));
}

#[tokio::test]
async fn test_run_sources_concatenates_lists() {
    let dir = TempDir::new().unwrap();
    let phishing = dir.path().join("phishing_urls.txt");
    let legitimate = dir.path().join("legitimate_urls.txt");
    std::fs::write(&phishing, "http://a.test/confirm-account\nhttp://c.test/secure\n").unwrap();
    std::fs::write(&legitimate, "https://b.test,0\n").unwrap();

    let extractor = extractor_with(Arc::new(StubAnalyzer::all_succeed()), 4);
    let report = extractor
        .run_sources(&[
            InputSource {
                path: phishing.display().to_string(),
                default_label: 1,
            },
            InputSource {
                path: legitimate.display().to_string(),
                default_label: 0,
            },
        ])
        .await
        .unwrap();

    assert_eq!(report.records.len(), 3);
    let phishing_count = report
        .records
        .iter()
        .filter(|r| r.label == Label::Phishing)
        .count();
    assert_eq!(phishing_count, 2);
}

#[tokio::test]
async fn test_extract_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/confirm"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><body>
                    <div style="display:none"><form></form></div>
                    <script>eval(atob("ZG9j"))</script>
                    </body></html>"#,
                )
                .insert_header("server", "phish-kit"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>home</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let phishing = dir.path().join("phishing_urls.txt");
    let legitimate = dir.path().join("legitimate_urls.txt");
    let features_path = dir.path().join("out").join("features.json");

    std::fs::write(
        &phishing,
        format!(
            "{base}/account/confirm,1\n{base}/missing,1\n",
            base = mock_server.uri()
        ),
    )
    .unwrap();
    std::fs::write(&legitimate, format!("{}/\n", mock_server.uri())).unwrap();

    let config = Config {
        extractor: ExtractorConfig {
            max_workers: 4,
            request_timeout_secs: 5,
            user_agent: "Mozilla/5.0".to_string(),
        },
        lexical: LexicalConfig::default(),
        input: vec![
            InputSource {
                path: phishing.display().to_string(),
                default_label: 1,
            },
            InputSource {
                path: legitimate.display().to_string(),
                default_label: 0,
            },
        ],
        output: OutputConfig {
            features_path: features_path.display().to_string(),
        },
    };

    let report = extract(&config).await.expect("Extraction failed");

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.accepted, 2);
    assert_eq!(report.stats.fetch_failed, 1);

    let saved = read_records(&features_path).unwrap();
    assert_eq!(saved.len(), 2);

    let phishing_record = find_by_label(&saved, Label::Phishing);
    assert_eq!(phishing_record.lexical.suspicious_words_count, 2);
    assert!(phishing_record.lexical.contains_ip);
    assert_eq!(phishing_record.content.hidden_elements_count, 1);
    assert_eq!(phishing_record.content.suspicious_scripts_count, 1);
    assert_eq!(phishing_record.content.server_header, "phish-kit");
    assert!(phishing_record.content.response_time >= 0.0);

    let legitimate_record = find_by_label(&saved, Label::Legitimate);
    assert_eq!(legitimate_record.content.server_header, "Unknown");
    assert_eq!(legitimate_record.content.script_count, 0);
}
