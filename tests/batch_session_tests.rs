use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use texta_primitives::schemas::api_schemas::HealthResponse;
use texta_primitives::schemas::batch::Progress;
use texta_primitives::schemas::model_descriptor::{supported_models, DEFAULT_MODEL_ID};
use texta_primitives::schemas::sentiment::{AnalysisResult, SentimentLabel};
use texta_primitives::texta_utils::csv_sniffer::sniff_csv;
use texta_relay::client::batch_runner::{run_batch, BatchSummary};
use texta_relay::client::comparison::compare_models;
use texta_relay::client::session::{ClientSession, ConnectionStatus, SessionError};
use texta_relay::client::{ClientError, SentimentAnalyzer};

/// Positive for everything except texts containing "fail" (relay error) or
/// "offline" (connectivity error). Records every call.
struct StubAnalyzer {
    healthy: AtomicBool,
    health_calls: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl StubAnalyzer {
    fn new(healthy: bool) -> Self {
        Self {
            healthy: AtomicBool::new(healthy),
            health_calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

#[async_trait]
impl SentimentAnalyzer for StubAnalyzer {
    async fn check_health(&self) -> Result<HealthResponse, ClientError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(ClientError::Connection {
                url: "http://stub".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(HealthResponse {
            status: "healthy".to_string(),
            models_loaded: 1,
            available_models: vec![DEFAULT_MODEL_ID.to_string()],
            version: "test".to_string(),
        })
    }

    async fn analyze(&self, text: &str, model_name: &str) -> Result<AnalysisResult, ClientError> {
        self.seen.lock().unwrap().push((text.to_string(), model_name.to_string()));
        if text.contains("fail") {
            return Err(ClientError::Api {
                status: 500,
                message: "Model is currently loading".to_string(),
            });
        }
        if text.contains("offline") {
            return Err(ClientError::Timeout(30));
        }
        Ok(AnalysisResult::new(text, SentimentLabel::Positive, 0.9, model_name))
    }
}

#[tokio::test]
async fn test_batch_runner_keeps_order_and_isolates_failures() {
    let stub = StubAnalyzer::new(true);
    let texts: Vec<String> = ["one", "two fail", "three", "four"].iter().map(|s| s.to_string()).collect();
    let mut updates: Vec<Progress> = Vec::new();

    let outcomes = run_batch(&stub, &texts, DEFAULT_MODEL_ID, |p| updates.push(p)).await;

    assert_eq!(stub.seen_texts(), texts);
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes.iter().map(|o| o.text()).collect::<Vec<_>>(), vec!["one", "two fail", "three", "four"]);
    assert!(outcomes[1].is_error());
    assert_eq!(outcomes[1].confidence(), 0.0);
    assert_eq!(outcomes[1].error(), Some("API error (500): Model is currently loading"));
    assert_eq!(outcomes[3].sentiment(), "POSITIVE");

    assert_eq!(updates.len(), 4);
    assert_eq!(updates.iter().map(|p| p.current).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(updates.iter().all(|p| p.total == 4));
    assert!(updates.last().unwrap().is_complete());

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.positive, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 4);
}

#[tokio::test]
async fn test_empty_batch_makes_no_calls() {
    let stub = StubAnalyzer::new(true);
    let mut updates = 0;
    let outcomes = run_batch(&stub, &[], DEFAULT_MODEL_ID, |_| updates += 1).await;
    assert!(outcomes.is_empty());
    assert_eq!(updates, 0);
    assert!(stub.seen_texts().is_empty());
}

#[tokio::test]
async fn test_comparison_runs_every_model_in_order() {
    let stub = StubAnalyzer::new(true);
    let table = compare_models(&stub, "fine words", supported_models()).await;

    let models: Vec<String> = stub.seen.lock().unwrap().iter().map(|(_, m)| m.clone()).collect();
    let expected: Vec<String> = supported_models().iter().map(|m| m.id.clone()).collect();
    assert_eq!(models, expected);
    assert_eq!(table.consensus(), Some(SentimentLabel::Positive));
    assert!(table.get("ProsusAI/finbert").unwrap().outcome.is_ok());
    assert!(table.get("unknown/model").is_none());

    let table = compare_models(&stub, "this will fail", supported_models()).await;
    assert!(table.entries.iter().all(|e| e.outcome.is_err()));
    assert_eq!(table.consensus(), None);
}

#[tokio::test]
async fn test_session_validates_before_any_network_call() {
    let mut session = ClientSession::new(StubAnalyzer::new(true));

    assert!(matches!(session.analyze_current_text().await, Err(SessionError::EmptyText)));
    session.set_text("   \n ");
    assert!(matches!(session.analyze_current_text().await, Err(SessionError::EmptyText)));
    assert!(matches!(session.text_to_analyze(), Err(SessionError::EmptyText)));
    assert!(matches!(
        session.analyze_current_batch(|_| {}).await,
        Err(SessionError::NoBatchLoaded)
    ));
    assert!(matches!(
        session.select_model("microsoft/DialoGPT-medium"),
        Err(SessionError::UnknownModel(_))
    ));
    assert_eq!(session.selected_model(), DEFAULT_MODEL_ID);

    assert_eq!(session.analyzer().health_calls.load(Ordering::SeqCst), 0);
    assert!(session.analyzer().seen_texts().is_empty());
    assert_eq!(session.connection(), ConnectionStatus::Unknown);
}

#[tokio::test]
async fn test_session_refuses_while_disconnected() {
    let mut session = ClientSession::new(StubAnalyzer::new(false));
    session.set_text("Nice work");

    assert!(matches!(session.analyze_current_text().await, Err(SessionError::Disconnected)));
    assert_eq!(session.connection(), ConnectionStatus::Disconnected);

    // No automatic re-check until the caller asks for one.
    assert!(matches!(session.analyze_current_text().await, Err(SessionError::Disconnected)));
    assert_eq!(session.analyzer().health_calls.load(Ordering::SeqCst), 1);
    assert!(session.analyzer().seen_texts().is_empty());

    assert_eq!(session.refresh_connection().await, ConnectionStatus::Disconnected);
    assert_eq!(session.analyzer().health_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_session_marks_disconnected_on_connectivity_error() {
    let mut session = ClientSession::new(StubAnalyzer::new(true));
    session.set_text("we are offline");

    let err = session.analyze_current_text().await.unwrap_err();
    assert!(matches!(err, SessionError::Client(ClientError::Timeout(30))));
    assert_eq!(session.connection(), ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn test_session_file_batch_and_export() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "id,comment\n1,Great support\n2,This will fail\n3,Quick delivery\n").unwrap();

    let mut session = ClientSession::new(StubAnalyzer::new(true));
    session.select_model("ProsusAI/finbert").unwrap();
    session.load_file(file.path()).unwrap();

    let batch = session.current_batch().unwrap();
    assert_eq!(batch.texts, vec!["Great support", "This will fail", "Quick delivery"]);

    let mut seen_progress = Vec::new();
    let outcomes = session
        .analyze_current_batch(|p| seen_progress.push(p.current))
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[1].is_error());
    assert_eq!(seen_progress, vec![1, 2, 3]);
    assert_eq!(session.progress(), Progress { current: 3, total: 3 });
    assert_eq!(session.connection(), ConnectionStatus::Connected);

    let csv = session.export_results().unwrap();
    assert!(csv.starts_with("text,sentiment,confidence,model_name"));
    assert!(csv.contains("ProsusAI/finbert"));
    assert_eq!(
        sniff_csv(&csv).unwrap().texts,
        vec!["Great support", "This will fail", "Quick delivery"]
    );

    // Typing text discards the loaded batch.
    session.set_text("new input");
    assert!(session.current_batch().is_none());
    assert_eq!(session.current_text(), Some("new input"));
}

#[tokio::test]
async fn test_export_requires_results() {
    let session = ClientSession::new(StubAnalyzer::new(true));
    assert!(matches!(session.export_results(), Err(SessionError::NoResults)));
}

#[tokio::test]
async fn test_failed_load_keeps_previous_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.csv");
    std::fs::write(&good, "id,text\n1,Lovely\n2,Dreadful\n").unwrap();
    let bad = dir.path().join("bad.csv");
    std::fs::write(&bad, "id,text\n1,\n2,\n").unwrap();

    let mut session = ClientSession::new(StubAnalyzer::new(true));
    session.load_file(&good).unwrap();

    assert!(matches!(session.load_file(&bad), Err(SessionError::FileLoad(_))));
    assert_eq!(session.current_batch().unwrap().texts, vec!["Lovely", "Dreadful"]);

    let missing = dir.path().join("missing.txt");
    assert!(session.load_file(&missing).is_err());
    assert!(session.current_batch().is_some());
    assert_eq!(session.current_text(), None);
}

#[tokio::test]
async fn test_batch_with_every_row_failing_rechecks_connection() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "text\nstill offline\noffline again\n").unwrap();

    let mut session = ClientSession::new(StubAnalyzer::new(true));
    assert_eq!(session.refresh_connection().await, ConnectionStatus::Connected);
    session.load_file(file.path()).unwrap();

    session.analyzer().set_healthy(false);
    let outcomes = session.analyze_current_batch(|_| {}).await.unwrap();
    assert!(outcomes.iter().all(|o| o.is_error()));

    assert_eq!(session.connection(), ConnectionStatus::Disconnected);
    assert_eq!(session.analyzer().health_calls.load(Ordering::SeqCst), 2);
    assert!(matches!(
        session.analyze_current_batch(|_| {}).await,
        Err(SessionError::Disconnected)
    ));
}

#[tokio::test]
async fn test_partial_batch_failure_keeps_connection() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "text\nfine\nthis will fail\n").unwrap();

    let mut session = ClientSession::new(StubAnalyzer::new(true));
    session.load_file(file.path()).unwrap();
    session.analyze_current_batch(|_| {}).await.unwrap();

    assert_eq!(session.connection(), ConnectionStatus::Connected);
    assert_eq!(session.analyzer().health_calls.load(Ordering::SeqCst), 1);
}
