use super::api_client::SentimentAnalyzer;
use super::batch_runner::run_batch;
use super::comparison::{compare_models, ComparisonTable};
use super::error::ClientError;
use super::file_loader::{load_file, FileLoadError, LoadedFile};
use std::path::Path;
use texta_primitives::schemas::batch::{BatchOutcome, Progress};
use texta_primitives::schemas::csv_batch::CsvBatch;
use texta_primitives::schemas::model_descriptor::{is_supported_model, supported_models, DEFAULT_MODEL_ID};
use texta_primitives::schemas::sentiment::AnalysisResult;
use texta_primitives::texta_utils::results_export::{export_results_csv, ExportError};
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unknown,
    Connected,
    Disconnected,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please enter some text to analyze")]
    EmptyText,
    #[error("Please load a CSV file first")]
    NoBatchLoaded,
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    #[error("The sentiment API is not reachable; run a health check first")]
    Disconnected,
    #[error("There are no results to export")]
    NoResults,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    FileLoad(#[from] FileLoadError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Everything a front end keeps between user actions: connection state,
/// the current input, the selected model and the latest results.
pub struct ClientSession<A: SentimentAnalyzer> {
    analyzer: A,
    connection: ConnectionStatus,
    current_text: Option<String>,
    current_batch: Option<CsvBatch>,
    selected_model: String,
    results: Vec<BatchOutcome>,
    progress: Progress,
}

impl<A: SentimentAnalyzer> ClientSession<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            connection: ConnectionStatus::Unknown,
            current_text: None,
            current_batch: None,
            selected_model: DEFAULT_MODEL_ID.to_string(),
            results: Vec::new(),
            progress: Progress::default(),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_text.as_deref()
    }

    pub fn current_batch(&self) -> Option<&CsvBatch> {
        self.current_batch.as_ref()
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    pub fn results(&self) -> &[BatchOutcome] {
        &self.results
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Runs a health check and records the outcome.
    pub async fn refresh_connection(&mut self) -> ConnectionStatus {
        self.connection = match self.analyzer.check_health().await {
            Ok(_) => ConnectionStatus::Connected,
            Err(e) => {
                texta_log(
                    TextaLogOption::Client,
                    TextaLogLevel::Error,
                    format!("Health check failed: {}", e).as_str(),
                );
                ConnectionStatus::Disconnected
            }
        };
        self.connection
    }

    /// Typed text replaces any loaded CSV batch.
    pub fn set_text(&mut self, text: &str) {
        self.current_text = Some(text.to_string());
        self.current_batch = None;
    }

    /// Loads a file; plain documents become the current text and CSV files
    /// the current batch. A failed load leaves the session untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SessionError> {
        match load_file(path)? {
            LoadedFile::Text(text) => {
                self.current_text = Some(text);
                self.current_batch = None;
            }
            LoadedFile::Csv(batch) => {
                if let Some(warning) = &batch.warning {
                    texta_log(TextaLogOption::Csv, TextaLogLevel::Info, warning);
                }
                self.current_batch = Some(batch);
            }
        }
        Ok(())
    }

    pub fn select_model(&mut self, model_id: &str) -> Result<(), SessionError> {
        if !is_supported_model(model_id) {
            return Err(SessionError::UnknownModel(model_id.to_string()));
        }
        self.selected_model = model_id.to_string();
        Ok(())
    }

    async fn ensure_connected(&mut self) -> Result<(), SessionError> {
        match self.connection {
            ConnectionStatus::Connected => Ok(()),
            ConnectionStatus::Disconnected => Err(SessionError::Disconnected),
            ConnectionStatus::Unknown => match self.refresh_connection().await {
                ConnectionStatus::Connected => Ok(()),
                _ => Err(SessionError::Disconnected),
            },
        }
    }

    /// The current text, or `EmptyText` when there is nothing to analyze.
    pub fn text_to_analyze(&self) -> Result<&str, SessionError> {
        match self.current_text.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SessionError::EmptyText),
        }
    }

    fn record_connectivity(&mut self, err: &ClientError) {
        if err.is_connectivity() {
            self.connection = ConnectionStatus::Disconnected;
        }
    }

    pub async fn analyze_current_text(&mut self) -> Result<AnalysisResult, SessionError> {
        let text = self.text_to_analyze()?.to_string();
        self.ensure_connected().await?;

        match self.analyzer.analyze(&text, &self.selected_model).await {
            Ok(result) => {
                self.results = vec![BatchOutcome::Analyzed(result.clone())];
                Ok(result)
            }
            Err(e) => {
                self.record_connectivity(&e);
                Err(e.into())
            }
        }
    }

    pub async fn analyze_current_batch<F>(&mut self, on_progress: F) -> Result<&[BatchOutcome], SessionError>
    where
        F: FnMut(Progress),
    {
        let texts = match &self.current_batch {
            Some(batch) => batch.texts.clone(),
            None => return Err(SessionError::NoBatchLoaded),
        };
        self.ensure_connected().await?;

        self.progress = Progress::new(texts.len());
        let mut last = self.progress;
        let mut on_progress = on_progress;
        self.results = run_batch(&self.analyzer, &texts, &self.selected_model, |progress| {
            last = progress;
            on_progress(progress);
        })
        .await;
        self.progress = last;

        // Nothing got through; re-check the relay.
        if !self.results.is_empty() && self.results.iter().all(BatchOutcome::is_error) {
            self.refresh_connection().await;
        }

        Ok(&self.results)
    }

    pub async fn compare_current_text(&mut self) -> Result<ComparisonTable, SessionError> {
        let text = self.text_to_analyze()?.to_string();
        self.ensure_connected().await?;
        Ok(compare_models(&self.analyzer, &text, supported_models()).await)
    }

    pub fn export_results(&self) -> Result<String, SessionError> {
        if self.results.is_empty() {
            return Err(SessionError::NoResults);
        }
        Ok(export_results_csv(&self.results)?)
    }
}
