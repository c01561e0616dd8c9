pub mod api_client;
pub mod batch_runner;
pub mod comparison;
pub mod error;
pub mod file_loader;
pub mod session;

pub use api_client::{ApiClient, SentimentAnalyzer};
pub use error::ClientError;
