pub mod analyzer;
pub mod client;
pub mod network;
pub mod utils;

pub use analyzer::SentimentRelay;
pub use client::api_client::ApiClient;
