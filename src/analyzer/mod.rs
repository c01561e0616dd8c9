pub mod error;
pub mod label_normalizer;
pub mod providers;
pub mod relay;

pub use error::AnalyzerError;
pub use relay::SentimentRelay;
