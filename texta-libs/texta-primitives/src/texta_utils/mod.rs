pub mod csv_sniffer;
pub mod local_heuristic;
pub mod results_export;
pub mod text_stats;
pub mod texta_logging;
pub mod tone_analysis;
