pub mod api_schemas;
pub mod batch;
pub mod csv_batch;
pub mod model_descriptor;
pub mod sentiment;
