pub mod node_api;
pub use node_api::{api_routes, run_api};
