use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use warp::http::Uri;

pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_CLIENT_API_URL: &str = "http://localhost:8000";

#[derive(Error, Debug, PartialEq)]
pub enum EnvironmentError {
    #[error("Failed to parse {name}: {value:?}")]
    InvalidValue { name: String, value: String },
    #[error("Invalid CORS origin {0:?}, expected scheme://host[:port]")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct RelayEnvironment {
    pub api_listen_address: SocketAddr,
    pub hf_api_url: String,
    pub hf_api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub max_batch_size: usize,
    /// Empty or containing `*` means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub tone_analysis: bool,
}

impl Default for RelayEnvironment {
    fn default() -> Self {
        Self {
            api_listen_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            hf_api_url: DEFAULT_HF_API_URL.to_string(),
            hf_api_token: None,
            request_timeout_secs: 30,
            max_batch_size: 100,
            cors_allowed_origins: vec!["*".to_string()],
            tone_analysis: false,
        }
    }
}

impl RelayEnvironment {
    /// Builds the relay configuration from any key lookup. `fetch_relay_environment`
    /// passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvironmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ip: IpAddr = parse_var(&lookup, "RELAY_API_IP", "0.0.0.0")?;
        let port_var = if lookup("RELAY_API_PORT").is_some() { "RELAY_API_PORT" } else { "PORT" };
        let port: u16 = parse_var(&lookup, port_var, "8000")?;

        let hf_api_url = lookup("HF_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HF_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let hf_api_token = lookup("HF_API_TOKEN").filter(|v| !v.trim().is_empty());

        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;
        let max_batch_size: usize = parse_var(&lookup, "MAX_BATCH_SIZE", "100")?;
        let tone_analysis: bool = parse_var(&lookup, "TONE_ANALYSIS", "false")?;

        let cors_allowed_origins = parse_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()))?;

        Ok(RelayEnvironment {
            api_listen_address: SocketAddr::new(ip, port),
            hf_api_url,
            hf_api_token,
            request_timeout_secs,
            max_batch_size,
            cors_allowed_origins,
            tone_analysis,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty() || self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientEnvironment {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl ClientEnvironment {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvironmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TEXTA_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;

        Ok(ClientEnvironment {
            api_url,
            request_timeout_secs,
        })
    }
}

pub fn fetch_relay_environment() -> Result<RelayEnvironment, EnvironmentError> {
    RelayEnvironment::from_lookup(|key| env::var(key).ok())
}

pub fn fetch_client_environment() -> Result<ClientEnvironment, EnvironmentError> {
    ClientEnvironment::from_lookup(|key| env::var(key).ok())
}

fn parse_var<T, F>(lookup: &F, name: &str, default: &str) -> Result<T, EnvironmentError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|_| EnvironmentError::InvalidValue {
        name: name.to_string(),
        value,
    })
}

fn parse_origins(raw: &str) -> Result<Vec<String>, EnvironmentError> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Ok(origin.to_string());
            }
            // warp panics on malformed origins, so they are rejected here
            let uri: Uri = origin
                .parse()
                .map_err(|_| EnvironmentError::InvalidOrigin(origin.to_string()))?;
            let has_path = uri.path_and_query().map(|p| p.as_str() != "/").unwrap_or(false);
            if uri.scheme().is_none() || uri.authority().is_none() || has_path {
                return Err(EnvironmentError::InvalidOrigin(origin.to_string()));
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect()
}
