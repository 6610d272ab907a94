//! Application configuration loaded from environment variables.

use crate::errors::{DashboardError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Chain gateway JSON-RPC endpoint.
    pub rpc_url: String,
    /// Address of the deployed crowdfunding contract.
    pub contract_id: String,
    /// Port for the dashboard REST API.
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8545".to_string()),
            contract_id: env_var("CONTRACT_ID").map_err(|_| {
                DashboardError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            api_port: env_var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| DashboardError::Config("Invalid API_PORT".to_string()))?,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| DashboardError::Config(format!("Missing env var: {key}")))
}
