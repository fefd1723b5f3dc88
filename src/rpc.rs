/// Solana JSON-RPC client helpers
///
/// The backend only needs read access to the chain: wallet balance lookups
/// for the `/getBalance` endpoint. Requests go straight to the configured
/// RPC URL with a bounded timeout, no connection pooling or rotation.
use std::time::Duration;

use crate::logger::{self, LogTag};

/// Error types for RPC operations
#[derive(Debug)]
pub enum RpcError {
    ApiError(String),
    NetworkError(reqwest::Error),
    InvalidResponse(String),
    ParseError(String),
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcError::ApiError(msg) => write!(f, "API Error: {}", msg),
            RpcError::NetworkError(err) => write!(f, "Network Error: {}", err),
            RpcError::InvalidResponse(msg) => write!(f, "Invalid Response: {}", msg),
            RpcError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
        }
    }
}

impl std::error::Error for RpcError {}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        RpcError::NetworkError(err)
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::ParseError(format!("JSON parsing error: {}", err))
    }
}

/// Converts lamports to SOL amount (1 SOL = 1,000,000,000 lamports)
pub fn lamports_to_sol(lamports: u64) -> f64 {
    (lamports as f64) / 1_000_000_000.0
}

/// Fetch the lamport balance of a wallet address
///
/// Issues a `getBalance` call against the given RPC URL and returns the raw
/// lamport value from `result.value`.
pub async fn get_balance_lamports(
    address: &str,
    rpc_url: &str,
    timeout: Duration,
) -> Result<u64, RpcError> {
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getBalance",
        "params": [address]
    });

    let client = reqwest::Client::builder().timeout(timeout).build()?;

    logger::debug(
        LogTag::Rpc,
        &format!("getBalance for {} via {}", address, rpc_url),
    );

    let response = client
        .post(rpc_url)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(RpcError::ApiError(format!(
            "HTTP error: {}",
            response.status()
        )));
    }

    let body: serde_json::Value = response.json().await?;

    if let Some(err) = body.get("error") {
        return Err(RpcError::ApiError(format!("RPC error: {}", err)));
    }

    let lamports = body
        .get("result")
        .and_then(|r| r.get("value"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| RpcError::InvalidResponse("Missing balance value".to_string()))?;

    Ok(lamports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(0), 0.0);
        assert_eq!(lamports_to_sol(1_000_000_000), 1.0);
        assert_eq!(lamports_to_sol(1_500_000_000), 1.5);
        assert_eq!(lamports_to_sol(1), 0.000000001);
    }

    #[test]
    fn test_error_display() {
        let err = RpcError::ApiError("rate limited".to_string());
        assert_eq!(err.to_string(), "API Error: rate limited");

        let err = RpcError::InvalidResponse("missing value".to_string());
        assert_eq!(err.to_string(), "Invalid Response: missing value");
    }

    #[test]
    fn test_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: RpcError = parse_err.into();
        assert!(matches!(err, RpcError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse Error:"));
    }
}
