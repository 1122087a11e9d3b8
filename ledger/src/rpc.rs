//! JSON-RPC ledger client.

use async_trait::async_trait;
use serde::Deserialize;
use solana_sdk::hash::Hash;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::{LatestBlockhash, LedgerClient, LedgerError};

/// Public test network endpoint used when no RPC URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default timeout for a single RPC request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for a ledger JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcLedgerClient {
    http: reqwest::Client,
    rpc_url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
    last_valid_block_height: u64,
}

impl RpcLedgerClient {
    /// Create a client for `rpc_url` with the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, LedgerError> {
        Self::with_timeout(rpc_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| LedgerError::Unreachable(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
        })
    }

    /// The configured endpoint.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC request and return the decoded `result` field.
    async fn rpc_call<T>(&self, method: &str, params: serde_json::Value) -> Result<T, LedgerError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(classify_request_error)?;

        if !response.status().is_success() {
            return Err(LedgerError::HttpStatus(response.status().as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        parse_rpc_result(json)
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn latest_blockhash(&self) -> Result<LatestBlockhash, LedgerError> {
        let ctx: WithContext<BlockhashValue> = self
            .rpc_call(
                "getLatestBlockhash",
                serde_json::json!([{ "commitment": "finalized" }]),
            )
            .await?;

        let blockhash = Hash::from_str(&ctx.value.blockhash).map_err(|e| {
            LedgerError::InvalidResponse(format!("bad blockhash {:?}: {e}", ctx.value.blockhash))
        })?;
        debug!(%blockhash, height = ctx.value.last_valid_block_height, "fetched latest blockhash");

        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height: ctx.value.last_valid_block_height,
        })
    }

    fn name(&self) -> &str {
        "json-rpc"
    }
}

fn classify_request_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Timeout(e.to_string())
    } else if e.is_connect() {
        LedgerError::Unreachable(format!("connection failed: {e}"))
    } else {
        LedgerError::Unreachable(e.to_string())
    }
}

/// Extract `result` from a JSON-RPC response, surfacing `error` objects.
fn parse_rpc_result<T>(json: serde_json::Value) -> Result<T, LedgerError>
where
    T: for<'de> Deserialize<'de>,
{
    let response: RpcResponse<T> = serde_json::from_value(json)
        .map_err(|e| LedgerError::InvalidResponse(format!("unexpected response shape: {e}")))?;

    if let Some(err) = response.error {
        return Err(LedgerError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    response
        .result
        .ok_or_else(|| LedgerError::InvalidResponse("response has neither result nor error".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers one JSON-RPC POST with `status` and `body`; yields the raw request.
    async fn one_shot_rpc(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(raw).unwrap()
        });
        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }

    #[tokio::test]
    async fn fetches_finalized_blockhash_over_http() {
        let (url, server) = one_shot_rpc(
            "200 OK",
            r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":2792},"value":{"blockhash":"EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N","lastValidBlockHeight":3090}}}"#,
        )
        .await;
        let client = RpcLedgerClient::new(url).unwrap();

        let latest = client.latest_blockhash().await.unwrap();
        assert_eq!(
            latest.blockhash.to_string(),
            "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N"
        );
        assert_eq!(latest.last_valid_block_height, 3090);

        let raw = server.await.unwrap();
        assert!(raw.contains(r#""method":"getLatestBlockhash""#), "{raw}");
        assert!(raw.contains(r#""commitment":"finalized""#), "{raw}");
    }

    #[tokio::test]
    async fn non_success_status_is_http_status_error() {
        let (url, server) = one_shot_rpc("503 Service Unavailable", "{}").await;
        let client = RpcLedgerClient::new(url).unwrap();

        let err = client.latest_blockhash().await.unwrap_err();
        assert!(matches!(err, LedgerError::HttpStatus(503)), "{err:?}");
        server.await.unwrap();
    }

    #[test]
    fn parses_latest_blockhash_result() {
        let json = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 2792 },
                "value": {
                    "blockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N",
                    "lastValidBlockHeight": 3090
                }
            }
        });
        let ctx: WithContext<BlockhashValue> = parse_rpc_result(json).unwrap();
        assert_eq!(ctx.value.blockhash, "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N");
        assert_eq!(ctx.value.last_valid_block_height, 3090);
    }

    #[test]
    fn surfaces_rpc_error_object() {
        let json = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32005, "message": "Node is unhealthy" }
        });
        let err = parse_rpc_result::<WithContext<BlockhashValue>>(json).unwrap_err();
        assert!(matches!(err, LedgerError::Rpc { code: -32005, .. }));
    }

    #[test]
    fn rejects_empty_response() {
        let err = parse_rpc_result::<WithContext<BlockhashValue>>(json!({ "jsonrpc": "2.0" }))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidResponse(_)));
    }

    #[test]
    fn client_keeps_configured_url() {
        let client = RpcLedgerClient::new(DEFAULT_RPC_URL).unwrap();
        assert_eq!(client.rpc_url(), DEFAULT_RPC_URL);
        assert_eq!(client.name(), "json-rpc");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_upstream_failure() {
        // Port 9 (discard) on loopback is closed in test environments.
        let client =
            RpcLedgerClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.latest_blockhash().await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Unreachable(_) | LedgerError::Timeout(_)
        ));
    }
}
