//! Read-only access to on-chain state
//!
//! The setup flows only need one question answered: which transfer policies
//! already exist for a type. [`RemoteState`] is that seam; [`SuiRpcClient`]
//! answers it over the fullnode JSON-RPC API the same way the kiosk SDK does,
//! by following `TransferPolicyCreated<T>` events and fetching the objects they
//! point at.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use suins_core::SuiAddress;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Sui caps both event pages and multi-get batches at 50 entries.
const PAGE_SIZE: usize = 50;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected RPC response: {0}")]
    Decode(String),
}

/// An existing `TransferPolicy<T>` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPolicyRecord {
    pub id: SuiAddress,
    pub object_type: Option<String>,
}

/// Read-capable view of chain state.
#[async_trait]
pub trait RemoteState: Send + Sync {
    /// List live transfer policies whose type parameter is `type_tag`.
    async fn transfer_policies(&self, type_tag: &str) -> Result<Vec<TransferPolicyRecord>, RpcError>;
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPage {
    data: Vec<Event>,
    next_cursor: Option<Value>,
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    parsed_json: PolicyCreated,
}

#[derive(Deserialize)]
struct PolicyCreated {
    id: SuiAddress,
}

#[derive(Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    object_id: SuiAddress,
    #[serde(rename = "type")]
    object_type: Option<String>,
}

/// JSON-RPC client for a Sui fullnode
#[derive(Debug, Clone)]
pub struct SuiRpcClient {
    http: reqwest::Client,
    url: String,
}

impl SuiRpcClient {
    /// # Errors
    ///
    /// Returns `RpcError::Http` if the HTTP client cannot be constructed.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RpcError> {
        Self::new(
            config.rpc_url.clone(),
            Duration::from_millis(config.rpc_timeout_ms),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, url = %self.url, "sending rpc request");
        let bytes = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: RpcResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|err| RpcError::Decode(format!("{method}: {err}")))?;

        match (response.result, response.error) {
            (_, Some(err)) => Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(RpcError::Decode(format!(
                "{method} returned neither result nor error"
            ))),
        }
    }

    async fn policy_ids(&self, type_tag: &str) -> Result<Vec<SuiAddress>, RpcError> {
        let event_type = format!("0x2::transfer_policy::TransferPolicyCreated<{type_tag}>");
        let mut ids = Vec::new();
        let mut cursor = Value::Null;

        loop {
            let page: EventPage = self
                .call(
                    "suix_queryEvents",
                    json!([{ "MoveEventType": event_type }, cursor, PAGE_SIZE, false]),
                )
                .await?;
            ids.extend(page.data.into_iter().map(|event| event.parsed_json.id));

            match page.next_cursor {
                Some(next) if page.has_next_page && !next.is_null() => cursor = next,
                _ => break,
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl RemoteState for SuiRpcClient {
    async fn transfer_policies(&self, type_tag: &str) -> Result<Vec<TransferPolicyRecord>, RpcError> {
        let ids = self.policy_ids(type_tag).await?;
        debug!(type_tag, events = ids.len(), "transfer policy events found");

        let mut records = Vec::new();
        for batch in ids.chunks(PAGE_SIZE) {
            let objects: Vec<ObjectResponse> = self
                .call(
                    "sui_multiGetObjects",
                    json!([batch, { "showType": true }]),
                )
                .await?;
            // Deleted policies come back with an error entry instead of data.
            records.extend(objects.into_iter().filter_map(|object| {
                object.data.map(|data| TransferPolicyRecord {
                    id: data.object_id,
                    object_type: data.object_type,
                })
            }));
        }

        Ok(records)
    }
}
