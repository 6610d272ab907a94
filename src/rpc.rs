//! Chain gateway client — forwards campaign reads and writes to the
//! contract over JSON-RPC.
//!
//! The gateway wraps the deployed crowdfunding contract and exposes its
//! entry points (`getCampaigns`, `getCampaign`, `createCampaign`,
//! `donateToCampaign`, `deleteCampaign`) as JSON-RPC 2.0 methods. Amounts
//! travel the wire as decimal strings; records are normalized into
//! [`CampaignRecord`] immediately after fetch so the rest of the dashboard
//! never touches the wire shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::campaign::CampaignRecord;
use crate::donation::FundingRequest;
use crate::draft::CreateCampaignRequest;
use crate::errors::RepositoryError;
use crate::repository::CampaignRepository;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// A campaign as the gateway serialises it: amounts are decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCampaign {
    owner: String,
    title: String,
    description: String,
    target: String,
    deadline: u64,
    amount_collected: String,
    image: String,
    donators: Vec<String>,
    donations: Vec<String>,
}

impl WireCampaign {
    /// Normalize into the domain record, parsing every amount. A record the
    /// gateway cannot serialise consistently is a fetch failure, not a
    /// partial render.
    fn normalize(self) -> Result<CampaignRecord, RepositoryError> {
        let parse = |s: &str| {
            s.parse::<u128>()
                .map_err(|_| RepositoryError::Fetch(format!("invalid on-chain amount: {s:?}")))
        };
        Ok(CampaignRecord {
            target: parse(&self.target)?,
            amount_collected: parse(&self.amount_collected)?,
            donations: self
                .donations
                .iter()
                .map(|s| parse(s))
                .collect::<Result<_, _>>()?,
            owner: self.owner,
            title: self.title,
            description: self.description,
            deadline: self.deadline,
            image: self.image,
            donators: self.donators,
        })
    }
}

// ─────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────

/// [`CampaignRepository`] backed by the JSON-RPC chain gateway.
#[derive(Debug, Clone)]
pub struct RpcRepository {
    client: Client,
    rpc_url: String,
    contract_id: String,
}

impl RpcRepository {
    pub fn new(client: Client, rpc_url: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
            contract_id: contract_id.into(),
        }
    }

    /// One JSON-RPC call. Returns the decoded `result` (`None` when the
    /// gateway answered with a null result, as writes and missing lookups
    /// do), or the error text for the caller to classify as fetch or
    /// submission failure.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, String> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .map_err(|e| {
                warn!("RPC request {method} failed: {e}");
                e.to_string()
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("RPC {method} returned HTTP {status}");
            return Err(format!("gateway returned HTTP {status}"));
        }

        let body: RpcResponse<T> = response.json().await.map_err(|e| e.to_string())?;
        if let Some(err) = body.error {
            warn!("RPC {method} error {}: {}", err.code, err.message);
            return Err(err.message);
        }

        debug!("RPC {method} succeeded");
        Ok(body.result)
    }

    fn params(&self, mut extra: Value) -> Value {
        extra["contractId"] = json!(self.contract_id);
        extra
    }
}

#[async_trait]
impl CampaignRepository for RpcRepository {
    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, RepositoryError> {
        let wire: Vec<WireCampaign> = self
            .call("getCampaigns", self.params(json!({})))
            .await
            .map_err(RepositoryError::Fetch)?
            .ok_or_else(|| RepositoryError::Fetch("empty result from getCampaigns".to_string()))?;
        wire.into_iter().map(WireCampaign::normalize).collect()
    }

    async fn get_campaign(&self, key: u64) -> Result<CampaignRecord, RepositoryError> {
        // The gateway answers a missing key with a null result.
        let wire: Option<WireCampaign> = self
            .call("getCampaign", self.params(json!({ "key": key })))
            .await
            .map_err(RepositoryError::Fetch)?;
        wire.ok_or(RepositoryError::NotFound(key))?.normalize()
    }

    async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
        creator: &str,
    ) -> Result<(), RepositoryError> {
        let params = self.params(json!({
            "creator": creator,
            "title": request.title,
            "description": request.description,
            "target": request.target_smallest_unit.to_string(),
            "deadline": request.deadline_unix_secs,
            "image": request.image,
        }));
        self.call::<Value>("createCampaign", params)
            .await
            .map_err(RepositoryError::Submission)?;
        Ok(())
    }

    async fn donate(&self, request: &FundingRequest, donor: &str) -> Result<(), RepositoryError> {
        let params = self.params(json!({
            "key": request.campaign_key,
            "donor": donor,
            "value": request.amount_smallest_unit.to_string(),
        }));
        self.call::<Value>("donateToCampaign", params)
            .await
            .map_err(RepositoryError::Submission)?;
        Ok(())
    }

    async fn delete_campaign(&self, key: u64, caller: &str) -> Result<(), RepositoryError> {
        let params = self.params(json!({ "key": key, "caller": caller }));
        self.call::<Value>("deleteCampaign", params)
            .await
            .map_err(RepositoryError::Submission)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire() -> WireCampaign {
        serde_json::from_value(json!({
            "owner": "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            "title": "Clean water",
            "description": "Wells for the valley",
            "target": "10000000000000000000",
            "deadline": 1767225600u64,
            "amountCollected": "2500000000000000000",
            "image": "https://example.com/well.jpg",
            "donators": ["0x00000000000000000000000000000000000000aa"],
            "donations": ["2500000000000000000"],
        }))
        .unwrap()
    }

    #[test]
    fn wire_campaign_normalizes_amount_strings() {
        let record = wire().normalize().unwrap();
        assert_eq!(record.target, 10_000_000_000_000_000_000);
        assert_eq!(record.amount_collected, 2_500_000_000_000_000_000);
        assert_eq!(record.donations, vec![2_500_000_000_000_000_000]);
        assert_eq!(record.deadline, 1_767_225_600);
    }

    #[test]
    fn bad_wire_amount_is_a_fetch_error() {
        let mut w = wire();
        w.target = "not-a-number".to_string();
        assert!(matches!(
            w.normalize().unwrap_err(),
            RepositoryError::Fetch(_)
        ));
    }

    #[test]
    fn rpc_error_body_decodes() {
        let body: RpcResponse<Vec<WireCampaign>> = serde_json::from_value(json!({
            "error": { "code": -32000, "message": "execution reverted" }
        }))
        .unwrap();
        let err = body.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "execution reverted");
        assert!(body.result.is_none());
    }

    #[test]
    fn null_result_decodes_as_absent() {
        let body: RpcResponse<WireCampaign> =
            serde_json::from_value(json!({ "result": null })).unwrap();
        assert!(body.result.is_none());
        assert!(body.error.is_none());
    }
}
