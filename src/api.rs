//! Axum REST API handlers.
//!
//! Thin wiring between HTTP and the core: each handler takes a fresh
//! snapshot from the repository, runs the relevant validator, and maps
//! errors to status codes. Validation failures come back as 422 with the
//! reason; gateway failures as 502 with the reason verbatim; a failed
//! request never leaves partial state behind.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignDraft;
use crate::donation::DonationFlow;
use crate::draft;
use crate::errors::{DashboardError, RepositoryError, ValidationError};
use crate::repository::CampaignRepository;
use crate::session::Session;
use crate::view::{CampaignDetailView, CampaignView};

#[derive(Clone)]
pub struct ApiState {
    pub repo: Arc<dyn CampaignRepository>,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CampaignsResponse {
    pub count: usize,
    pub campaigns: Vec<CampaignView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignBody {
    /// Connected wallet address of the creator; absent when no wallet is
    /// connected.
    pub address: Option<String>,
    #[serde(flatten)]
    pub draft: CampaignDraft,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateBody {
    pub address: Option<String>,
    /// Decimal amount in display units, e.g. `"1.5"`.
    pub amount: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBody {
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Fold any failure into the top-level taxonomy and map it to a status:
/// validation problems are the client's to fix (422), a missing key is 404,
/// and everything the gateway or ledger got wrong is 502.
fn error_response(e: DashboardError) -> axum::response::Response {
    let status = match &e {
        DashboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        DashboardError::Repository(_) | DashboardError::Malformed(_) => StatusCode::BAD_GATEWAY,
        DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

fn session_from(address: &Option<String>) -> Result<Session, axum::response::Response> {
    match address {
        None => Ok(Session::disconnected()),
        Some(addr) => Session::connected(addr.clone()).map_err(|e| error_response(e.into())),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /campaigns`
///
/// All campaigns with their derived display values. An empty ledger is a
/// successful response with `count` 0, distinct from a fetch failure.
pub async fn list_campaigns(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let records = match state.repo.list_campaigns().await {
        Ok(records) => records,
        Err(e) => return error_response(e.into()),
    };

    let now = Utc::now();
    let mut campaigns = Vec::with_capacity(records.len());
    for (key, record) in records.iter().enumerate() {
        match CampaignView::build(key as u64, record, now) {
            Ok(view) => campaigns.push(view),
            Err(e) => return error_response(e.into()),
        }
    }

    let count = campaigns.len();
    (StatusCode::OK, Json(CampaignsResponse { count, campaigns })).into_response()
}

/// `GET /campaigns/:key`
pub async fn get_campaign(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<u64>,
) -> impl IntoResponse {
    let record = match state.repo.get_campaign(key).await {
        Ok(record) => record,
        Err(e) => return error_response(e.into()),
    };
    match CampaignDetailView::build(key, &record, Utc::now()) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// `POST /campaigns`
///
/// Validates the draft and forwards the creation to the ledger.
pub async fn create_campaign(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateCampaignBody>,
) -> impl IntoResponse {
    let session = match session_from(&body.address) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let Some(creator) = session.address().map(str::to_string) else {
        return error_response(ValidationError::NoWalletConnected.into());
    };

    let request = match draft::validate_draft(&body.draft, Utc::now()) {
        Ok(request) => request,
        Err(e) => return error_response(e.into()),
    };

    match state.repo.create_campaign(&request, &creator).await {
        Ok(()) => (StatusCode::CREATED, Json(StatusResponse { status: "created" })).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// `POST /campaigns/:key/donations`
///
/// Runs the donation flow: validate the amount against the session, then
/// submit. The campaign is fetched first so donating to a missing key is a
/// 404 rather than a gateway error.
pub async fn donate(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<u64>,
    Json(body): Json<DonateBody>,
) -> impl IntoResponse {
    let session = match session_from(&body.address) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    if let Err(e) = state.repo.get_campaign(key).await {
        return error_response(e.into());
    }

    let mut flow = DonationFlow::new(key);
    if let Err(e) = flow.update_amount(&body.amount, &session) {
        return error_response(e.into());
    }
    match flow.submit(state.repo.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse { status: "donated" })).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// `DELETE /campaigns/:key`
///
/// Owner-only: the caller address must match the record's owner before the
/// deletion is forwarded (the ledger enforces it again).
pub async fn delete_campaign(
    State(state): State<Arc<ApiState>>,
    Path(key): Path<u64>,
    Json(body): Json<DeleteBody>,
) -> impl IntoResponse {
    let session = match session_from(&body.address) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let Some(caller) = session.address().map(str::to_string) else {
        return error_response(ValidationError::NoWalletConnected.into());
    };

    let record = match state.repo.get_campaign(key).await {
        Ok(record) => record,
        Err(e) => return error_response(e.into()),
    };
    if !session.owns(&record) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "only the campaign owner can delete it".to_string(),
            }),
        )
            .into_response();
    }

    match state.repo.delete_campaign(key, &caller).await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse { status: "deleted" })).into_response(),
        Err(e) => error_response(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::{sample_campaign, InMemoryRepository};
    use chrono::Duration;

    const OWNER: &str = "0x00000000000000000000000000000000000000ee";
    const STRANGER: &str = "0x00000000000000000000000000000000000000ff";

    fn api_state(repo: InMemoryRepository) -> Arc<ApiState> {
        Arc::new(ApiState {
            repo: Arc::new(repo),
        })
    }

    fn valid_draft() -> CampaignDraft {
        CampaignDraft {
            title: "Solar roof".to_string(),
            description: "Panels for the school".to_string(),
            target: "5".to_string(),
            deadline: (Utc::now() + Duration::days(30)).date_naive(),
            image: "https://example.com/roof.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn create_without_a_wallet_is_unprocessable() {
        let state = api_state(InMemoryRepository::with_campaigns(Vec::new()));
        let body = CreateCampaignBody {
            address: None,
            draft: valid_draft(),
        };

        let resp = create_campaign(State(state.clone()), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.repo.list_campaigns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_attributes_the_campaign_to_the_caller() {
        let state = api_state(InMemoryRepository::with_campaigns(Vec::new()));
        let body = CreateCampaignBody {
            address: Some(OWNER.to_string()),
            draft: valid_draft(),
        };

        let resp = create_campaign(State(state.clone()), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let records = state.repo.list_campaigns().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner, OWNER);
        assert_eq!(records[0].target, 5_000_000_000_000_000_000);
    }

    #[tokio::test]
    async fn delete_by_a_non_owner_is_forbidden() {
        let state = api_state(InMemoryRepository::with_campaigns(vec![sample_campaign(OWNER)]));
        let body = DeleteBody {
            address: Some(STRANGER.to_string()),
        };

        let resp = delete_campaign(State(state.clone()), Path(0), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(state.repo.list_campaigns().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_by_the_owner_succeeds() {
        let state = api_state(InMemoryRepository::with_campaigns(vec![sample_campaign(OWNER)]));
        let body = DeleteBody {
            address: Some(OWNER.to_string()),
        };

        let resp = delete_campaign(State(state.clone()), Path(0), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.repo.list_campaigns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_campaign_is_not_found() {
        let state = api_state(InMemoryRepository::with_campaigns(Vec::new()));
        let resp = get_campaign(State(state), Path(9)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
