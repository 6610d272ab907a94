//! Donation request builder and validator.
//!
//! A [`DonationFlow`] tracks one donation attempt against one campaign:
//!
//! ```text
//! Idle ──► Validating ──► Ready ──► Submitting ──► Succeeded
//!              │                         │
//!              └──► Idle (edit again)    └──► Failed
//! ```
//!
//! Validation happens entirely client-side and blocks submission; a
//! submission failure is surfaced verbatim and never retried automatically.
//! There is deliberately no cap at the remaining target — over-funding a
//! campaign is allowed.

use serde::Serialize;

use crate::amount;
use crate::errors::{RepositoryError, ValidationError};
use crate::repository::CampaignRepository;
use crate::session::Session;

/// Validated, immutable payload describing a donation to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequest {
    pub campaign_key: u64,
    #[serde(with = "amount::serde_string")]
    pub amount_smallest_unit: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationPhase {
    Idle,
    Validating,
    Ready(FundingRequest),
    Submitting,
    Succeeded,
    Failed(String),
}

/// One in-flight donation attempt. Create a fresh flow per campaign view;
/// the flow never outlives the render context it was made for.
#[derive(Debug, Clone)]
pub struct DonationFlow {
    campaign_key: u64,
    amount: String,
    phase: DonationPhase,
    /// Wallet address captured at validation time; submission attributes the
    /// donation to it.
    donor: Option<String>,
}

impl DonationFlow {
    pub fn new(campaign_key: u64) -> Self {
        Self {
            campaign_key,
            amount: "0".to_string(),
            phase: DonationPhase::Idle,
            donor: None,
        }
    }

    pub fn phase(&self) -> &DonationPhase {
        &self.phase
    }

    /// The raw amount as last entered.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Re-validate after an amount edit.
    ///
    /// Rules, first failure wins: a wallet must be connected, the amount must
    /// be nonzero, and the amount must parse as a valid decimal. On success
    /// the flow is `Ready` and the built [`FundingRequest`] is returned; on
    /// failure it drops back to `Idle` so the user can edit and retry.
    pub fn update_amount(
        &mut self,
        raw: &str,
        session: &Session,
    ) -> Result<FundingRequest, ValidationError> {
        self.amount = raw.to_string();
        self.phase = DonationPhase::Validating;
        match self.validate(raw, session) {
            Ok(request) => {
                self.donor = session.address().map(str::to_string);
                self.phase = DonationPhase::Ready(request.clone());
                Ok(request)
            }
            Err(e) => {
                self.donor = None;
                self.phase = DonationPhase::Idle;
                Err(e)
            }
        }
    }

    fn validate(&self, raw: &str, session: &Session) -> Result<FundingRequest, ValidationError> {
        if session.address().is_none() {
            return Err(ValidationError::NoWalletConnected);
        }
        if is_zero_literal(raw) {
            return Err(ValidationError::ZeroAmount);
        }
        let smallest = amount::to_smallest_unit(raw)?;
        if smallest == 0 {
            return Err(ValidationError::ZeroAmount);
        }
        Ok(FundingRequest {
            campaign_key: self.campaign_key,
            amount_smallest_unit: smallest,
        })
    }

    /// Submit the validated request. Only meaningful in `Ready`; a success
    /// resets the amount to `0` so the same request cannot be re-sent by
    /// accident, a failure keeps the amount for a user-initiated retry.
    pub async fn submit<R: CampaignRepository + ?Sized>(
        &mut self,
        repository: &R,
    ) -> Result<(), RepositoryError> {
        let (request, donor) = match (&self.phase, &self.donor) {
            (DonationPhase::Ready(request), Some(donor)) => (request.clone(), donor.clone()),
            _ => {
                return Err(RepositoryError::Submission(
                    "no validated donation to submit".to_string(),
                ))
            }
        };

        self.phase = DonationPhase::Submitting;
        match repository.donate(&request, &donor).await {
            Ok(()) => {
                self.phase = DonationPhase::Succeeded;
                self.amount = "0".to_string();
                Ok(())
            }
            Err(e) => {
                self.phase = DonationPhase::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

/// True when the input spells out zero (`"0"`, `"0.00"`, `".0"` …), so the
/// zero check can fire before full parsing does.
fn is_zero_literal(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.matches('.').count() > 1 {
        return false;
    }
    let digits: Vec<char> = trimmed.chars().filter(|c| *c != '.').collect();
    !digits.is_empty() && digits.iter().all(|c| *c == '0')
}
