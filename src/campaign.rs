//! Campaign data entities.
//!
//! [`CampaignRecord`] is a read-only snapshot of one campaign as stored on
//! the ledger. The dashboard fetches snapshots on demand and never caches
//! them beyond the current request. `donators` and `donations` are the
//! ledger's legacy parallel-array layout; they are expected to stay
//! index-aligned, but nothing here relies on it — derived views re-check the
//! lengths before pairing them (see [`crate::metrics`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount;

/// One campaign as read from the ledger, plus nothing else: every derived
/// value (progress, days left, donor aggregates) is computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    /// Wallet address of the creator; immutable after creation.
    pub owner: String,
    pub title: String,
    pub description: String,
    /// Requested funding amount in smallest units; immutable after creation.
    #[serde(with = "amount::serde_string")]
    pub target: u128,
    /// Unix timestamp (seconds); immutable after creation.
    pub deadline: u64,
    /// Total raised so far in smallest units; incremented by the ledger on
    /// each successful donation.
    #[serde(with = "amount::serde_string")]
    pub amount_collected: u128,
    pub image: String,
    /// Donor addresses, append-only, index-aligned with `donations`.
    pub donators: Vec<String>,
    /// Per-call donated amounts; a repeat donor appears multiple times.
    #[serde(with = "amount::serde_string_vec")]
    pub donations: Vec<u128>,
}

/// Ephemeral campaign-creation draft, client-only.
///
/// Held as an immutable value replaced wholesale on each edit; the deadline
/// stays a calendar date until submission, when
/// [`crate::draft::validate_draft`] turns the draft into a
/// [`crate::draft::CreateCampaignRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    /// Target amount as a human decimal string (e.g. `"10"` or `"2.5"`).
    pub target: String,
    pub deadline: NaiveDate,
    pub image: String,
}

impl CampaignDraft {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Shape check for a wallet address: `0x` followed by 40 hex characters.
/// Liveness or checksum validation is out of scope.
pub fn is_wallet_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .map(|h| h.len() == 40 && hex::decode(h).is_ok())
        .unwrap_or(false)
}
