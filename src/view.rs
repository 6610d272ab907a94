//! Display-ready campaign views.
//!
//! The dashboard cards and the campaign detail page need the same handful of
//! derived values: progress, days left, raised/goal in display units, a
//! shortened owner address. [`CampaignView`] bundles them so the API returns
//! exactly what the frontend renders, computed once per request from a fresh
//! snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::amount;
use crate::campaign::CampaignRecord;
use crate::errors::MalformedRecord;
use crate::metrics;

/// Summary card for one campaign.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    pub key: u64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub owner: String,
    /// `0x1234...abcd` form for display next to the avatar.
    pub owner_short: String,
    /// Raised amount in display units, e.g. `"2.5"`.
    pub raised: String,
    /// Target amount in display units.
    pub goal: String,
    /// Unclamped; the progress bar clamps for display.
    pub progress_percent: f64,
    pub days_left: u64,
    pub donor_count: usize,
}

impl CampaignView {
    pub fn build(
        key: u64,
        record: &CampaignRecord,
        now: DateTime<Utc>,
    ) -> Result<Self, MalformedRecord> {
        let contributions = metrics::donor_contributions(record)?;
        Ok(Self {
            key,
            title: record.title.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
            owner: record.owner.clone(),
            owner_short: shorten_address(&record.owner),
            raised: amount::to_decimal_string(record.amount_collected),
            goal: amount::to_decimal_string(record.target),
            progress_percent: metrics::progress_percent(record),
            days_left: metrics::days_remaining(record, now),
            donor_count: contributions.len(),
        })
    }
}

/// One row of the donors sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorView {
    pub address: String,
    pub address_short: String,
    /// Donated amount in display units.
    pub amount: String,
}

/// Detail page payload: the summary plus the full donor list in donation
/// order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetailView {
    #[serde(flatten)]
    pub summary: CampaignView,
    pub donors: Vec<DonorView>,
}

impl CampaignDetailView {
    pub fn build(
        key: u64,
        record: &CampaignRecord,
        now: DateTime<Utc>,
    ) -> Result<Self, MalformedRecord> {
        let summary = CampaignView::build(key, record, now)?;
        let donors = metrics::donor_contributions(record)?
            .into_iter()
            .map(|c| DonorView {
                address_short: shorten_address(&c.address),
                amount: amount::to_decimal_string(c.amount),
                address: c.address,
            })
            .collect();
        Ok(Self { summary, donors })
    }
}

/// `0xd8da6bf26964af9d7eed9e03e53415d37aa96045` → `0xd8da...6045`.
pub fn shorten_address(address: &str) -> String {
    if address.len() > 10 && address.is_ascii() {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}
