//! Derived campaign metrics.
//!
//! Pure functions over a [`CampaignRecord`] snapshot. Time is always passed
//! in explicitly so every computation is deterministic and testable; nothing
//! here reads a clock or mutates the record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::amount;
use crate::campaign::CampaignRecord;
use crate::errors::MalformedRecord;

const MS_PER_DAY: i128 = 86_400_000;

/// One donor's contribution in a single donation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorContribution {
    pub address: String,
    #[serde(with = "amount::serde_string")]
    pub amount: u128,
}

/// Funding progress as a percentage of the target.
///
/// Not clamped: an over-funded campaign reports more than 100. A zero
/// target yields 0 rather than dividing by zero, so legacy records never
/// crash the view.
pub fn progress_percent(record: &CampaignRecord) -> f64 {
    if record.target == 0 {
        return 0.0;
    }
    record.amount_collected as f64 / record.target as f64 * 100.0
}

/// Whole days until the deadline, rounded up, floored at zero once the
/// deadline has passed.
pub fn days_remaining(record: &CampaignRecord, now: DateTime<Utc>) -> u64 {
    let deadline_ms = record.deadline as i128 * 1000;
    let remaining = deadline_ms - now.timestamp_millis() as i128;
    if remaining <= 0 {
        0
    } else {
        ((remaining + MS_PER_DAY - 1) / MS_PER_DAY) as u64
    }
}

/// Zip the ledger's parallel `donators`/`donations` arrays into paired
/// records, failing if the lengths disagree. The alignment invariant is the
/// ledger's to enforce, not ours to assume.
pub fn donor_contributions(
    record: &CampaignRecord,
) -> Result<Vec<DonorContribution>, MalformedRecord> {
    if record.donators.len() != record.donations.len() {
        return Err(MalformedRecord {
            donators: record.donators.len(),
            donations: record.donations.len(),
        });
    }
    Ok(record
        .donators
        .iter()
        .zip(&record.donations)
        .map(|(address, &amount)| DonorContribution {
            address: address.clone(),
            amount,
        })
        .collect())
}

/// Total contributed per donor address, in order of each donor's first
/// appearance. Repeat donations are summed.
pub fn total_by_donor(record: &CampaignRecord) -> Result<Vec<(String, u128)>, MalformedRecord> {
    let contributions = donor_contributions(record)?;
    let mut totals: Vec<(String, u128)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for c in contributions {
        match index.get(&c.address) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(c.amount),
            None => {
                index.insert(c.address.clone(), totals.len());
                totals.push((c.address, c.amount));
            }
        }
    }
    Ok(totals)
}
