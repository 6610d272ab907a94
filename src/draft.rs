//! Campaign draft validation.
//!
//! Turns an ephemeral [`CampaignDraft`] into an immutable
//! [`CreateCampaignRequest`] ready for submission, or reports what is wrong
//! with it. Validation is a pure function over the draft value; `now` is
//! injected so the deadline check is deterministic.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::amount;
use crate::campaign::CampaignDraft;
use crate::errors::ValidationError;

/// Validated, immutable payload describing a new campaign to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub title: String,
    pub description: String,
    #[serde(with = "amount::serde_string")]
    pub target_smallest_unit: u128,
    pub deadline_unix_secs: u64,
    pub image: String,
}

/// Validate a creation draft.
///
/// Title, description, and image URL must be non-empty; the target must be a
/// positive decimal amount; the deadline must be strictly after `now`. The
/// image URL is only checked for shape, never fetched. Field problems are
/// collected into one `MissingFields` set so the user sees everything wrong
/// at once; the deadline check runs after the fields are in order.
pub fn validate_draft(
    draft: &CampaignDraft,
    now: DateTime<Utc>,
) -> Result<CreateCampaignRequest, ValidationError> {
    let mut missing: BTreeSet<&'static str> = BTreeSet::new();

    if draft.title.trim().is_empty() {
        missing.insert("title");
    }
    if draft.description.trim().is_empty() {
        missing.insert("description");
    }
    if draft.image.trim().is_empty() {
        missing.insert("image");
    }

    // A target that does not parse or parses to zero is flagged as a field
    // problem rather than a separate error.
    let target = match amount::to_smallest_unit(&draft.target) {
        Ok(0) | Err(_) => {
            missing.insert("target");
            None
        }
        Ok(v) => Some(v),
    };

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    // The calendar date becomes midnight UTC; a deadline of "today" has
    // already started and counts as past.
    let deadline = draft
        .deadline
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp();
    if deadline <= now.timestamp() {
        return Err(ValidationError::PastDeadline);
    }

    Ok(CreateCampaignRequest {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        target_smallest_unit: target.unwrap_or_default(),
        deadline_unix_secs: deadline as u64,
        image: draft.image.trim().to_string(),
    })
}
