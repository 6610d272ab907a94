//! Application-wide error types.
//!
//! The taxonomy follows the failure surface of the dashboard: validation
//! errors are client-side and recoverable by editing the input, repository
//! errors come from the chain gateway and are surfaced verbatim, and
//! [`MalformedRecord`] flags a ledger record that violates the parallel
//! donators/donations layout. Nothing here is fatal to the process.

use std::collections::BTreeSet;

use thiserror::Error;

/// Failure parsing or converting a decimal currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a non-negative decimal number: {0:?}")]
    NotDecimal(String),

    #[error("amount has more than {0} decimal places")]
    PrecisionLoss(u32),

    #[error("amount is too large to represent")]
    Overflow,
}

/// Client-side validation failure. Blocks submission; never sent to the
/// chain gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no wallet connected")]
    NoWalletConnected,

    #[error("donation amount must be greater than zero")]
    ZeroAmount,

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("not a wallet address: {0:?}")]
    InvalidAddress(String),

    #[error("missing or invalid fields: {}", .0.iter().copied().collect::<Vec<_>>().join(", "))]
    MissingFields(BTreeSet<&'static str>),

    #[error("deadline must be in the future")]
    PastDeadline,
}

/// Failure reported by the campaign repository (the chain gateway).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("campaign {0} not found")]
    NotFound(u64),

    #[error("failed to fetch campaigns: {0}")]
    Fetch(String),

    #[error("submission rejected: {0}")]
    Submission(String),
}

/// A campaign record whose `donators` and `donations` sequences disagree in
/// length. The ledger is expected to keep them index-aligned, but the
/// dashboard never assumes it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("donators/donations length mismatch ({donators} donators, {donations} donations)")]
pub struct MalformedRecord {
    pub donators: usize,
    pub donations: usize,
}

/// Top-level error, the type every failure is folded into before it reaches
/// a user. Transport and decode errors are stringified inside the gateway
/// client (they become [`RepositoryError`]s there), so only the domain
/// variants surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("malformed campaign record: {0}")]
    Malformed(#[from] MalformedRecord),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_errors_fold_into_the_top_level_taxonomy() {
        let e = DashboardError::from(ValidationError::NoWalletConnected);
        assert_eq!(e.to_string(), "validation error: no wallet connected");

        let e = DashboardError::from(RepositoryError::NotFound(3));
        assert_eq!(e.to_string(), "repository error: campaign 3 not found");

        let e = DashboardError::from(MalformedRecord {
            donators: 2,
            donations: 1,
        });
        assert_eq!(
            e.to_string(),
            "malformed campaign record: donators/donations length mismatch (2 donators, 1 donations)"
        );
    }
}
