//! Wallet session.
//!
//! The connected-wallet state is threaded explicitly into every component
//! that needs it rather than read from ambient context; a [`Session`] value
//! is just the current address (or none) plus connect/disconnect. Key
//! management and signing live in the external wallet, not here.

use crate::campaign::CampaignRecord;
use crate::errors::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    address: Option<String>,
}

impl Session {
    /// A session with no wallet connected.
    pub fn disconnected() -> Self {
        Self { address: None }
    }

    /// A session for an already-connected wallet address.
    pub fn connected(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        if !crate::campaign::is_wallet_address(&address) {
            return Err(ValidationError::InvalidAddress(address));
        }
        Ok(Self {
            address: Some(address),
        })
    }

    /// Connect a wallet. Rejecting a malformed address is non-fatal; the
    /// session keeps its previous state.
    pub fn connect(&mut self, address: impl Into<String>) -> Result<(), ValidationError> {
        let address = address.into();
        if !crate::campaign::is_wallet_address(&address) {
            return Err(ValidationError::InvalidAddress(address));
        }
        self.address = Some(address);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.address = None;
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Whether the connected wallet owns the given campaign. Owner-only
    /// actions (delete) are gated on this.
    pub fn owns(&self, record: &CampaignRecord) -> bool {
        self.address.as_deref() == Some(record.owner.as_str())
    }
}
