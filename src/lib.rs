//! Crowdfunding campaign dashboard core.
//!
//! Campaign storage, fund transfer, and donation bookkeeping all live in an
//! external smart contract; this crate is the layer between that ledger and
//! a frontend. It turns raw on-chain campaign records into the derived
//! values a dashboard displays, validates donation and creation requests
//! before they are submitted, and exposes the whole surface as a small REST
//! API over a JSON-RPC chain gateway.
//!
//! | Concern               | Module                   |
//! |-----------------------|--------------------------|
//! | Amount conversion     | [`amount`]               |
//! | Campaign entities     | [`campaign`]             |
//! | Derived metrics       | [`metrics`]              |
//! | Donation flow         | [`donation`]             |
//! | Draft validation      | [`draft`]                |
//! | Display view-models   | [`view`]                 |
//! | Ledger access         | [`repository`], [`rpc`]  |
//! | Wallet session        | [`session`]              |
//!
//! Every computation takes an explicit snapshot (and an explicit `now`) and
//! returns a new value; no shared mutable state crosses module boundaries.

pub mod amount;
pub mod api;
pub mod campaign;
pub mod config;
pub mod donation;
pub mod draft;
pub mod errors;
pub mod metrics;
pub mod repository;
pub mod rpc;
pub mod session;
pub mod view;

pub use campaign::{CampaignDraft, CampaignRecord};
pub use donation::{DonationFlow, DonationPhase, FundingRequest};
pub use draft::{validate_draft, CreateCampaignRequest};
pub use errors::{DashboardError, Result};
pub use repository::CampaignRepository;
pub use session::Session;
