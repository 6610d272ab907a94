//! Campaign repository contract.
//!
//! The system of record for campaigns is an external smart contract; the
//! dashboard only depends on this trait. The production implementation is
//! [`crate::rpc::RpcRepository`], which forwards each call to the chain
//! gateway over JSON-RPC.

use async_trait::async_trait;

use crate::campaign::CampaignRecord;
use crate::donation::FundingRequest;
use crate::draft::CreateCampaignRequest;
use crate::errors::RepositoryError;

/// Read and write access to the on-chain campaign ledger.
///
/// Every write carries the acting wallet address explicitly (`creator`,
/// `donor`, `caller`): the gateway submits on the user's behalf, so identity
/// never travels ambiently. Submissions are never retried automatically; a
/// failure is surfaced to the caller and a user-initiated resubmission is
/// required.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// All campaigns in ledger order. The key of a campaign is its index in
    /// this sequence.
    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, RepositoryError>;

    async fn get_campaign(&self, key: u64) -> Result<CampaignRecord, RepositoryError>;

    /// Create a campaign owned by `creator`.
    async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
        creator: &str,
    ) -> Result<(), RepositoryError>;

    /// Donate to a campaign; the ledger records `donor` in the campaign's
    /// donator list.
    async fn donate(&self, request: &FundingRequest, donor: &str) -> Result<(), RepositoryError>;

    /// Delete a campaign. Only meaningful when `caller` equals the record's
    /// owner; the ledger rejects anyone else.
    async fn delete_campaign(&self, key: u64, caller: &str) -> Result<(), RepositoryError>;
}

#[cfg(test)]
pub(crate) mod testutil {
    //! In-memory repository double used by the validator and flow tests.

    use std::sync::Mutex;

    use super::*;
    use crate::amount;

    pub struct InMemoryRepository {
        pub campaigns: Mutex<Vec<CampaignRecord>>,
        /// When set, every write fails like a wallet rejection.
        pub fail_writes: bool,
    }

    impl InMemoryRepository {
        pub fn with_campaigns(campaigns: Vec<CampaignRecord>) -> Self {
            Self {
                campaigns: Mutex::new(campaigns),
                fail_writes: false,
            }
        }

        pub fn rejecting(campaigns: Vec<CampaignRecord>) -> Self {
            Self {
                campaigns: Mutex::new(campaigns),
                fail_writes: true,
            }
        }

        fn check_writable(&self) -> Result<(), RepositoryError> {
            if self.fail_writes {
                Err(RepositoryError::Submission(
                    "wallet rejected the transaction".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CampaignRepository for InMemoryRepository {
        async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, RepositoryError> {
            Ok(self.campaigns.lock().unwrap().clone())
        }

        async fn get_campaign(&self, key: u64) -> Result<CampaignRecord, RepositoryError> {
            self.campaigns
                .lock()
                .unwrap()
                .get(key as usize)
                .cloned()
                .ok_or(RepositoryError::NotFound(key))
        }

        async fn create_campaign(
            &self,
            request: &CreateCampaignRequest,
            creator: &str,
        ) -> Result<(), RepositoryError> {
            self.check_writable()?;
            self.campaigns.lock().unwrap().push(CampaignRecord {
                owner: creator.to_string(),
                title: request.title.clone(),
                description: request.description.clone(),
                target: request.target_smallest_unit,
                deadline: request.deadline_unix_secs,
                amount_collected: 0,
                image: request.image.clone(),
                donators: Vec::new(),
                donations: Vec::new(),
            });
            Ok(())
        }

        async fn donate(
            &self,
            request: &FundingRequest,
            donor: &str,
        ) -> Result<(), RepositoryError> {
            self.check_writable()?;
            let mut campaigns = self.campaigns.lock().unwrap();
            let record = campaigns
                .get_mut(request.campaign_key as usize)
                .ok_or(RepositoryError::NotFound(request.campaign_key))?;
            record.amount_collected += request.amount_smallest_unit;
            record.donators.push(donor.to_string());
            record.donations.push(request.amount_smallest_unit);
            Ok(())
        }

        async fn delete_campaign(&self, key: u64, caller: &str) -> Result<(), RepositoryError> {
            self.check_writable()?;
            let mut campaigns = self.campaigns.lock().unwrap();
            let record = campaigns
                .get(key as usize)
                .ok_or(RepositoryError::NotFound(key))?;
            if record.owner != caller {
                return Err(RepositoryError::Submission(
                    "caller is not the campaign owner".to_string(),
                ));
            }
            campaigns.remove(key as usize);
            Ok(())
        }
    }

    pub fn sample_campaign(owner: &str) -> CampaignRecord {
        CampaignRecord {
            owner: owner.to_string(),
            title: "Community garden".to_string(),
            description: "Raised beds for the block".to_string(),
            target: amount::to_smallest_unit("10").unwrap(),
            deadline: 4_102_444_800, // 2100-01-01
            amount_collected: 0,
            image: "https://example.com/garden.jpg".to_string(),
            donators: Vec::new(),
            donations: Vec::new(),
        }
    }
}
