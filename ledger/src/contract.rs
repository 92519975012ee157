//! Calls shared by both contract variants.
//!
//! The Legacy and Extended adapters differ only in their submit signature and
//! the content-ref reads; everything else (enumeration, record reads, voting,
//! confirmation waits) is identical and lives here.

use std::sync::Arc;

use serde_json::json;

use artchain_types::{u256_to_u64, AccountAddress, ArtworkRecord, ContentId, U256};

use crate::rpc::{ConfirmationPolicy, JsonRpcClient};
use crate::wire::RawArtworkDetails;
use crate::LedgerError;

pub(crate) struct ContractCalls {
    pub client: Arc<JsonRpcClient>,
    pub address: AccountAddress,
    pub policy: ConfirmationPolicy,
}

impl ContractCalls {
    pub fn new(client: Arc<JsonRpcClient>, address: AccountAddress, policy: ConfirmationPolicy) -> Self {
        Self {
            client,
            address,
            policy,
        }
    }

    /// Broadcast a state-changing call and wait for finality.
    pub async fn send_and_confirm(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<(), LedgerError> {
        let tx_hash: String = self.client.call(method, params).await?;
        self.client
            .wait_for_confirmation(&tx_hash, &self.policy)
            .await?;
        Ok(())
    }

    pub async fn total(&self) -> Result<u64, LedgerError> {
        let total: U256 = self
            .client
            .call("art_getTotalArtworks", json!([self.address]))
            .await?;
        u256_to_u64(total)
            .map_err(|e| LedgerError::InvalidResponse(format!("artwork count: {e}")))
    }

    /// Enumerate fingerprints in submission order: total count, then one
    /// index read per artwork, exactly as the contract exposes them.
    pub async fn list(&self) -> Result<Vec<ContentId>, LedgerError> {
        let total = self.total().await?;
        let mut ids = Vec::with_capacity(total as usize);
        for index in 0..total {
            let hash: String = self
                .client
                .call("art_getArtworkHash", json!([self.address, index]))
                .await?;
            let id = ContentId::from_hex(&hash)
                .map_err(|e| LedgerError::InvalidResponse(format!("artwork hash: {e}")))?;
            ids.push(id);
        }
        Ok(ids)
    }

    pub async fn read(&self, content_id: &ContentId) -> Result<Option<ArtworkRecord>, LedgerError> {
        let raw: Option<RawArtworkDetails> = self
            .client
            .call("art_getArtworkDetails", json!([self.address, content_id]))
            .await?;
        raw.map(RawArtworkDetails::into_record).transpose()
    }

    pub async fn has_voted(
        &self,
        content_id: &ContentId,
        validator: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.client
            .call("art_hasVoted", json!([self.address, content_id, validator]))
            .await
    }

    /// Cast a vote with both duplicate-detection paths armed: the pre-flight
    /// read catches the common case cheaply; the rejection-reason mapping in
    /// the confirmation wait catches the race where another vote from the
    /// same validator lands between the read and the broadcast.
    pub async fn vote(
        &self,
        content_id: &ContentId,
        is_original: bool,
        claimed_author: &str,
        validator: &AccountAddress,
    ) -> Result<(), LedgerError> {
        if self.has_voted(content_id, validator).await? {
            return Err(LedgerError::AlreadyVoted);
        }
        self.send_and_confirm(
            "art_validateArtwork",
            json!([self.address, content_id, is_original, claimed_author, validator]),
        )
        .await
    }
}
