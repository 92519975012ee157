//! Legacy contract adapter — fixed-schema records, no content-addressed data.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use artchain_types::{AccountAddress, ArtworkRecord, ContentId, ContractVariant};

use crate::adapter::{ArtworkSubmission, ContentRefs, LedgerAdapter};
use crate::contract::ContractCalls;
use crate::rpc::{ConfirmationPolicy, JsonRpcClient};
use crate::LedgerError;

pub struct LegacyLedger {
    calls: ContractCalls,
}

impl LegacyLedger {
    pub fn new(
        client: Arc<JsonRpcClient>,
        contract_address: AccountAddress,
        policy: ConfirmationPolicy,
    ) -> Self {
        Self {
            calls: ContractCalls::new(client, contract_address, policy),
        }
    }
}

#[async_trait]
impl LedgerAdapter for LegacyLedger {
    fn variant(&self) -> ContractVariant {
        ContractVariant::Legacy
    }

    fn contract_address(&self) -> &AccountAddress {
        &self.calls.address
    }

    /// The legacy call signature takes only the fingerprint; any
    /// content-addressed payload the caller collected stays cache-side.
    async fn submit(
        &self,
        content_id: &ContentId,
        _submission: &ArtworkSubmission,
    ) -> Result<(), LedgerError> {
        self.calls
            .send_and_confirm("art_submitArtwork", json!([self.calls.address, content_id]))
            .await
    }

    async fn vote(
        &self,
        content_id: &ContentId,
        is_original: bool,
        claimed_author: &str,
        validator: &AccountAddress,
    ) -> Result<(), LedgerError> {
        self.calls
            .vote(content_id, is_original, claimed_author, validator)
            .await
    }

    async fn read(&self, content_id: &ContentId) -> Result<Option<ArtworkRecord>, LedgerError> {
        self.calls.read(content_id).await
    }

    async fn list(&self) -> Result<Vec<ContentId>, LedgerError> {
        self.calls.list().await
    }

    async fn has_voted(
        &self,
        content_id: &ContentId,
        validator: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.calls.has_voted(content_id, validator).await
    }

    async fn has_content_refs(&self, _content_id: &ContentId) -> Result<bool, LedgerError> {
        Ok(false)
    }

    async fn content_refs(&self, _content_id: &ContentId) -> Result<ContentRefs, LedgerError> {
        Ok(ContentRefs::default())
    }
}
