//! Extended contract adapter — records carry content-addressed image and
//! metadata references alongside the validation fields.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use artchain_types::{AccountAddress, ArtworkRecord, ContentId, ContractVariant};

use crate::adapter::{ArtworkSubmission, ContentRefs, LedgerAdapter};
use crate::contract::ContractCalls;
use crate::rpc::{ConfirmationPolicy, JsonRpcClient};
use crate::wire::RawContentRefs;
use crate::LedgerError;

pub struct ExtendedLedger {
    calls: ContractCalls,
}

impl ExtendedLedger {
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
impl LedgerAdapter for ExtendedLedger {
    fn variant(&self) -> ContractVariant {
        ContractVariant::Extended
    }

    fn contract_address(&self) -> &AccountAddress {
        &self.calls.address
    }

    async fn submit(
        &self,
        content_id: &ContentId,
        submission: &ArtworkSubmission,
    ) -> Result<(), LedgerError> {
        self.calls
            .send_and_confirm(
                "art_submitArtwork",
                json!([
                    self.calls.address,
                    content_id,
                    submission.content_refs,
                    submission.metadata_ref,
                    submission.title,
                    submission.description,
                    submission.medium,
                    submission.additional_info,
                ]),
            )
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

    async fn has_content_refs(&self, content_id: &ContentId) -> Result<bool, LedgerError> {
        self.calls
            .client
            .call("art_hasIPFSData", json!([self.calls.address, content_id]))
            .await
    }

    async fn content_refs(&self, content_id: &ContentId) -> Result<ContentRefs, LedgerError> {
        let raw: RawContentRefs = self
            .calls
            .client
            .call("art_getArtworkIPFS", json!([self.calls.address, content_id]))
            .await?;
        Ok(ContentRefs {
            image_uris: raw.ipfs_image_uris,
            metadata_uri: raw.ipfs_metadata_uri,
        })
    }
}
