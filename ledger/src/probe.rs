//! Startup readiness probe and adapter selection.
//!
//! The choice is made once per process and cached for its lifetime: a
//! mid-lifetime Extended deployment takes effect on restart, deliberately
//! trading re-probing machinery for predictability.

use std::sync::Arc;

use serde_json::json;

use artchain_types::{AccountAddress, U256};

use crate::adapter::LedgerAdapter;
use crate::extended::ExtendedLedger;
use crate::legacy::LegacyLedger;
use crate::rpc::{ConfirmationPolicy, JsonRpcClient};

/// Probe the Extended contract and select the adapter for this process.
///
/// Readiness means the Extended contract is deployed and answers a
/// side-effect-free read. Anything else — no address configured, node down,
/// unknown contract — falls back to Legacy.
pub async fn select_adapter(
    client: Arc<JsonRpcClient>,
    legacy_address: AccountAddress,
    extended_address: Option<AccountAddress>,
    policy: ConfirmationPolicy,
) -> Arc<dyn LedgerAdapter> {
    if let Some(address) = extended_address {
        let probe: Result<U256, _> = client
            .call("art_getTotalArtworks", json!([address]))
            .await;
        match probe {
            Ok(total) => {
                tracing::info!(
                    contract = %address,
                    artworks = %total,
                    "extended contract ready, selecting Extended adapter"
                );
                return Arc::new(ExtendedLedger::new(client, address, policy));
            }
            Err(e) => {
                tracing::warn!(
                    contract = %address,
                    error = %e,
                    "extended contract not ready, falling back to Legacy adapter"
                );
            }
        }
    } else {
        tracing::info!("no extended contract configured, using Legacy adapter");
    }

    Arc::new(LegacyLedger::new(client, legacy_address, policy))
}
