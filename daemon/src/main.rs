//! ArtChain daemon — entry point for running the validation backend.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use artchain_ledger::{select_adapter, ConfirmationPolicy, JsonRpcClient};
use artchain_orchestrator::{StubScorer, ValidationFacade};
use artchain_rpc::ApiState;
use artchain_store::ArtworkCacheStore;
use artchain_store_lmdb::{LmdbArtworkStore, LmdbEnvironment};
use artchain_types::AccountAddress;

use config::Config;

#[derive(Parser)]
#[command(name = "artchain-daemon", about = "ArtChain validation backend daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are the
    /// base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the ledger node.
    #[arg(long, env = "ARTCHAIN_LEDGER_ENDPOINT")]
    ledger_endpoint: Option<String>,

    /// Legacy validation contract address.
    #[arg(long, env = "ARTCHAIN_LEGACY_CONTRACT")]
    legacy_contract: Option<String>,

    /// Extended validation contract address (probed at startup).
    #[arg(long, env = "ARTCHAIN_EXTENDED_CONTRACT")]
    extended_contract: Option<String>,

    /// Account this service submits and auto-votes from.
    #[arg(long, env = "ARTCHAIN_IDENTITY")]
    identity: Option<String>,

    /// Data directory for the local cache.
    #[arg(long, env = "ARTCHAIN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// HTTP API port.
    #[arg(long, env = "ARTCHAIN_HTTP_PORT")]
    port: Option<u16>,

    /// Confirmations required before a ledger write counts as committed.
    #[arg(long, env = "ARTCHAIN_CONFIRMATION_DEPTH")]
    confirmation_depth: Option<u64>,

    /// Emit JSON logs.
    #[arg(long, env = "ARTCHAIN_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(v) = cli.ledger_endpoint {
        config.ledger_endpoint = v;
    }
    if let Some(v) = cli.legacy_contract {
        config.legacy_contract = v;
    }
    if let Some(v) = cli.extended_contract {
        config.extended_contract = Some(v);
    }
    if let Some(v) = cli.identity {
        config.backend_identity = v;
    }
    if let Some(v) = cli.data_dir {
        config.data_dir = v;
    }
    if let Some(v) = cli.port {
        config.http_port = v;
    }
    if let Some(v) = cli.confirmation_depth {
        config.confirmation_depth = v;
    }

    artchain_utils::init_tracing(cli.json_logs || config.log_format == "json");
    if let Some(ref path) = cli.config {
        tracing::info!(path = %path.display(), "loaded config file");
    }

    let legacy_contract: AccountAddress = config
        .legacy_contract
        .parse()
        .context("legacy_contract address")?;
    let extended_contract = config
        .extended_contract
        .as_deref()
        .map(str::parse::<AccountAddress>)
        .transpose()
        .context("extended_contract address")?;
    let identity: AccountAddress = config
        .backend_identity
        .parse()
        .context("backend_identity address")?;

    let cache_dir = config.data_dir.join("cache");
    let env = LmdbEnvironment::open(&cache_dir)
        .with_context(|| format!("opening cache at {}", cache_dir.display()))?;
    let cache: Arc<dyn ArtworkCacheStore> = Arc::new(LmdbArtworkStore::new(env));

    let client = Arc::new(JsonRpcClient::new(&config.ledger_endpoint));
    let policy = ConfirmationPolicy {
        depth: config.confirmation_depth,
        timeout: Duration::from_secs(config.confirmation_timeout_secs),
        poll_interval: Duration::from_millis(config.confirmation_poll_ms),
    };

    let adapter = select_adapter(client, legacy_contract, extended_contract, policy).await;
    tracing::info!(
        variant = adapter.variant().as_str(),
        contract = %adapter.contract_address(),
        endpoint = %config.ledger_endpoint,
        "ledger adapter selected"
    );

    let facade = Arc::new(ValidationFacade::new(
        adapter,
        cache,
        Arc::new(StubScorer),
        identity,
    ));
    let state = Arc::new(ApiState::new(facade));

    artchain_rpc::serve(state, config.http_port)
        .await
        .context("HTTP server")?;

    Ok(())
}
