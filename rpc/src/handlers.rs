//! Request handlers.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use artchain_orchestrator::{
    ContentSource, ContractInfo, OrchestratorError, SimilarityScore, VoteRequest,
};
use artchain_types::ArtworkMetadata;

use crate::dto::{CachedArtworkDto, LedgerArtworkDto};
use crate::error::ApiError;
use crate::server::ApiState;

/// Medium recorded when a content-addressed upload does not name one.
const DEFAULT_MEDIUM: &str = "Digital Art";

fn malformed(msg: impl Into<String>) -> ApiError {
    ApiError(OrchestratorError::MalformedInput(msg.into()))
}

// ── POST /upload (legacy multipart) ─────────────────────────────────────

/// Legacy multipart upload: `artist` and `title` text fields plus the raw
/// `image` file. Runs submit + auto-vote + reconcile and returns the cache
/// row.
pub async fn upload(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<CachedArtworkDto>, ApiError> {
    let mut artist = String::new();
    let mut title = String::new();
    let mut image: Vec<u8> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| malformed(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "artist" => {
                artist = field
                    .text()
                    .await
                    .map_err(|e| malformed(format!("artist field: {e}")))?;
            }
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| malformed(format!("title field: {e}")))?;
            }
            "image" => {
                image = field
                    .bytes()
                    .await
                    .map_err(|e| malformed(format!("image field: {e}")))?
                    .to_vec();
            }
            _ => {}
        }
    }

    if image.is_empty() {
        return Err(malformed("image file is required"));
    }

    let outcome = state
        .facade
        .submit_artwork_bytes(&image, &artist, &title)
        .await?;
    Ok(Json(CachedArtworkDto::from(outcome.record)))
}

// ── POST /upload-ipfs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadIpfsRequest {
    #[serde(default)]
    pub image_uris: Vec<String>,
    #[serde(default)]
    pub metadata_uri: Option<String>,
    pub metadata: Option<MetadataDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: MetadataProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataProperties {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub additional_info: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadIpfsResponse {
    pub success: bool,
    pub artwork: CachedArtworkDto,
    pub image_hash: String,
    pub blockchain: &'static str,
    pub message: &'static str,
}

/// Content-addressed upload: image URIs + metadata URI + metadata document.
pub async fn upload_ipfs(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<UploadIpfsRequest>,
) -> Result<Json<UploadIpfsResponse>, ApiError> {
    let metadata = request
        .metadata
        .ok_or_else(|| malformed("missing required fields: imageUris and metadata"))?;
    if request.image_uris.is_empty() {
        return Err(malformed("missing required fields: imageUris and metadata"));
    }

    let medium = if metadata.properties.medium.trim().is_empty() {
        DEFAULT_MEDIUM.to_string()
    } else {
        metadata.properties.medium.clone()
    };
    let artwork_metadata = ArtworkMetadata {
        name: metadata.name,
        description: metadata.description,
        artist: metadata.properties.artist,
        medium,
        year: metadata.properties.year,
        dimensions: metadata.properties.dimensions,
        additional_info: metadata.properties.additional_info,
    };

    let outcome = state
        .facade
        .submit_artwork_refs(
            &request.image_uris,
            request.metadata_uri.as_deref().unwrap_or_default(),
            &artwork_metadata,
        )
        .await?;

    Ok(Json(UploadIpfsResponse {
        success: true,
        image_hash: outcome.content_id.to_string(),
        blockchain: outcome.variant.as_str(),
        artwork: CachedArtworkDto::from(outcome.record),
        message: "Artwork successfully submitted to the ledger and cached",
    }))
}

// ── POST /validate ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub image_hash: Option<String>,
    pub is_original: Option<bool>,
    #[serde(default)]
    pub original_author: Option<String>,
    pub validator_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
    pub artwork: CachedArtworkDto,
    pub message: &'static str,
}

/// External validator vote: vote + post-confirmation re-read + reconcile.
pub async fn validate(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let image_hash = request
        .image_hash
        .ok_or_else(|| malformed("imageHash is required"))?;
    let is_original = request
        .is_original
        .ok_or_else(|| malformed("isOriginal is required"))?;
    let validator_address = request
        .validator_address
        .ok_or_else(|| malformed("validatorAddress is required"))?;

    let content_id = image_hash
        .parse()
        .map_err(|e| malformed(format!("imageHash: {e}")))?;
    let validator = validator_address
        .parse()
        .map_err(|e| malformed(format!("validatorAddress: {e}")))?;

    let outcome = state
        .facade
        .vote(VoteRequest {
            content_id,
            is_original,
            original_author: request.original_author,
            validator,
        })
        .await?;

    Ok(Json(ValidateResponse {
        success: true,
        artwork: CachedArtworkDto::from(outcome.record),
        message: "Artwork validation submitted successfully",
    }))
}

// ── GET /artworks (cache) ───────────────────────────────────────────────

pub async fn artworks_cached(State(state): State<Arc<ApiState>>) -> Json<Vec<CachedArtworkDto>> {
    let rows = state.facade.get_all_cached();
    Json(rows.into_iter().map(CachedArtworkDto::from).collect())
}

// ── GET /api/artworks (ledger) ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerArtworksResponse {
    pub artworks: Vec<LedgerArtworkDto>,
    pub source: String,
    pub contract: ContractInfo,
}

pub async fn artworks_ledger(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<LedgerArtworksResponse>, ApiError> {
    let info = state.facade.info();
    let records = state.facade.get_all_ledger().await?;
    Ok(Json(LedgerArtworksResponse {
        artworks: records.into_iter().map(LedgerArtworkDto::from).collect(),
        source: format!("{}-ledger", info.variant),
        contract: info,
    }))
}

// ── POST /ai-vlm ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiVlmRequest {
    #[serde(default)]
    pub content_ref: String,
}

/// Similarity capability endpoint. Scores come from whatever scorer is
/// plugged into the facade (the stub, unless a real one was wired in).
pub async fn ai_vlm(
    State(state): State<Arc<ApiState>>,
    body: Option<Json<AiVlmRequest>>,
) -> Json<SimilarityScore> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let score = state
        .facade
        .score(ContentSource::Ref(&request.content_ref))
        .await;
    Json(score)
}

// ── POST /resync ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResyncResponse {
    pub success: bool,
    pub synced: u64,
}

/// Administrative re-sync: rebuild every cache row from the ledger. Heals
/// the divergence a `RECONCILIATION_FAILURE` reported.
pub async fn resync(State(state): State<Arc<ApiState>>) -> Result<Json<ResyncResponse>, ApiError> {
    let synced = state.facade.resync().await?;
    Ok(Json(ResyncResponse {
        success: true,
        synced,
    }))
}

// ── GET /ready, GET /info ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub variant: &'static str,
}

pub async fn ready(State(state): State<Arc<ApiState>>) -> Json<ReadyResponse> {
    let info = state.facade.info();
    Json(ReadyResponse {
        ready: info.ready,
        variant: info.variant,
    })
}

pub async fn info(State(state): State<Arc<ApiState>>) -> Json<ContractInfo> {
    Json(state.facade.info())
}
