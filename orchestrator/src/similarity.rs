//! Similarity scoring capability interface.
//!
//! Real perceptual/VLM scoring is out of scope; the orchestrator only needs
//! the capability seam so a real implementation can be substituted without
//! touching the submit flow. The stub derives scores from a hash of the
//! content so runs are reproducible.

use async_trait::async_trait;

/// What the scorer is given to judge.
#[derive(Clone, Copy, Debug)]
pub enum ContentSource<'a> {
    /// Raw artwork bytes (legacy multipart upload).
    Bytes(&'a [u8]),
    /// Content-addressed reference (content-addressed upload).
    Ref(&'a str),
}

/// Similarity verdict, percentages in `0.0..=100.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SimilarityScore {
    pub image_similarity: f64,
    pub metadata_similarity: f64,
    pub confidence: f64,
}

/// Above this image-similarity percentage a submission is deemed a duplicate.
const DUPLICATE_CUTOFF: f64 = 50.0;

impl SimilarityScore {
    /// Originality verdict used for the orchestrator's own vote at
    /// submission time.
    pub fn deems_original(&self) -> bool {
        self.image_similarity < DUPLICATE_CUTOFF
    }
}

/// Capability interface for similarity scoring.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn score(&self, source: ContentSource<'_>) -> SimilarityScore;
}

/// Deterministic stand-in scorer: scores are pseudo-random but fixed per
/// content, derived from a Blake2b hash of the input.
#[derive(Default)]
pub struct StubScorer;

impl StubScorer {
    fn seed(source: ContentSource<'_>) -> [u8; 32] {
        match source {
            ContentSource::Bytes(data) => artchain_crypto::blake2b_256(data),
            ContentSource::Ref(uri) => artchain_crypto::blake2b_256(uri.as_bytes()),
        }
    }

    fn pct(bytes: &[u8]) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        (u64::from_be_bytes(raw) % 10_000) as f64 / 100.0
    }
}

#[async_trait]
impl SimilarityScorer for StubScorer {
    async fn score(&self, source: ContentSource<'_>) -> SimilarityScore {
        let seed = Self::seed(source);
        SimilarityScore {
            image_similarity: Self::pct(&seed[0..8]),
            metadata_similarity: Self::pct(&seed[8..16]),
            confidence: Self::pct(&seed[16..24]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_is_deterministic_per_content() {
        let scorer = StubScorer;
        let a = scorer.score(ContentSource::Bytes(b"mona lisa")).await;
        let b = scorer.score(ContentSource::Bytes(b"mona lisa")).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn stub_scores_are_percentages() {
        let scorer = StubScorer;
        let score = scorer.score(ContentSource::Ref("ipfs://bafyexample")).await;
        for v in [
            score.image_similarity,
            score.metadata_similarity,
            score.confidence,
        ] {
            assert!((0.0..=100.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn verdict_follows_cutoff() {
        let original = SimilarityScore {
            image_similarity: 10.0,
            metadata_similarity: 0.0,
            confidence: 90.0,
        };
        let duplicate = SimilarityScore {
            image_similarity: 92.5,
            metadata_similarity: 0.0,
            confidence: 90.0,
        };
        assert!(original.deems_original());
        assert!(!duplicate.deems_original());
    }
}
