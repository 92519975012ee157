//! The two content-fingerprint derivation paths.
//!
//! Raw-bytes path: hash of the artwork bytes. Content-addressed path: hash of
//! a canonical serialization of {primary ref, title, submitter}. Both are
//! deterministic — resubmitting identical content always produces the same
//! fingerprint, which is what lets the ledger reject duplicates.
//!
//! Fields in the canonical serialization are length-prefixed so that field
//! boundaries cannot collide ("ab","c" vs "a","bc").

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use thiserror::Error;

use artchain_types::{AccountAddress, ContentId};

/// Domain tag for the content-addressed derivation path.
const CONTENT_REF_DOMAIN: &[u8] = b"artchain.fingerprint.refs.v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("content ref list is empty")]
    EmptyRefList,

    #[error("primary content ref is blank")]
    BlankPrimaryRef,

    #[error("missing required metadata: {0}")]
    MissingMetadata(&'static str),
}

/// Raw-bytes path: fingerprint = Blake2b-256 of the artwork bytes.
pub fn fingerprint_bytes(data: &[u8]) -> ContentId {
    ContentId::new(crate::hash::blake2b_256(data))
}

/// Content-addressed path: fingerprint over the primary ref plus immutable
/// metadata.
///
/// Only the first ref participates — additional refs are renditions of the
/// same content and must not change the identity.
pub fn fingerprint_content_refs(
    content_refs: &[String],
    title: &str,
    submitter: &AccountAddress,
) -> Result<ContentId, FingerprintError> {
    let primary = content_refs.first().ok_or(FingerprintError::EmptyRefList)?;
    if primary.trim().is_empty() {
        return Err(FingerprintError::BlankPrimaryRef);
    }
    if title.trim().is_empty() {
        return Err(FingerprintError::MissingMetadata("title"));
    }

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(CONTENT_REF_DOMAIN);
    for field in [primary.as_bytes(), title.as_bytes(), submitter.as_str().as_bytes()] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    Ok(ContentId::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn submitter() -> AccountAddress {
        AccountAddress::new("0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af")
    }

    #[test]
    fn content_ref_path_is_deterministic() {
        let refs = vec!["ipfs://bafybeigdyrzt".to_string()];
        let a = fingerprint_content_refs(&refs, "Dusk", &submitter()).unwrap();
        let b = fingerprint_content_refs(&refs, "Dusk", &submitter()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn secondary_refs_do_not_change_identity() {
        let one = vec!["ipfs://primary".to_string()];
        let two = vec!["ipfs://primary".to_string(), "ipfs://thumb".to_string()];
        let a = fingerprint_content_refs(&one, "Dusk", &submitter()).unwrap();
        let b = fingerprint_content_refs(&two, "Dusk", &submitter()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn title_participates_in_identity() {
        let refs = vec!["ipfs://primary".to_string()];
        let a = fingerprint_content_refs(&refs, "Dusk", &submitter()).unwrap();
        let b = fingerprint_content_refs(&refs, "Dawn", &submitter()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_ref_list_is_rejected() {
        let err = fingerprint_content_refs(&[], "Dusk", &submitter()).unwrap_err();
        assert_eq!(err, FingerprintError::EmptyRefList);
    }

    #[test]
    fn blank_primary_ref_is_rejected() {
        let refs = vec!["   ".to_string()];
        let err = fingerprint_content_refs(&refs, "Dusk", &submitter()).unwrap_err();
        assert_eq!(err, FingerprintError::BlankPrimaryRef);
    }

    #[test]
    fn blank_title_is_rejected() {
        let refs = vec!["ipfs://primary".to_string()];
        let err = fingerprint_content_refs(&refs, "", &submitter()).unwrap_err();
        assert_eq!(err, FingerprintError::MissingMetadata("title"));
    }

    #[test]
    fn field_boundaries_do_not_collide() {
        let a = fingerprint_content_refs(&["ipfs://xy".to_string()], "z", &submitter()).unwrap();
        let b = fingerprint_content_refs(&["ipfs://x".to_string()], "yz", &submitter()).unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        /// Raw-bytes path: identical bytes produce identical ids, always.
        #[test]
        fn raw_bytes_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(fingerprint_bytes(&data), fingerprint_bytes(&data));
        }

        /// Distinct single-byte appends produce distinct fingerprints.
        #[test]
        fn raw_bytes_sensitive_to_content(data in proptest::collection::vec(any::<u8>(), 1..256)) {
            let mut tweaked = data.clone();
            tweaked[0] = tweaked[0].wrapping_add(1);
            prop_assert_ne!(fingerprint_bytes(&data), fingerprint_bytes(&tweaked));
        }
    }
}
