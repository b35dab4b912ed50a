//! Blake2b hashing for content fingerprints and response digests.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use helix_types::{BountyId, ContentHash, Digest, Timestamp, TokenId, WalletAddress};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Fingerprint an encrypted content blob for integrity verification.
pub fn hash_content(blob: &[u8]) -> ContentHash {
    ContentHash::new(blake2b_256(blob))
}

/// Deterministic digest binding a bounty response to its inputs.
///
/// Computed over `(bounty_id, token_id, responder, result_value, timestamp)`
/// in fixed big-endian layout, so any party can recompute and compare.
pub fn response_digest(
    bounty_id: BountyId,
    token_id: TokenId,
    responder: &WalletAddress,
    result_value: bool,
    timestamp: Timestamp,
) -> Digest {
    Digest::new(blake2b_256_multi(&[
        &bounty_id.to_be_bytes(),
        &token_id.to_be_bytes(),
        responder.as_str().as_bytes(),
        &[result_value as u8],
        &timestamp.as_secs().to_be_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"helix vault");
        let h2 = blake2b_256(b"helix vault");
        assert_eq!(h1, h2);
    }

    #[test]
    fn blake2b_different_inputs() {
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn content_hash_nonzero_for_empty_blob() {
        assert!(!hash_content(b"").is_zero());
    }

    #[test]
    fn response_digest_binds_every_field() {
        let responder = WalletAddress::new("hlx_responder");
        let base = response_digest(1, 2, &responder, true, Timestamp::new(100));

        assert_ne!(base, response_digest(9, 2, &responder, true, Timestamp::new(100)));
        assert_ne!(base, response_digest(1, 9, &responder, true, Timestamp::new(100)));
        assert_ne!(
            base,
            response_digest(1, 2, &WalletAddress::new("hlx_other"), true, Timestamp::new(100))
        );
        assert_ne!(base, response_digest(1, 2, &responder, false, Timestamp::new(100)));
        assert_ne!(base, response_digest(1, 2, &responder, true, Timestamp::new(101)));
    }

    #[test]
    fn response_digest_stable_across_calls() {
        let responder = WalletAddress::new("hlx_responder");
        let d1 = response_digest(7, 3, &responder, false, Timestamp::new(42));
        let d2 = response_digest(7, 3, &responder, false, Timestamp::new(42));
        assert_eq!(hex::encode(d1.as_bytes()), hex::encode(d2.as_bytes()));
    }
}
