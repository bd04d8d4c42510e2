//! Certificate fingerprint (digest) computation and matching.

use crate::fields::DigestAlgorithm;
use crate::util;
use digest::Digest;

/// Compute the fingerprint of certificate file bytes.
///
/// Returns a colon-separated uppercase hex string (e.g., "AB:CD:EF:...").
pub fn compute_fingerprint(bytes: &[u8], algorithm: DigestAlgorithm) -> String {
    util::hex_colon_upper(&digest_bytes(bytes, algorithm))
}

fn digest_bytes(bytes: &[u8], algorithm: DigestAlgorithm) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha256 => sha2::Sha256::digest(bytes).to_vec(),
        DigestAlgorithm::Sha384 => sha2::Sha384::digest(bytes).to_vec(),
        DigestAlgorithm::Sha512 => sha2::Sha512::digest(bytes).to_vec(),
        DigestAlgorithm::Sha1 => sha1::Sha1::digest(bytes).to_vec(),
    }
}

/// Pick the digest a declared fingerprint was made with, from its length.
///
/// Accepts colon-separated or compact hex in either case.
pub fn detect_algorithm(fingerprint: &str) -> Option<DigestAlgorithm> {
    match util::normalize_fingerprint(fingerprint).len() {
        40 => Some(DigestAlgorithm::Sha1),
        64 => Some(DigestAlgorithm::Sha256),
        96 => Some(DigestAlgorithm::Sha384),
        128 => Some(DigestAlgorithm::Sha512),
        _ => None,
    }
}

/// Whether `bytes` hash to the declared `fingerprint`.
///
/// Returns `false` when the fingerprint length matches no supported digest.
pub fn fingerprint_matches(bytes: &[u8], fingerprint: &str) -> bool {
    match detect_algorithm(fingerprint) {
        Some(algorithm) => {
            hex::encode(digest_bytes(bytes, algorithm)) == util::normalize_fingerprint(fingerprint)
        }
        None => false,
    }
}
