//! Challenge hashing for the Schnorr scheme.

use num_traits::Zero;
use sha2::{Digest, Sha256, Sha512};

use crate::bigint::{self, BigNum};

/// A fixed-output cryptographic hash used to derive the Fiat-Shamir challenge.
///
/// Signing and verification only see this trait, so the digest algorithm can
/// be upgraded without touching either.
pub trait ChallengeHash {
    /// Algorithm name, used in log fields.
    fn name(&self) -> &'static str;

    /// Digest length in bytes.
    fn output_len(&self) -> usize;

    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA-256, the default challenge hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Challenge;

impl ChallengeHash for Sha256Challenge {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn output_len(&self) -> usize {
        32
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }
}

/// SHA-512, for groups whose order exceeds the 128-bit truncated SHA-256 width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha512Challenge;

impl ChallengeHash for Sha512Challenge {
    fn name(&self) -> &'static str {
        "sha512"
    }

    fn output_len(&self) -> usize {
        64
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        Sha512::digest(data).to_vec()
    }
}

/// Computes `e = int(H(message || r)[..len/2]) mod q`.
///
/// `r` enters the hash as its minimal unsigned big-endian encoding. The
/// digest is truncated to its first half before the reduction, in that order.
/// A zero `q` yields zero.
pub fn challenge<H>(hasher: &H, message: &[u8], commitment: &BigNum, q: &BigNum) -> BigNum
where
    H: ChallengeHash + ?Sized,
{
    if q.is_zero() {
        return BigNum::zero();
    }

    let commitment = bigint::to_bytes_be(commitment);
    let mut input = Vec::with_capacity(message.len() + commitment.len());
    input.extend_from_slice(message);
    input.extend_from_slice(&commitment);

    let digest = hasher.digest(&input);
    let truncated = &digest[..digest.len() / 2];

    bigint::from_bytes_be(truncated) % q
}
