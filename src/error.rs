// Error Types
// Failures shared by the arithmetic layer, RSA and Schnorr

use thiserror::Error;

/// Errors produced by key generation, encryption, decryption and signing.
///
/// Signature verification never produces one of these: a malformed or
/// forged signature is simply reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The message, read as an unsigned integer, is not below the modulus.
    #[error("message too large for modulus: {message_bits} bits, modulus is {modulus_bits} bits")]
    MessageTooLarge { message_bits: u64, modulus_bits: u64 },

    #[error("invalid ciphertext length: expected at most {expected} bytes, got {actual}")]
    InvalidCiphertextLength { expected: usize, actual: usize },

    #[error("ciphertext is not below the modulus")]
    CiphertextOutOfRange,

    #[error("decrypted message is not valid UTF-8")]
    InvalidUtf8,

    /// Every draw of primes was degenerate (`p == q` or `gcd(e, φ) != 1`).
    #[error("key generation failed after {attempts} attempts")]
    KeyGeneration { attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid group parameters: {0}")]
    InvalidGroupParams(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The private key is outside `(0, q)`.
    #[error("private key must satisfy 0 < x < q")]
    InvalidPrivateKey,

    /// Signing could not find a nonce giving a non-zero challenge and response.
    #[error("no usable nonce found after {attempts} attempts")]
    NonceExhausted { attempts: u32 },

    /// Sampling from `(0, bound)` was requested with `bound <= 1`.
    #[error("cannot sample from an empty range")]
    EmptyRange,

    #[error("modulus must be non-zero")]
    ZeroModulus,

    #[error("value does not fit in {len} bytes")]
    Overflow { len: usize },

    #[error("malformed signature encoding: {0}")]
    MalformedSignature(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
