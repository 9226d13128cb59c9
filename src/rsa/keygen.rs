// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use num_traits::One;
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument, warn};

use crate::bigint::{self, BigNum};
use crate::error::{CryptoError, Result};
use crate::util::RsaConfig;

/// RSA Public Key `(e, n)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    e: BigNum,
    n: BigNum,
}

/// RSA Private Key `(d, n)`
///
/// The prime factors are kept alongside for consistency checks and are
/// never handed out.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    d: BigNum,
    n: BigNum,
    p: BigNum,
    q: BigNum,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    /// Build a public key from an externally supplied `(e, n)`.
    pub fn from_components(e: BigNum, n: BigNum) -> Result<Self> {
        if n <= BigNum::from(2u8) {
            return Err(CryptoError::InvalidPublicKey(format!(
                "modulus must be greater than 2, got {}",
                n
            )));
        }
        if e < BigNum::from(3u8) {
            return Err(CryptoError::InvalidPublicKey(format!(
                "public exponent must be at least 3, got {}",
                e
            )));
        }
        Ok(Self { e, n })
    }

    pub fn e(&self) -> &BigNum {
        &self.e
    }

    pub fn n(&self) -> &BigNum {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Length in bytes of every ciphertext produced under this key
    pub fn modulus_len(&self) -> usize {
        bigint::byte_len(&self.n)
    }

    /// Encrypt a message using this public key
    /// Returns ciphertext as bytes
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        super::encrypt::encrypt_bytes(plaintext, self)
    }

    pub fn encrypt_str(&self, plaintext: &str) -> Result<Vec<u8>> {
        super::encrypt::encrypt_string(plaintext, self)
    }
}

impl RsaPrivateKey {
    pub(crate) fn d(&self) -> &BigNum {
        &self.d
    }

    pub fn n(&self) -> &BigNum {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    pub fn modulus_len(&self) -> usize {
        bigint::byte_len(&self.n)
    }

    /// Decrypt a ciphertext using this private key
    /// Returns plaintext as bytes
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        super::decrypt::decrypt_bytes(ciphertext, self)
    }

    pub fn decrypt_to_string(&self, ciphertext: &[u8]) -> Result<String> {
        super::decrypt::decrypt_to_string(ciphertext, self)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

impl RsaKeyPair {
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Generate an RSA key pair.
///
/// Draws two independent primes of `config.prime_bits` bits and derives
/// `d = e^-1 mod φ(n)`. A draw with `p == q` or `gcd(e, φ) != 1` is discarded
/// and redrawn, up to `config.max_attempts` times.
#[instrument(
    level = "info",
    skip_all,
    fields(prime_bits = config.prime_bits, e = config.public_exponent)
)]
pub fn generate_keypair<R>(config: &RsaConfig, rng: &mut R) -> Result<RsaKeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    config.validate()?;
    let e = bigint::from_u64(config.public_exponent);

    for attempt in 1..=config.max_attempts {
        let p = bigint::random_prime(config.prime_bits, config.primality_rounds, rng)?;
        let q = bigint::random_prime(config.prime_bits, config.primality_rounds, rng)?;

        if p == q {
            warn!(attempt, "drew identical primes, redrawing");
            continue;
        }

        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);

        if !bigint::gcd(&e, &phi).is_one() {
            warn!(attempt, "public exponent not coprime with phi, redrawing");
            continue;
        }
        let Some(d) = bigint::mod_inverse(&e, &phi) else {
            warn!(attempt, "no inverse for public exponent, redrawing");
            continue;
        };

        debug!(attempt, modulus_bits = n.bits(), "generated RSA key pair");
        let public_key = RsaPublicKey { e: e.clone(), n: n.clone() };
        let private_key = RsaPrivateKey { d, n, p, q };
        return Ok(RsaKeyPair {
            public_key,
            private_key,
        });
    }

    Err(CryptoError::KeyGeneration {
        attempts: config.max_attempts,
    })
}

/// Generate RSA key pair with default settings (2048 bits, e=65537)
pub fn generate_default_keypair<R>(rng: &mut R) -> Result<RsaKeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    generate_keypair(&RsaConfig::default(), rng)
}
