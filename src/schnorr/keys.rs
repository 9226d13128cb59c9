//! Signing and verifying keys for the Schnorr scheme.

use std::fmt;

use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use super::hash::{challenge, ChallengeHash, Sha256Challenge};
use super::params::GroupParams;
use super::signature::Signature;
use crate::bigint::{self, BigNum};
use crate::error::{CryptoError, Result};

/// Nonces drawn per signature before giving up on a degenerate `(e, s)`.
const MAX_NONCE_ATTEMPTS: u32 = 128;

/// A secret signing key `x` with `0 < x < q`.
///
/// Signing draws its nonce from the caller's random source; there is no way
/// to supply a nonce directly.
#[derive(Clone)]
pub struct SigningKey<H = Sha256Challenge> {
    params: GroupParams,
    x: BigNum,
    hasher: H,
}

/// A public verifying key `y = g^(q - x) mod p`, that is `g^-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey<H = Sha256Challenge> {
    params: GroupParams,
    y: BigNum,
    hasher: H,
}

/// A signing key together with its derived verifying key.
#[derive(Clone)]
pub struct SchnorrKeyPair<H = Sha256Challenge> {
    signing_key: SigningKey<H>,
    verifying_key: VerifyingKey<H>,
}

impl SigningKey<Sha256Challenge> {
    /// Generates a random signing key in `(0, q)`.
    pub fn generate<R>(params: &GroupParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        Self::generate_with_hasher(params, Sha256Challenge, rng)
    }

    /// Wraps an existing private key. Fails unless `0 < x < q`.
    pub fn from_private(params: &GroupParams, x: BigNum) -> Result<Self> {
        Self::from_private_with_hasher(params, Sha256Challenge, x)
    }
}

impl<H: ChallengeHash + Clone> SigningKey<H> {
    pub fn generate_with_hasher<R>(params: &GroupParams, hasher: H, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let x = bigint::random_in_open_range(params.q(), rng)?;
        Ok(Self {
            params: params.clone(),
            x,
            hasher,
        })
    }

    pub fn from_private_with_hasher(params: &GroupParams, hasher: H, x: BigNum) -> Result<Self> {
        if x.is_zero() || &x >= params.q() {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Ok(Self {
            params: params.clone(),
            x,
            hasher,
        })
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Derives `y = g^((q - x) mod q) mod p`.
    pub fn verifying_key(&self) -> VerifyingKey<H> {
        let q = self.params.q();
        let exponent = (q - &self.x) % q;
        VerifyingKey {
            params: self.params.clone(),
            y: self.params.pow_g(&exponent),
            hasher: self.hasher.clone(),
        }
    }

    /// Signs a message.
    ///
    /// 1. Draw a fresh nonce `k` in `(0, q)`
    /// 2. `r = g^k mod p`
    /// 3. `e = H(message || r) mod q`
    /// 4. `s = (k + x*e) mod q`
    ///
    /// A nonce giving `e == 0` or `s == 0` would never verify, so it is
    /// discarded and another is drawn.
    #[instrument(
        level = "debug",
        skip_all,
        fields(len = message.len(), hash = self.hasher.name())
    )]
    pub fn sign<R>(&self, rng: &mut R, message: &[u8]) -> Result<Signature>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let q = self.params.q();

        for attempt in 1..=MAX_NONCE_ATTEMPTS {
            let k = bigint::random_in_open_range(q, rng)?;
            let r = self.params.pow_g(&k);
            let e = challenge(&self.hasher, message, &r, q);
            let s = (&k + &self.x * &e) % q;

            if e.is_zero() || s.is_zero() {
                debug!(attempt, "degenerate signature, drawing another nonce");
                continue;
            }
            return Ok(Signature::new(e, s));
        }

        Err(CryptoError::NonceExhausted {
            attempts: MAX_NONCE_ATTEMPTS,
        })
    }
}

impl<H: ChallengeHash> fmt::Debug for SigningKey<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("params", &self.params)
            .field("x", &"<redacted>")
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

impl<H: ChallengeHash + fmt::Debug> fmt::Debug for SchnorrKeyPair<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchnorrKeyPair")
            .field("signing_key", &self.signing_key)
            .field("verifying_key", &self.verifying_key)
            .finish()
    }
}

impl VerifyingKey<Sha256Challenge> {
    /// Wraps an externally supplied public key. Fails unless `0 < y < p`.
    pub fn from_public(params: &GroupParams, y: BigNum) -> Result<Self> {
        Self::from_public_with_hasher(params, Sha256Challenge, y)
    }
}

impl<H: ChallengeHash> VerifyingKey<H> {
    pub fn from_public_with_hasher(params: &GroupParams, hasher: H, y: BigNum) -> Result<Self> {
        if y.is_zero() || &y >= params.p() {
            return Err(CryptoError::InvalidPublicKey(
                "y must satisfy 0 < y < p".to_string(),
            ));
        }
        Ok(Self {
            params: params.clone(),
            y,
            hasher,
        })
    }

    pub fn y(&self) -> &BigNum {
        &self.y
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    /// Verifies a signature on a message.
    ///
    /// Returns `false` for `e == 0`, `s == 0` or `s >= q` without further
    /// work. Otherwise recomputes `r' = g^s * y^e mod p` and accepts iff
    /// `H(message || r') mod q == e`.
    #[instrument(
        level = "debug",
        skip_all,
        fields(len = message.len(), hash = self.hasher.name())
    )]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let q = self.params.q();
        let (e, s) = (signature.e(), signature.s());

        if e.is_zero() || s.is_zero() || s >= q {
            debug!("signature values out of range");
            return false;
        }

        let p = self.params.p();
        let r = (self.params.pow_g(s) * self.params.pow(&self.y, e)) % p;

        &challenge(&self.hasher, message, &r, q) == e
    }
}

impl<H: ChallengeHash + Clone> From<&SigningKey<H>> for VerifyingKey<H> {
    fn from(sk: &SigningKey<H>) -> Self {
        sk.verifying_key()
    }
}

impl SchnorrKeyPair<Sha256Challenge> {
    pub fn generate<R>(params: &GroupParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        Ok(Self::from_signing_key(SigningKey::generate(params, rng)?))
    }

    pub fn from_private(params: &GroupParams, x: BigNum) -> Result<Self> {
        Ok(Self::from_signing_key(SigningKey::from_private(params, x)?))
    }
}

impl<H: ChallengeHash + Clone> SchnorrKeyPair<H> {
    pub fn from_signing_key(signing_key: SigningKey<H>) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    pub fn signing_key(&self) -> &SigningKey<H> {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey<H> {
        &self.verifying_key
    }

    pub fn sign<R>(&self, rng: &mut R, message: &[u8]) -> Result<Signature>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.signing_key.sign(rng, message)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.verifying_key.verify(message, signature)
    }
}
