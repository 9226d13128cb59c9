//! Cyclic group description `(p, q, g)` shared by signers and verifiers.

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use crate::bigint::{self, BigNum};
use crate::error::{CryptoError, Result};

/// Group parameters for the Schnorr scheme.
///
/// `p` is prime, `q` is a prime divisor of `p - 1` and `g` generates the
/// subgroup of order `q` in the multiplicative group mod `p`. Every
/// constructor guarantees `p >= 3` and `q >= 2`, so arithmetic mod `p` and
/// `q` is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParams {
    p: BigNum,
    q: BigNum,
    g: BigNum,
}

impl GroupParams {
    /// Validated constructor.
    ///
    /// Checks `q | p - 1`, `1 < g < p` and `g^q ≡ 1 (mod p)`. Primality of `p`
    /// and `q` is the caller's responsibility.
    pub fn new(p: BigNum, q: BigNum, g: BigNum) -> Result<Self> {
        let params = Self::new_unchecked(p, q, g)?;
        params.validate()?;
        Ok(params)
    }

    /// Accepts the parameters without the subgroup checks.
    ///
    /// Only moduli that leave the arithmetic undefined (`p < 3`, `q < 2`)
    /// are rejected.
    pub fn new_unchecked(p: BigNum, q: BigNum, g: BigNum) -> Result<Self> {
        if p < BigNum::from(3u8) {
            return Err(CryptoError::InvalidGroupParams(format!(
                "p must be at least 3, got {}",
                p
            )));
        }
        if q < BigNum::from(2u8) {
            return Err(CryptoError::InvalidGroupParams(format!(
                "q must be at least 2, got {}",
                q
            )));
        }
        Ok(Self { p, q, g })
    }

    /// The toy group `p = 23, q = 11, g = 2`. Demonstration only.
    pub fn demo() -> Self {
        Self {
            p: bigint::from_u64(23),
            q: bigint::from_u64(11),
            g: bigint::from_u64(2),
        }
    }

    /// Generates a fresh group with a `q_bits`-bit prime order inside a
    /// `p_bits`-bit prime field.
    #[instrument(level = "info", skip_all, fields(q_bits = q_bits, p_bits = p_bits))]
    pub fn generate<R>(q_bits: u64, p_bits: u64, rounds: u32, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if q_bits < 2 || p_bits < q_bits + 3 {
            return Err(CryptoError::InvalidConfig(format!(
                "need 2 <= q_bits and q_bits + 3 <= p_bits, got q_bits = {}, p_bits = {}",
                q_bits, p_bits
            )));
        }

        // p = k*q + 1 with the top two bits of the even cofactor k set, so p
        // has exactly p_bits bits. A q admitting no prime p is redrawn.
        let cofactor_bits = p_bits - q_bits;
        let top = (BigNum::one() << (cofactor_bits - 1)) | (BigNum::one() << (cofactor_bits - 2));
        let tries_per_order = 4 * p_bits;
        let (p, q) = 'order: loop {
            let q = bigint::random_prime(q_bits, rounds, rng)?;
            for candidate in 1..=tries_per_order {
                let mut k = rng.gen_biguint(cofactor_bits) | &top;
                if k.is_odd() {
                    k -= 1u8;
                }
                let p = &k * &q + 1u8;
                if p.bits() == p_bits && bigint::is_probable_prime(&p, rounds, rng) {
                    debug!(candidate, "found prime field modulus");
                    break 'order (p, q);
                }
            }
            debug!("no prime field modulus for this order, redrawing q");
        };

        let exponent = (&p - 1u8) / &q;
        let mut h = BigNum::from(2u8);
        let g = loop {
            let g = h.modpow(&exponent, &p);
            if !g.is_one() {
                break g;
            }
            h += 1u8;
        };

        Self::new(p, q, g)
    }

    /// Checks the subgroup relations.
    pub fn validate(&self) -> Result<()> {
        if !((&self.p - 1u8) % &self.q).is_zero() {
            return Err(CryptoError::InvalidGroupParams(
                "q does not divide p - 1".to_string(),
            ));
        }
        if self.g <= BigNum::one() || self.g >= self.p {
            return Err(CryptoError::InvalidGroupParams(
                "g must satisfy 1 < g < p".to_string(),
            ));
        }
        if !self.g.modpow(&self.q, &self.p).is_one() {
            return Err(CryptoError::InvalidGroupParams(
                "g does not have order q".to_string(),
            ));
        }
        Ok(())
    }

    pub fn p(&self) -> &BigNum {
        &self.p
    }

    pub fn q(&self) -> &BigNum {
        &self.q
    }

    pub fn g(&self) -> &BigNum {
        &self.g
    }

    /// `g^exp mod p`
    pub(crate) fn pow_g(&self, exp: &BigNum) -> BigNum {
        self.g.modpow(exp, &self.p)
    }

    /// `base^exp mod p`
    pub(crate) fn pow(&self, base: &BigNum, exp: &BigNum) -> BigNum {
        base.modpow(exp, &self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::from_u64;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_params_are_valid() {
        let params = GroupParams::demo();
        assert!(params.validate().is_ok());
        assert_eq!(
            GroupParams::new(from_u64(23), from_u64(11), from_u64(2)).unwrap(),
            params
        );
    }

    #[test]
    fn test_new_rejects_bad_params() {
        // 7 does not divide 22
        assert!(GroupParams::new(from_u64(23), from_u64(7), from_u64(2)).is_err());
        // g = 1 and g = p
        assert!(GroupParams::new(from_u64(23), from_u64(11), from_u64(1)).is_err());
        assert!(GroupParams::new(from_u64(23), from_u64(11), from_u64(23)).is_err());
        // 5 generates the whole group of order 22
        assert!(GroupParams::new(from_u64(23), from_u64(11), from_u64(5)).is_err());
    }

    #[test]
    fn test_unchecked_only_rejects_undefined_moduli() {
        assert!(GroupParams::new_unchecked(from_u64(23), from_u64(7), from_u64(5)).is_ok());
        assert!(GroupParams::new_unchecked(from_u64(2), from_u64(11), from_u64(2)).is_err());
        assert!(GroupParams::new_unchecked(from_u64(23), from_u64(1), from_u64(2)).is_err());
    }

    #[test]
    fn test_generate() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = GroupParams::generate(32, 96, 20, &mut rng).unwrap();

        assert_eq!(params.q().bits(), 32);
        assert_eq!(params.p().bits(), 96);
        assert!(bigint::is_probable_prime(params.p(), 20, &mut rng));
        assert!(bigint::is_probable_prime(params.q(), 20, &mut rng));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_generate_rejects_bad_sizes() {
        let mut rng = StdRng::seed_from_u64(6);
        assert!(GroupParams::generate(1, 64, 20, &mut rng).is_err());
        assert!(GroupParams::generate(32, 34, 20, &mut rng).is_err());
    }
}
