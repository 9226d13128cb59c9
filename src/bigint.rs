// Big Integer Operations
// Modular arithmetic, primality and byte conversions shared by RSA and Schnorr

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};

/// Arbitrary-precision non-negative integer used by every primitive.
pub type BigNum = BigUint;

/// Primes used to reject most composites before Miller-Rabin.
const SMALL_PRIMES: [u32; 24] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> BigNum {
    BigNum::from(n)
}

/// Read bytes as an unsigned big-endian integer. Empty input is zero.
pub fn from_bytes_be(bytes: &[u8]) -> BigNum {
    BigNum::from_bytes_be(bytes)
}

/// Minimal unsigned big-endian encoding. Zero encodes as an empty slice.
pub fn to_bytes_be(n: &BigNum) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Unsigned big-endian encoding left-padded with zeros to exactly `len` bytes.
pub fn to_fixed_bytes_be(n: &BigNum, len: usize) -> Result<Vec<u8>> {
    let bytes = to_bytes_be(n);
    if bytes.len() > len {
        return Err(CryptoError::Overflow { len });
    }
    let mut out = vec![0u8; len];
    out[len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Drop a single leading zero byte, as written by signed two's-complement
/// encoders to keep a set high bit from reading as negative.
pub fn strip_sign_byte(bytes: &[u8]) -> &[u8] {
    match bytes.split_first() {
        Some((0, rest)) => rest,
        _ => bytes,
    }
}

/// Number of bytes needed to hold `n`'s bit length.
pub fn byte_len(n: &BigNum) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &BigNum, exp: &BigNum, modulus: &BigNum) -> Result<BigNum> {
    if modulus.is_zero() {
        return Err(CryptoError::ZeroModulus);
    }
    if modulus.is_one() {
        return Ok(BigNum::zero());
    }
    Ok(base.modpow(exp, modulus))
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &BigNum, m: &BigNum) -> Option<BigNum> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());

    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }

    // mod_floor keeps the result in [0, m) even when x is negative
    egcd.x.mod_floor(&m).to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &BigNum, b: &BigNum) -> BigNum {
    a.gcd(b)
}

/// Miller-Rabin primality test with `rounds` random witnesses.
/// Returns true if n is probably prime
pub fn is_probable_prime<R>(n: &BigNum, rounds: u32, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    let two = BigNum::from(2u8);
    if n < &two {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = BigNum::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a random probable prime of exactly `bits` bits.
///
/// The two most significant bits are set, so the product of two such primes
/// has exactly `2 * bits` bits.
pub fn random_prime<R>(bits: u64, rounds: u32, rng: &mut R) -> Result<BigNum>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bits < 2 {
        return Err(CryptoError::InvalidConfig(format!(
            "prime bit length must be at least 2, got {}",
            bits
        )));
    }

    let top = (BigNum::one() << (bits - 1)) | (BigNum::one() << (bits - 2));
    loop {
        let candidate = rng.gen_biguint(bits) | &top | BigNum::one();
        if is_probable_prime(&candidate, rounds, rng) {
            return Ok(candidate);
        }
    }
}

/// Uniform random integer in [0, bound)
pub fn random_below<R>(bound: &BigNum, rng: &mut R) -> Result<BigNum>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bound.is_zero() {
        return Err(CryptoError::EmptyRange);
    }
    Ok(rng.gen_biguint_below(bound))
}

/// Uniform random integer in the open interval (0, bound)
pub fn random_in_open_range<R>(bound: &BigNum, rng: &mut R) -> Result<BigNum>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bound <= &BigNum::one() {
        return Err(CryptoError::EmptyRange);
    }
    Ok(rng.gen_biguint_range(&BigNum::one(), bound))
}
