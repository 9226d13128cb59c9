// Key Generation Configuration
// Tunables for RSA key generation with builder-style setters

use crate::error::{CryptoError, Result};

/// Smallest prime size accepted for RSA factors.
pub const MIN_PRIME_BITS: u64 = 64;

/// Configuration for RSA key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaConfig {
    /// Bit length of each prime factor; the modulus has twice as many bits.
    pub prime_bits: u64,
    pub public_exponent: u64,
    /// Miller-Rabin rounds per candidate prime.
    pub primality_rounds: u32,
    /// Number of prime pairs drawn before giving up on a degenerate result.
    pub max_attempts: u32,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            prime_bits: 1024,
            public_exponent: 65537,
            primality_rounds: 40,
            max_attempts: 16,
        }
    }
}

impl RsaConfig {
    pub fn with_prime_bits(mut self, bits: u64) -> Self {
        self.prime_bits = bits;
        self
    }

    /// Sets the prime size from a target modulus size.
    pub fn with_modulus_bits(mut self, bits: u64) -> Self {
        self.prime_bits = bits / 2;
        self
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn modulus_bits(&self) -> u64 {
        self.prime_bits * 2
    }

    /// Check the configuration before any primes are drawn.
    pub fn validate(&self) -> Result<()> {
        if self.prime_bits < MIN_PRIME_BITS {
            return Err(CryptoError::InvalidConfig(format!(
                "prime bit length must be at least {}, got {}",
                MIN_PRIME_BITS, self.prime_bits
            )));
        }
        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(CryptoError::InvalidConfig(format!(
                "public exponent must be odd and at least 3, got {}",
                self.public_exponent
            )));
        }
        if self.primality_rounds == 0 {
            return Err(CryptoError::InvalidConfig(
                "primality rounds must be non-zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(CryptoError::InvalidConfig(
                "max attempts must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
