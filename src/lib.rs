//! Textbook public-key primitives over arbitrary-precision integers.
//!
//! - [`rsa`]: raw RSA key generation, encryption and decryption
//! - [`schnorr`]: Schnorr signatures over a prime-order subgroup mod `p`
//! - [`bigint`]: the modular arithmetic both are built on
//!
//! Every operation that needs randomness takes the random source as an
//! argument. Nothing here is constant-time.

pub mod bigint;
pub mod error;
pub mod rsa;
pub mod schnorr;
pub mod util;

pub use error::{CryptoError, Result};
