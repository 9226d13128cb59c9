//! Schnorr identification and signature scheme over a prime-order subgroup
//! of the multiplicative group mod `p`.
//!
//! # Overview
//!
//! - [`GroupParams`] describes the group `(p, q, g)`; it is shared and read-only
//! - [`SigningKey`] holds the secret `x` and produces [`Signature`]s
//! - [`VerifyingKey`] holds `y = g^-x mod p` and checks them
//! - [`ChallengeHash`] is the hash behind the challenge, SHA-256 by default
//!
//! # Example
//!
//! ```
//! use pkdemo::schnorr::{GroupParams, SchnorrKeyPair};
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let params = GroupParams::demo();
//! let keypair = SchnorrKeyPair::generate(&params, &mut rng).expect("keygen");
//!
//! let signature = keypair.sign(&mut rng, b"Hello, Schnorr Signature!").expect("sign");
//! assert!(keypair.verify(b"Hello, Schnorr Signature!", &signature));
//! ```
//!
//! # Security Considerations
//!
//! - Use a cryptographically secure random source; it supplies every nonce
//! - The demo group is far too small for real use
//! - Arithmetic is not constant-time

mod hash;
mod keys;
mod params;
mod signature;


pub use hash::{challenge, ChallengeHash, Sha256Challenge, Sha512Challenge};
pub use keys::{SchnorrKeyPair, SigningKey, VerifyingKey};
pub use params::GroupParams;
pub use signature::Signature;
