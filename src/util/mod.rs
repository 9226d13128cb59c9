// Utility Module
// Configuration shared by the primitives

pub mod config;

pub use config::{RsaConfig, MIN_PRIME_BITS};
