// RSA Encryption Implementation
// Raw (unpadded) RSA: c = m^e mod n

use tracing::instrument;

use super::keygen::RsaPublicKey;
use crate::bigint::{from_bytes_be, mod_pow, to_fixed_bytes_be};
use crate::error::{CryptoError, Result};

/// Encrypt bytes using RSA public key
///
/// The plaintext is read as an unsigned big-endian integer `m`, which must be
/// below the modulus. The ciphertext is unsigned big-endian, left-padded to
/// the modulus byte length.
#[instrument(
    level = "debug",
    skip_all,
    fields(len = plaintext.len(), modulus_bits = public_key.bit_length())
)]
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    let m = from_bytes_be(plaintext);
    if &m >= public_key.n() {
        return Err(CryptoError::MessageTooLarge {
            message_bits: m.bits(),
            modulus_bits: public_key.bit_length(),
        });
    }

    // Compute c = m^e mod n
    let c = mod_pow(&m, public_key.e(), public_key.n())?;

    to_fixed_bytes_be(&c, public_key.modulus_len())
}

/// Encrypt a string's UTF-8 bytes using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}
