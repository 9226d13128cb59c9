// RSA Decryption Implementation
// Raw (unpadded) RSA: m = c^d mod n

use tracing::instrument;

use super::keygen::RsaPrivateKey;
use crate::bigint::{from_bytes_be, mod_pow, strip_sign_byte, to_bytes_be};
use crate::error::{CryptoError, Result};

/// Decrypt ciphertext bytes using RSA private key
///
/// Accepts the fixed-width form produced by [`super::encrypt_bytes`], a
/// shorter minimal form, or a signed form carrying one extra leading zero
/// byte. Returns the minimal big-endian bytes of `m`, so leading zero bytes
/// of the original message are not recovered.
#[instrument(
    level = "debug",
    skip_all,
    fields(len = ciphertext.len(), modulus_bits = private_key.bit_length())
)]
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let key_bytes = private_key.modulus_len();

    let body = if ciphertext.len() > key_bytes {
        strip_sign_byte(ciphertext)
    } else {
        ciphertext
    };
    if body.len() > key_bytes {
        return Err(CryptoError::InvalidCiphertextLength {
            expected: key_bytes,
            actual: ciphertext.len(),
        });
    }

    let c = from_bytes_be(body);
    if &c >= private_key.n() {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    // Compute m = c^d mod n
    let m = mod_pow(&c, private_key.d(), private_key.n())?;

    Ok(to_bytes_be(&m))
}

/// Decrypt ciphertext to a UTF-8 string
pub fn decrypt_to_string(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::{generate_keypair, RsaKeyPair};
    use crate::util::RsaConfig;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn test_keypair(seed: u64) -> RsaKeyPair {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = RsaConfig::default().with_prime_bits(256).with_primality_rounds(20);
        generate_keypair(&config, &mut rng).unwrap()
    }

    fn test_roundtrip(keypair: &RsaKeyPair, message: &[u8]) {
        let ciphertext = keypair.public_key().encrypt(message).unwrap();
        let decrypted = keypair.private_key().decrypt(&ciphertext).unwrap();
        assert_eq!(message, decrypted.as_slice());
    }

    #[test]
    fn test_decrypt_bytes() {
        let keypair = test_keypair(31);
        let message = b"Hello, RSA!";

        let ciphertext = keypair.public_key().encrypt(message).unwrap();
        let decrypted = decrypt_bytes(&ciphertext, keypair.private_key()).unwrap();

        assert_eq!(message.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_decrypt_string() {
        let keypair = test_keypair(32);
        let message = "Привет, мир!";

        let ciphertext = keypair.public_key().encrypt_str(message).unwrap();
        let decrypted = decrypt_to_string(&ciphertext, keypair.private_key()).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_roundtrip_various_sizes() {
        let keypair = test_keypair(33);

        let test_cases: Vec<Vec<u8>> = vec![
            b"A".to_vec(),
            b"AB".to_vec(),
            b"Hello, World!".to_vec(),
            vec![0xffu8; 63],
            vec![0x01u8; 62],
        ];

        for message in test_cases {
            test_roundtrip(&keypair, &message);
        }
    }

    #[test]
    fn test_roundtrip_random_values_below_modulus() {
        let keypair = test_keypair(34);
        let mut rng = StdRng::seed_from_u64(35);

        for len in 1..64 {
            let mut message = vec![0u8; len];
            rng.fill_bytes(&mut message);
            message[0] |= 1;
            test_roundtrip(&keypair, &message);
        }
    }

    #[test]
    fn test_empty_and_leading_zeros() {
        let keypair = test_keypair(36);

        let ciphertext = keypair.public_key().encrypt(b"").unwrap();
        assert!(keypair.private_key().decrypt(&ciphertext).unwrap().is_empty());

        let ciphertext = keypair.public_key().encrypt(b"\0\0abc").unwrap();
        assert_eq!(keypair.private_key().decrypt(&ciphertext).unwrap(), b"abc");
    }

    #[test]
    fn test_decrypt_accepts_signed_and_minimal_forms() {
        let keypair = test_keypair(37);
        let message = b"encoding forms";
        let ciphertext = keypair.public_key().encrypt(message).unwrap();

        let mut signed = vec![0u8];
        signed.extend_from_slice(&ciphertext);
        assert_eq!(keypair.private_key().decrypt(&signed).unwrap(), message);

        let first_nonzero = ciphertext.iter().position(|&b| b != 0).unwrap();
        let minimal = &ciphertext[first_nonzero..];
        assert_eq!(keypair.private_key().decrypt(minimal).unwrap(), message);
    }

    #[test]
    fn test_decrypt_invalid_size() {
        let keypair = test_keypair(38);

        let result = decrypt_bytes(&[1u8; 65], keypair.private_key());
        assert_eq!(
            result,
            Err(CryptoError::InvalidCiphertextLength {
                expected: 64,
                actual: 65
            })
        );
        assert!(decrypt_bytes(&[0u8; 66], keypair.private_key()).is_err());
    }

    #[test]
    fn test_decrypt_out_of_range() {
        let keypair = test_keypair(39);
        let result = decrypt_bytes(&[0xffu8; 64], keypair.private_key());
        assert_eq!(result, Err(CryptoError::CiphertextOutOfRange));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let keypair1 = test_keypair(40);
        let keypair2 = test_keypair(41);

        let message = b"Test";
        let ciphertext = keypair1.public_key().encrypt(message).unwrap();

        // Raw RSA has no integrity check: a foreign key yields garbage or a range error
        match keypair2.private_key().decrypt(&ciphertext) {
            Ok(plaintext) => assert_ne!(plaintext.as_slice(), message.as_slice()),
            Err(err) => assert_eq!(err, CryptoError::CiphertextOutOfRange),
        }
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let keypair = test_keypair(42);
        let ciphertext = keypair.public_key().encrypt(&[0xff, 0xfe]).unwrap();
        assert_eq!(
            decrypt_to_string(&ciphertext, keypair.private_key()),
            Err(CryptoError::InvalidUtf8)
        );
    }

    #[test]
    fn test_shared_key_across_threads() {
        let keypair = test_keypair(43);

        std::thread::scope(|scope| {
            for i in 0..4u8 {
                let keypair = &keypair;
                scope.spawn(move || {
                    let message = [b'T', i + 1];
                    test_roundtrip(keypair, &message);
                });
            }
        });
    }
}
