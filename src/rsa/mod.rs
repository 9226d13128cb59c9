// RSA Module - Main module file
// Raw RSA key generation, encryption and decryption

pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use decrypt::{decrypt_bytes, decrypt_to_string};
pub use encrypt::{encrypt_bytes, encrypt_string};
pub use keygen::{
    generate_default_keypair, generate_keypair, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
