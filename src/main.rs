use std::process;

use anyhow::{Context, Result};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pkdemo::rsa::generate_default_keypair;
use pkdemo::schnorr::{GroupParams, SchnorrKeyPair};

const RSA_MESSAGE: &str = "Привет, мир!";
const SCHNORR_MESSAGE: &str = "Hello, Schnorr Signature!";
const TAMPERED_MESSAGE: &str = "Modified message";

fn run_rsa() -> Result<()> {
    println!("=== RSA ===");
    let keypair = generate_default_keypair(&mut OsRng).context("generating RSA key pair")?;
    info!(modulus_bits = keypair.bit_length(), "RSA key pair ready");

    println!("Original message: {}", RSA_MESSAGE);

    let ciphertext = keypair
        .public_key()
        .encrypt_str(RSA_MESSAGE)
        .context("encrypting message")?;
    println!("Encrypted message (hex): {}", hex::encode_upper(&ciphertext));

    let decrypted = keypair
        .private_key()
        .decrypt_to_string(&ciphertext)
        .context("decrypting message")?;
    println!("Decrypted message: {}", decrypted);

    Ok(())
}

fn run_schnorr() -> Result<()> {
    println!("=== Schnorr ===");
    let params = GroupParams::demo();
    let keypair = SchnorrKeyPair::generate(&params, &mut OsRng).context("generating Schnorr key")?;

    println!("Public key: {}", keypair.verifying_key().y());
    println!("Message: {}", SCHNORR_MESSAGE);

    let signature = keypair
        .sign(&mut OsRng, SCHNORR_MESSAGE.as_bytes())
        .context("signing message")?;
    println!("Signature: {}", signature);

    let valid = keypair.verify(SCHNORR_MESSAGE.as_bytes(), &signature);
    println!("Signature valid: {}", valid);

    let tampered = keypair.verify(TAMPERED_MESSAGE.as_bytes(), &signature);
    println!("Modified message verifies: {}", tampered);

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_rsa().and_then(|_| run_schnorr()) {
        eprintln!("Error running demo: {:#}", e);
        process::exit(1);
    }
}
