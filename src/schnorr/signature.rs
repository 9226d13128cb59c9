//! Schnorr signature value and its byte encoding.

use std::fmt;

use crate::bigint::{self, BigNum};
use crate::error::{CryptoError, Result};

/// A Schnorr signature `(e, s)`.
///
/// - `e` is the challenge `H(m || r) mod q`, with `r = g^k mod p`
/// - `s` is the response `(k + x*e) mod q`
///
/// The nonce `k` is not part of the signature and is dropped once signing
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    e: BigNum,
    s: BigNum,
}

impl Signature {
    /// Wraps an `(e, s)` pair. No range checks happen here; verification
    /// rejects out-of-range values.
    pub fn new(e: BigNum, s: BigNum) -> Self {
        Self { e, s }
    }

    pub fn e(&self) -> &BigNum {
        &self.e
    }

    pub fn s(&self) -> &BigNum {
        &self.s
    }

    /// Encodes as `len(e) || e || len(s) || s`, lengths as 4-byte big-endian,
    /// values as minimal unsigned big-endian.
    pub fn to_bytes(&self) -> Vec<u8> {
        let e = bigint::to_bytes_be(&self.e);
        let s = bigint::to_bytes_be(&self.s);

        let mut out = Vec::with_capacity(8 + e.len() + s.len());
        out.extend_from_slice(&(e.len() as u32).to_be_bytes());
        out.extend_from_slice(&e);
        out.extend_from_slice(&(s.len() as u32).to_be_bytes());
        out.extend_from_slice(&s);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (e, rest) = read_field(bytes, "e")?;
        let (s, rest) = read_field(rest, "s")?;
        if !rest.is_empty() {
            return Err(CryptoError::MalformedSignature(format!(
                "{} trailing bytes",
                rest.len()
            )));
        }
        Ok(Self::new(e, s))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded)
            .map_err(|err| CryptoError::MalformedSignature(format!("invalid hex: {}", err)))?;
        Self::from_bytes(&bytes)
    }
}

fn read_field<'a>(bytes: &'a [u8], name: &str) -> Result<(BigNum, &'a [u8])> {
    if bytes.len() < 4 {
        return Err(CryptoError::MalformedSignature(format!(
            "missing length of {}",
            name
        )));
    }
    let (len, rest) = bytes.split_at(4);
    let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
    if rest.len() < len {
        return Err(CryptoError::MalformedSignature(format!(
            "{} needs {} bytes, {} left",
            name,
            len,
            rest.len()
        )));
    }
    let (value, rest) = rest.split_at(len);
    Ok((bigint::from_bytes_be(value), rest))
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature{{e={:x}, s={:x}}}", self.e, self.s)
    }
}
