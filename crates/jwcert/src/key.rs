//! RSA public keys for certificate verification
//!
//! Keys arrive as PEM encoded SubjectPublicKeyInfo text. They are parsed with
//! the RustCrypto `spki` and `der` crates and handed to aws-lc-rs as DER.

use crate::error::{Error, Result};
use crate::limits::{MAX_KEY_PEM_LENGTH, MAX_RSA_MODULUS_BITS, MIN_RSA_MODULUS_BITS};
use der::{Decode, DecodePem, Encode, Sequence, asn1::UintRef};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoOwned};
use std::sync::Arc;

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// RSAPublicKey as defined in RFC 8017:
///
/// ```text
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
/// ```
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// A parsed RSA public key
///
/// Cloning is cheap; the DER bytes are shared.
#[derive(Clone)]
pub struct PublicKey {
    der: Arc<[u8]>,
    modulus_bits: usize,
}

impl PublicKey {
    /// Parse a PEM encoded SubjectPublicKeyInfo (`-----BEGIN PUBLIC KEY-----`)
    ///
    /// Surrounding whitespace is ignored and lines may end in `\n` or `\r\n`.
    pub fn from_pem(pem: &str) -> Result<Self> {
        if pem.len() > MAX_KEY_PEM_LENGTH {
            return Err(Error::KeyTooLarge {
                size: pem.len(),
                max: MAX_KEY_PEM_LENGTH,
            });
        }

        let spki = SubjectPublicKeyInfoOwned::from_pem(pem.trim())
            .map_err(|e| Error::KeyInvalid(format!("PEM SubjectPublicKeyInfo: {e}")))?;
        let der = spki
            .to_der()
            .map_err(|e| Error::KeyInvalid(format!("SubjectPublicKeyInfo: {e}")))?;

        Self::from_spki(&spki, der)
    }

    /// Parse a DER encoded SubjectPublicKeyInfo holding an RSA key
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoOwned::from_der(der)
            .map_err(|e| Error::KeyInvalid(format!("SubjectPublicKeyInfo: {e}")))?;

        Self::from_spki(&spki, der.to_vec())
    }

    fn from_spki(spki: &SubjectPublicKeyInfoOwned, der: Vec<u8>) -> Result<Self> {
        if spki.algorithm.oid != RSA_ENCRYPTION_OID {
            return Err(Error::KeyUnsupported(spki.algorithm.oid.to_string()));
        }

        let raw = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| Error::KeyInvalid("public key bit string is not octet aligned".into()))?;
        let rsa = RsaPublicKey::from_der(raw)
            .map_err(|e| Error::KeyInvalid(format!("RSAPublicKey: {e}")))?;

        let modulus_bits = bit_length(rsa.modulus.as_bytes());
        if !(MIN_RSA_MODULUS_BITS..=MAX_RSA_MODULUS_BITS).contains(&modulus_bits) {
            return Err(Error::KeySizeInvalid {
                bits: modulus_bits,
                min: MIN_RSA_MODULUS_BITS,
                max: MAX_RSA_MODULUS_BITS,
            });
        }

        Ok(Self {
            der: der.into(),
            modulus_bits,
        })
    }

    /// Size of the RSA modulus in bits
    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// The DER encoded SubjectPublicKeyInfo
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &"RSA")
            .field("modulus_bits", &self.modulus_bits)
            .finish()
    }
}

/// Bit length of a big-endian unsigned integer without leading zero bytes
fn bit_length(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(first) => bytes.len() * 8 - first.leading_zeros() as usize,
        None => 0,
    }
}
