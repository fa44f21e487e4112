//! Key material and token builders shared by the integration tests
//!
//! Keys are generated once per test binary. Tokens are signed directly with
//! aws-lc-rs so that headers and payloads can be anything, including things
//! no well-behaved issuer would produce.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{RSA_PKCS1_SHA256, RsaEncoding, RsaKeyPair};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rsa::{
    RsaPrivateKey,
    pkcs1::EncodeRsaPrivateKey,
    pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding},
};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// The classic example payload
pub const JOHN_DOE: &str = r#"{"sub":"1234567890","name":"John Doe","iat":1516239022}"#;

pub const RS256_HEADER: &str = r#"{"alg":"RS256","typ":"JWT"}"#;

/// A generated RSA key pair in every shape the tests need
pub struct TestKey {
    pub keypair: RsaKeyPair,
    /// SubjectPublicKeyInfo PEM with LF line endings
    pub public_pem: String,
    /// PKCS#1 private key DER, as `jsonwebtoken` wants it
    pub private_pkcs1_der: Vec<u8>,
}

static KEY_A: OnceLock<TestKey> = OnceLock::new();
static KEY_B: OnceLock<TestKey> = OnceLock::new();

pub fn key_a() -> &'static TestKey {
    KEY_A.get_or_init(|| generate_key(2048))
}

pub fn key_b() -> &'static TestKey {
    KEY_B.get_or_init(|| generate_key(2048))
}

fn generate_key(bits: usize) -> TestKey {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, bits).expect("Failed to generate key");

    let pkcs8_doc = private_key
        .to_pkcs8_der()
        .expect("Failed to serialize to PKCS#8");
    let keypair =
        RsaKeyPair::from_pkcs8(pkcs8_doc.as_bytes()).expect("Failed to create RsaKeyPair");

    let public_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("Failed to encode public key to PEM");

    let private_pkcs1_der = private_key
        .to_pkcs1_der()
        .expect("Failed to serialize to PKCS#1")
        .as_bytes()
        .to_vec();

    TestKey {
        keypair,
        public_pem,
        private_pkcs1_der,
    }
}

pub fn segment(json: &str) -> String {
    URL_SAFE_NO_PAD.encode(json)
}

/// Sign `header.payload` with RS256
pub fn sign_token(header_json: &str, payload_json: &str, key: &TestKey) -> String {
    sign_token_with(header_json, payload_json, key, &RSA_PKCS1_SHA256)
}

/// Sign `header.payload` with an arbitrary RSA encoding, whatever the header says
pub fn sign_token_with(
    header_json: &str,
    payload_json: &str,
    key: &TestKey,
    encoding: &'static dyn RsaEncoding,
) -> String {
    let signing_input = format!("{}.{}", segment(header_json), segment(payload_json));
    let mut signature = vec![0u8; key.keypair.public_modulus_len()];
    key.keypair
        .sign(
            encoding,
            &SystemRandom::new(),
            signing_input.as_bytes(),
            &mut signature,
        )
        .expect("Failed to sign");
    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(&signature))
}

/// A valid RS256 certificate with the given payload, signed with key A
pub fn certificate(payload_json: &str) -> String {
    sign_token(RS256_HEADER, payload_json, key_a())
}

/// Swap the payload segment, keeping header and signature
pub fn replace_payload(token: &str, payload_json: &str) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    format!("{}.{}.{}", parts[0], segment(payload_json), parts[2])
}

/// Change one character in the middle of the signature segment
pub fn corrupt_signature(token: &str) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    let signature = parts[2];
    let middle = signature.len() / 2;
    let replacement = if &signature[middle..=middle] == "A" { "B" } else { "A" };
    format!(
        "{}.{}.{}{}{}",
        parts[0],
        parts[1],
        &signature[..middle],
        replacement,
        &signature[middle + 1..]
    )
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}
