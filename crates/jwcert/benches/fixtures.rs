//! Fixture generation for benchmark tests
//!
//! Generates RSA keys of every benchmarked size and signs a certificate
//! token with each.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use rsa::{
    RsaPrivateKey,
    pkcs1::EncodeRsaPrivateKey,
    pkcs8::{EncodePublicKey, LineEnding},
};
use serde_json::json;

/// RSA key sizes to benchmark
pub const RSA_KEY_SIZES: &[usize] = &[2048, 3072, 4096];

/// Key material and a valid token for one key size
pub struct Scenario {
    pub key_size: usize,
    pub public_key_pem: String,
    pub decoding_key: DecodingKey,
    pub token: String,
}

impl Scenario {
    pub fn name(&self) -> String {
        format!("RS256-{}", self.key_size)
    }
}

/// All benchmark fixtures
pub struct BenchFixtures {
    pub scenarios: Vec<Scenario>,
}

impl BenchFixtures {
    pub fn load() -> Self {
        let scenarios = RSA_KEY_SIZES.iter().map(|&size| scenario(size)).collect();
        Self { scenarios }
    }
}

fn scenario(key_size: usize) -> Scenario {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, key_size)
        .unwrap_or_else(|_| panic!("Failed to generate RSA-{key_size} key"));

    let public_key_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("Failed to encode public key to PEM");
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .expect("Failed to create DecodingKey from RSA PEM");

    let pkcs1 = private_key
        .to_pkcs1_der()
        .expect("Failed to serialize private key to PKCS#1");
    let encoding_key = EncodingKey::from_rsa_der(pkcs1.as_bytes());

    let claims = json!({
        "sub": "1234567890",
        "name": "John Doe",
        "course": "Benchmarking in Rust",
        "certId": format!("BENCH-{key_size}"),
        "iat": 1516239022,
    });
    let token = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .expect("Failed to encode token");

    Scenario {
        key_size,
        public_key_pem,
        decoding_key,
        token,
    }
}

/// Flip one character in the middle of the signature
pub fn corrupt_signature(token: &str) -> String {
    let (signing_input, signature) = token.rsplit_once('.').expect("token has a signature");
    let middle = signature.len() / 2;
    let replacement = if &signature[middle..=middle] == "A" { "B" } else { "A" };
    format!(
        "{signing_input}.{}{replacement}{}",
        &signature[..middle],
        &signature[middle + 1..]
    )
}
