use crate::algorithm::{AlgorithmPolicy, AlgorithmType};
use crate::claims::{Claims, ClaimsValidation, validate_claims};
use crate::error::{Error, Failure, Result};
use crate::header::TokenHeader;
use crate::key::PublicKey;
use crate::limits::{
    MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_KID_LENGTH,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::result::VerificationResult;
use crate::utils::{base64url, bounds::validate_field_size};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Certificate token verifier
///
/// Configured once with an optional default public key and reused for every
/// verification. A key passed to [`verify`](Self::verify) takes precedence
/// over the default.
#[derive(Clone)]
pub struct CertificateVerifier {
    config_default_key: Option<Arc<str>>,
    config_algorithms: AlgorithmPolicy,
    config_claims: ClaimsValidation,
}

/// Compact serialization split into its segments, header already checked
struct TokenParts<'a> {
    header_b64: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
    algorithm: AlgorithmType,
}

impl CertificateVerifier {
    /// Create a verifier with no default key, RS256 only
    pub fn new() -> Self {
        Self {
            config_default_key: None,
            config_algorithms: AlgorithmPolicy::rs256_only(),
            config_claims: ClaimsValidation::default(),
        }
    }

    /// Set the default public key (PEM) used when the caller supplies none
    ///
    /// A blank value leaves the verifier without a default key.
    pub fn default_key(mut self, pem: impl Into<String>) -> Self {
        let pem = pem.into();
        self.config_default_key = if pem.trim().is_empty() {
            None
        } else {
            Some(Arc::from(pem))
        };
        self
    }

    /// Set the claims validation configuration
    pub fn validate(mut self, config: ClaimsValidation) -> Self {
        self.config_claims = config;
        self
    }

    pub fn has_default_key(&self) -> bool {
        self.config_default_key.is_some()
    }

    /// The default key, parsed
    ///
    /// Lets a host report a broken key at start-up instead of on the first
    /// request.
    pub fn parse_default_key(&self) -> Result<PublicKey> {
        let pem = self.config_default_key.as_deref().ok_or(Error::KeyMissing)?;
        PublicKey::from_pem(pem)
    }
}

impl CertificateVerifier {
    /// Verify a certificate token
    ///
    /// Never fails and never panics: every outcome, including internal faults,
    /// is reported as a [`VerificationResult`]. A blank `custom_public_key_pem`
    /// counts as absent.
    pub fn verify(&self, token: &str, custom_public_key_pem: Option<&str>) -> VerificationResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.check(token, custom_public_key_pem)
        }))
        .unwrap_or_else(|payload| Err(Error::Internal(panic_message(payload.as_ref()))));

        match outcome {
            Ok(claims) => {
                tracing::debug!(claims = claims.len(), "certificate verified");
                VerificationResult::Valid { payload: claims }
            }
            Err(error) => {
                let failure = Failure::from(&error);
                if failure.is_configuration_fault() {
                    tracing::error!(%error, "no public key available for certificate verification");
                } else if matches!(error, Error::Internal(_)) {
                    tracing::error!(%error, "certificate verification aborted");
                } else {
                    tracing::warn!(%error, ?failure, "certificate rejected");
                }
                VerificationResult::Invalid { failure }
            }
        }
    }

    /// Verify a certificate token, keeping the detailed error
    pub fn check(&self, token: &str, custom_public_key_pem: Option<&str>) -> Result<Claims> {
        // 1. Resolve key material
        let pem = self.resolve_key_pem(custom_public_key_pem)?;

        // 2. Parse the key
        let key = PublicKey::from_pem(pem)?;

        self.check_with_key(token, &key)
    }

    /// Verify a certificate token against an already parsed key
    pub fn check_with_key(&self, token: &str, key: &PublicKey) -> Result<Claims> {
        // 3. Parse token parts and check the algorithm
        let parts = Self::parse_token_parts(token, &self.config_algorithms)?;

        // 4. Verify signature before trusting any payload byte
        let signing_input = format!("{}.{}", parts.header_b64, parts.payload_b64);
        parts
            .algorithm
            .verify_signature(&signing_input, parts.signature_b64, key)?;

        // 5. Parse payload with size limit
        let payload = base64url::decode_bytes(parts.payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let payload_json = String::from_utf8(payload)
            .map_err(|e| Error::PayloadInvalid(format!("Payload is not UTF-8: {e}")))?;
        let claims = Claims::from_json(&payload_json)?;

        // 6. Validate time claims
        validate_claims(&claims, &self.config_claims)?;

        Ok(claims)
    }

    fn resolve_key_pem<'a>(&'a self, custom_public_key_pem: Option<&'a str>) -> Result<&'a str> {
        custom_public_key_pem
            .filter(|pem| !pem.trim().is_empty())
            .or(self.config_default_key.as_deref())
            .ok_or(Error::KeyMissing)
    }

    /// Split the token and validate its header
    ///
    /// Checks token length, segment count, the signature size, header
    /// encoding and the algorithm policy. The payload is left untouched.
    fn parse_token_parts<'a>(
        token: &'a str,
        algorithm_policy: &AlgorithmPolicy,
    ) -> Result<TokenParts<'a>> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Error::FormatInvalid);
        }

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::SignatureB64TooLarge {
                size: signature_b64.len(),
                max: MAX_SIGNATURE_B64_SIZE,
            });
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = miniserde::json::from_str(&header_json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

        validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;
        if let Some(kid) = &header.key_id {
            validate_field_size("kid", kid, MAX_KID_LENGTH)?;
            tracing::trace!(kid = %kid, "token names a key id");
        }

        let algorithm = AlgorithmType::from_str(&header.algorithm)?;
        algorithm_policy.validate(&algorithm)?;

        // No extension is understood, so any critical one is fatal
        if let Some(critical) = header.critical {
            return Err(Error::HeaderCriticalUnsupported(critical));
        }

        Ok(TokenParts {
            header_b64,
            payload_b64,
            signature_b64,
            algorithm,
        })
    }
}

impl Default for CertificateVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CertificateVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateVerifier")
            .field("has_default_key", &self.has_default_key())
            .field("algorithms", &self.config_algorithms.allowed())
            .field("claims", &self.config_claims)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic during verification".to_owned())
}
