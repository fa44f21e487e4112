//! Errors for jwcert
//!
//! [`Error`] carries the low-level detail of why a token was rejected and is
//! meant for operators. [`Failure`] is the closed, caller-safe classification
//! that every [`Error`] maps onto.

use thiserror::Error;

/// Detailed verification errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("No public key supplied and no default public key configured")]
    KeyMissing,

    #[error("Public key too large: {size} bytes (maximum: {max} bytes)")]
    KeyTooLarge { size: usize, max: usize },

    #[error("Invalid public key: {0}")]
    KeyInvalid(String),

    #[error("Unsupported public key algorithm: {0}")]
    KeyUnsupported(String),

    #[error("RSA modulus of {bits} bits outside the accepted range {min}..={max}")]
    KeySizeInvalid { bits: usize, min: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid JWT format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Signature Base64URL string too large: {size} bytes (maximum: {max} bytes)")]
    SignatureB64TooLarge { size: usize, max: usize },

    #[error("Header field '{field}' too long: {length} bytes (maximum: {max} bytes)")]
    HeaderFieldTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    #[error("Critical header extensions not supported: {0:?}")]
    HeaderCriticalUnsupported(Vec<String>),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmNotAllowed { found: String, allowed: Vec<String> },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, skew: {skew}s)")]
    TokenIssuedInFuture { issued_at: i64, now: i64, skew: u64 },

    #[error("Token too old: issued at {issued_at}, max age {max_age}s (now: {now})")]
    TokenTooOld {
        issued_at: i64,
        now: i64,
        max_age: u64,
    },

    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    #[error("Token claim validation failed: {0}")]
    TokenInvalidClaim(String),

    #[error("Invalid claims payload: {0}")]
    PayloadInvalid(String),

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Clock skew too large: {value} seconds (maximum: {max} seconds)")]
    ClockSkewTooLarge { value: u64, max: u64 },

    #[error("Max age too large: {value} seconds (maximum: {max} seconds)")]
    MaxAgeTooLarge { value: u64, max: u64 },

    #[error("Verification aborted unexpectedly: {0}")]
    Internal(String),
}

/// Result type alias for jwcert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-visible classification of a failed verification
///
/// Every [`Error`] maps to exactly one `Failure`, and every `Failure` has one
/// fixed message. The messages never include error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// No key material available at all
    MissingKey,
    /// The cryptographic check failed or the algorithm was substituted
    InvalidSignature,
    /// The token's time-bound claim elapsed
    Expired,
    /// Structural or encoding problem with the token
    Malformed,
    /// Anything not covered above
    Unclassified,
}

impl Failure {
    pub const fn message(&self) -> &'static str {
        match self {
            Failure::MissingKey => "Server configuration error: Public key not found.",
            Failure::InvalidSignature => {
                "Invalid signature. This certificate may have been tampered with."
            }
            Failure::Expired => "This certificate has expired.",
            Failure::Malformed => "Malformed certificate token.",
            Failure::Unclassified => "Certificate verification failed.",
        }
    }

    /// Whether this failure is the fault of the verifier's environment rather
    /// than of the token
    pub const fn is_configuration_fault(&self) -> bool {
        matches!(self, Failure::MissingKey)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&Error> for Failure {
    fn from(error: &Error) -> Self {
        // No wildcard arm: adding an Error variant must force a decision here.
        match error {
            Error::KeyMissing => Failure::MissingKey,

            Error::SignatureInvalid
            | Error::AlgorithmNoneRejected
            | Error::AlgorithmNotAllowed { .. }
            | Error::AlgorithmUnsupported(_) => Failure::InvalidSignature,

            Error::TokenExpired { .. } | Error::TokenTooOld { .. } => Failure::Expired,

            Error::TokenTooLarge { .. }
            | Error::FormatInvalid
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::SignatureB64TooLarge { .. }
            | Error::HeaderFieldTooLong { .. } => Failure::Malformed,

            Error::KeyTooLarge { .. }
            | Error::KeyInvalid(_)
            | Error::KeyUnsupported(_)
            | Error::KeySizeInvalid { .. }
            | Error::HeaderCriticalUnsupported(_)
            | Error::TokenNotYetValid { .. }
            | Error::TokenIssuedInFuture { .. }
            | Error::TokenMissingClaim(_)
            | Error::TokenInvalidClaim(_)
            | Error::PayloadInvalid(_)
            | Error::TimestampOverflow
            | Error::ClockSkewTooLarge { .. }
            | Error::MaxAgeTooLarge { .. }
            | Error::Internal(_) => Failure::Unclassified,
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Failure::from(&error)
    }
}
