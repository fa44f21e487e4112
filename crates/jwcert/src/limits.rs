//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum length for a PEM encoded public key (16KB)
/// An 8192-bit RSA SubjectPublicKeyInfo is ~1.5KB of PEM text
pub(crate) const MAX_KEY_PEM_LENGTH: usize = 16 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// An RS256 signature is as long as the modulus: 256 bytes for 2048-bit keys,
/// 1024 bytes for 8192-bit keys
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum length for key ID (kid) field in JWT header (256 bytes)
pub(crate) const MAX_KID_LENGTH: usize = 256;

// ============================================================================
// RSA key bounds
// ============================================================================

/// Smallest accepted RSA modulus (bits)
pub(crate) const MIN_RSA_MODULUS_BITS: usize = 2048;

/// Largest accepted RSA modulus (bits)
pub(crate) const MAX_RSA_MODULUS_BITS: usize = 8192;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
/// Prevents clock skew from effectively disabling expiration checks
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Maximum token age (1 year = 31,536,000 seconds)
pub(crate) const MAX_MAX_AGE_SECONDS: u64 = 86400 * 365;
