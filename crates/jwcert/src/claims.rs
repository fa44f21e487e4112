//! Claims access and validation for certificate tokens
//!
//! The payload of a certificate token has no fixed schema. [`Claims`] keeps
//! it as an open JSON object and offers lenient accessors for the registered
//! claims. Temporal claims (exp, nbf, iat) are validated strictly by
//! [`validate_claims`].

use crate::error::{Error, Result};
use crate::limits::{MAX_CLOCK_SKEW_SECONDS, MAX_MAX_AGE_SECONDS};
use crate::utils::bounds::apply_clock_skew;
use miniserde::json::{self, Number, Object, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// The claims payload of a verified certificate token
///
/// Returned verbatim: no field is required and values keep whatever type the
/// issuer gave them.
#[derive(Debug, Clone)]
pub struct Claims(Object);

impl Claims {
    /// Parse a decoded payload. The payload must be a JSON object.
    pub(crate) fn from_json(payload: &str) -> Result<Self> {
        let value: Value = json::from_str(payload)
            .map_err(|e| Error::PayloadInvalid(format!("Failed to parse payload: {e}")))?;

        match value {
            Value::Object(object) => Ok(Self(object)),
            _ => Err(Error::PayloadInvalid("Payload is not a JSON object".into())),
        }
    }

    /// Raw value of a claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether a claim is present, whatever its type
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Value of a claim if it is a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Value::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Value of a claim if it is a number, truncated to whole seconds
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(Value::Number(number)) => Some(number_to_i64(number)),
            _ => None,
        }
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Subject (sub)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Audience (aud), only when given as a single string
    pub fn audience(&self) -> Option<&str> {
        self.get_str("aud")
    }

    /// Expiration Time (exp)
    pub fn expiration(&self) -> Option<i64> {
        self.get_i64("exp")
    }

    /// Not Before (nbf)
    pub fn not_before(&self) -> Option<i64> {
        self.get_i64("nbf")
    }

    /// Issued At (iat)
    pub fn issued_at(&self) -> Option<i64> {
        self.get_i64("iat")
    }

    /// JWT ID (jti)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str("jti")
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn as_object(&self) -> &Object {
        &self.0
    }

    pub fn into_object(self) -> Object {
        self.0
    }

    /// Serialize the claims back to compact JSON
    pub fn to_json(&self) -> String {
        json::to_string(&self.0)
    }

    /// Strict reader for temporal claims: absent is fine, any type other than
    /// a number is not
    fn temporal_claim(&self, name: &str) -> Result<Option<i64>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(Value::Number(number)) => Ok(Some(number_to_i64(number))),
            Some(_) => Err(Error::TokenInvalidClaim(format!(
                "'{name}' must be a numeric date"
            ))),
        }
    }
}

impl From<Object> for Claims {
    fn from(object: Object) -> Self {
        Self(object)
    }
}

fn number_to_i64(number: &Number) -> i64 {
    match *number {
        Number::U64(n) => i64::try_from(n).unwrap_or(i64::MAX),
        Number::I64(n) => n,
        // Saturating conversion; JSON cannot express NaN or infinities
        Number::F64(n) => n.floor() as i64,
    }
}

/// Configuration for claims validation
///
/// Certificates are permanent, so there is no maximum age by default. Expiry
/// is still honored for tokens that carry an `exp` claim.
#[derive(Debug, Clone)]
pub struct ClaimsValidation {
    validate_exp: bool,
    validate_nbf: bool,
    clock_skew_seconds: u64,
    max_age_seconds: Option<u64>,
}

impl Default for ClaimsValidation {
    fn default() -> Self {
        Self {
            validate_exp: true,
            validate_nbf: true,
            clock_skew_seconds: 0,
            max_age_seconds: None,
        }
    }
}

impl ClaimsValidation {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    ///
    /// # Security
    /// Clock skew is limited to prevent effectively disabling expiration checks.
    /// Maximum allowed value is 300 seconds (5 minutes).
    /// Values exceeding the limit will be rejected during validation.
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Set maximum certificate age, measured from `iat`
    ///
    /// When set, tokens without `iat` are rejected. Maximum allowed value is
    /// 31,536,000 seconds (1 year).
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age_seconds = Some(seconds);
        self
    }

    /// Disable expiration validation
    pub fn no_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }

    /// Disable not-before validation
    pub fn no_nbf_validation(mut self) -> Self {
        self.validate_nbf = false;
        self
    }
}

/// Validate claims according to configuration
pub(crate) fn validate_claims(claims: &Claims, config: &ClaimsValidation) -> Result<()> {
    validate_claims_at(claims, config, current_timestamp())
}

fn validate_claims_at(claims: &Claims, config: &ClaimsValidation, now: i64) -> Result<()> {
    // Validate configuration bounds to prevent security bypass
    if config.clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
        return Err(Error::ClockSkewTooLarge {
            value: config.clock_skew_seconds,
            max: MAX_CLOCK_SKEW_SECONDS,
        });
    }
    if let Some(max_age) = config.max_age_seconds {
        if max_age > MAX_MAX_AGE_SECONDS {
            return Err(Error::MaxAgeTooLarge {
                value: max_age,
                max: MAX_MAX_AGE_SECONDS,
            });
        }
    }

    let skew = config.clock_skew_seconds;

    // Registered dates must be numbers even when their check is disabled
    let exp = claims.temporal_claim("exp")?;
    let nbf = claims.temporal_claim("nbf")?;
    let iat = claims.temporal_claim("iat")?;

    if config.validate_exp {
        if let Some(exp) = exp {
            let exp_with_skew = apply_clock_skew(exp, skew, true)?;
            if now >= exp_with_skew {
                return Err(Error::TokenExpired {
                    expired_at: exp,
                    now,
                    skew,
                });
            }
        }
    }

    if config.validate_nbf {
        if let Some(nbf) = nbf {
            let nbf_with_skew = apply_clock_skew(nbf, skew, false)?;
            if now < nbf_with_skew {
                return Err(Error::TokenNotYetValid {
                    not_before: nbf,
                    now,
                    skew,
                });
            }
        }
    }

    if let Some(max_age) = config.max_age_seconds {
        let iat = iat.ok_or_else(|| Error::TokenMissingClaim("iat".into()))?;

        let now_with_skew = apply_clock_skew(now, skew, true)?;
        if iat > now_with_skew {
            return Err(Error::TokenIssuedInFuture {
                issued_at: iat,
                now,
                skew,
            });
        }

        let oldest_accepted = apply_clock_skew(iat, max_age, true)
            .and_then(|limit| apply_clock_skew(limit, skew, true))?;
        if now > oldest_accepted {
            return Err(Error::TokenTooOld {
                issued_at: iat,
                now,
                max_age,
            });
        }
    }

    Ok(())
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
