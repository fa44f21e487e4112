//! The two-shape outcome of a verification

use crate::claims::Claims;
use crate::error::Failure;
use miniserde::json::{self, Object, Value};

/// Outcome of [`CertificateVerifier::verify`](crate::CertificateVerifier::verify)
///
/// Either the claims of a valid certificate or the classification of why it
/// was rejected, never both.
#[derive(Debug, Clone)]
pub enum VerificationResult {
    Valid { payload: Claims },
    Invalid { failure: Failure },
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Valid { .. })
    }

    pub fn payload(&self) -> Option<&Claims> {
        match self {
            VerificationResult::Valid { payload } => Some(payload),
            VerificationResult::Invalid { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<Claims> {
        match self {
            VerificationResult::Valid { payload } => Some(payload),
            VerificationResult::Invalid { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<Failure> {
        match self {
            VerificationResult::Valid { .. } => None,
            VerificationResult::Invalid { failure } => Some(*failure),
        }
    }

    /// The caller-facing error message of an invalid result
    pub fn error(&self) -> Option<&'static str> {
        self.failure().map(|failure| failure.message())
    }

    /// JSON object form: `{"valid":true,"payload":{..}}` or
    /// `{"valid":false,"error":".."}`
    pub fn to_json_object(&self) -> Object {
        let mut object = Object::new();
        object.insert("valid".to_owned(), Value::Bool(self.is_valid()));
        match self {
            VerificationResult::Valid { payload } => {
                object.insert(
                    "payload".to_owned(),
                    Value::Object(payload.as_object().clone()),
                );
            }
            VerificationResult::Invalid { failure } => {
                object.insert(
                    "error".to_owned(),
                    Value::String(failure.message().to_owned()),
                );
            }
        }
        object
    }

    pub fn to_json(&self) -> String {
        json::to_string(&self.to_json_object())
    }
}

impl From<Claims> for VerificationResult {
    fn from(payload: Claims) -> Self {
        VerificationResult::Valid { payload }
    }
}

impl From<Failure> for VerificationResult {
    fn from(failure: Failure) -> Self {
        VerificationResult::Invalid { failure }
    }
}
