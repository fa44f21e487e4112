//! Defensive read access to the well-known certificate fields
//!
//! Issuers put whatever they like in a certificate payload. [`Certificate`]
//! looks up the common spellings of each field and falls back to a neutral
//! value when a field is missing, empty, or not a string.

use crate::claims::Claims;

const UNKNOWN_RECIPIENT: &str = "Unknown Recipient";
const DEFAULT_COURSE: &str = "Certificate of Completion";

/// A view over verified claims
#[derive(Debug, Clone, Copy)]
pub struct Certificate<'a> {
    claims: &'a Claims,
}

impl<'a> Certificate<'a> {
    pub fn new(claims: &'a Claims) -> Self {
        Self { claims }
    }

    /// Name of the person the certificate was awarded to
    pub fn recipient(&self) -> &'a str {
        self.first_str(&["name", "recipient"])
            .unwrap_or(UNKNOWN_RECIPIENT)
    }

    /// Course or event the certificate is for
    pub fn course(&self) -> &'a str {
        self.first_str(&["course", "event", "title"])
            .unwrap_or(DEFAULT_COURSE)
    }

    pub fn issuer(&self) -> Option<&'a str> {
        self.first_str(&["issuer", "iss"])
    }

    /// Issue date as seconds since the Unix epoch
    pub fn issued_at(&self) -> Option<i64> {
        self.claims
            .issued_at()
            .or_else(|| self.claims.get_i64("issuedAt"))
    }

    pub fn certificate_id(&self) -> Option<&'a str> {
        self.first_str(&["certId", "id", "jti"])
    }

    pub fn remarks(&self) -> Option<&'a str> {
        self.first_str(&["remarks"])
    }

    fn first_str(&self, names: &[&str]) -> Option<&'a str> {
        let claims: &'a Claims = self.claims;
        names
            .iter()
            .filter_map(|name| claims.get_str(name))
            .find(|value| !value.is_empty())
    }
}

impl Claims {
    /// Read the claims as a certificate
    pub fn certificate(&self) -> Certificate<'_> {
        Certificate::new(self)
    }
}
