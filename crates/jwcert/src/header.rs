use miniserde::Deserialize;

/// JWT header structure
///
/// Represents the protected header of a certificate token. Unknown
/// parameters such as `typ` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Key ID, informational only since the key is supplied by the caller
    #[serde(rename = "kid")]
    pub key_id: Option<String>,

    /// Critical extensions the verifier must understand
    #[serde(rename = "crit")]
    pub critical: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_header() {
        let header: TokenHeader = miniserde::json::from_str(r#"{"alg":"RS256"}"#).unwrap();
        assert_eq!(header.algorithm, "RS256");
        assert!(header.key_id.is_none());
        assert!(header.critical.is_none());
    }

    #[test]
    fn test_parse_header_ignores_unknown_fields() {
        let header: TokenHeader =
            miniserde::json::from_str(r#"{"alg":"RS256","typ":"JWT","kid":"2026-01","x5u":"x"}"#)
                .unwrap();
        assert_eq!(header.algorithm, "RS256");
        assert_eq!(header.key_id.as_deref(), Some("2026-01"));
    }

    #[test]
    fn test_parse_header_with_crit() {
        let header: TokenHeader =
            miniserde::json::from_str(r#"{"alg":"RS256","crit":["exp"],"exp":1}"#).unwrap();
        assert_eq!(header.critical, Some(vec!["exp".to_string()]));
    }

    #[test]
    fn test_parse_header_requires_string_alg() {
        assert!(miniserde::json::from_str::<TokenHeader>(r#"{"typ":"JWT"}"#).is_err());
        assert!(miniserde::json::from_str::<TokenHeader>(r#"{"alg":256}"#).is_err());
        assert!(miniserde::json::from_str::<TokenHeader>(r#"["RS256"]"#).is_err());
    }
}
