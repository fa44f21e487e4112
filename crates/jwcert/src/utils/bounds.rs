//! Bounds validation utilities

use crate::error::{Error, Result};

/// Apply clock skew to a timestamp with overflow protection
pub(crate) fn apply_clock_skew(timestamp: i64, skew_seconds: u64, add: bool) -> Result<i64> {
    let skew_i64 = i64::try_from(skew_seconds).map_err(|_| Error::TimestampOverflow)?;
    if add {
        timestamp.checked_add(skew_i64)
    } else {
        timestamp.checked_sub(skew_i64)
    }
    .ok_or(Error::TimestampOverflow)
}

/// Validate header field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::HeaderFieldTooLong {
            field: field.into(),
            length: value.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clock_skew() {
        assert_eq!(apply_clock_skew(100, 30, true).unwrap(), 130);
        assert_eq!(apply_clock_skew(100, 30, false).unwrap(), 70);
        assert_eq!(apply_clock_skew(100, 0, true).unwrap(), 100);
    }

    #[test]
    fn test_apply_clock_skew_overflow() {
        assert!(matches!(
            apply_clock_skew(i64::MAX, 1, true),
            Err(Error::TimestampOverflow)
        ));
        assert!(matches!(
            apply_clock_skew(i64::MIN, 1, false),
            Err(Error::TimestampOverflow)
        ));
        assert!(matches!(
            apply_clock_skew(0, u64::MAX, true),
            Err(Error::TimestampOverflow)
        ));
    }

    #[test]
    fn test_validate_field_size() {
        assert!(validate_field_size("alg", "RS256", 16).is_ok());
        assert!(matches!(
            validate_field_size("alg", &"A".repeat(17), 16),
            Err(Error::HeaderFieldTooLong { length: 17, max: 16, .. })
        ));
    }
}
