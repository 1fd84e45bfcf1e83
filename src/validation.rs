//! Per-field validators for the booking draft.
//!
//! Pure functions with no side effects; the wizard's step predicates call
//! these on demand against the current draft.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::error::{BookingError, BookingResult};

/// Digits a complete national number carries after the country code
pub const PHONE_SIGNIFICANT_DIGITS: usize = 10;

/// Reduce raw phone input to its significant digits.
///
/// Strips every non-digit, then one leading `92` country prefix or one
/// leading trunk `0`, and caps the remainder at ten digits. Copy-pasted
/// numbers with either prefix therefore land on the same digit string.
fn significant_digits(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let rest = if let Some(stripped) = digits.strip_prefix("92") {
        stripped
    } else if let Some(stripped) = digits.strip_prefix('0') {
        stripped
    } else {
        digits.as_str()
    };
    rest.chars().take(PHONE_SIGNIFICANT_DIGITS).collect()
}

/// Render phone input as `+92-XXX-XXXXXXX`.
///
/// Partial digit strings render progressively (`+92-30`); empty input
/// renders empty. Normalizing an already-formatted number is a no-op.
pub fn normalize_phone(input: &str) -> String {
    let digits = significant_digits(input);
    if digits.is_empty() {
        String::new()
    } else if digits.len() <= 3 {
        format!("+92-{}", digits)
    } else {
        format!("+92-{}-{}", &digits[..3], &digits[3..])
    }
}

/// Whether the input carries a full ten significant digits
pub fn is_complete_phone(input: &str) -> bool {
    significant_digits(input).len() == PHONE_SIGNIFICANT_DIGITS
}

/// Validate a mandatory phone field, returning the normalized form
pub fn validate_phone(field: &str, input: &str) -> BookingResult<String> {
    let digits = significant_digits(input);
    if digits.is_empty() {
        return Err(BookingError::validation_error(
            field,
            "Phone number is required",
        ));
    }
    if digits.len() < PHONE_SIGNIFICANT_DIGITS {
        return Err(BookingError::validation_error(
            field,
            "Invalid format: +92-3XX-XXXXXXX",
        ));
    }
    Ok(normalize_phone(input))
}

/// Validate an optional phone field; empty input passes as `None`
pub fn validate_optional_phone(field: &str, input: &str) -> BookingResult<Option<String>> {
    let digits = significant_digits(input);
    if digits.is_empty() {
        return Ok(None);
    }
    if digits.len() < PHONE_SIGNIFICANT_DIGITS {
        return Err(BookingError::validation_error(
            field,
            "Invalid format: +92-3XX-XXXXXXX",
        ));
    }
    Ok(Some(normalize_phone(input)))
}

/// Validate a mandatory email field
pub fn validate_email(field: &str, input: &str) -> BookingResult<()> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BookingError::validation_error(field, "Email is required"));
    }
    if !trimmed.validate_email() {
        return Err(BookingError::validation_error(
            field,
            "Invalid email address",
        ));
    }
    Ok(())
}

/// Require a string field to be non-empty after trimming
pub fn non_empty(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::validation_error(
            field,
            format!("{} is required", field),
        ));
    }
    Ok(())
}

/// Validate the guest count: present and positive
pub fn validate_guests(guests: Option<u32>) -> BookingResult<u32> {
    match guests {
        None => Err(BookingError::validation_error(
            "guests",
            "Guest count is required",
        )),
        Some(0) => Err(BookingError::validation_error(
            "guests",
            "Guest count must be positive",
        )),
        Some(n) => Ok(n),
    }
}

/// Validate the event date: present and not before `today`.
///
/// The caller supplies `today` so the check stays pure.
pub fn validate_event_date(
    field: &str,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> BookingResult<NaiveDate> {
    match date {
        None => Err(BookingError::validation_error(
            field,
            "Event date is required",
        )),
        Some(d) if d < today => Err(BookingError::validation_error(
            field,
            "Event date cannot be in the past",
        )),
        Some(d) => Ok(d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("03001234567", "+92-300-1234567" ; "trunk zero prefix")]
    #[test_case("923001234567", "+92-300-1234567" ; "country code prefix")]
    #[test_case("3001234567", "+92-300-1234567" ; "bare ten digits")]
    #[test_case("+92-300-1234567", "+92-300-1234567" ; "already formatted")]
    #[test_case("0300 123 4567", "+92-300-1234567" ; "spaces stripped")]
    #[test_case("(0300) 123-4567", "+92-300-1234567" ; "punctuation stripped")]
    #[test_case("9230012345678", "+92-300-1234567" ; "overlong truncates to ten")]
    #[test_case("0300123", "+92-300-123" ; "partial renders progressively")]
    #[test_case("03", "+92-3" ; "short partial")]
    #[test_case("", "" ; "empty stays empty")]
    #[test_case("abc", "" ; "no digits stays empty")]
    fn test_normalize_phone(input: &str, expected: &str) {
        assert_eq!(normalize_phone(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_phone("03001234567");
        let twice = normalize_phone(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validate_phone_required() {
        let err = validate_phone("phone_number", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: phone_number - Phone number is required");
    }

    #[test]
    fn test_validate_phone_incomplete() {
        let err = validate_phone("phone_number", "0300123").unwrap_err();
        assert!(err.to_string().contains("Invalid format: +92-3XX-XXXXXXX"));
    }

    #[test]
    fn test_validate_phone_complete() {
        let normalized = validate_phone("phone_number", "03001234567").unwrap();
        assert_eq!(normalized, "+92-300-1234567");
        assert!(is_complete_phone(&normalized));
    }

    #[test]
    fn test_validate_optional_phone() {
        assert_eq!(validate_optional_phone("alternative_phone", "").unwrap(), None);
        assert_eq!(
            validate_optional_phone("alternative_phone", "03007654321").unwrap(),
            Some("+92-300-7654321".to_string())
        );
        assert!(validate_optional_phone("alternative_phone", "0300").is_err());
    }

    #[test_case("ali@example.com", true ; "plain address")]
    #[test_case("a.b+tag@sub.example.pk", true ; "tagged subdomain address")]
    #[test_case("not-an-email", false ; "missing at sign")]
    #[test_case("", false ; "empty")]
    #[test_case("   ", false ; "whitespace only")]
    fn test_validate_email(input: &str, ok: bool) {
        assert_eq!(validate_email("email", input).is_ok(), ok);
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty("full_name", "Ali Khan").is_ok());
        assert!(non_empty("full_name", "  ").is_err());
    }

    #[test]
    fn test_validate_guests() {
        assert_eq!(validate_guests(Some(250)).unwrap(), 250);
        assert!(validate_guests(Some(0)).is_err());
        assert!(validate_guests(None).is_err());
    }

    #[test]
    fn test_validate_event_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();

        assert_eq!(
            validate_event_date("event_date", Some(today), today).unwrap(),
            today
        );
        assert_eq!(
            validate_event_date("event_date", Some(tomorrow), today).unwrap(),
            tomorrow
        );
        assert!(validate_event_date("event_date", Some(yesterday), today).is_err());
        assert!(validate_event_date("event_date", None, today).is_err());
    }
}
