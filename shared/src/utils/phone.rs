//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("valid phone regex")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format, formatting allowed)
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Mask a phone number for display: every character but the last three becomes `*`.
///
/// Numbers of three characters or fewer are fully masked.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 3 {
        return "*".repeat(chars.len());
    }

    let visible_from = chars.len() - 3;
    let mut masked = "*".repeat(visible_from);
    masked.extend(&chars[visible_from..]);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+48 123-456-789"), "+48123456789");
        assert_eq!(normalize_phone_number("(415) 555 2671"), "4155552671");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+48123456789"));
        assert!(is_valid_phone("+1 415 555 2671"));
        assert!(!is_valid_phone("123456789")); // Missing +
        assert!(!is_valid_phone("+0123456789")); // Invalid country code
        assert!(!is_valid_phone("+12"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("123456789"), "******789");
        assert_eq!(mask_phone_number("+48123456789"), "*********789");
        assert_eq!(mask_phone_number("12"), "**");
    }
}
