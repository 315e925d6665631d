use regex::Regex;

/// A UTR (bank transaction reference) is exactly 12 ASCII digits.
pub fn is_valid_utr(candidate: &str) -> bool {
    let re = Regex::new(r"^[0-9]{12}$").unwrap();
    re.is_match(candidate.trim())
}

/// UPI virtual payment address, `name@bank`.
pub fn is_valid_upi(candidate: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9._-]{2,256}@[a-zA-Z]{2,64}$").unwrap();
    re.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utr_accepts_exactly_twelve_digits() {
        assert!(is_valid_utr("123456789012"));
        assert!(is_valid_utr("  112233445566  "));
    }

    #[test]
    fn utr_rejects_everything_else() {
        assert!(!is_valid_utr("12345"));
        assert!(!is_valid_utr("1234567890123"));
        assert!(!is_valid_utr("12345678901a"));
        assert!(!is_valid_utr("12345 789012"));
        assert!(!is_valid_utr(""));
    }

    #[test]
    fn upi_addresses() {
        assert!(is_valid_upi("amora.pay@upi"));
        assert!(is_valid_upi("some_user-01@okaxis"));
        assert!(!is_valid_upi("@upi"));
        assert!(!is_valid_upi("user@"));
        assert!(!is_valid_upi("user@bank2"));
        assert!(!is_valid_upi("no-at-sign"));
    }
}
