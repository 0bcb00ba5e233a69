//! Syntactic pre-filter applied before any network work.
//!
//! The check is a deliberate cost/accuracy trade-off: a single fixed pattern
//! that rejects obviously malformed input. It is not RFC 5322 compliance and
//! will accept a few invalid edge cases (and reject some valid rare ones).

use std::sync::OnceLock;

use regex::Regex;

/// `localpart@sub.domain.tld`-shaped strings: word/dot/hyphen local part and
/// domain, final label of at least one word character.
const FORMAT_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";

static FORMAT_RE: OnceLock<Regex> = OnceLock::new();

fn format_regex() -> &'static Regex {
    FORMAT_RE.get_or_init(|| Regex::new(FORMAT_PATTERN).expect("format pattern compiles"))
}

/// Cheap rejection filter. No side effects, no network.
pub fn is_valid_format(address: &str) -> bool {
    format_regex().is_match(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_format("alice@example.com"));
        assert!(is_valid_format("first.last@mail.corp.example"));
        assert!(is_valid_format("a-b@sub-domain.example.org"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(!is_valid_format("not-an-email"));
        assert!(!is_valid_format("missing-domain@"));
        assert!(!is_valid_format("@missing-local.example"));
        assert!(!is_valid_format("no-tld@example"));
        assert!(!is_valid_format(""));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        // trimming is the pipeline's job, the pattern is anchored
        assert!(!is_valid_format(" alice@example.com"));
        assert!(!is_valid_format("alice@example.com\n"));
    }

    #[test]
    fn rejects_double_at() {
        assert!(!is_valid_format("a@b@example.com"));
    }

    proptest! {
        #[test]
        fn accepts_generated_simple_addresses(
            local in "[a-z0-9]{1,16}",
            domain in "[a-z0-9]{1,12}",
            tld in "[a-z]{2,6}",
        ) {
            let address = format!("{local}@{domain}.{tld}");
            prop_assert!(is_valid_format(&address));
        }

        #[test]
        fn rejects_strings_without_at(input in "[a-z0-9.-]{0,32}") {
            prop_assert!(!is_valid_format(&input));
        }
    }
}
