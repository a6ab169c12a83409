use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Optional `+<1-3 digits>` prefix, a 3-digit area code with or without
/// parentheses, then two digit groups. Groups may be separated by a space
/// or a hyphen.
pub const PHONE_PATTERN: &str =
    r"(?:\+?\d{1,3}[\s-]?)?(?:\(\d{3}\)|\d{3})[\s-]?\d{2,4}[\s-]?\d{2,4}";

/// Length of a normalized number
pub const PHONE_DIGITS: usize = 10;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"));

pub struct PhoneExtractor {
    regex: &'static Regex,
}

impl PhoneExtractor {
    pub fn new() -> Self {
        Self {
            regex: &PHONE_REGEX,
        }
    }

    /// Unique normalized numbers found in `text`
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let numbers: BTreeSet<String> = self
            .regex
            .find_iter(text)
            .filter_map(|m| normalize_phone(m.as_str()))
            .collect();

        tracing::info!(count = numbers.len(), "Contact numbers: {:?}", numbers);
        numbers
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip everything but digits and keep the 10-digit national number.
///
/// Fewer than 10 digits is noise and yields `None`. Longer numbers lose
/// their leading international-prefix digits: for the usual `+CC` two-digit
/// country code this is exactly "drop the first two digits". The rule does
/// not know real country-code lengths, so trunk prefixes and unusual formats
/// come out wrong; that imprecision is accepted.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < PHONE_DIGITS {
        return None;
    }

    let prefix_len = digits.len() - PHONE_DIGITS;
    Some(digits[prefix_len..].to_string())
}
