mod email;
mod phone;

pub use email::{EmailExtractor, EMAIL_PATTERN};
pub use phone::{normalize_phone, PhoneExtractor, PHONE_DIGITS, PHONE_PATTERN};

use std::collections::BTreeSet;

/// Contact details pulled out of one document's text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub emails: BTreeSet<String>,
    pub phone_numbers: BTreeSet<String>,
}

/// Runs the email and phone extractors over the same text
pub struct ContactPatternExtractor {
    emails: EmailExtractor,
    phones: PhoneExtractor,
}

impl ContactPatternExtractor {
    pub fn new() -> Self {
        Self {
            emails: EmailExtractor::new(),
            phones: PhoneExtractor::new(),
        }
    }

    pub fn extract_from_text(&self, text: &str) -> ContactDetails {
        ContactDetails {
            emails: self.emails.extract(text),
            phone_numbers: self.phones.extract(text),
        }
    }
}

impl Default for ContactPatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}
