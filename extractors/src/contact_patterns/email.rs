use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Local part, domain and top-level suffix as three groups. The leading
/// `[^.]` keeps a match from starting right after a period inside a longer
/// dotted token; it consumes one character that is not part of the address.
pub const EMAIL_PATTERN: &str =
    r"[^.]([a-zA-Z0-9._%+-]+[^.])@([a-zA-Z0-9]+(?:\.[a-zA-Z0-9]+)*)(\s*\.[a-zA-Z]{2,})";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

pub struct EmailExtractor {
    regex: &'static Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            regex: &EMAIL_REGEX,
        }
    }

    /// Unique addresses found in `text`, rebuilt from the captured groups
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut emails = BTreeSet::new();

        for caps in self.regex.captures_iter(text) {
            let (Some(local), Some(domain), Some(suffix)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            emails.insert(format!(
                "{}@{}{}",
                local.as_str().trim(),
                domain.as_str().trim(),
                suffix.as_str().trim()
            ));
        }

        tracing::info!(count = emails.len(), "Email matches: {:?}", emails);
        emails
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}
