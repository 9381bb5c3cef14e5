//! Well-known regular expressions

use regex::Regex;
use std::sync::OnceLock;

/// A well-formed HTML element id: a letter followed by letters, digits,
/// hyphens and underscores.
pub const HTML_ID: &str = r"^[a-zA-Z][-_0-9a-zA-Z]*$";

/// A practical e-mail address pattern. Matches the vast majority of
/// addresses in use; not RFC 2822 compliant.
pub const EMAIL_ADDRESS: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Check a computed element id against [`HTML_ID`]
pub fn is_html_id(id: &str) -> bool {
    static HTML_ID_RE: OnceLock<Regex> = OnceLock::new();
    HTML_ID_RE
        .get_or_init(|| Regex::new(HTML_ID).expect("valid html id pattern"))
        .is_match(id)
}

/// Compile `pattern` so that it must match a whole response
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}
