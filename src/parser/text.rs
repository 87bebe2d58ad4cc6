use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3}\d{2,4}\b").unwrap());
static OUTCOME_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bCO\d+\b").unwrap());

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `\r\n` → `\n`, so a Windows line break counts as one whitespace char.
pub fn unify_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Normalize a captured span and drop leftover table separators at its edges.
/// Empty results become `None`.
pub fn clean_field(raw: &str) -> Option<String> {
    let cleaned = normalize(raw.trim_matches(|c: char| c == '|' || c.is_whitespace()));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Course codes (`CSE270`, `MAT101`) in document order, first occurrence only.
pub fn course_codes(text: &str) -> Vec<String> {
    unique_matches(&COURSE_CODE_RE, text)
}

/// Outcome codes (`CO1`, `CO12`) in document order, first occurrence only.
pub fn outcome_codes(text: &str) -> Vec<String> {
    unique_matches(&OUTCOME_CODE_RE, text)
}

fn unique_matches(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}
