use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::normalize;
use crate::record::Outcome;

static CO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bCO\d+\b").unwrap());

/// Split the outcomes section into `CO<n>` entries in document order.
pub fn extract(map: &SectionMap) -> Vec<Outcome> {
    let Some(body) = map.body(LabelKind::Outcomes) else {
        return Vec::new();
    };

    // A code seen before is part of the running description, not a new entry.
    let mut seen = HashSet::new();
    let starts: Vec<(usize, usize)> = CO_RE
        .find_iter(body)
        .filter(|m| seen.insert(m.as_str()))
        .map(|m| (m.start(), m.end()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| {
            let stop = starts.get(i + 1).map(|&(next, _)| next).unwrap_or(body.len());
            Outcome {
                code: body[start..end].to_string(),
                description: describe(&body[end..stop]),
            }
        })
        .collect()
}

fn describe(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '|' | '-' | '–'));
    normalize(trimmed)
}
