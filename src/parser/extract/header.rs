use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::SectionMap;
use crate::parser::text::normalize;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{3}\d{2,4})\b\s*[:\-–]?\s*(.*)$").unwrap());

pub struct Header {
    pub code: Option<String>,
    pub title: String,
}

/// Split the heading of a course block into code and title.
pub fn extract(map: &SectionMap) -> Header {
    let text = map.text();
    // Everything ahead of the first section label is heading material.
    let head = &text[..map.earliest_start().unwrap_or(text.len())];
    let mut lines = head.lines().map(str::trim).filter(|l| !l.is_empty());

    let Some(first) = lines.next() else {
        return Header {
            code: None,
            title: String::new(),
        };
    };

    match HEADER_RE.captures(first) {
        Some(caps) => {
            let mut title = normalize(&caps[2]);
            // "CSE487" alone on the heading line, title on the next one
            if title.is_empty() {
                title = lines.next().map(normalize).unwrap_or_default();
            }
            Header {
                code: Some(caps[1].to_string()),
                title,
            }
        }
        None => Header {
            code: None,
            title: normalize(first),
        },
    }
}
