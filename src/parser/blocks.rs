use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::clean_field;

static HEADER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{3}\d{2,4})\b\s*[:\-–]?\s*(.*)$").unwrap());
// "CSE405, CSE406", "CSE405 and CSE406", "CSE207/MAT205"
static CODE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}\d{2,4}(?:[\s,/&]+(?:(?:and|or)\s+)?[A-Z]{3}\d{2,4})*[\s.,;]*$").unwrap()
});

/// A course block cut out of a page, with its byte offset in the page.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// Split a flattened page into course blocks at course-header lines.
/// Text ahead of the first header is dropped; a page without any header
/// comes back as one block. Header-like lines under an open prerequisite
/// label ("Prerequisite:\nCSE251 Electronic Circuits") stay in their block.
pub fn split_blocks(page: &str) -> Vec<Block<'_>> {
    if page.trim().is_empty() {
        return Vec::new();
    }

    let mut starts: Vec<usize> = Vec::new();
    let mut in_prerequisite = false;
    for (offset, line) in line_offsets(page) {
        if is_header_line(line) {
            if in_prerequisite {
                debug!(line = line.trim(), "course line listed as prerequisite, not splitting");
            } else {
                starts.push(offset);
            }
        }
        if let Some(last) = SectionMap::scan(line).hits().last() {
            // only a bare label leaves the value to the following lines
            in_prerequisite = last.kind == LabelKind::Prerequisite
                && clean_field(&line[last.end..]).is_none();
        }
    }

    let Some(&first) = starts.first() else {
        return vec![Block {
            offset: 0,
            text: page,
        }];
    };

    if !page[..first].trim().is_empty() {
        debug!(bytes = first, "dropping page preamble");
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let end = starts.get(i + 1).copied().unwrap_or(page.len());
            Block {
                offset,
                text: &page[offset..end],
            }
        })
        .collect()
}

/// A line opening a course: leading code plus title text with at least one
/// letter on the same line. Bare codes and code lists ("CSE405",
/// "CSE405, CSE406", "CSE405 and CSE406") do not count.
pub fn is_header_line(line: &str) -> bool {
    let line = line.trim();
    if CODE_LIST_RE.is_match(line) {
        return false;
    }
    HEADER_LINE_RE
        .captures(line)
        .is_some_and(|caps| caps[2].chars().any(char::is_alphabetic))
}

fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}
