use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::{clean_field, course_codes};

static GAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

pub struct Prerequisite {
    pub text: Option<String>,
    pub codes: Vec<String>,
}

pub fn extract(map: &SectionMap) -> Prerequisite {
    let text = map
        .body(LabelKind::Prerequisite)
        .map(|body| {
            let body = body.trim_start();
            // a wide gap ends the value when no label follows it directly
            match GAP_RE.find(body) {
                Some(gap) => &body[..gap.start()],
                None => body,
            }
        })
        .and_then(clean_field);

    let codes = text.as_deref().map(course_codes).unwrap_or_default();
    Prerequisite { text, codes }
}
