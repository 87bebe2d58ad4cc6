use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::{clean_field, normalize, outcome_codes};
use crate::record::ContentTopic;

// "<topic> | CO1, CO2" with the codes at the tail of the line.
static TOPIC_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[\s|:\-–]+(CO\d+(?:[\s,/&|]+CO\d+)*)[\s|]*$").unwrap()
});

pub struct Contents {
    pub text: Option<String>,
    pub topics: Vec<ContentTopic>,
}

pub fn extract(map: &SectionMap) -> Contents {
    let Some(body) = map.body(LabelKind::Contents) else {
        return Contents {
            text: None,
            topics: Vec::new(),
        };
    };

    Contents {
        text: clean_field(body),
        topics: topic_rows(body),
    }
}

/// Topic-to-outcome mapping rows; needs the raw line structure.
fn topic_rows(body: &str) -> Vec<ContentTopic> {
    body.lines()
        .filter_map(|line| {
            let caps = TOPIC_ROW_RE.captures(line.trim())?;
            let topic = normalize(caps[1].trim_matches(|c: char| c == '|' || c.is_whitespace()));
            if topic.is_empty() {
                return None;
            }
            Some(ContentTopic {
                topic,
                outcomes: outcome_codes(&caps[2]),
            })
        })
        .collect()
}
