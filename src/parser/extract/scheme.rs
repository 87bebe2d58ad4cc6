use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::clean_field;
use crate::record::CreditBreakdown;

const NUM: &str = r"(\d+(?:\.\d+)?)";
const SEP: &str = r"\s*[:\-–|]?\s*";

static THEORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\btheory\b{SEP}{NUM}")).unwrap());
static LAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:laboratory|lab)\b{SEP}{NUM}")).unwrap());
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\btotal\b{SEP}{NUM}")).unwrap());
// Flattened table row: "Credit Hours | 3 | 1 | 4"
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bcredit\s+hours?\b{SEP}{NUM}[\s|]+{NUM}[\s|]+{NUM}"
    ))
    .unwrap()
});
static SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\bcredit\s+hours?\b{SEP}{NUM}")).unwrap());

pub struct Scheme {
    pub teaching_scheme: Option<String>,
    pub credit_hours: Option<u32>,
    pub credits: Option<CreditBreakdown>,
}

/// Teaching scheme span plus whatever credit figures can be read out of it.
pub fn extract(map: &SectionMap) -> Scheme {
    let Some(span) = map.span(LabelKind::CreditHours) else {
        return Scheme {
            teaching_scheme: None,
            credit_hours: None,
            credits: None,
        };
    };

    let credits = breakdown(span);
    let credit_hours = credits
        .as_ref()
        .and_then(|c| c.total.as_deref())
        .and_then(whole_number);

    Scheme {
        teaching_scheme: clean_field(span),
        credit_hours,
        credits,
    }
}

fn breakdown(span: &str) -> Option<CreditBreakdown> {
    let mut credits = CreditBreakdown {
        theory: first_figure(&THEORY_RE, span),
        laboratory: first_figure(&LAB_RE, span),
        total: first_figure(&TOTAL_RE, span),
    };

    // Table layouts put the numbers on a "Credit Hours" row under the headers.
    if let Some(caps) = ROW_RE.captures(span) {
        credits.theory.get_or_insert_with(|| caps[1].to_string());
        credits.laboratory.get_or_insert_with(|| caps[2].to_string());
        credits.total.get_or_insert_with(|| caps[3].to_string());
    } else if credits.total.is_none() {
        credits.total = first_figure(&SINGLE_RE, span);
    }

    if credits.is_empty() {
        None
    } else {
        Some(credits)
    }
}

fn first_figure(re: &Regex, span: &str) -> Option<String> {
    re.captures(span).map(|c| c[1].to_string())
}

fn whole_number(raw: &str) -> Option<u32> {
    raw.parse().ok()
}
