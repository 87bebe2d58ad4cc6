use std::sync::LazyLock;

use regex::Regex;

// Each pattern also eats one trailing separator (":", "-", "|") so captures
// start at the section body.
static CREDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcredit\s+hours?\b").unwrap());
static PREREQ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpre-?requisites?\b\s*[:\-–|]?\s*").unwrap());
static OBJECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcourse\s+objectives?\b\s*[:\-–|]?\s*").unwrap());
static OUTCOMES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcourse\s+outcomes?\b(?:\s*\(\s*cos?\s*\))?\s*[:\-–|]?\s*").unwrap()
});
static CONTENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcourse\s+contents?\b\s*[:\-–|]?\s*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    CreditHours,
    Prerequisite,
    Objective,
    Outcomes,
    Contents,
}

impl LabelKind {
    pub const ALL: [LabelKind; 5] = [
        LabelKind::CreditHours,
        LabelKind::Prerequisite,
        LabelKind::Objective,
        LabelKind::Outcomes,
        LabelKind::Contents,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            LabelKind::CreditHours => &*CREDIT_RE,
            LabelKind::Prerequisite => &*PREREQ_RE,
            LabelKind::Objective => &*OBJECTIVE_RE,
            LabelKind::Outcomes => &*OUTCOMES_RE,
            LabelKind::Contents => &*CONTENTS_RE,
        }
    }
}

/// One occurrence of a section label. `start..end` covers the label and its
/// separator; the section body begins at `end`.
#[derive(Debug, Clone, Copy)]
pub struct LabelHit {
    pub kind: LabelKind,
    pub start: usize,
    pub end: usize,
}

/// Every label occurrence in a course block, sorted by position.
#[derive(Debug, Clone)]
pub struct SectionMap<'a> {
    text: &'a str,
    hits: Vec<LabelHit>,
}

impl<'a> SectionMap<'a> {
    pub fn scan(text: &'a str) -> Self {
        let mut hits: Vec<LabelHit> = LabelKind::ALL
            .iter()
            .flat_map(|&kind| {
                kind.regex().find_iter(text).map(move |m| LabelHit {
                    kind,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();
        hits.sort_by_key(|h| h.start);
        SectionMap { text, hits }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn hits(&self) -> &[LabelHit] {
        &self.hits
    }

    /// First occurrence of a label kind in document order.
    pub fn first(&self, kind: LabelKind) -> Option<LabelHit> {
        self.hits.iter().find(|h| h.kind == kind).copied()
    }

    /// Start of the earliest label of any kind, if any.
    pub fn earliest_start(&self) -> Option<usize> {
        self.hits.first().map(|h| h.start)
    }

    /// Where a section opened by `hit` stops: the next label of another kind,
    /// or end of text. Repeats of the same label (table headers) do not close it.
    pub fn boundary_after(&self, hit: LabelHit) -> usize {
        self.hits
            .iter()
            .find(|h| h.start >= hit.end && h.kind != hit.kind)
            .map(|h| h.start)
            .unwrap_or(self.text.len())
    }

    /// Raw body of the first `kind` section, label excluded.
    pub fn body(&self, kind: LabelKind) -> Option<&'a str> {
        let hit = self.first(kind)?;
        Some(&self.text[hit.end..self.boundary_after(hit)])
    }

    /// Raw span of the first `kind` section, label included.
    pub fn span(&self, kind: LabelKind) -> Option<&'a str> {
        let hit = self.first(kind)?;
        Some(&self.text[hit.start..self.boundary_after(hit)])
    }
}
