pub mod contents;
pub mod header;
pub mod objective;
pub mod outcomes;
pub mod prerequisite;
pub mod scheme;

use super::sections::SectionMap;
use crate::record::CourseRecord;

/// Run every field pass over one course block. Passes are independent;
/// each one only reads the shared label map.
pub fn extract_all(map: &SectionMap) -> CourseRecord {
    let header = header::extract(map);
    let scheme = scheme::extract(map);
    let prerequisite = prerequisite::extract(map);
    let objective = objective::extract(map);
    let outcomes = outcomes::extract(map);
    let contents = contents::extract(map);

    CourseRecord {
        code: header.code,
        title: header.title,
        credit_hours: scheme.credit_hours,
        credits: scheme.credits,
        teaching_scheme: scheme.teaching_scheme,
        prerequisite: prerequisite.text,
        prerequisite_codes: prerequisite.codes,
        objective,
        outcomes,
        contents: contents.text,
        content_topics: contents.topics,
    }
}

// ── Tests ──
