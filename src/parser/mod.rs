pub mod blocks;
pub mod extract;
pub mod sections;
pub mod text;

use std::collections::HashMap;

use tracing::debug;

use crate::record::CourseRecord;
use sections::SectionMap;

/// One course block of flattened text → one record. Never fails; fields
/// that cannot be found stay empty.
pub fn extract_course(text: &str) -> CourseRecord {
    let text = text::unify_newlines(text);
    let map = SectionMap::scan(&text);
    extract::extract_all(&map)
}

/// Whole page → records with a course code, in page order, one per code.
pub fn extract_page(page: &str) -> Vec<CourseRecord> {
    let records = blocks::split_blocks(page)
        .into_iter()
        .filter_map(|block| {
            let record = extract_course(block.text);
            if record.code.is_none() {
                debug!(offset = block.offset, title = %record.title, "discarding block without course code");
                return None;
            }
            Some(record)
        })
        .collect();
    merge_duplicates(records)
}

/// Pages often list every course in an index before the full entries.
/// Keep the first position of each code and the richer of the records.
fn merge_duplicates(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<CourseRecord> = Vec::with_capacity(records.len());

    for record in records {
        let Some(code) = record.code.clone() else {
            continue;
        };
        match index.get(&code) {
            Some(&i) => {
                if record.richness() > merged[i].richness() {
                    debug!(code = %code, "replacing sparse duplicate entry");
                    merged[i] = record;
                }
            }
            None => {
                index.insert(code, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Outcome;

    const CSE402: &str = "CSE402 Computer and Cyber Security\nCredit Hours and Teaching Scheme: Theory 3 Lab 0 Total 3\nPrerequisite: CSE270\nCourse Objective: To teach security. Course Outcomes (COs): CO1 Identify threats. Course Contents Topics on cryptography.";

    #[test]
    fn end_to_end_block() {
        let r = extract_course(CSE402);
        assert_eq!(r.code.as_deref(), Some("CSE402"));
        assert_eq!(r.title, "Computer and Cyber Security");
        assert_eq!(r.credit_hours, Some(3));
        assert_eq!(
            r.teaching_scheme.as_deref(),
            Some("Credit Hours and Teaching Scheme: Theory 3 Lab 0 Total 3")
        );
        assert_eq!(r.prerequisite.as_deref(), Some("CSE270"));
        assert_eq!(r.objective.as_deref(), Some("To teach security."));
        assert_eq!(
            r.outcomes,
            vec![Outcome {
                code: "CO1".into(),
                description: "Identify threats.".into()
            }]
        );
        assert_eq!(r.contents.as_deref(), Some("Topics on cryptography."));
    }

    #[test]
    fn extraction_is_repeatable() {
        let inputs = [
            CSE402,
            "",
            "no labels here at all",
            "CSE487: Computer and Cyber Security\nCourse Outcomes (COs): CO1 a CO2 b",
        ];
        for input in inputs {
            assert_eq!(extract_course(input), extract_course(input));
        }
    }

    #[test]
    fn title_without_code_is_first_line() {
        for first in ["introduction to computing", "Data   Structures ", "lab safety rules and notes"] {
            let text = format!("{}\nsecond line\nCourse Objective: x", first);
            let r = extract_course(&text);
            assert!(r.code.is_none());
            assert_eq!(r.title, text::normalize(first));
        }
    }

    #[test]
    fn missing_prerequisite_is_not_an_error() {
        let r = extract_course("CSE101 Intro\nCourse Objective: Basics.\nCourse Contents: Everything.");
        assert!(r.prerequisite.is_none());
        assert_eq!(r.objective.as_deref(), Some("Basics."));
    }

    #[test]
    fn garbage_input_gives_empty_record() {
        let r = extract_course("\u{0}\u{7f} ||| -- :: \n\n");
        assert!(r.code.is_none());
        assert!(r.outcomes.is_empty());
        assert!(r.teaching_scheme.is_none());
    }

    #[test]
    fn page_merges_index_entries() {
        let page = std::fs::read_to_string("tests/fixtures/core_courses.txt").unwrap();
        let records = extract_page(&page);
        let codes: Vec<&str> = records.iter().filter_map(|r| r.code.as_deref()).collect();
        assert_eq!(codes, vec!["CSE103", "CSE106", "CSE487"]);
        // the full entries replaced the index stubs
        assert!(records.iter().all(|r| r.objective.is_some()));
        assert_eq!(records[2].credit_hours, Some(4));
        assert_eq!(records[1].prerequisite_codes, vec!["CSE103"]);
    }

    #[test]
    fn page_with_digit_title_and_listed_prerequisite() {
        let page = std::fs::read_to_string("tests/fixtures/systems_courses.txt").unwrap();
        let records = extract_page(&page);
        let codes: Vec<&str> = records.iter().filter_map(|r| r.code.as_deref()).collect();
        assert_eq!(codes, vec!["CSE251", "CSE344", "CSE345", "CSE360"]);

        assert_eq!(records[1].contents.as_deref(), Some("TCP."));
        assert_eq!(records[2].title, "3D Computer Graphics");
        assert_eq!(records[2].outcomes.len(), 2);

        let arch = &records[3];
        assert_eq!(arch.prerequisite.as_deref(), Some("CSE251 Electronic Circuits"));
        assert_eq!(arch.prerequisite_codes, vec!["CSE251"]);
        assert_eq!(
            arch.objective.as_deref(),
            Some("To explain processor and memory organisation.")
        );
        assert_eq!(arch.contents.as_deref(), Some("Instruction sets, pipelining, caches."));

        // the prerequisite mention must not shadow the real CSE251 entry
        assert_eq!(records[0].title, "Electronic Circuits");
        assert_eq!(
            records[0].objective.as_deref(),
            Some("To analyse diode and transistor circuits.")
        );
    }

    #[test]
    fn crlf_page_keeps_wrapped_prerequisite() {
        let page = "CSE480: Machine Learning\r\nPrerequisite: CSE207 and\r\nMAT205\r\nCourse Objective: x\r\n";
        let records = extract_page(page);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prerequisite.as_deref(), Some("CSE207 and MAT205"));
        assert_eq!(records[0].prerequisite_codes, vec!["CSE207", "MAT205"]);
    }

    #[test]
    fn page_without_course_codes() {
        assert!(extract_page("About the department\nCourse Objective: none").is_empty());
        assert!(extract_page("").is_empty());
    }

    #[test]
    fn merge_keeps_first_position() {
        let sparse = CourseRecord {
            code: Some("CSE1".into()),
            title: "A".into(),
            ..Default::default()
        };
        let other = CourseRecord {
            code: Some("CSE2".into()),
            ..Default::default()
        };
        let rich = CourseRecord {
            code: Some("CSE1".into()),
            title: "A".into(),
            objective: Some("o".into()),
            ..Default::default()
        };
        let merged = merge_duplicates(vec![sparse, other, rich.clone()]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], rich);
    }
}
