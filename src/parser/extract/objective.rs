use crate::parser::sections::{LabelKind, SectionMap};
use crate::parser::text::clean_field;

pub fn extract(map: &SectionMap) -> Option<String> {
    map.body(LabelKind::Objective).and_then(clean_field)
}
