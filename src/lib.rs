//! Structured course records from the flattened text of department catalog
//! pages: code, title, credit scheme, prerequisite, objective, outcomes and
//! contents.

pub mod catalog;
pub mod error;
pub mod parser;
pub mod record;
pub mod settings;

pub use catalog::{build_catalog, Catalog, PageInput};
pub use error::{Error, Result};
pub use parser::{extract_course, extract_page};
pub use record::{ContentTopic, CourseRecord, CreditBreakdown, Outcome};
pub use settings::Settings;
