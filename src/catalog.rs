use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::parser;
use crate::record::CourseRecord;
use crate::settings::Settings;

/// Catalog key holding the run metadata; no group may use it.
pub const METADATA_KEY: &str = "metadata";

/// Flattened text of one page and the catalog group it belongs to.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub group: String,
    pub path: PathBuf,
    pub text: String,
}

impl PageInput {
    /// Read a page from a `PATH` or `GROUP=PATH` argument. `-` reads stdin.
    pub fn load(spec: &str) -> Result<Self> {
        let (group, path) = parse_spec(spec)?;
        let text = read_text(&path)?;
        Ok(PageInput { group, path, text })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub extracted_at: DateTime<Utc>,
    pub source: String,
    pub pages: usize,
    pub total_courses: usize,
}

/// Course lists keyed by group (`core_courses`, `elective_courses`, ...),
/// sorted by group name, followed by the run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<CourseRecord>>,
    pub metadata: CatalogMetadata,
}

/// Extract every page in parallel and group the records. Pages that yield
/// nothing leave an empty group rather than failing the run.
pub fn build_catalog(pages: &[PageInput], settings: &Settings) -> Catalog {
    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut groups: BTreeMap<String, Vec<CourseRecord>> = BTreeMap::new();
    for chunk in pages.chunks(settings.chunk_size.max(1)) {
        let results: Vec<Vec<CourseRecord>> = chunk
            .par_iter()
            .map(|page| parser::extract_page(&page.text))
            .collect();

        for (page, records) in chunk.iter().zip(results) {
            if records.is_empty() {
                warn!(path = %page.path.display(), "no courses found on page");
            } else {
                info!(path = %page.path.display(), group = %page.group, courses = records.len(), "extracted page");
            }
            groups.entry(page.group.clone()).or_default().extend(records);
        }
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    let total_courses = groups.values().map(Vec::len).sum();
    Catalog {
        groups,
        metadata: CatalogMetadata {
            extracted_at: Utc::now(),
            source: settings.source.clone(),
            pages: pages.len(),
            total_courses,
        },
    }
}

/// `GROUP=PATH` or plain `PATH`; the group then comes from the file stem.
pub fn parse_spec(spec: &str) -> Result<(String, PathBuf)> {
    let (group, path) = match spec.split_once('=') {
        Some((group, path)) => {
            let group = group_key(group);
            if group.is_empty() || path.is_empty() {
                return Err(Error::PageSpec(spec.to_string()));
            }
            (group, PathBuf::from(path))
        }
        None if spec.is_empty() => return Err(Error::PageSpec(spec.to_string())),
        None => {
            let path = PathBuf::from(spec);
            (group_for_path(&path), path)
        }
    };
    if group == METADATA_KEY {
        return Err(Error::ReservedGroup(group));
    }
    Ok((group, path))
}

/// `core-courses.txt` → `core_courses`; stdin goes to `courses`.
pub fn group_for_path(path: &Path) -> String {
    let key = path
        .file_stem()
        .map(|s| group_key(&s.to_string_lossy()))
        .unwrap_or_default();
    if key.is_empty() || path.as_os_str() == "-" {
        "courses".to_string()
    } else {
        key
    }
}

fn group_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn read_text(path: &Path) -> Result<String> {
    let read = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
