use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use course_extract::catalog::{self, PageInput};
use course_extract::{extract_course, extract_page, Settings};

#[derive(Parser)]
#[command(name = "course_extract", about = "Course records from flattened catalog page text")]
struct Cli {
    /// Compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one course block ("-" for stdin)
    Parse { file: PathBuf },
    /// Split a whole page into course records ("-" for stdin)
    Page { file: PathBuf },
    /// Build a grouped catalog from several pages
    Catalog {
        /// PATH or GROUP=PATH; the group defaults to the file stem
        #[arg(required = true)]
        pages: Vec<String>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // stdout carries the JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().context("loading COURSES_* settings")?;
    run(cli, settings)
}

fn run(cli: Cli, mut settings: Settings) -> anyhow::Result<()> {
    let t0 = Instant::now();
    if cli.compact {
        settings.pretty = false;
    }
    info!(?settings, "starting course extraction");

    match cli.command {
        Commands::Parse { file } => {
            let text = catalog::read_text(&file)?;
            let record = extract_course(&text);
            emit(&record, settings.pretty, None)?;
            if record.code.is_none() {
                bail!("no course code found in {}", file.display());
            }
        }
        Commands::Page { file } => {
            let text = catalog::read_text(&file)?;
            let records = extract_page(&text);
            info!(courses = records.len(), "page extracted");
            emit(&records, settings.pretty, None)?;
        }
        Commands::Catalog { pages, out } => {
            let inputs = pages
                .iter()
                .map(|spec| PageInput::load(spec))
                .collect::<Result<Vec<_>, _>>()?;
            let catalog = catalog::build_catalog(&inputs, &settings);
            emit(&catalog, settings.pretty, out.as_deref())?;
            if out.is_some() {
                println!(
                    "Extracted {} courses from {} pages in {:.1}s",
                    catalog.metadata.total_courses,
                    catalog.metadata.pages,
                    t0.elapsed().as_secs_f64()
                );
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize>(value: &T, pretty: bool, out: Option<&std::path::Path>) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "catalog written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("course_extract").chain(args.iter().copied())).unwrap()
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("course_extract_{}_{}", std::process::id(), name))
    }

    #[test]
    fn parse_with_code_succeeds() {
        assert!(run(cli(&["parse", "tests/fixtures/cse402.txt"]), Settings::default()).is_ok());
    }

    #[test]
    fn parse_without_code_fails() {
        let err = run(cli(&["parse", "tests/fixtures/no_code.txt"]), Settings::default()).unwrap_err();
        assert!(err.to_string().contains("no course code found"));
    }

    #[test]
    fn missing_input_fails() {
        assert!(run(cli(&["page", "tests/fixtures/does_not_exist.txt"]), Settings::default()).is_err());
    }

    #[test]
    fn catalog_writes_out_file() {
        let out = scratch("catalog.json");
        let out_arg = out.to_string_lossy().into_owned();
        let args = [
            "catalog",
            "core_courses=tests/fixtures/core_courses.txt",
            "tests/fixtures/elective_courses.txt",
            "-o",
            out_arg.as_str(),
        ];
        run(cli(&args), Settings::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        std::fs::remove_file(&out).unwrap();
        assert_eq!(value["core_courses"].as_array().unwrap().len(), 3);
        assert_eq!(value["elective_courses"][0]["code"], "CSE405");
        assert_eq!(value["metadata"]["total_courses"], 5);
    }

    #[test]
    fn emit_compact_and_pretty() {
        let record = course_extract::extract_course("CSE402 Computer and Cyber Security");
        let compact = scratch("compact.json");
        let pretty = scratch("pretty.json");
        emit(&record, false, Some(compact.as_path())).unwrap();
        emit(&record, true, Some(pretty.as_path())).unwrap();

        let compact_text = std::fs::read_to_string(&compact).unwrap();
        let pretty_text = std::fs::read_to_string(&pretty).unwrap();
        std::fs::remove_file(&compact).unwrap();
        std::fs::remove_file(&pretty).unwrap();
        assert!(!compact_text.contains('\n'));
        assert!(pretty_text.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact_text).unwrap(),
            serde_json::from_str::<serde_json::Value>(&pretty_text).unwrap()
        );
    }

    #[test]
    fn compact_flag_and_required_pages() {
        assert!(cli(&["--compact", "page", "-"]).compact);
        assert!(Cli::try_parse_from(["course_extract", "catalog"]).is_err());
    }
}
