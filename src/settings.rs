use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_SOURCE: &str = "East West University CSE Department";

/// Runtime knobs, overridable through `COURSES_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Pages handed to the worker pool per round.
    pub chunk_size: usize,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Recorded in catalog metadata.
    pub source: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chunk_size: 64,
            pretty: true,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("COURSES").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("chunk_size", defaults.chunk_size as u64)?
            .set_default("pretty", defaults.pretty)?
            .set_default("source", defaults.source)?
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings.clamped())
    }

    fn clamped(mut self) -> Self {
        self.chunk_size = self.chunk_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("COURSES")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn defaults_without_env() {
        let s = Settings::from_env(env(&[])).unwrap();
        assert_eq!(s.chunk_size, 64);
        assert!(s.pretty);
        assert_eq!(s.source, DEFAULT_SOURCE);
    }

    #[test]
    fn env_overrides() {
        let s = Settings::from_env(env(&[
            ("COURSES_CHUNK_SIZE", "8"),
            ("COURSES_PRETTY", "false"),
            ("COURSES_SOURCE", "test run"),
        ]))
        .unwrap();
        assert_eq!(s.chunk_size, 8);
        assert!(!s.pretty);
        assert_eq!(s.source, "test run");
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let s = Settings::from_env(env(&[("COURSES_CHUNK_SIZE", "0")])).unwrap();
        assert_eq!(s.chunk_size, 1);
    }

    #[test]
    fn bad_value_is_an_error() {
        assert!(Settings::from_env(env(&[("COURSES_CHUNK_SIZE", "lots")])).is_err());
    }
}
