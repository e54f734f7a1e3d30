use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

pub const CONFIG_FILE: &str = "jscov-cobertura.toml";
pub const DEFAULT_INPUT_PATH: &str = "target/coverage/jscoverage.json";
pub const DEFAULT_OUTPUT_PATH: &str = "target/coverage/cobertura-coverage.xml";

/// Optional `jscov-cobertura.toml`
///
/// ```toml
/// [paths]
/// input = "build/jscoverage.json"
/// output = "build/cobertura.xml"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_toml(&content).map_err(|message| ConvertError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.paths.input.as_os_str().is_empty() {
            return Err("paths.input must not be empty".to_string());
        }
        if self.paths.output.as_os_str().is_empty() {
            return Err("paths.output must not be empty".to_string());
        }
        if self.paths.input == self.paths.output {
            return Err(format!(
                "paths.input and paths.output both point to '{}'",
                self.paths.input.display()
            ));
        }
        Ok(())
    }
}
