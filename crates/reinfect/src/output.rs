//! Config loading and result writing for the command-line driver
//!
//! Configs are YAML files holding any subset of [`AnalysisConfig`] fields;
//! missing fields take their defaults. Results are written as JSON or YAML,
//! to a file or to stdout.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use reinfect_core::AnalysisConfig;
use serde::Serialize;

/// Error types for driver I/O
#[derive(Debug)]
pub enum OutputError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(msg) => write!(f, "IO error: {}", msg),
            OutputError::Parse(msg) => write!(f, "Parse error: {}", msg),
            OutputError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for OutputError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Load an analysis config from a YAML file
pub fn load_config(path: &Path) -> Result<AnalysisConfig, OutputError> {
    let content = fs::read_to_string(path)
        .map_err(|e| OutputError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_config(&content)
        .map_err(|e| OutputError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Parse an analysis config from YAML text
pub fn parse_config(yaml: &str) -> Result<AnalysisConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

/// Render any serializable value in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| OutputError::Serialize(e.to_string())),
        OutputFormat::Yaml => {
            serde_saphyr::to_string(value).map_err(|e| OutputError::Serialize(e.to_string()))
        }
    }
}

/// Sibling of `path` with `.reinfect.tmp` appended to the full file name
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".reinfect.tmp");
    path.with_file_name(name)
}

/// Write `content` to `path`, or to stdout when no path is given.
///
/// Files are written to a temporary sibling first and renamed into place.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), OutputError> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| OutputError::Io(format!("Failed to write stdout: {}", e)));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            OutputError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let temp_path = temp_path(path);
    fs::write(&temp_path, content)
        .and_then(|_| fs::rename(&temp_path, path))
        .map_err(|e| OutputError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
