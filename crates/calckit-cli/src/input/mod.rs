//! JSON input for commands: an explicit `--input` file, or piped stdin.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load a typed input from `--input <file>` if given, else from piped stdin.
/// `Ok(None)` means neither was supplied and the caller should use its flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> CliResult<Option<T>> {
    let value = match path {
        Some(p) => Some(read_file(p)?),
        None => read_stdin()?,
    };
    match value {
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
        None => Ok(None),
    }
}

fn read_file(path: &str) -> CliResult<Value> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
    tracing::debug!(path = %resolved.display(), "loaded input file");
    Ok(value)
}

/// Piped JSON on stdin. Interactive terminals and empty input yield `None`.
fn read_stdin() -> CliResult<Option<Value>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "read input from stdin");
    Ok(Some(serde_json::from_str(trimmed)?))
}

fn resolve_path(path: &str) -> CliResult<PathBuf> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
