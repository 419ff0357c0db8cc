pub mod file;
pub mod scenario_arg;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>` or, failing that, piped stdin.
/// `None` means the command should fall back to its individual flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
