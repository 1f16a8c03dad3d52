// SPDX-License-Identifier: Apache-2.0

//! Adapters layer containing file-format loader implementations.
//!
//! This module contains concrete implementations of the [`ConfigFile`] trait
//! for the compiled-in file formats, plus the extension-based dispatch the
//! resolution pipeline uses to pick an adapter for a path.
//!
//! [`ConfigFile`]: crate::ports::ConfigFile

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigFile;
use std::path::Path;

#[cfg(feature = "json")]
pub mod json_file;
#[cfg(feature = "toml")]
pub mod toml_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "json")]
pub use json_file::JsonFile;
#[cfg(feature = "toml")]
pub use toml_file::TomlFile;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlFile;

/// Returns the file extensions the compiled adapters understand.
pub fn supported_extensions() -> Vec<&'static str> {
    let mut choices = Vec::new();
    #[cfg(feature = "toml")]
    choices.push("toml");
    #[cfg(feature = "yaml")]
    {
        choices.push("yaml");
        choices.push("yml");
    }
    #[cfg(feature = "json")]
    choices.push("json");
    choices
}

/// Loads the file at `path` with the adapter mapped to its extension.
///
/// The extension is the substring after the last `.` in the path.
///
/// # Errors
///
/// * [`ConfigError::UnrecognizedFileExtension`] if no adapter is mapped to
///   the extension.
/// * Any error the selected adapter raises while reading or parsing.
///
/// # Examples
///
/// ```no_run
/// use schemacfg::adapters;
///
/// let file = adapters::open("conf.toml").unwrap();
/// assert!(file.sections().is_empty() || !file.sections().is_empty());
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn ConfigFile>> {
    let path = path.as_ref();
    // Everything after the last '.', so a dotfile like `.toml` maps to the
    // TOML adapter and a dotless path reports itself as the extension.
    let text = path.to_string_lossy();
    let extension = text.rsplit('.').next().unwrap_or("").to_string();
    match extension.as_str() {
        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(TomlFile::load(path)?)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(YamlFile::load(path)?)),
        #[cfg(feature = "json")]
        "json" => Ok(Box::new(JsonFile::load(path)?)),
        _ => Err(ConfigError::UnrecognizedFileExtension {
            extension,
            choices: supported_extensions().join(", "),
        }),
    }
}
