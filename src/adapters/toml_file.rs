// SPDX-License-Identifier: Apache-2.0

//! TOML file loader adapter.
//!
//! This module provides an adapter that reads sectioned configuration from
//! TOML files: every top-level table is a section and its entries are raw
//! option values.

use crate::domain::{ConfigError, Result, Value};
use crate::ports::ConfigFile;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded TOML configuration file.
///
/// The file is read and parsed once at load time; `sections` and `items`
/// serve the cached result. Scalar values keep their native TOML type.
///
/// # Examples
///
/// ```no_run
/// use schemacfg::adapters::TomlFile;
/// use schemacfg::ports::ConfigFile;
///
/// let file = TomlFile::load("/etc/myapp/config.toml").unwrap();
/// for section in file.sections() {
///     let _ = file.items(&section);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TomlFile {
    path: PathBuf,
    sections: Vec<(String, Vec<(String, Value)>)>,
}

impl TomlFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::IoError`] if the file cannot be read.
    /// * [`ConfigError::ParseError`] if the content is not valid TOML, or a
    ///   top-level entry is not a table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        let table: toml::Table =
            content
                .parse()
                .map_err(|e: toml::de::Error| ConfigError::ParseError {
                    message: format!("invalid TOML in {}", path.display()),
                    source: Some(Box::new(e)),
                })?;

        let mut sections = Vec::new();
        for (name, value) in table {
            let section = match value {
                toml::Value::Table(section) => section,
                _ => {
                    return Err(ConfigError::ParseError {
                        message: format!(
                            "top-level entry '{}' in {} is not a section",
                            name,
                            path.display()
                        ),
                        source: None,
                    })
                }
            };
            let mut items = Vec::new();
            for (key, raw) in section {
                items.push((key, convert(raw, &path)?));
            }
            sections.push((name, items));
        }
        Ok(Self { path, sections })
    }
}

fn convert(value: toml::Value, path: &Path) -> Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::Str(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
        toml::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| convert(item, path))
                .collect::<Result<Vec<Value>>>()?,
        ),
        toml::Value::Table(_) => {
            return Err(ConfigError::ParseError {
                message: format!(
                    "nested tables are not supported as option values in {}",
                    path.display()
                ),
                source: None,
            })
        }
    })
}

impl ConfigFile for TomlFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn sections(&self) -> Vec<String> {
        self.sections.iter().map(|(name, _)| name.clone()).collect()
    }

    fn items(&self, section: &str) -> Vec<(String, Value)> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, items)| items.clone())
            .unwrap_or_default()
    }

    fn extensions(&self) -> &[&str] {
        &["toml"]
    }
}
