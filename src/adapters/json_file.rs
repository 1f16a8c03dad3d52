// SPDX-License-Identifier: Apache-2.0

//! JSON file loader adapter.
//!
//! This module provides an adapter that reads sectioned configuration from
//! JSON files: the document root must be an object, each top-level key is a
//! section, and each section object maps option names to raw values.

use crate::domain::{ConfigError, Result, Value};
use crate::ports::ConfigFile;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded JSON configuration file.
///
/// The file is read and parsed once at load time; `sections` and `items`
/// serve the cached result. Scalar values keep their native JSON type and
/// arrays of scalars become list values.
///
/// # Examples
///
/// ```no_run
/// use schemacfg::adapters::JsonFile;
/// use schemacfg::ports::ConfigFile;
///
/// let file = JsonFile::load("/etc/myapp/config.json").unwrap();
/// assert_eq!(file.extensions(), &["json"]);
/// ```
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    sections: Vec<(String, Vec<(String, Value)>)>,
}

impl JsonFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::IoError`] if the file cannot be read.
    /// * [`ConfigError::ParseError`] if the content is not valid JSON, the
    ///   root is not an object, or a top-level value is not an object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        let root: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                message: format!("invalid JSON in {}", path.display()),
                source: Some(Box::new(e)),
            })?;

        let object = match root {
            serde_json::Value::Object(object) => object,
            _ => {
                return Err(ConfigError::ParseError {
                    message: format!("the root of {} is not an object", path.display()),
                    source: None,
                })
            }
        };

        let mut sections = Vec::new();
        for (name, value) in object {
            let section = match value {
                serde_json::Value::Object(section) => section,
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

fn convert(value: serde_json::Value, path: &Path) -> Result<Value> {
    Ok(match value {
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Null => Value::Str(String::new()),
        serde_json::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| convert(item, path))
                .collect::<Result<Vec<Value>>>()?,
        ),
        serde_json::Value::Object(_) => {
            return Err(ConfigError::ParseError {
                message: format!(
                    "nested objects are not supported as option values in {}",
                    path.display()
                ),
                source: None,
            })
        }
    })
}

impl ConfigFile for JsonFile {
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
        &["json"]
    }
}
