// SPDX-License-Identifier: Apache-2.0

//! YAML file loader adapter.
//!
//! This module provides an adapter that reads sectioned configuration from
//! YAML files: the document root must be a mapping, each top-level key is a
//! section, and each section maps option names to raw values.

use crate::domain::{ConfigError, Result, Value};
use crate::ports::ConfigFile;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded YAML configuration file.
///
/// The file is read and parsed once at load time; `sections` and `items`
/// serve the cached result. Scalar values keep their native YAML type and
/// sequences of scalars become list values.
///
/// # Examples
///
/// ```no_run
/// use schemacfg::adapters::YamlFile;
/// use schemacfg::ports::ConfigFile;
///
/// let file = YamlFile::load("/etc/myapp/config.yaml").unwrap();
/// assert!(file.extensions().contains(&"yml"));
/// ```
#[derive(Debug, Clone)]
pub struct YamlFile {
    path: PathBuf,
    sections: Vec<(String, Vec<(String, Value)>)>,
}

impl YamlFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::IoError`] if the file cannot be read.
    /// * [`ConfigError::ParseError`] if the content is not valid YAML, the
    ///   root is not a mapping, or a top-level value is not a mapping.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        let root: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                message: format!("invalid YAML in {}", path.display()),
                source: Some(Box::new(e)),
            })?;

        let mapping = match root {
            serde_yaml::Value::Mapping(mapping) => mapping,
            // An empty document parses to null; treat it as no sections.
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            _ => {
                return Err(ConfigError::ParseError {
                    message: format!("the root of {} is not a mapping", path.display()),
                    source: None,
                })
            }
        };

        let mut sections = Vec::new();
        for (key, value) in mapping {
            let name = key
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::ParseError {
                    message: format!("non-string section name in {}", path.display()),
                    source: None,
                })?;
            let section = match value {
                serde_yaml::Value::Mapping(section) => section,
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
            for (item_key, raw) in section {
                let item_name =
                    item_key
                        .as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ConfigError::ParseError {
                            message: format!(
                                "non-string option name under '{}' in {}",
                                name,
                                path.display()
                            ),
                            source: None,
                        })?;
                items.push((item_name, convert(raw, &path)?));
            }
            sections.push((name, items));
        }
        Ok(Self { path, sections })
    }
}

fn convert(value: serde_yaml::Value, path: &Path) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_yaml::Value::String(s) => Value::Str(s),
        serde_yaml::Value::Null => Value::Str(String::new()),
        serde_yaml::Value::Sequence(items) => Value::List(
            items
                .into_iter()
                .map(|item| convert(item, path))
                .collect::<Result<Vec<Value>>>()?,
        ),
        serde_yaml::Value::Mapping(_) | serde_yaml::Value::Tagged(_) => {
            return Err(ConfigError::ParseError {
                message: format!(
                    "nested mappings are not supported as option values in {}",
                    path.display()
                ),
                source: None,
            })
        }
    })
}

impl ConfigFile for YamlFile {
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
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_sections_and_items() {
        let file = write_yaml("server:\n  enabled: true\n  port: 8080\n");
        let loaded = YamlFile::load(file.path()).unwrap();

        assert_eq!(loaded.sections(), vec!["server"]);
        let items = loaded.items("server");
        assert_eq!(
            items,
            vec![
                ("enabled".to_string(), Value::Bool(true)),
                ("port".to_string(), Value::Int(8080)),
            ]
        );
    }

    #[test]
    fn test_section_order_is_document_order() {
        let file = write_yaml("zeta:\n  a: 1\nalpha:\n  b: 2\n");
        let loaded = YamlFile::load(file.path()).unwrap();
        assert_eq!(loaded.sections(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_sequence_becomes_list() {
        let file = write_yaml("ns:\n  hosts:\n    - one\n    - two\n");
        let loaded = YamlFile::load(file.path()).unwrap();
        assert_eq!(
            loaded.items("ns"),
            vec![(
                "hosts".to_string(),
                Value::List(vec![
                    Value::Str("one".to_string()),
                    Value::Str("two".to_string())
                ])
            )]
        );
    }

    #[test]
    fn test_empty_document_has_no_sections() {
        let file = write_yaml("");
        let loaded = YamlFile::load(file.path()).unwrap();
        assert!(loaded.sections().is_empty());
    }

    #[test]
    fn test_scalar_root_fails() {
        let file = write_yaml("just a string\n");
        assert!(matches!(
            YamlFile::load(file.path()).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
    }

    #[test]
    fn test_scalar_section_fails() {
        let file = write_yaml("server: oops\n");
        assert!(matches!(
            YamlFile::load(file.path()).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(YamlFile::load("/nonexistent/config.yaml").is_err());
    }
}
