// SPDX-License-Identifier: Apache-2.0

//! Loader adapter trait definition.
//!
//! This module defines the `ConfigFile` trait, the port every file-format
//! adapter must implement. The resolution pipeline only ever talks to loaded
//! files through this interface.

use crate::domain::Value;
use std::path::Path;

/// A loaded configuration file.
///
/// Implementations read and parse the file once at construction and serve the
/// cached result. A file is a two-level structure: an ordered list of section
/// names, and under each section a mapping of option name to raw value. Raw
/// values keep whatever native type the format could express; text-only
/// formats simply produce `Value::Str` everywhere.
///
/// An adapter for a format with no declarative sections may return an empty
/// section list; the pipeline will then apply nothing from it.
///
/// # Examples
///
/// ```
/// use schemacfg::ports::ConfigFile;
/// use schemacfg::domain::Value;
/// use std::path::{Path, PathBuf};
///
/// struct EmptyFile(PathBuf);
///
/// impl ConfigFile for EmptyFile {
///     fn path(&self) -> &Path {
///         &self.0
///     }
///
///     fn sections(&self) -> Vec<String> {
///         Vec::new()
///     }
///
///     fn items(&self, _section: &str) -> Vec<(String, Value)> {
///         Vec::new()
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["empty"]
///     }
/// }
/// ```
pub trait ConfigFile {
    /// Returns the path the file was loaded from.
    fn path(&self) -> &Path;

    /// Returns the section names present in the file, in document order
    /// where the format preserves it.
    fn sections(&self) -> Vec<String>;

    /// Returns the `(option name, raw value)` pairs under the given section.
    ///
    /// Returns an empty list for a section name not present in the file.
    fn items(&self, section: &str) -> Vec<(String, Value)>;

    /// Returns the file extensions this adapter understands.
    fn extensions(&self) -> &[&str];
}
