// SPDX-License-Identifier: Apache-2.0

//! Named, ordered groups of options.
//!
//! A namespace corresponds to one section of a configuration file. Options
//! are kept in registration order so that environment/CLI key derivation and
//! any rendering built on top of the registry iterate deterministically.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::option::{ConfigOption, OptionKind};
use crate::domain::value::Value;

/// An ordered, named collection of options.
///
/// The fixed variant (created with [`new`] or [`with_description`]) rejects
/// reads and writes of unregistered names. The auto-vivifying variant
/// (created with [`auto`]) carries a generator kind and transparently creates
/// an option of that kind on the first read or write of an unknown name, so
/// its final option set is a strict superset of its declared set.
///
/// [`new`]: Namespace::new
/// [`with_description`]: Namespace::with_description
/// [`auto`]: Namespace::auto
///
/// # Examples
///
/// ```
/// use schemacfg::domain::{ConfigOption, Namespace, Value};
///
/// let mut server = Namespace::new();
/// server
///     .register("port", ConfigOption::integer().default(8080).build().unwrap())
///     .unwrap();
///
/// server.set("port", "9090").unwrap();
/// assert_eq!(server.get("port").unwrap(), Some(Value::Int(9090)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    description: Option<String>,
    options: Vec<(String, ConfigOption)>,
    generator: Option<OptionKind>,
}

impl Namespace {
    /// Creates an empty fixed-schema namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty fixed-schema namespace with a description.
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Creates an auto-vivifying namespace.
    ///
    /// Unknown names read or written through [`get`] / [`set`] are created on
    /// the fly as plain, non-required options of the given kind.
    ///
    /// [`get`]: Namespace::get
    /// [`set`]: Namespace::set
    ///
    /// # Examples
    ///
    /// ```
    /// use schemacfg::domain::{Namespace, OptionKind, Value};
    ///
    /// let mut extras = Namespace::auto(OptionKind::Str);
    /// extras.set("anything", "goes").unwrap();
    /// assert_eq!(
    ///     extras.get("anything").unwrap(),
    ///     Some(Value::Str("goes".to_string()))
    /// );
    /// ```
    pub fn auto(generator: OptionKind) -> Self {
        Self {
            description: None,
            options: Vec::new(),
            generator: Some(generator),
        }
    }

    /// Returns the description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this namespace vivifies unknown names.
    pub fn is_auto(&self) -> bool {
        self.generator.is_some()
    }

    /// Registers a new option under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOption`] if the name is already
    /// registered.
    pub fn register(&mut self, name: impl Into<String>, option: ConfigOption) -> Result<()> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(ConfigError::DuplicateOption { name });
        }
        self.options.push((name, option));
        Ok(())
    }

    /// Returns the option registered under `name`, if any.
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.position(name).map(|i| &self.options[i].1)
    }

    /// Returns whether an option named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the number of registered options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns whether no options are registered.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Reads the value of the option registered under `name`.
    ///
    /// An auto-vivifying namespace creates the option first if it does not
    /// exist, which is why reading takes `&mut self`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::UnknownOption`] if `name` is not registered in a
    ///   fixed-schema namespace.
    /// * [`ConfigError::UnsetRequiredValue`] if the option is required and
    ///   has no value.
    pub fn get(&mut self, name: &str) -> Result<Option<Value>> {
        let index = self.ensure(name)?;
        self.options[index].1.get()
    }

    /// Coerces and stores a raw value into the option registered under
    /// `name`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::UnknownOption`] if `name` is not registered in a
    ///   fixed-schema namespace.
    /// * A coercion error if the raw value is not valid for the option.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.ensure(name)?;
        self.options[index].1.set(value)
    }

    /// Iterates over `(name, option)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigOption)> {
        self.options.iter().map(|(name, option)| (name.as_str(), option))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|(n, _)| n == name)
    }

    /// Resolves `name` to an index, vivifying it when a generator is bound.
    fn ensure(&mut self, name: &str) -> Result<usize> {
        if let Some(index) = self.position(name) {
            return Ok(index);
        }
        let generator = self
            .generator
            .clone()
            .ok_or_else(|| ConfigError::UnknownOption {
                name: name.to_string(),
            })?;
        let option = ConfigOption::of(generator).build()?;
        self.options.push((name.to_string(), option));
        Ok(self.options.len() - 1)
    }
}
