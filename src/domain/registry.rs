// SPDX-License-Identifier: Apache-2.0

//! The configuration registry.
//!
//! A registry is an insertion-ordered collection of namespaces. Every
//! pipeline stage takes the registry it operates on explicitly, so tests can
//! work against isolated instances; programs that want the classic
//! process-wide singleton can share [`Registry::global`] instead.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::namespace::Namespace;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static GLOBAL_REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

/// A collection of namespaces keyed by name.
///
/// Namespace names are unique within one registry instance, and iteration
/// yields namespaces in registration order. A registry created with
/// [`new`] is an isolated scope: it starts empty and never sees entries
/// registered elsewhere.
///
/// [`new`]: Registry::new
///
/// # Examples
///
/// ```
/// use schemacfg::domain::{ConfigOption, Namespace, Registry};
///
/// let mut registry = Registry::new();
/// let mut server = Namespace::new();
/// server
///     .register("port", ConfigOption::integer().default(8080).build().unwrap())
///     .unwrap();
/// registry.register("server", server).unwrap();
///
/// assert!(registry.contains("server"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    namespaces: Vec<(String, Namespace)>,
}

impl Registry {
    /// Creates an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide shared registry.
    ///
    /// The instance is guarded by a mutex because the registry is shared
    /// mutable state; the resolution pipeline itself is synchronous and
    /// single-threaded, so callers hold the lock across a whole resolve
    /// call.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemacfg::domain::Registry;
    ///
    /// let shared = Registry::global();
    /// let guard = shared.lock().unwrap();
    /// let _ = guard.len();
    /// ```
    pub fn global() -> &'static Mutex<Registry> {
        &GLOBAL_REGISTRY
    }

    /// Registers a namespace under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateNamespace`] if the name is already
    /// registered.
    pub fn register(&mut self, name: impl Into<String>, namespace: Namespace) -> Result<()> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(ConfigError::DuplicateNamespace { name });
        }
        self.namespaces.push((name, namespace));
        Ok(())
    }

    /// Returns the namespace registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownNamespace`] if absent.
    pub fn namespace(&self, name: &str) -> Result<&Namespace> {
        self.position(name)
            .map(|i| &self.namespaces[i].1)
            .ok_or_else(|| ConfigError::UnknownNamespace {
                name: name.to_string(),
            })
    }

    /// Returns the namespace registered under `name`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownNamespace`] if absent.
    pub fn namespace_mut(&mut self, name: &str) -> Result<&mut Namespace> {
        match self.position(name) {
            Some(i) => Ok(&mut self.namespaces[i].1),
            None => Err(ConfigError::UnknownNamespace {
                name: name.to_string(),
            }),
        }
    }

    /// Returns whether a namespace named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the number of registered namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns whether no namespaces are registered.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterates over `(name, namespace)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.namespaces
            .iter()
            .map(|(name, namespace)| (name.as_str(), namespace))
    }

    /// Iterates over `(name, namespace)` pairs mutably, in registration
    /// order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Namespace)> {
        self.namespaces
            .iter_mut()
            .map(|(name, namespace)| (name.as_str(), namespace))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.namespaces.iter().position(|(n, _)| n == name)
    }
}
