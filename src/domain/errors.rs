// SPDX-License-Identifier: Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error taxonomy for schema declaration, value
//! coercion, file loading, and resolution. All errors use `thiserror` for
//! proper error handling and conversion.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur while declaring a
/// configuration schema, coercing raw values, loading files, or running the
/// resolution pipeline. It is marked as `#[non_exhaustive]` to allow for
/// future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use schemacfg::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::UnknownNamespace {
///         name: "database".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A namespace with the same name is already registered.
    #[error("namespace '{name}' is already registered")]
    DuplicateNamespace {
        /// The namespace name that collided
        name: String,
    },

    /// An option with the same name is already registered in the namespace.
    #[error("option '{name}' is already registered")]
    DuplicateOption {
        /// The option name that collided
        name: String,
    },

    /// The requested namespace was never registered.
    #[error("namespace '{name}' does not exist")]
    UnknownNamespace {
        /// The namespace name that was looked up
        name: String,
    },

    /// The requested option was never registered in a fixed-schema namespace.
    #[error("option '{name}' does not exist")]
    UnknownOption {
        /// The option name that was looked up
        name: String,
    },

    /// A loaded file references a section absent from the declared schema.
    ///
    /// Raised only in strict mode; non-strict loading skips the section.
    #[error("the namespace '{name}' is not registered")]
    NamespaceNotRegistered {
        /// The section name found in the file
        name: String,
    },

    /// A loaded file references an option absent from the declared schema.
    ///
    /// Raised only in strict mode; non-strict loading skips the option.
    #[error("the option '{name}' is not registered under namespace '{namespace}'")]
    OptionNotRegistered {
        /// The namespace the option was found under
        namespace: String,
        /// The option name found in the file
        name: String,
    },

    /// No file-format adapter is mapped to the file's extension.
    #[error("cannot parse file of type '{extension}'; choices are {choices}")]
    UnrecognizedFileExtension {
        /// The extension taken from the file path
        extension: String,
        /// The extensions the compiled adapters understand
        choices: String,
    },

    /// A raw value has a type the option kind cannot accept at all.
    #[error("expected {expected}, got {actual}")]
    CoercionTypeError {
        /// Description of the accepted input types
        expected: &'static str,
        /// The kind of value actually supplied
        actual: &'static str,
    },

    /// A raw value has an acceptable type but cannot be converted.
    #[error("could not coerce {value:?} to {target}")]
    CoercionValueError {
        /// The offending raw value, rendered as text
        value: String,
        /// The target kind, including the pattern for pattern strings
        target: String,
    },

    /// A required option was read before any value was set.
    #[error("attempted to read a required option that has never been set")]
    UnsetRequiredValue,

    /// Final validation found a required option still unset after all overlays.
    #[error("option '{option}' in namespace '{namespace}' is required")]
    MissingRequiredOption {
        /// The namespace owning the option
        namespace: String,
        /// The unset required option
        option: String,
    },

    /// Failed to parse a configuration file or compile a pattern.
    #[error("failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
