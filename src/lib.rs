// SPDX-License-Identifier: Apache-2.0

//! A hexagonal architecture typed-configuration crate.
//!
//! This crate provides a schema-first configuration system: applications
//! declare typed options grouped into namespaces, register the namespaces in
//! a registry, and then resolve values from layered sources in a fixed
//! precedence order (files, then environment variables, then command-line
//! arguments).
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and business logic (`Value`, `ConfigOption`,
//!   `Namespace`, `Registry`, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigFile`)
//! - **Adapters**: File-format loaders (TOML, YAML, JSON)
//! - **Service**: The resolver that orchestrates layered resolution
//!
//! # Features
//!
//! - **Typed Options**: Bool, integer, float, string, pattern-checked string,
//!   and homogeneous list options with lenient text coercion
//! - **Namespaces**: Fixed schemas plus auto-vivifying namespaces that accept
//!   arbitrary option names under one declared kind
//! - **Precedence**: Files in load order, then environment, then CLI
//! - **Validation**: Required options are checked after all sources apply
//!
//! # Feature Flags
//!
//! - `toml`: Enable TOML file support (default)
//! - `yaml`: Enable YAML file support (default)
//! - `json`: Enable JSON file support (default)
//!
//! # Quick Start
//!
//! ```rust
//! use schemacfg::prelude::*;
//!
//! # fn main() -> schemacfg::domain::Result<()> {
//! let mut registry = Registry::new();
//!
//! let mut server = Namespace::with_description("Core server settings");
//! server.register(
//!     "port",
//!     ConfigOption::integer()
//!         .description("TCP port to listen on")
//!         .default(8080)
//!         .build()?,
//! )?;
//! registry.register("server", server)?;
//!
//! Resolver::builder()
//!     .cli_args(vec!["--server_port=9090".to_string()])
//!     .build()
//!     .resolve(&mut registry)?;
//!
//! assert_eq!(
//!     registry.namespace_mut("server")?.get("port")?,
//!     Some(Value::Int(9090))
//! );
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigOption, Namespace, OptionBuilder, OptionKind, Registry, Result, Value,
    };
    pub use crate::ports::ConfigFile;
    pub use crate::service::{resolve_paths, Resolver, ResolverBuilder, DEFAULT_ENV_PREFIX};

    // Re-export adapters based on feature flags
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonFile;
    #[cfg(feature = "toml")]
    pub use crate::adapters::TomlFile;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlFile;
}
