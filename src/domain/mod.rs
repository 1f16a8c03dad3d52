// SPDX-License-Identifier: Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the typed option/namespace data model at the heart of
//! the crate. It is independent of any file format or source concern.

pub mod errors;
pub mod namespace;
pub mod option;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use errors::{ConfigError, Result};
pub use namespace::Namespace;
pub use option::{ConfigOption, OptionBuilder, OptionKind};
pub use registry::Registry;
pub use value::Value;
