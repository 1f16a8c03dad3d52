// SPDX-License-Identifier: Apache-2.0

//! Service layer containing the resolution pipeline.
//!
//! This module contains the `Resolver`, which applies configuration files,
//! environment variables, and command-line arguments onto a registry in a
//! fixed precedence order and validates required options.

pub mod resolver;

// Re-export commonly used types
pub use resolver::{resolve_paths, Resolver, ResolverBuilder, DEFAULT_ENV_PREFIX};
