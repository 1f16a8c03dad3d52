// SPDX-License-Identifier: Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that file-format
//! adapters implement. The pipeline in the service layer depends only on
//! these interfaces.

pub mod loader;

// Re-export commonly used types
pub use loader::ConfigFile;
