// SPDX-License-Identifier: Apache-2.0

//! Helper utilities shared by the integration test suites.

use schemacfg::prelude::*;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to set and clean up environment variables
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    #[allow(dead_code)]
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    #[allow(dead_code)]
    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Writes `content` to a temporary file with the given extension.
#[allow(dead_code)]
pub fn write_config(extension: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// Builds a registry with a `server` namespace holding a boolean `enabled`
/// option and an integer `port` option defaulting to 8080.
#[allow(dead_code)]
pub fn server_registry() -> Registry {
    let mut registry = Registry::new();
    let mut server = Namespace::with_description("Core server settings");
    server
        .register(
            "enabled",
            ConfigOption::boolean()
                .description("Whether the server accepts connections")
                .build()
                .unwrap(),
        )
        .unwrap();
    server
        .register(
            "port",
            ConfigOption::integer()
                .description("TCP port to listen on")
                .default(8080)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry.register("server", server).unwrap();
    registry
}
