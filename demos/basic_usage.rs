// SPDX-License-Identifier: Apache-2.0

//! Basic usage example for the configuration crate.
//!
//! This example demonstrates:
//! - Declaring a schema of typed options grouped into namespaces
//! - Resolving values from the environment and command-line arguments
//! - Reading back the resolved, typed values
//!
//! To run this example:
//! ```bash
//! # Set some environment variables
//! export DEMO_SERVER_PORT="9090"
//! export DEMO_SERVER_ENABLED="yes"
//!
//! # Run the example; flags override the environment
//! cargo run --example basic_usage -- --server_workers 8
//! ```

use schemacfg::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== schemacfg: Basic Usage ===\n");

    // Declare the schema: every option is typed, optionally defaulted,
    // optionally required.
    let mut registry = Registry::new();

    let mut server = Namespace::with_description("Core server settings");
    server.register(
        "enabled",
        ConfigOption::boolean()
            .description("Whether the server accepts connections")
            .default(false)
            .build()?,
    )?;
    server.register(
        "port",
        ConfigOption::integer()
            .description("TCP port to listen on")
            .default(8080)
            .build()?,
    )?;
    server.register(
        "workers",
        ConfigOption::integer()
            .description("Number of worker threads")
            .default(4)
            .build()?,
    )?;
    registry.register("server", server)?;

    // Resolve: environment variables under the DEMO prefix first, then any
    // --server_* flags passed on the command line.
    let args: Vec<String> = std::env::args().skip(1).collect();
    Resolver::builder()
        .env_prefix("DEMO")
        .cli_args(args)
        .build()
        .resolve(&mut registry)?;

    // Read back the typed values.
    println!("--- Resolved values ---");
    let server = registry.namespace_mut("server")?;
    for name in ["enabled", "port", "workers"] {
        match server.get(name)? {
            Some(value) => println!("✓ server.{} = {}", name, value),
            None => println!("✗ server.{} is unset", name),
        }
    }

    Ok(())
}
