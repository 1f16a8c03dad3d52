// SPDX-License-Identifier: Apache-2.0

//! Integration tests for source precedence.
//!
//! Resolution always applies files in load order, then the environment
//! overlay, then the CLI overlay. These tests pin that order down, including
//! the cases where an overlay key exists but is empty.

mod common;

use common::{server_registry, write_config, EnvGuard};
use schemacfg::prelude::*;
use std::collections::HashMap;

#[test]
fn test_env_overrides_file() {
    let file = write_config("toml", "[server]\nport = 1000\n");
    let mut env = HashMap::new();
    env.insert("SCHEMACFG_SERVER_PORT".to_string(), "2000".to_string());

    let mut registry = server_registry();
    Resolver::builder()
        .file(file.path())
        .env_values(env)
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(2000))
    );
}

#[test]
fn test_cli_overrides_env_and_file() {
    let file = write_config("toml", "[server]\nport = 1000\n");
    let mut env = HashMap::new();
    env.insert("SCHEMACFG_SERVER_PORT".to_string(), "2000".to_string());

    let mut registry = server_registry();
    Resolver::builder()
        .file(file.path())
        .env_values(env)
        .cli_args(vec!["--server_port=3000".to_string()])
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(3000))
    );
}

#[test]
fn test_cli_space_separated_value() {
    let mut registry = server_registry();
    Resolver::builder()
        .cli_args(vec!["--server_port".to_string(), "3000".to_string()])
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(3000))
    );
}

#[test]
fn test_empty_env_value_does_not_override() {
    let file = write_config("toml", "[server]\nport = 1000\n");
    let mut env = HashMap::new();
    env.insert("SCHEMACFG_SERVER_PORT".to_string(), String::new());

    let mut registry = server_registry();
    Resolver::builder()
        .file(file.path())
        .env_values(env)
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(1000))
    );
}

#[test]
fn test_empty_cli_value_does_not_override() {
    let file = write_config("toml", "[server]\nport = 1000\n");

    let mut registry = server_registry();
    Resolver::builder()
        .file(file.path())
        .cli_args(vec!["--server_port=".to_string()])
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(1000))
    );
}

#[test]
fn test_env_overlay_reads_process_environment() {
    // The prefix is unique to this test so parallel tests cannot collide.
    let mut guard = EnvGuard::new();
    guard.set("PRECEDENCE_PROC_SERVER_PORT", "7777");

    let mut registry = server_registry();
    Resolver::builder()
        .env_prefix("PRECEDENCE_PROC")
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("server").unwrap().get("port").unwrap(),
        Some(Value::Int(7777))
    );
}

#[test]
fn test_overlays_are_lenient_even_when_files_are_strict() {
    // Overlay keys derive from registered names, so stray environment
    // variables and CLI flags under the prefix never error.
    let mut env = HashMap::new();
    env.insert("SCHEMACFG_GHOST_KEY".to_string(), "1".to_string());

    let mut registry = server_registry();
    Resolver::builder()
        .env_values(env)
        .cli_args(vec!["--ghost_key=1".to_string()])
        .strict(true)
        .build()
        .resolve(&mut registry)
        .unwrap();
}

#[test]
fn test_env_can_satisfy_required_option() {
    let mut registry = Registry::new();
    let mut auth = Namespace::new();
    auth.register(
        "token",
        ConfigOption::string().required(true).build().unwrap(),
    )
    .unwrap();
    registry.register("auth", auth).unwrap();

    let mut env = HashMap::new();
    env.insert("SCHEMACFG_AUTH_TOKEN".to_string(), "s3cret".to_string());

    Resolver::builder()
        .env_values(env)
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("auth").unwrap().get("token").unwrap(),
        Some(Value::Str("s3cret".to_string()))
    );
}

#[test]
fn test_cli_can_satisfy_required_option() {
    let mut registry = Registry::new();
    let mut auth = Namespace::new();
    auth.register(
        "token",
        ConfigOption::string().required(true).build().unwrap(),
    )
    .unwrap();
    registry.register("auth", auth).unwrap();

    Resolver::builder()
        .cli_args(vec!["--auth_token=s3cret".to_string()])
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("auth").unwrap().get("token").unwrap(),
        Some(Value::Str("s3cret".to_string()))
    );
}

#[test]
fn test_env_overlay_applies_to_auto_vivified_options() {
    // Overlay keys derive from registered pairs, so an auto namespace only
    // gets environment values for options a file already vivified.
    let file = write_config("toml", "[labels]\nregion = \"file-value\"\n");
    let mut env = HashMap::new();
    env.insert(
        "SCHEMACFG_LABELS_REGION".to_string(),
        "env-value".to_string(),
    );

    let mut registry = Registry::new();
    registry
        .register("labels", Namespace::auto(OptionKind::Str))
        .unwrap();

    Resolver::builder()
        .file(file.path())
        .env_values(env)
        .build()
        .resolve(&mut registry)
        .unwrap();

    assert_eq!(
        registry.namespace_mut("labels").unwrap().get("region").unwrap(),
        Some(Value::Str("env-value".to_string()))
    );
}
