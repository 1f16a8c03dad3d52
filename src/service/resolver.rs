// SPDX-License-Identifier: Apache-2.0

//! The layered resolution pipeline.
//!
//! This module provides the `Resolver`, which populates an already-declared
//! registry from its sources in a fixed precedence order: files (in the order
//! given), then environment variables, then command-line flags. Resolution
//! ends with a validation pass over required options and aborts on the first
//! error at any stage.

use crate::adapters;
use crate::domain::{ConfigError, Registry, Result};
use crate::ports::ConfigFile;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// The environment variable prefix used when none is configured.
pub const DEFAULT_ENV_PREFIX: &str = "SCHEMACFG";

/// Orchestrates layered resolution over a registry.
///
/// Precedence is always files (in the given order) < environment < CLI.
/// Strict mode, the default, turns file sections and options absent from the
/// declared schema into hard errors; the environment and CLI overlays are
/// always lenient because they only ever derive keys from names already
/// registered.
///
/// # Examples
///
/// ```
/// use schemacfg::domain::{ConfigOption, Namespace, Registry};
/// use schemacfg::service::Resolver;
///
/// let mut registry = Registry::new();
/// let mut server = Namespace::new();
/// server
///     .register("port", ConfigOption::integer().default(8080).build().unwrap())
///     .unwrap();
/// registry.register("server", server).unwrap();
///
/// Resolver::builder()
///     .cli_args(vec!["--server_port".to_string(), "9090".to_string()])
///     .build()
///     .resolve(&mut registry)
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    paths: Vec<PathBuf>,
    env_prefix: String,
    env_values: Option<HashMap<String, String>>,
    cli_args: Vec<String>,
    strict: bool,
}

impl Resolver {
    /// Creates a new resolver builder.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Runs the pipeline against `registry`.
    ///
    /// Stages run in strict order: every configured file is applied in the
    /// order given, then the environment overlay, then the CLI overlay, then
    /// required-option validation. The first error aborts the whole call.
    pub fn resolve(&self, registry: &mut Registry) -> Result<()> {
        for path in &self.paths {
            let file = adapters::open(path)?;
            self.apply_file(registry, file.as_ref())?;
        }
        self.apply_env(registry)?;
        self.apply_cli(registry)?;
        validate(registry)
    }

    /// Applies one loaded file's sections onto the registry.
    fn apply_file(&self, registry: &mut Registry, file: &dyn ConfigFile) -> Result<()> {
        for section in file.sections() {
            if !registry.contains(&section) {
                if self.strict {
                    return Err(ConfigError::NamespaceNotRegistered { name: section });
                }
                tracing::debug!(
                    section = %section,
                    path = %file.path().display(),
                    "skipping unregistered section"
                );
                continue;
            }
            let namespace = registry.namespace_mut(&section)?;
            for (name, value) in file.items(&section) {
                // Auto-vivifying namespaces manufacture unknown options
                // instead of tripping the strict check.
                if !namespace.contains(&name) && !namespace.is_auto() {
                    if self.strict {
                        return Err(ConfigError::OptionNotRegistered {
                            namespace: section.clone(),
                            name,
                        });
                    }
                    tracing::debug!(
                        section = %section,
                        option = %name,
                        path = %file.path().display(),
                        "skipping unregistered option"
                    );
                    continue;
                }
                namespace.set(&name, value)?;
            }
        }
        Ok(())
    }

    /// Applies the environment overlay.
    ///
    /// For every registered `(namespace, option)` pair the key
    /// `{PREFIX}_{NAMESPACE}_{OPTION}` is derived, fully upper-cased. Keys
    /// that are absent or hold an empty value leave the option untouched.
    fn apply_env(&self, registry: &mut Registry) -> Result<()> {
        let prefix = self.env_prefix.to_uppercase();
        for (namespace, option) in registered_pairs(registry) {
            let key = format!(
                "{}_{}_{}",
                prefix,
                namespace.to_uppercase(),
                option.to_uppercase()
            );
            let value = match &self.env_values {
                Some(values) => values.get(&key).cloned(),
                None => env::var(&key).ok(),
            };
            if let Some(value) = value {
                if value.is_empty() {
                    continue;
                }
                tracing::debug!(%key, namespace = %namespace, option = %option, "applying environment overlay");
                registry.namespace_mut(&namespace)?.set(&option, value)?;
            }
        }
        Ok(())
    }

    /// Applies the command-line overlay.
    ///
    /// For every registered `(namespace, option)` pair the flag
    /// `--{namespace}_{option}` is derived, fully lower-cased. Flags that are
    /// absent or hold an empty value leave the option untouched; flags that
    /// match no registered pair are ignored.
    fn apply_cli(&self, registry: &mut Registry) -> Result<()> {
        if self.cli_args.is_empty() {
            return Ok(());
        }
        let flags = parse_cli_args(&self.cli_args);
        for (namespace, option) in registered_pairs(registry) {
            let flag = format!("{}_{}", namespace, option).to_lowercase();
            if let Some(value) = flags.get(&flag) {
                if value.is_empty() {
                    continue;
                }
                tracing::debug!(%flag, namespace = %namespace, option = %option, "applying CLI overlay");
                registry
                    .namespace_mut(&namespace)?
                    .set(&option, value.clone())?;
            }
        }
        Ok(())
    }
}

/// Collects the registered `(namespace, option)` names in registration
/// order, so overlays can mutate the registry while walking the pairs.
fn registered_pairs(registry: &Registry) -> Vec<(String, String)> {
    registry
        .iter()
        .flat_map(|(namespace, ns)| {
            ns.iter()
                .map(move |(option, _)| (namespace.to_string(), option.to_string()))
        })
        .collect()
}

/// Scans raw arguments for `--key=value` and `--key value` pairs.
///
/// Only a `--` prefix starts a new flag, so a space-separated value may begin
/// with a single dash (for example a negative number). Anything else is
/// ignored; a later occurrence of the same flag overrides an earlier one.
fn parse_cli_args(args: &[String]) -> HashMap<String, String> {
    let mut flags = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if let Some(rest) = arg.strip_prefix("--") {
            if let Some((key, value)) = rest.split_once('=') {
                flags.insert(key.to_string(), value.to_string());
                i += 1;
            } else if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                flags.insert(rest.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    flags
}

/// Fails with [`ConfigError::MissingRequiredOption`] for the first required
/// option whose externally observable value is still unset.
fn validate(registry: &Registry) -> Result<()> {
    for (namespace, ns) in registry.iter() {
        for (option, opt) in ns.iter() {
            if opt.required() && !opt.has_value() {
                return Err(ConfigError::MissingRequiredOption {
                    namespace: namespace.to_string(),
                    option: option.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Resolves `registry` from the given file paths with default settings.
///
/// This is the convenience entry point: strict file loading, no CLI overlay,
/// and the environment overlay under `env_prefix` (or
/// [`DEFAULT_ENV_PREFIX`] when `None`).
///
/// # Examples
///
/// ```no_run
/// use schemacfg::domain::Registry;
/// use schemacfg::service::resolve_paths;
///
/// let mut registry = Registry::new();
/// // ... declare namespaces and options ...
/// resolve_paths(&mut registry, &["base.toml", "override.yaml"], None).unwrap();
/// ```
pub fn resolve_paths<P: AsRef<Path>>(
    registry: &mut Registry,
    paths: &[P],
    env_prefix: Option<&str>,
) -> Result<()> {
    let mut builder = Resolver::builder().files(paths);
    if let Some(prefix) = env_prefix {
        builder = builder.env_prefix(prefix);
    }
    builder.build().resolve(registry)
}

/// Builder for a [`Resolver`].
///
/// # Examples
///
/// ```
/// use schemacfg::service::Resolver;
///
/// let resolver = Resolver::builder()
///     .env_prefix("MYAPP")
///     .strict(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    paths: Vec<PathBuf>,
    env_prefix: String,
    env_values: Option<HashMap<String, String>>,
    cli_args: Vec<String>,
    strict: bool,
}

impl ResolverBuilder {
    /// Creates a builder with default settings: no files, no CLI arguments,
    /// the default environment prefix, and strict file loading.
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            env_values: None,
            cli_args: Vec::new(),
            strict: true,
        }
    }

    /// Appends one file path to the load order.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Appends several file paths to the load order.
    pub fn files<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.paths
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Overrides the environment variable prefix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Supplies an explicit environment map instead of reading the process
    /// environment. Intended for hermetic tests.
    pub fn env_values(mut self, values: HashMap<String, String>) -> Self {
        self.env_values = Some(values);
        self
    }

    /// Supplies the command-line arguments to scan for overlay flags.
    pub fn cli_args(mut self, args: Vec<String>) -> Self {
        self.cli_args = args;
        self
    }

    /// Enables or disables strict file loading. Strict is the default.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds the resolver.
    pub fn build(self) -> Resolver {
        Resolver {
            paths: self.paths,
            env_prefix: self.env_prefix,
            env_values: self.env_values,
            cli_args: self.cli_args,
            strict: self.strict,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigOption, Namespace, Value};

    fn server_registry() -> Registry {
        let mut registry = Registry::new();
        let mut server = Namespace::new();
        server
            .register("enabled", ConfigOption::boolean().build().unwrap())
            .unwrap();
        server
            .register(
                "port",
                ConfigOption::integer().default(8080).build().unwrap(),
            )
            .unwrap();
        registry.register("server", server).unwrap();
        registry
    }

    #[test]
    fn test_parse_cli_args_equals_form() {
        let args = vec!["--server_port=9090".to_string()];
        let flags = parse_cli_args(&args);
        assert_eq!(flags.get("server_port"), Some(&"9090".to_string()));
    }

    #[test]
    fn test_parse_cli_args_space_form() {
        let args = vec!["--server_port".to_string(), "9090".to_string()];
        let flags = parse_cli_args(&args);
        assert_eq!(flags.get("server_port"), Some(&"9090".to_string()));
    }

    #[test]
    fn test_parse_cli_args_negative_value_space_form() {
        let args = vec!["--server_port".to_string(), "-5".to_string()];
        let flags = parse_cli_args(&args);
        assert_eq!(flags.get("server_port"), Some(&"-5".to_string()));
    }

    #[test]
    fn test_cli_overlay_accepts_negative_number() {
        let mut registry = server_registry();
        Resolver::builder()
            .cli_args(vec!["--server_port".to_string(), "-1".to_string()])
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(-1))
        );
    }

    #[test]
    fn test_parse_cli_args_flag_followed_by_flag() {
        let args = vec!["--a".to_string(), "--b".to_string(), "1".to_string()];
        let flags = parse_cli_args(&args);
        assert_eq!(flags.get("a"), None);
        assert_eq!(flags.get("b"), Some(&"1".to_string()));
    }

    #[test]
    fn test_parse_cli_args_last_occurrence_wins() {
        let args = vec!["--k=1".to_string(), "--k=2".to_string()];
        let flags = parse_cli_args(&args);
        assert_eq!(flags.get("k"), Some(&"2".to_string()));
    }

    #[test]
    fn test_env_overlay_uppercases_prefix_and_names() {
        let mut registry = server_registry();
        let mut values = HashMap::new();
        values.insert("MYAPP_SERVER_PORT".to_string(), "9090".to_string());
        Resolver::builder()
            .env_prefix("myapp")
            .env_values(values)
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(9090))
        );
    }

    #[test]
    fn test_env_overlay_sets_value() {
        let mut registry = server_registry();
        let mut values = HashMap::new();
        values.insert("SCHEMACFG_SERVER_PORT".to_string(), "9090".to_string());
        Resolver::builder()
            .env_values(values)
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(9090))
        );
    }

    #[test]
    fn test_env_overlay_skips_empty_value() {
        let mut registry = server_registry();
        let mut values = HashMap::new();
        values.insert("SCHEMACFG_SERVER_PORT".to_string(), String::new());
        Resolver::builder()
            .env_values(values)
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(8080))
        );
    }

    #[test]
    fn test_cli_overlay_sets_value() {
        let mut registry = server_registry();
        Resolver::builder()
            .cli_args(vec!["--server_port=9191".to_string()])
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(9191))
        );
    }

    #[test]
    fn test_cli_overlay_ignores_unknown_flags() {
        let mut registry = server_registry();
        Resolver::builder()
            .cli_args(vec!["--unrelated=1".to_string()])
            .build()
            .resolve(&mut registry)
            .unwrap();
    }

    #[test]
    fn test_cli_overlay_skips_empty_value() {
        let mut registry = server_registry();
        Resolver::builder()
            .cli_args(vec!["--server_port=".to_string()])
            .build()
            .resolve(&mut registry)
            .unwrap();
        assert_eq!(
            registry.namespace_mut("server").unwrap().get("port").unwrap(),
            Some(Value::Int(8080))
        );
    }

    #[test]
    fn test_validation_flags_missing_required() {
        let mut registry = Registry::new();
        let mut ns = Namespace::new();
        ns.register("token", ConfigOption::string().required(true).build().unwrap())
            .unwrap();
        registry.register("auth", ns).unwrap();

        let err = Resolver::builder()
            .build()
            .resolve(&mut registry)
            .unwrap_err();
        match err {
            ConfigError::MissingRequiredOption { namespace, option } => {
                assert_eq!(namespace, "auth");
                assert_eq!(option, "token");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_accepts_required_with_default() {
        let mut registry = Registry::new();
        let mut ns = Namespace::new();
        ns.register(
            "token",
            ConfigOption::string()
                .required(true)
                .default("fallback")
                .build()
                .unwrap(),
        )
        .unwrap();
        registry.register("auth", ns).unwrap();

        Resolver::builder().build().resolve(&mut registry).unwrap();
    }

    #[test]
    fn test_unrecognized_extension_aborts() {
        let mut registry = server_registry();
        let err = Resolver::builder()
            .file("conf.xml")
            .build()
            .resolve(&mut registry)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnrecognizedFileExtension { .. }
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let resolver = Resolver::builder().build();
        assert!(resolver.strict);
        assert_eq!(resolver.env_prefix, DEFAULT_ENV_PREFIX);
        assert!(resolver.paths.is_empty());
        assert!(resolver.cli_args.is_empty());
    }
}
