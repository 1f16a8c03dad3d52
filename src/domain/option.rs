// SPDX-License-Identifier: Apache-2.0

//! Typed option kinds and the option type itself.
//!
//! An option is a single typed, validated configuration leaf: a kind, an
//! optional description, an optional default, a required flag, and a mutable
//! current value. All mutation goes through coercion, so a stored value is
//! always well typed for its kind.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::Value;
use regex::Regex;

/// The kind of an option, defining its coercion rule.
///
/// Each kind is a pure function from raw [`Value`]s to coerced [`Value`]s.
/// Coercion is idempotent: feeding a kind its own output returns the output
/// unchanged.
///
/// # Examples
///
/// ```
/// use schemacfg::domain::{OptionKind, Value};
///
/// let kind = OptionKind::Bool;
/// assert_eq!(kind.coerce(Value::from("yes")).unwrap(), Value::Bool(true));
/// assert!(kind.coerce(Value::from("maybe")).is_err());
/// ```
#[derive(Clone, Debug)]
pub enum OptionKind {
    /// A boolean. Accepts native booleans, or the text values `yes`, `true`,
    /// `1`, `no`, `false`, `0` (case-insensitive).
    Bool,
    /// A signed integer. Accepts native integers or base-10 text.
    Int,
    /// A floating point number. Accepts native floats, native integers, or
    /// text.
    Float,
    /// A string. Accepts anything; non-text input is rendered to its
    /// canonical text form.
    Str,
    /// A string that must fully match a regular expression fixed at creation.
    Pattern {
        /// The pattern as given at creation, used in error messages.
        pattern: String,
        /// The compiled, anchored form of the pattern.
        regex: Regex,
    },
    /// A homogeneous list. Text input is split on commas with each piece
    /// trimmed; sequence input is used directly. Every entry is validated by
    /// a clone of the element template.
    List(Box<ConfigOption>),
}

impl OptionKind {
    /// Creates a pattern-string kind from a regular expression.
    ///
    /// The pattern is anchored so values must match it in full.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the pattern does not compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemacfg::domain::{OptionKind, Value};
    ///
    /// let kind = OptionKind::pattern("[a-z]").unwrap();
    /// assert!(kind.coerce(Value::from("a")).is_ok());
    /// assert!(kind.coerce(Value::from("1")).is_err());
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex =
            Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| ConfigError::ParseError {
                message: format!("invalid pattern '{}'", pattern),
                source: Some(Box::new(e)),
            })?;
        Ok(OptionKind::Pattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Creates a list kind validating every entry against the given element
    /// template option.
    pub fn list(element: ConfigOption) -> Self {
        OptionKind::List(Box::new(element))
    }

    /// Returns a short name for the kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::Bool => "boolean",
            OptionKind::Int => "integer",
            OptionKind::Float => "float",
            OptionKind::Str => "string",
            OptionKind::Pattern { .. } => "pattern string",
            OptionKind::List(_) => "list",
        }
    }

    /// Converts a raw value to this kind's typed value.
    ///
    /// This is a pure function with no side effects. See the variant docs for
    /// the per-kind rules.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::CoercionTypeError`] if the raw value's type is not
    ///   accepted by this kind at all.
    /// * [`ConfigError::CoercionValueError`] if the value has an acceptable
    ///   type but cannot be converted.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        match self {
            OptionKind::Bool => match value {
                Value::Bool(b) => Ok(Value::Bool(b)),
                Value::Str(s) => match s.to_lowercase().as_str() {
                    "yes" | "true" | "1" => Ok(Value::Bool(true)),
                    "no" | "false" | "0" => Ok(Value::Bool(false)),
                    _ => Err(ConfigError::CoercionValueError {
                        value: s,
                        target: "boolean".to_string(),
                    }),
                },
                other => Err(ConfigError::CoercionTypeError {
                    expected: "boolean or string",
                    actual: other.type_name(),
                }),
            },
            OptionKind::Int => match value {
                Value::Int(i) => Ok(Value::Int(i)),
                Value::Str(s) => {
                    s.trim()
                        .parse::<i64>()
                        .map(Value::Int)
                        .map_err(|_| ConfigError::CoercionValueError {
                            value: s,
                            target: "integer".to_string(),
                        })
                }
                other => Err(ConfigError::CoercionTypeError {
                    expected: "integer or string",
                    actual: other.type_name(),
                }),
            },
            OptionKind::Float => match value {
                Value::Float(f) => Ok(Value::Float(f)),
                Value::Int(i) => Ok(Value::Float(i as f64)),
                Value::Str(s) => {
                    s.trim()
                        .parse::<f64>()
                        .map(Value::Float)
                        .map_err(|_| ConfigError::CoercionValueError {
                            value: s,
                            target: "float".to_string(),
                        })
                }
                other => Err(ConfigError::CoercionTypeError {
                    expected: "float, integer, or string",
                    actual: other.type_name(),
                }),
            },
            OptionKind::Str => match value {
                Value::Str(s) => Ok(Value::Str(s)),
                other => Ok(Value::Str(other.to_string())),
            },
            OptionKind::Pattern { pattern, regex } => {
                let text = match value {
                    Value::Str(s) => s,
                    other => other.to_string(),
                };
                if regex.is_match(&text) {
                    Ok(Value::Str(text))
                } else {
                    Err(ConfigError::CoercionValueError {
                        value: text,
                        target: format!("string matching pattern '{}'", pattern),
                    })
                }
            }
            OptionKind::List(template) => {
                let raw_items: Vec<Value> = match value {
                    Value::Str(s) => s
                        .split(',')
                        .map(|piece| Value::Str(piece.trim().to_string()))
                        .collect(),
                    Value::List(items) => items,
                    other => {
                        return Err(ConfigError::CoercionTypeError {
                            expected: "list or string",
                            actual: other.type_name(),
                        })
                    }
                };
                let mut coerced = Vec::with_capacity(raw_items.len());
                for item in raw_items {
                    // Each entry is validated by an independently-owned clone
                    // of the element template.
                    let mut entry = (**template).clone();
                    entry.set(item)?;
                    if let Some(value) = entry.current {
                        coerced.push(value);
                    }
                }
                Ok(Value::List(coerced))
            }
        }
    }
}

/// A single typed, validated configuration value.
///
/// Options are created through [`OptionBuilder`] at schema-declaration time;
/// the description, default, and required flag are immutable afterwards. The
/// current value is mutated only through the coercion-checked [`set`]
/// method, any number of times.
///
/// [`set`]: ConfigOption::set
///
/// # Examples
///
/// ```
/// use schemacfg::domain::{ConfigOption, Value};
///
/// let mut port = ConfigOption::integer()
///     .description("TCP port to listen on")
///     .default(8080)
///     .build()
///     .unwrap();
///
/// assert_eq!(port.get().unwrap(), Some(Value::Int(8080)));
/// port.set("9090").unwrap();
/// assert_eq!(port.get().unwrap(), Some(Value::Int(9090)));
/// ```
#[derive(Clone, Debug)]
pub struct ConfigOption {
    kind: OptionKind,
    description: Option<String>,
    default: Option<Value>,
    required: bool,
    current: Option<Value>,
}

impl ConfigOption {
    /// Starts building an option of the given kind.
    pub fn of(kind: OptionKind) -> OptionBuilder {
        OptionBuilder::new(kind)
    }

    /// Starts building a boolean option.
    pub fn boolean() -> OptionBuilder {
        OptionBuilder::new(OptionKind::Bool)
    }

    /// Starts building an integer option.
    pub fn integer() -> OptionBuilder {
        OptionBuilder::new(OptionKind::Int)
    }

    /// Starts building a float option.
    pub fn float() -> OptionBuilder {
        OptionBuilder::new(OptionKind::Float)
    }

    /// Starts building a string option.
    pub fn string() -> OptionBuilder {
        OptionBuilder::new(OptionKind::Str)
    }

    /// Starts building a pattern-constrained string option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<OptionBuilder> {
        Ok(OptionBuilder::new(OptionKind::pattern(pattern)?))
    }

    /// Starts building a list option with the given element template.
    pub fn list(element: ConfigOption) -> OptionBuilder {
        OptionBuilder::new(OptionKind::list(element))
    }

    /// Returns the option's kind.
    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Returns the human readable description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether a value must be set before resolution completes.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the default value, if one was given.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns whether the option has an externally observable value, either
    /// set through [`set`] or supplied as a default.
    ///
    /// [`set`]: ConfigOption::set
    pub fn has_value(&self) -> bool {
        self.current.is_some() || self.default.is_some()
    }

    /// Converts a raw value to this option's typed value without storing it.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        self.kind.coerce(value)
    }

    /// Returns the current value, falling back to the default when unset.
    ///
    /// An unset list option with no default yields an empty list rather than
    /// failing. An unset optional scalar yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsetRequiredValue`] if the option is required
    /// and no value or default exists.
    pub fn get(&self) -> Result<Option<Value>> {
        match self.current.clone().or_else(|| self.default.clone()) {
            Some(value) => Ok(Some(value)),
            None => {
                if self.required {
                    return Err(ConfigError::UnsetRequiredValue);
                }
                if matches!(self.kind, OptionKind::List(_)) {
                    return Ok(Some(Value::List(Vec::new())));
                }
                Ok(None)
            }
        }
    }

    /// Coerces the raw value and stores it as the current value.
    ///
    /// A failed coercion leaves the previously stored value untouched.
    pub fn set(&mut self, value: impl Into<Value>) -> Result<()> {
        let coerced = self.kind.coerce(value.into())?;
        self.current = Some(coerced);
        Ok(())
    }
}

/// Builder for a [`ConfigOption`].
///
/// Defaults are coerced when [`build`] is called, so an invalid default fails
/// at declaration time rather than at first read.
///
/// [`build`]: OptionBuilder::build
///
/// # Examples
///
/// ```
/// use schemacfg::domain::ConfigOption;
///
/// let enabled = ConfigOption::boolean()
///     .description("whether the server accepts connections")
///     .required(true)
///     .build()
///     .unwrap();
/// assert!(enabled.required());
/// ```
#[derive(Clone, Debug)]
pub struct OptionBuilder {
    kind: OptionKind,
    description: Option<String>,
    default: Option<Value>,
    required: bool,
}

impl OptionBuilder {
    /// Creates a builder for the given kind.
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
            required: false,
        }
    }

    /// Sets the human readable description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value, given in raw form.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Builds the option, coercing the default value if one was given.
    ///
    /// # Errors
    ///
    /// Returns a coercion error if the default is not valid for the kind.
    pub fn build(self) -> Result<ConfigOption> {
        let default = self
            .default
            .map(|value| self.kind.coerce(value))
            .transpose()?;
        Ok(ConfigOption {
            kind: self.kind,
            description: self.description,
            default,
            required: self.required,
            current: None,
        })
    }
}
