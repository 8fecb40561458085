// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Override scripts loaded from TOML or JSON.
//!
//! A script describes a whole override table as data, for proxies whose
//! arguments and results are [`serde_json::Value`]s:
//!
//! ```toml
//! name = "flaky-lookup"
//! returns = 43
//!
//! [[on_call]]
//! index = 0
//! throws = "first call fails"
//!
//! [[with_args]]
//! args = ["a"]
//! returns = { ok = true }
//! ```

use crate::proxy::Proxy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Proxy over dynamic values, the kind a script configures
pub type ScriptedProxy = Proxy<Vec<Value>, Value, ScriptedError>;

/// Error raised by a scripted `throws`
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptedError {
    pub message: String,
}

impl ScriptedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur when loading a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level script
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyScript {
    /// Name for logging/debugging
    #[serde(default)]
    pub name: String,

    /// Global return value
    #[serde(default)]
    pub returns: Option<Value>,

    /// Global error message
    #[serde(default)]
    pub throws: Option<String>,

    /// Per-index overrides
    #[serde(default)]
    pub on_call: Vec<IndexRule>,

    /// Per-argument-pattern overrides, in registration order
    #[serde(default)]
    pub with_args: Vec<ArgsRule>,
}

/// Override for one call index
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndexRule {
    /// 0-based call index
    pub index: usize,
    #[serde(default)]
    pub returns: Option<Value>,
    #[serde(default)]
    pub throws: Option<String>,
}

/// Override for one argument pattern
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArgsRule {
    /// Full argument list a call must equal
    pub args: Vec<Value>,
    #[serde(default)]
    pub returns: Option<Value>,
    #[serde(default)]
    pub throws: Option<String>,
}

/// What a validated rule installs
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptOutcome {
    Returns(Value),
    Throws(ScriptedError),
}

impl IndexRule {
    pub fn outcome(&self) -> Result<ScriptOutcome, ScriptError> {
        required_outcome(&self.returns, &self.throws, || format!("on_call[index={}]", self.index))
    }
}

impl ArgsRule {
    pub fn outcome(&self) -> Result<ScriptOutcome, ScriptError> {
        required_outcome(&self.returns, &self.throws, || {
            format!("with_args[args={}]", Value::Array(self.args.clone()))
        })
    }
}

impl ProxyScript {
    /// Load a script from a TOML or JSON file (JSON when the extension is `.json`)
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    /// The global outcome, if the script sets one
    pub fn global_outcome(&self) -> Result<Option<ScriptOutcome>, ScriptError> {
        outcome(&self.returns, &self.throws, || "top level".to_string())
    }

    /// Check that every rule sets exactly one outcome and no index repeats
    pub fn validate(&self) -> Result<(), ScriptError> {
        self.global_outcome()?;

        let mut seen = HashSet::new();
        for rule in &self.on_call {
            rule.outcome()?;
            if !seen.insert(rule.index) {
                return Err(ScriptError::Validation(format!(
                    "Duplicate on_call index {}",
                    rule.index
                )));
            }
        }

        for rule in &self.with_args {
            rule.outcome()?;
        }

        Ok(())
    }

    /// Install the script's overrides on `proxy`.
    ///
    /// Nothing is installed if the script is invalid.
    pub fn apply(&self, proxy: &ScriptedProxy) -> Result<(), ScriptError> {
        self.validate()?;
        debug!(
            name = %self.name,
            on_call = self.on_call.len(),
            with_args = self.with_args.len(),
            "applying proxy script"
        );

        match self.global_outcome()? {
            Some(ScriptOutcome::Returns(value)) => {
                proxy.returns(value);
            }
            Some(ScriptOutcome::Throws(error)) => {
                proxy.throws(error);
            }
            None => {}
        }

        for rule in &self.on_call {
            match rule.outcome()? {
                ScriptOutcome::Returns(value) => proxy.on_call(rule.index).returns(value),
                ScriptOutcome::Throws(error) => proxy.on_call(rule.index).throws(error),
            };
        }

        for rule in &self.with_args {
            let config = proxy.with_args(rule.args.clone());
            match rule.outcome()? {
                ScriptOutcome::Returns(value) => config.returns(value),
                ScriptOutcome::Throws(error) => config.throws(error),
            };
        }

        Ok(())
    }

    /// Create a proxy around `target` with this script applied
    pub fn proxy<F>(&self, target: F) -> Result<ScriptedProxy, ScriptError>
    where
        F: Fn(Vec<Value>) -> Result<Value, ScriptedError> + Send + Sync + 'static,
    {
        let proxy = Proxy::new(target);
        self.apply(&proxy)?;
        Ok(proxy)
    }
}

fn outcome(
    returns: &Option<Value>,
    throws: &Option<String>,
    location: impl Fn() -> String,
) -> Result<Option<ScriptOutcome>, ScriptError> {
    match (returns, throws) {
        (Some(_), Some(_)) => Err(ScriptError::Validation(format!(
            "{}: set either 'returns' or 'throws', not both",
            location()
        ))),
        (Some(value), None) => Ok(Some(ScriptOutcome::Returns(value.clone()))),
        (None, Some(message)) => Ok(Some(ScriptOutcome::Throws(ScriptedError::new(message.as_str())))),
        (None, None) => Ok(None),
    }
}

fn required_outcome(
    returns: &Option<Value>,
    throws: &Option<String>,
    location: impl Fn() -> String,
) -> Result<ScriptOutcome, ScriptError> {
    outcome(returns, throws, &location)?.ok_or_else(|| {
        ScriptError::Validation(format!(
            "{}: one of 'returns' or 'throws' is required",
            location()
        ))
    })
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
