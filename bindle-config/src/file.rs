//! Config file shape
//!
//! Option-typed mirror of `bindle.json`. Every field is optional so a file
//! can specify only what it wants to override; merging file values with CLI
//! flags and defaults happens in the CLI, producing a [`BundleConfig`].
//!
//! [`BundleConfig`]: crate::BundleConfig

use std::collections::HashMap;

use serde::Deserialize;

use crate::{ConfigError, ExternalSpec};

/// Top-level `bindle.json` structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub input: Option<InputSection>,
    pub output: Option<OutputSection>,
    pub aliases: Option<HashMap<String, String>>,
    pub externals: Option<HashMap<String, ExternalValue>>,
    pub globals: Option<GlobalsSection>,
}

/// `input` section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSection {
    pub entry: Option<String>,
    pub dialect: Option<String>,
}

/// `output` section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    pub folder: Option<String>,
    pub file: Option<String>,
    pub runtime: Option<String>,
}

/// `globals` section: per-global injection toggles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalsSection {
    pub process: Option<bool>,
    pub global: Option<bool>,
    pub buffer: Option<bool>,
}

/// Value of an externals entry: `"GlobalName"` or `false`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExternalValue {
    Global(String),
    Toggle(bool),
}

impl ExternalValue {
    /// Convert the file form into the validated [`ExternalSpec`].
    ///
    /// `true` is rejected: an external must either name its runtime global
    /// or be explicitly stubbed out with `false`.
    pub fn into_spec(self, specifier: &str) -> Result<ExternalSpec, ConfigError> {
        match self {
            ExternalValue::Global(name) => Ok(ExternalSpec::Global(name)),
            ExternalValue::Toggle(false) => Ok(ExternalSpec::Ignored),
            ExternalValue::Toggle(true) => Err(ConfigError::InvalidExternal {
                specifier: specifier.to_string(),
                message: "'true' is not a valid binding; use a global name or false".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let json = r#"{
            "input": { "entry": "./src/main.js", "dialect": "es2015" },
            "output": { "folder": "out", "file": "app.js", "runtime": "node" },
            "aliases": { "lodash": "./vendor/lodash.js" },
            "externals": { "jquery": "$", "fs": false },
            "globals": { "process": true, "buffer": false }
        }"#;
        let file: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(
            file.input.as_ref().unwrap().entry.as_deref(),
            Some("./src/main.js")
        );
        assert_eq!(file.output.as_ref().unwrap().runtime.as_deref(), Some("node"));
        let externals = file.externals.unwrap();
        assert_eq!(
            externals.get("jquery"),
            Some(&ExternalValue::Global("$".to_string()))
        );
        assert_eq!(externals.get("fs"), Some(&ExternalValue::Toggle(false)));
        let globals = file.globals.unwrap();
        assert_eq!(globals.process, Some(true));
        assert_eq!(globals.buffer, Some(false));
        assert_eq!(globals.global, None);
    }

    #[test]
    fn test_parse_empty_file() {
        let file: ConfigFile = serde_json::from_str("{}").unwrap();
        assert!(file.input.is_none());
        assert!(file.externals.is_none());
    }

    #[test]
    fn test_external_value_into_spec() {
        assert_eq!(
            ExternalValue::Global("$".to_string()).into_spec("jquery").unwrap(),
            ExternalSpec::Global("$".to_string())
        );
        assert_eq!(
            ExternalValue::Toggle(false).into_spec("fs").unwrap(),
            ExternalSpec::Ignored
        );
    }

    #[test]
    fn test_external_true_is_rejected() {
        let err = ExternalValue::Toggle(true).into_spec("fs").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExternal { .. }));
    }
}
