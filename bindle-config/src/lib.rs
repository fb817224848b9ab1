//! Bindle Config - Pure configuration data structures
//!
//! This crate contains only data structures, no I/O and no global state.
//! It serves as the shared configuration vocabulary across all bindle
//! crates: the bundler core consumes a fully merged [`BundleConfig`];
//! producing one (file loading, CLI flag merging) is the caller's job.

use std::collections::HashMap;
use std::path::PathBuf;

mod error;
mod file;

pub use error::ConfigError;
pub use file::{ConfigFile, ExternalValue, GlobalsSection, InputSection, OutputSection};

/// Complete, validated bundler configuration.
///
/// Read-only for the whole build; the core never mutates it.
#[derive(Debug, Clone, Default)]
pub struct BundleConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    /// Specifier replacements applied before any resolution step.
    pub aliases: HashMap<String, String>,
    /// Specifiers that stay out of the bundle and what to bind them to.
    pub externals: HashMap<String, ExternalSpec>,
    pub globals: GlobalInjection,
}

/// Input side: what to bundle and which dialect it is written in.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Entry point path, relative to the host working directory.
    pub entry: String,
    pub dialect: SourceDialect,
}

/// Output side: where the artifact goes and which runtime hosts it.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub folder: PathBuf,
    pub file: String,
    pub runtime: RuntimeTarget,
}

/// ECMAScript dialect accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDialect {
    Es5,
    Es2015,
}

/// Host runtime the emitted bundle is wrapped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeTarget {
    Browser,
    Node,
}

/// How an external dependency is bound at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalSpec {
    /// Bound to a global variable of this name.
    Global(String),
    /// Deliberately stubbed out with an empty object.
    Ignored,
}

/// Per-global injection toggles for the free-global pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalInjection {
    pub process: bool,
    pub global_object: bool,
    pub buffer: bool,
}

/// Build phase enum for phase-specific log filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Resolve,
    Bundle,
    Emit,
    Api,
}

impl SourceDialect {
    /// Parse a dialect name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "es5" => Ok(SourceDialect::Es5),
            "es2015" | "es6" => Ok(SourceDialect::Es2015),
            _ => Err(ConfigError::InvalidDialect(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceDialect::Es5 => "es5",
            SourceDialect::Es2015 => "es2015",
        }
    }
}

impl RuntimeTarget {
    /// Parse a runtime name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "browser" => Ok(RuntimeTarget::Browser),
            "node" => Ok(RuntimeTarget::Node),
            _ => Err(ConfigError::InvalidRuntime(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeTarget::Browser => "browser",
            RuntimeTarget::Node => "node",
        }
    }
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Resolve => "resolve",
            Phase::Bundle => "bundle",
            Phase::Emit => "emit",
            Phase::Api => "api",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("bindle::{}", self.as_str())
    }

    /// All phases, for building log filters.
    pub fn all() -> [Phase; 4] {
        [Phase::Resolve, Phase::Bundle, Phase::Emit, Phase::Api]
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            entry: String::new(),
            dialect: SourceDialect::Es2015,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("dist"),
            file: String::from("bundle.js"),
            runtime: RuntimeTarget::Browser,
        }
    }
}

impl Default for GlobalInjection {
    fn default() -> Self {
        Self {
            process: true,
            global_object: true,
            buffer: true,
        }
    }
}

impl BundleConfig {
    /// Check the invariants a caller must establish before handing the
    /// config to the bundler core.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.entry.trim().is_empty() {
            return Err(ConfigError::MissingEntry);
        }
        if let Some(spec) = self.externals.get(self.input.entry.as_str()) {
            let _ = spec;
            return Err(ConfigError::ExternalEntry(self.input.entry.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = BundleConfig::default();
        assert_eq!(cfg.input.dialect, SourceDialect::Es2015);
        assert_eq!(cfg.output.runtime, RuntimeTarget::Browser);
        assert_eq!(cfg.output.folder, PathBuf::from("dist"));
        assert_eq!(cfg.output.file, "bundle.js");
        assert!(cfg.globals.process);
        assert!(cfg.globals.global_object);
        assert!(cfg.globals.buffer);
    }

    #[test]
    fn test_dialect_parse_case_insensitive() {
        assert_eq!(SourceDialect::parse("ES5").unwrap(), SourceDialect::Es5);
        assert_eq!(
            SourceDialect::parse("es2015").unwrap(),
            SourceDialect::Es2015
        );
        assert_eq!(SourceDialect::parse("ES6").unwrap(), SourceDialect::Es2015);
    }

    #[test]
    fn test_dialect_parse_rejects_unknown() {
        let err = SourceDialect::parse("es2049").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDialect(_)));
    }

    #[test]
    fn test_runtime_parse() {
        assert_eq!(
            RuntimeTarget::parse("Browser").unwrap(),
            RuntimeTarget::Browser
        );
        assert_eq!(RuntimeTarget::parse("node").unwrap(), RuntimeTarget::Node);
        assert!(RuntimeTarget::parse("deno").is_err());
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Resolve.as_str(), "resolve");
        assert_eq!(Phase::Emit.target(), "bindle::emit");
    }

    #[test]
    fn test_validate_requires_entry() {
        let cfg = BundleConfig::default();
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::MissingEntry
        ));
    }

    #[test]
    fn test_validate_rejects_external_entry() {
        let mut cfg = BundleConfig::default();
        cfg.input.entry = "app".to_string();
        cfg.externals
            .insert("app".to_string(), ExternalSpec::Global("App".to_string()));
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::ExternalEntry(_)
        ));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut cfg = BundleConfig::default();
        cfg.input.entry = "./src/main.js".to_string();
        assert!(cfg.validate().is_ok());
    }
}
