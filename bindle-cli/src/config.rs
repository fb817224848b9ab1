//! Config loading and merging.
//!
//! Reads `bindle.json` (when present), then layers CLI flags on top and
//! defaults underneath: flag > file > default. The result is the plain
//! `BundleConfig` handed to the API.

use std::path::{Path, PathBuf};

use bindle_config::{
    BundleConfig, ConfigError, ConfigFile, ExternalSpec, RuntimeTarget, SourceDialect,
};

use crate::Cli;

/// Build the effective configuration for this invocation.
pub fn load(cli: &Cli) -> Result<BundleConfig, ConfigError> {
    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from("bindle.json"), false),
    };
    let file = read_config_file(&path, explicit)?;
    let mut cfg = BundleConfig::default();

    apply_file(&mut cfg, file)?;
    apply_flags(&mut cfg, cli)?;

    cfg.validate()?;
    Ok(cfg)
}

/// Read and deserialize the config file.
///
/// A missing file is only an error when the user asked for that path
/// explicitly; the default `bindle.json` is optional.
fn read_config_file(path: &Path, explicit: bool) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        if explicit {
            return Err(ConfigError::FileRead {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            });
        }
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::FileParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn apply_file(cfg: &mut BundleConfig, file: ConfigFile) -> Result<(), ConfigError> {
    if let Some(input) = file.input {
        if let Some(entry) = input.entry {
            cfg.input.entry = entry;
        }
        if let Some(dialect) = input.dialect {
            cfg.input.dialect = SourceDialect::parse(&dialect)?;
        }
    }
    if let Some(output) = file.output {
        if let Some(folder) = output.folder {
            cfg.output.folder = folder.into();
        }
        if let Some(name) = output.file {
            cfg.output.file = name;
        }
        if let Some(runtime) = output.runtime {
            cfg.output.runtime = RuntimeTarget::parse(&runtime)?;
        }
    }
    if let Some(aliases) = file.aliases {
        cfg.aliases.extend(aliases);
    }
    if let Some(externals) = file.externals {
        for (specifier, value) in externals {
            let spec = value.into_spec(&specifier)?;
            cfg.externals.insert(specifier, spec);
        }
    }
    if let Some(globals) = file.globals {
        if let Some(process) = globals.process {
            cfg.globals.process = process;
        }
        if let Some(global) = globals.global {
            cfg.globals.global_object = global;
        }
        if let Some(buffer) = globals.buffer {
            cfg.globals.buffer = buffer;
        }
    }
    Ok(())
}

fn apply_flags(cfg: &mut BundleConfig, cli: &Cli) -> Result<(), ConfigError> {
    if let Some(entry) = &cli.entry {
        cfg.input.entry = entry.clone();
    }
    if let Some(dialect) = &cli.dialect {
        cfg.input.dialect = SourceDialect::parse(dialect)?;
    }
    if let Some(folder) = &cli.out_dir {
        cfg.output.folder = folder.clone();
    }
    if let Some(name) = &cli.out_file {
        cfg.output.file = name.clone();
    }
    if let Some(runtime) = &cli.runtime {
        cfg.output.runtime = RuntimeTarget::parse(runtime)?;
    }
    for pair in &cli.alias {
        let (key, value) = split_key_value(pair)?;
        cfg.aliases.insert(key.to_string(), value.to_string());
    }
    for pair in &cli.external {
        // `--external fs` with no value means ignored.
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                cfg.externals
                    .insert(key.to_string(), ExternalSpec::Global(value.to_string()));
            }
            Some(_) => return Err(ConfigError::InvalidKeyValue(pair.clone())),
            None => {
                cfg.externals.insert(pair.clone(), ExternalSpec::Ignored);
            }
        }
    }
    Ok(())
}

fn split_key_value(pair: &str) -> Result<(&str, &str), ConfigError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => Ok((key, value)),
        _ => Err(ConfigError::InvalidKeyValue(pair.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli_with(f: impl FnOnce(&mut Cli)) -> Cli {
        let mut cli = Cli {
            config: None,
            entry: Some("./src/main.js".to_string()),
            out_dir: None,
            out_file: None,
            runtime: None,
            dialect: None,
            alias: Vec::new(),
            external: Vec::new(),
            log_level: "warn".to_string(),
            log_format: crate::logging::LogFormat::Compact,
        };
        f(&mut cli);
        cli
    }

    #[test]
    fn test_defaults_apply_without_file() {
        let cfg = load(&cli_with(|_| {})).unwrap();
        assert_eq!(cfg.input.entry, "./src/main.js");
        assert_eq!(cfg.output.file, "bundle.js");
        assert_eq!(cfg.output.runtime, RuntimeTarget::Browser);
    }

    #[test]
    fn test_flags_override() {
        let cfg = load(&cli_with(|cli| {
            cli.out_file = Some("app.js".to_string());
            cli.runtime = Some("node".to_string());
            cli.dialect = Some("es5".to_string());
        }))
        .unwrap();
        assert_eq!(cfg.output.file, "app.js");
        assert_eq!(cfg.output.runtime, RuntimeTarget::Node);
        assert_eq!(cfg.input.dialect, SourceDialect::Es5);
    }

    #[test]
    fn test_alias_and_external_flags() {
        let cfg = load(&cli_with(|cli| {
            cli.alias.push("lodash=./vendor/lodash.js".to_string());
            cli.external.push("jquery=$".to_string());
            cli.external.push("fs".to_string());
        }))
        .unwrap();
        assert_eq!(
            cfg.aliases.get("lodash"),
            Some(&"./vendor/lodash.js".to_string())
        );
        assert_eq!(
            cfg.externals.get("jquery"),
            Some(&ExternalSpec::Global("$".to_string()))
        );
        assert_eq!(cfg.externals.get("fs"), Some(&ExternalSpec::Ignored));
    }

    #[test]
    fn test_malformed_alias_flag() {
        let err = load(&cli_with(|cli| {
            cli.alias.push("lodash".to_string());
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyValue(_)));
    }

    #[test]
    fn test_missing_entry_rejected() {
        let err = load(&cli_with(|cli| cli.entry = None)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEntry));
    }

    #[test]
    fn test_explicit_missing_config_file_errors() {
        let err = load(&cli_with(|cli| {
            cli.config = Some(PathBuf::from("/definitely/not/here/bindle.json"));
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
