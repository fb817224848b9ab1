//! Bindle CLI - command line interface
//!
//! One subcommand-free binary: load `bindle.json`, merge flags over it,
//! bundle through the API and write the artifact. All diagnostics go to
//! stderr; the process exits 1 on any error.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use bindle_api::{bundle, BindleError};
use bindle_vfs::{NativeFileSystem, VirtualFileSystem};

mod config;
mod logging;

#[derive(Parser)]
#[command(name = "bindle", about = "Bundle ES modules into one script", version)]
pub struct Cli {
    /// Config file path (default: ./bindle.json, optional)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Entry point, relative to the working directory
    #[arg(long, value_name = "PATH")]
    pub entry: Option<String>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output file name
    #[arg(long, value_name = "FILE")]
    pub out_file: Option<String>,

    /// Runtime target: browser or node
    #[arg(long, value_name = "TARGET")]
    pub runtime: Option<String>,

    /// Source dialect: es5 or es2015
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Option<String>,

    /// Specifier alias, repeatable: --alias lodash=./vendor/lodash.js
    #[arg(long, value_name = "NAME=PATH")]
    pub alias: Vec<String>,

    /// External dependency, repeatable: --external jquery=$ or --external fs
    #[arg(long, value_name = "NAME[=GLOBAL]")]
    pub external: Vec<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = logging::LogFormat::Compact)]
    pub log_format: logging::LogFormat,
}

fn main() {
    let cli = Cli::parse();

    let level = match logging::parse_level(&cli.log_level) {
        Ok(level) => level,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(1);
        }
    };
    logging::init(level, cli.log_format);

    let cfg = match config::load(&cli) {
        Ok(cfg) => cfg,
        Err(err) => fail(&BindleError::from(err)),
    };

    let host = NativeFileSystem::new();
    let started = Instant::now();
    let output = match bundle(&cfg, &host) {
        Ok(output) => output,
        Err(err) => fail(&err),
    };

    let artifact = cfg.output.folder.join(&cfg.output.file);
    if let Err(err) = host.write_file(&artifact, &output.code) {
        fail(&BindleError::from(err));
    }

    println!(
        "{} modules -> {} ({} bytes) in {:.2?}",
        output.modules,
        artifact.display(),
        output.code.len(),
        started.elapsed()
    );
}

fn fail(err: &BindleError) -> ! {
    eprintln!("{}", err.report());
    if let Some(excerpt) = source_excerpt(err) {
        eprintln!("{excerpt}");
    }
    process::exit(1);
}

/// The offending source line with a caret, when the error points into a
/// readable file.
fn source_excerpt(err: &BindleError) -> Option<String> {
    let module = err.module()?;
    let line = err.line()?;
    let source = std::fs::read_to_string(&module).ok()?;
    let text = source.lines().nth(line.checked_sub(1)?)?;
    let mut out = format!("{line:4} | {text}");
    if let Some(column) = err.column() {
        out.push_str(&format!(
            "\n     | {}^",
            " ".repeat(column.saturating_sub(1))
        ));
    }
    Some(out)
}
