//! Bindle API - build orchestration layer
//!
//! One public entry, [`bundle`], tying configuration, the host file system
//! capability and the core together: validate the config, resolve the entry
//! point, drain the module graph, emit the final script. The caller decides
//! what to do with the text; nothing here writes a file.

use tracing::info;

use bindle_config::{BundleConfig, ConfigError};
use bindle_core::bundle::{emit, Bundler, Resolution, Resolver};
use bindle_vfs::VirtualFileSystem;

pub mod error;
pub mod types;

pub use error::BindleError;
pub use types::BundleOutput;

// Re-export the pieces callers wire together.
pub use bindle_config;
pub use bindle_config::Phase;
pub use bindle_vfs;

/// Run one build over the given host.
///
/// The entry specifier is resolved against the host's working directory
/// with the same alias/external/probing rules as any import. An entry that
/// resolves to an external is a configuration error: there would be nothing
/// to bundle.
pub fn bundle(
    config: &BundleConfig,
    host: &dyn VirtualFileSystem,
) -> Result<BundleOutput, BindleError> {
    config.validate()?;

    let entry = match Resolver::new(config, host)
        .resolve_entry()
        .map_err(bindle_core::bundle::BundleError::from)?
    {
        Resolution::Path(path) => path,
        Resolution::External(_) => {
            return Err(ConfigError::ExternalEntry(config.input.entry.clone()).into());
        }
    };
    info!(target: "bindle::api", entry = %entry, "starting build");

    let graph = Bundler::new(config, host).run(entry)?;
    let code = emit(&graph, config);

    info!(
        target: "bindle::api",
        modules = graph.len(),
        bytes = code.len(),
        "build finished"
    );
    Ok(BundleOutput {
        code,
        modules: graph.len(),
    })
}
