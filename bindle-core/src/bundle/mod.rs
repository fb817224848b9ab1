//! The bundler layer.
//!
//! A build resolves specifiers to [`ModulePath`]s, assigns each path a
//! stable index through the [`ModuleRegistry`], rewrites every module's tree
//! against the numeric loader, and serializes the finished graph into one
//! script. All file access goes through the caller's
//! `bindle_vfs::VirtualFileSystem`.

pub mod builder;
pub mod bundler;
pub mod emitter;
pub mod error;
pub mod path;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod shims;

pub use bundler::{BundledModule, Bundler, ModuleGraph};
pub use emitter::emit;
pub use error::BundleError;
pub use path::ModulePath;
pub use registry::ModuleRegistry;
pub use resolver::{Resolution, ResolveError, Resolver};
pub use shims::GlobalShim;
