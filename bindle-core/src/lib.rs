//! Bindle Core - ES module bundler engine
//!
//! Two layers:
//! - [`syntax`]: the ES dialect bindle understands. Lexer, owned AST,
//!   recursive-descent parser, comment attachment and a precedence-aware
//!   printer. No third-party JS parser; the subset is exactly what the
//!   rewrite pipeline needs to preserve.
//! - [`bundle`]: the bundler itself. Specifier resolution, the build-scoped
//!   module registry, the four-pass rewrite pipeline, the queue-draining
//!   bundler loop and the code generator that wraps every module factory
//!   around a memoizing numeric loader.
//!
//! The core performs no real I/O: every read goes through the
//! `bindle_vfs::VirtualFileSystem` capability, and nothing here ever writes
//! a file.

pub mod bundle;
pub mod syntax;
