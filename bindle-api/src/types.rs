//! Build outputs.

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BundleOutput {
    /// The complete bundle text, ready to write to disk.
    pub code: String,
    /// Number of modules in the generated array, shims included.
    pub modules: usize,
}
