use crate::error::BakeError;
use shaderbake_reflect::error::ToolchainError;
use shaderbake_variants::VariantKey;
use std::path::PathBuf;

/// The outcome of building one shader variant.
#[derive(Debug)]
pub struct VariantOutcome {
    pub key: VariantKey,
    /// The macros defined for this variant.
    pub defines: Vec<String>,
    pub spirv: PathBuf,
    pub resources: PathBuf,
    /// The number of resources in the variant's table, or why the variant failed.
    pub result: Result<usize, BakeError>,
    /// Tools that were killed for exceeding their timeout while building this variant.
    ///
    /// The steps after a timeout still run, on whatever artifact the tool left behind.
    pub timeouts: Vec<ToolchainError>,
}

impl VariantOutcome {
    /// Whether the variant was built without errors or timeouts.
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.timeouts.is_empty()
    }
}

/// The outcome of baking every variant of a shader source, in enumeration order.
#[derive(Debug)]
pub struct BakeReport {
    pub source: PathBuf,
    pub variants: Vec<VariantOutcome>,
}

impl BakeReport {
    /// Whether every variant was built.
    pub fn is_success(&self) -> bool {
        self.variants.iter().all(VariantOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &VariantOutcome> {
        self.variants.iter().filter(|variant| !variant.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}
