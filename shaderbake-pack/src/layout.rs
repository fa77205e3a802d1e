use crate::error::BakeError;
use shaderbake_variants::VariantKey;
use std::path::{Path, PathBuf};

/// Extension of the directory holding compiled SPIR-V, appended to the source path.
pub const BINARY_DIR_EXTENSION: &str = ".bin2";
/// Extension of the directory holding resource tables, appended to the source path.
pub const RESOURCE_DIR_EXTENSION: &str = ".res2";

/// Where the artifacts of a shader source's variants are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    source: PathBuf,
    binary_dir: PathBuf,
    resource_dir: PathBuf,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl OutputLayout {
    /// The layout for a shader source: `<source>.bin2/` and `<source>.res2/`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        OutputLayout {
            binary_dir: with_suffix(&source, BINARY_DIR_EXTENSION),
            resource_dir: with_suffix(&source, RESOURCE_DIR_EXTENSION),
            source,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn binary_dir(&self) -> &Path {
        &self.binary_dir
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Create the output directories if they do not exist. Existing contents are kept.
    pub fn create_dirs(&self) -> Result<(), BakeError> {
        for dir in [&self.binary_dir, &self.resource_dir] {
            std::fs::create_dir_all(dir).map_err(|e| BakeError::IOError(dir.clone(), e))?;
        }
        Ok(())
    }

    /// The compiled SPIR-V of a variant.
    pub fn spirv_path(&self, key: &VariantKey) -> PathBuf {
        self.binary_dir.join(key.artifact_name("spv"))
    }

    /// The reflector's report of a variant, before normalization.
    pub fn raw_reflection_path(&self, key: &VariantKey) -> PathBuf {
        self.resource_dir.join(key.artifact_name("raw.json"))
    }

    /// The normalized resource table of a variant.
    pub fn resource_path(&self, key: &VariantKey) -> PathBuf {
        self.resource_dir.join(key.artifact_name("json"))
    }
}
