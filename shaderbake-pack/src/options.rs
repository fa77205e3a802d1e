use std::path::PathBuf;

/// Options for baking the variants of a shader source.
#[derive(Debug, Clone)]
pub struct BakeOptions {
    /// The number of variants built at the same time. `1` builds variants one after another.
    pub jobs: usize,
    /// The macro configuration to use instead of the one next to the source.
    pub macro_config: Option<PathBuf>,
    /// Whether or not to keep the reflector's raw report after normalization.
    pub keep_raw_reflection: bool,
}

impl Default for BakeOptions {
    fn default() -> Self {
        BakeOptions {
            jobs: 1,
            macro_config: None,
            keep_raw_reflection: false,
        }
    }
}
