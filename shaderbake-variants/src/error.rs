use std::path::PathBuf;
use thiserror::Error;

/// Error type for macro configuration parsing and variant decoding.
#[derive(Error, Debug)]
pub enum MacroConfigError {
    /// The macro configuration file could not be read.
    #[error("the macro configuration could not be read")]
    IOError(PathBuf, std::io::Error),
    /// The macro configuration was not valid JSON, or did not have the expected shape.
    #[error("the macro configuration is not valid json")]
    JsonError(#[from] serde_json::Error),
    /// A group named in `all` has no definition.
    #[error("macro group `{0}` is listed but not defined")]
    MissingGroup(String),
    /// The same macro was declared twice within one group.
    #[error("macro `{name}` is declared more than once in group `{group}`")]
    DuplicateMacro { group: String, name: String },
    /// A group declares more macros than fit in a variant encoding.
    #[error("macro group `{group}` declares {size} macros, at most 31 are supported")]
    GroupTooLarge { group: String, size: usize },
    /// A variant encoding sets a bit with no corresponding macro.
    #[error("bit {bit} is set for group `{group}` which only has {count} macros")]
    BitOutOfRange {
        group: String,
        bit: u32,
        count: usize,
    },
    /// The groups have more variants combined than can be enumerated.
    #[error("the macro groups have too many variants to enumerate")]
    TooManyVariants,
    /// A variant key does not have exactly one value per group.
    #[error("expected a variant key with {expected} values but got {received}")]
    EncodingLength { expected: usize, received: usize },
}
