use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// The reason a reflection report was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    /// Exactly one entry point is supported per compiled variant.
    EntryPointCount(usize),
    /// The report has no `outputs` array.
    MissingOutputs,
    /// A push constant block refers to a type that is not in the `types` table.
    MissingType(String),
    /// A push constant block has no members.
    EmptyBlock(String),
    /// A required field is missing or has the wrong type.
    Schema(String),
}

/// Error type for reflection normalization.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A type name was not found in the vector or byte size table.
    #[error("unknown type `{0}`")]
    UnknownType(String),
    /// The entry point's stage name was not found in the stage table.
    #[error("unknown shader stage `{0}`")]
    UnknownStage(String),
    /// The reflection report does not have the expected shape.
    #[error("malformed reflection: {0:?}")]
    MalformedReflection(MalformedKind),
    /// A reflection or resource file could not be read or written.
    #[error("the file could not be accessed")]
    IOError(PathBuf, std::io::Error),
    /// A file is not valid JSON, or a resource bundle or table file does not have the
    /// expected shape.
    #[error("invalid json")]
    JsonError(serde_json::Error),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            NormalizeError::MalformedReflection(MalformedKind::Schema(err.to_string()))
        } else {
            NormalizeError::JsonError(err)
        }
    }
}

/// Error type for external tool invocation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// The tool did not exit within the timeout and was killed.
    #[error("`{tool}` did not finish within {timeout:?} and was killed")]
    ExternalToolTimeout { tool: String, timeout: Duration },
    /// The tool could not be started.
    #[error("`{0}` could not be started")]
    SpawnError(String, std::io::Error),
    /// The tool could not be waited on.
    #[error("`{0}` could not be waited on")]
    WaitError(String, std::io::Error),
    /// The tool exited unsuccessfully.
    #[error("`{tool}` failed with {status}")]
    ToolFailed { tool: String, status: ExitStatus },
}

impl ToolchainError {
    /// Whether the tool was killed for exceeding its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ToolchainError::ExternalToolTimeout { .. })
    }
}
