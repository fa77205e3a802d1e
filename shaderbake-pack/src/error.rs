//! Baking errors.
use shaderbake_reflect::error::{NormalizeError, ToolchainError};
use shaderbake_variants::MacroConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Cumulative error type for shader baking.
#[derive(Error, Debug)]
pub enum BakeError {
    #[error("the shader source could not be found")]
    SourceNotFound(PathBuf, std::io::Error),
    #[error("macro configuration error")]
    MacroConfigError(#[from] MacroConfigError),
    #[error("reflection normalization error")]
    NormalizeError(#[from] NormalizeError),
    #[error("shader toolchain error")]
    ToolchainError(#[from] ToolchainError),
    #[error("the output directory could not be created")]
    IOError(PathBuf, std::io::Error),
    #[error("the worker pool could not be created")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for shader baking.
pub type Result<T> = std::result::Result<T, BakeError>;
