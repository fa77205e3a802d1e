//! Shader toolchain invocation and reflection normalization for shaderbake.
//!
//! Compiled variants are reflected by an external tool (`spirv-cross --reflect`) whose JSON
//! report is specific to that tool. This crate rewrites such a report into a
//! [`ResourceBundle`](crate::reflect::ResourceBundle): a fixed-width table of every input,
//! output, sampler, buffer and constant the variant uses, ready to be consumed by an engine
//! without knowledge of the reflection tool.
//!
//! Re-exported as [`shaderbake::reflect`](https://docs.rs/shaderbake/latest/shaderbake/reflect/index.html).

/// Error types.
pub mod error;
/// External shader compiler and reflector invocation.
pub mod front;
/// Reflection normalization.
pub mod reflect;
