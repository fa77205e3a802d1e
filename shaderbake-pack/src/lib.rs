//! Shader variant baking for shaderbake.
//!
//! A [`ShaderBaker`](crate::ShaderBaker) takes a shader source with its macro configuration,
//! compiles every variant with a [`Toolchain`](shaderbake_reflect::front::Toolchain), and
//! writes the SPIR-V and normalized resource table of each variant next to the source:
//!
//! ```text
//! lighting.frag
//! lighting.macro.json
//! lighting.frag.bin2/0.1.spv   ...
//! lighting.frag.res2/0.1.json  ...
//! ```
//!
//! Output directories are created when missing but never cleared.
//!
//! Re-exported as [`shaderbake::pack`](https://docs.rs/shaderbake/latest/shaderbake/pack/index.html).

mod bake;
mod error;
mod layout;
mod options;
mod report;

pub use bake::ShaderBaker;
pub use error::*;
pub use layout::OutputLayout;
pub use options::BakeOptions;
pub use report::{BakeReport, VariantOutcome};
