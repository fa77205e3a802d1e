//! Common types shared between the shaderbake crates.
//!
//! This crate is an implementation detail of shaderbake and is re-exported as
//! [`shaderbake::common`](https://docs.rs/shaderbake/latest/shaderbake/common/index.html).

/// Hash map helpers.
pub mod map;

mod stage;

pub use stage::ShaderStage;
