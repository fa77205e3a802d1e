//! Macro configuration parsing and shader variant enumeration for shaderbake.
//!
//! A shader source is accompanied by a `.macro.json` file that declares its optional
//! features as ordered groups of preprocessor macros. Each group is either a set of
//! independent toggles, or an exclusive one-of-N selector. This crate expands such a
//! [`MacroConfig`](crate::MacroConfig) into every [`VariantKey`](crate::VariantKey) that
//! must be compiled, and maps keys back and forth to the set of active macros.
//!
//! Re-exported as [`shaderbake::variants`](https://docs.rs/shaderbake/latest/shaderbake/variants/index.html).

mod config;
mod enumerate;
mod error;
mod key;
mod parse;

pub use config::*;
pub use error::*;
pub use key::*;
