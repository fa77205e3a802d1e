#![forbid(missing_docs)]
//! Ahead-of-time shader variant compiler and resource reflector.
//!
//! shaderbake compiles a single shader source into every combination of the optional
//! features declared in its macro configuration, and describes the resources used by each
//! compiled variant in a stable, tool independent schema that an engine can load without
//! reflecting SPIR-V at runtime.
//!
//! ## Usage
//! The core objects in shaderbake are the [`MacroConfig`](crate::variants::MacroConfig),
//! which enumerates the variants of a shader, and the [`ShaderBaker`](crate::pack::ShaderBaker),
//! which builds them.
//!
//! The basic workflow involves creating a `ShaderBaker` with a toolchain, then calling
//! `ShaderBaker::bake` with the path of a shader source. Every variant is compiled with
//! `glslangValidator`, reflected with `spirv-cross`, and its reflection report normalized into
//! a [`ResourceBundle`](crate::reflect::ResourceBundle).
//!
//! | **Crate feature** | **Provides**                                  |
//! |-------------------|-----------------------------------------------|
//! | `variants`        | macro configuration and variant enumeration   |
//! | `reflect`         | toolchain invocation and reflection normalization |
//! | `pack`            | baking every variant of a shader source       |

/// Types shared by all shaderbake crates.
pub mod common {
    pub use shaderbake_common::map::FastHashMap;
    pub use shaderbake_common::ShaderStage;
}

#[cfg(feature = "variants")]
/// Macro configuration parsing and shader variant enumeration.
///
/// A macro configuration lists groups of preprocessor macros that are either toggled
/// independently or selected exclusively. Every combination is one variant.
pub mod variants {
    pub use shaderbake_variants::*;
}

#[cfg(feature = "reflect")]
/// Shader toolchain invocation and reflection normalization.
pub mod reflect {
    pub use shaderbake_reflect::error::*;

    pub use shaderbake_reflect::reflect::{
        normalize, normalize_file, normalize_in_place, normalize_str, ReflectTables,
        ResourceBundle, ShaderResource, ShaderResourceMode, ShaderResourceType,
    };

    /// The report schema of the reflection tool.
    pub mod raw {
        pub use shaderbake_reflect::reflect::raw::*;
    }

    /// External shader compiler and reflector invocation.
    pub mod front {
        pub use shaderbake_reflect::front::*;
    }
}

#[cfg(feature = "pack")]
/// Building every variant of a shader source.
pub mod pack {
    pub use shaderbake_pack::*;
}
