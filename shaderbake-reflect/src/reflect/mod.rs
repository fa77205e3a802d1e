/// The report schema of `spirv-cross --reflect`.
pub mod raw;

/// Lookup tables for stage bits and type sizes.
pub mod tables;

mod normalize;
mod resource;

pub use normalize::*;
pub use resource::*;
pub use tables::ReflectTables;
