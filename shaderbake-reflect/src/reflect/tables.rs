use crate::error::NormalizeError;
use serde::Deserialize;
use shaderbake_common::map::FastHashMap;
use shaderbake_common::ShaderStage;
use std::path::Path;

/// The lookup tables used to derive stage masks and sizes during normalization.
///
/// The default tables cover the stage names `vert`, `tesc`, `tese`, `geom` and `frag`,
/// the vector types `vec2`, `vec3` and `vec4`, and the push constant member types
/// `float` and `vec4`. Additional entries can be merged in with [`ReflectTables::extend`]
/// or loaded from a JSON document with [`ReflectTables::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectTables {
    /// Entry point stage name to stage bit.
    pub stages: FastHashMap<String, ShaderStage>,
    /// Interface variable type name to vector width.
    pub vec_sizes: FastHashMap<String, u32>,
    /// Block member type name to size in bytes.
    pub byte_sizes: FastHashMap<String, u32>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TableOverrides {
    stages: FastHashMap<String, u32>,
    vec_sizes: FastHashMap<String, u32>,
    byte_sizes: FastHashMap<String, u32>,
}

impl Default for ReflectTables {
    fn default() -> Self {
        let stages = [
            ("vert", ShaderStage::VERTEX),
            ("tesc", ShaderStage::TESSELLATION_CONTROL),
            ("tese", ShaderStage::TESSELLATION_EVALUATION),
            ("geom", ShaderStage::GEOMETRY),
            ("frag", ShaderStage::FRAGMENT),
        ];
        let vec_sizes = [("vec2", 2), ("vec3", 3), ("vec4", 4)];
        let byte_sizes = [("float", 4), ("vec4", 16)];

        ReflectTables {
            stages: stages
                .into_iter()
                .map(|(name, stage)| (name.to_string(), stage))
                .collect(),
            vec_sizes: vec_sizes
                .into_iter()
                .map(|(name, size)| (name.to_string(), size))
                .collect(),
            byte_sizes: byte_sizes
                .into_iter()
                .map(|(name, size)| (name.to_string(), size))
                .collect(),
        }
    }
}

impl ReflectTables {
    /// The stage bit of an entry point stage name.
    pub fn stage(&self, name: &str) -> Result<ShaderStage, NormalizeError> {
        self.stages
            .get(name)
            .copied()
            .ok_or_else(|| NormalizeError::UnknownStage(name.to_string()))
    }

    /// The vector width of an interface variable type.
    pub fn vec_size(&self, ty: &str) -> Result<u32, NormalizeError> {
        self.vec_sizes
            .get(ty)
            .copied()
            .ok_or_else(|| NormalizeError::UnknownType(ty.to_string()))
    }

    /// The size in bytes of a block member type.
    pub fn byte_size(&self, ty: &str) -> Result<u32, NormalizeError> {
        self.byte_sizes
            .get(ty)
            .copied()
            .ok_or_else(|| NormalizeError::UnknownType(ty.to_string()))
    }

    /// Merge the entries of another set of tables into this one, replacing existing entries.
    pub fn extend(&mut self, other: ReflectTables) {
        self.stages.extend(other.stages);
        self.vec_sizes.extend(other.vec_sizes);
        self.byte_sizes.extend(other.byte_sizes);
    }

    /// The default tables with the entries of a JSON document merged in.
    ///
    /// The document may contain any of the `stages`, `vec_sizes` and `byte_sizes` objects,
    /// each mapping a name to an integer.
    pub fn with_overrides(json: &str) -> Result<ReflectTables, NormalizeError> {
        let overrides: TableOverrides =
            serde_json::from_str(json).map_err(NormalizeError::JsonError)?;
        let mut tables = ReflectTables::default();
        tables.extend(ReflectTables {
            stages: overrides
                .stages
                .into_iter()
                .map(|(name, bits)| (name, ShaderStage::from(bits)))
                .collect(),
            vec_sizes: overrides.vec_sizes,
            byte_sizes: overrides.byte_sizes,
        });
        Ok(tables)
    }

    /// Load table overrides from a JSON file. See [`ReflectTables::with_overrides`].
    pub fn load_overrides(path: impl AsRef<Path>) -> Result<ReflectTables, NormalizeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| NormalizeError::IOError(path.to_path_buf(), e))?;
        ReflectTables::with_overrides(&json)
    }
}
