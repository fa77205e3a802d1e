use serde::Deserialize;
use shaderbake_common::map::FastHashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntryPoint {
    pub name: String,
    /// The stage of the entry point, such as `vert` or `frag`.
    pub mode: String,
}

/// A stage input or output variable.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInterfaceVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub location: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubpassInput {
    pub name: String,
    pub set: u32,
    pub binding: u32,
    pub input_attachment_index: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTexture {
    pub name: String,
    pub set: u32,
    pub binding: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUniformBuffer {
    pub name: String,
    pub set: u32,
    pub binding: u32,
    pub block_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPushConstant {
    pub name: String,
    /// The key of the block's type in the `types` table.
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecializationConstant {
    pub name: String,
    pub id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMember {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<RawMember>,
}

/// A reflection report for a single compiled shader.
///
/// Every category except `outputs` may be absent; `outputs` is an `Option` so a missing
/// array can be told apart from an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReflection {
    #[serde(rename = "entryPoints", default)]
    pub entry_points: Vec<RawEntryPoint>,
    #[serde(default)]
    pub types: FastHashMap<String, RawType>,
    #[serde(default)]
    pub inputs: Vec<RawInterfaceVariable>,
    #[serde(default)]
    pub subpass_inputs: Vec<RawSubpassInput>,
    pub outputs: Option<Vec<RawInterfaceVariable>>,
    #[serde(default)]
    pub textures: Vec<RawTexture>,
    #[serde(default)]
    pub ubos: Vec<RawUniformBuffer>,
    #[serde(default)]
    pub push_constants: Vec<RawPushConstant>,
    #[serde(default)]
    pub specialization_constants: Vec<RawSpecializationConstant>,
}
