use bitflags::bitflags;

bitflags! {
    /// Pipeline stages a resource is visible to.
    ///
    /// The bit values match `VkShaderStageFlagBits`, so a serialized mask can be handed
    /// to Vulkan unchanged.
    #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
    pub struct ShaderStage: u32 {
        const VERTEX = 0b00000001;
        const TESSELLATION_CONTROL = 0b00000010;
        const TESSELLATION_EVALUATION = 0b00000100;
        const GEOMETRY = 0b00001000;
        const FRAGMENT = 0b00010000;
        const COMPUTE = 0b00100000;
    }
}

impl From<u32> for ShaderStage {
    fn from(value: u32) -> Self {
        ShaderStage::from_bits_retain(value)
    }
}

impl From<ShaderStage> for u32 {
    fn from(value: ShaderStage) -> Self {
        value.bits()
    }
}
