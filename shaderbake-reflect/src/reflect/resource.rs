use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use shaderbake_common::ShaderStage;
use std::path::Path;

/// The kind of a reflected resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderResourceType {
    Input,
    InputAttachment,
    Output,
    ImageSampler,
    BufferUniform,
    PushConstant,
    SpecializationConstant,
}

/// How a resource is bound at runtime.
///
/// Normalization always emits `Static`; the engine may promote resources afterwards with
/// [`ResourceBundle::set_resource_mode`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderResourceMode {
    #[default]
    Static,
    Dynamic,
    UpdateAfterBind,
}

/// One row of the resource table of a shader variant.
///
/// Every field is present for every resource type; fields that do not apply to a
/// resource type are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderResource {
    pub stages: ShaderStage,
    #[serde(rename = "type")]
    pub ty: ShaderResourceType,
    pub mode: ShaderResourceMode,
    pub set: u32,
    pub binding: u32,
    pub location: u32,
    pub input_attachment_index: u32,
    pub vec_size: u32,
    pub columns: u32,
    pub array_size: u32,
    pub offset: u32,
    pub size: u32,
    pub constant_id: u32,
    pub qualifiers: u32,
    pub name: String,
}

impl ShaderResource {
    /// A static resource with every numeric field zeroed.
    pub fn new(ty: ShaderResourceType, stages: ShaderStage, name: impl Into<String>) -> Self {
        ShaderResource {
            stages,
            ty,
            mode: ShaderResourceMode::Static,
            set: 0,
            binding: 0,
            location: 0,
            input_attachment_index: 0,
            vec_size: 0,
            columns: 0,
            array_size: 0,
            offset: 0,
            size: 0,
            constant_id: 0,
            qualifiers: 0,
            name: name.into(),
        }
    }
}

/// The normalized resource table of a compiled shader variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    pub resources: Vec<ShaderResource>,
}

impl ResourceBundle {
    /// Load a resource bundle written by [`ResourceBundle::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<ResourceBundle, NormalizeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| NormalizeError::IOError(path.to_path_buf(), e))?;
        serde_json::from_str(&json).map_err(NormalizeError::JsonError)
    }

    /// Write the resource bundle as JSON, replacing the file if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NormalizeError> {
        let path = path.as_ref();
        let json = serde_json::to_string(self).map_err(NormalizeError::JsonError)?;
        std::fs::write(path, json).map_err(|e| NormalizeError::IOError(path.to_path_buf(), e))
    }

    /// Find a resource by name.
    pub fn find(&self, name: &str) -> Option<&ShaderResource> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    /// Change how the named resource is bound.
    ///
    /// Only uniform buffers can be bound dynamically; a request to make any other
    /// resource dynamic is ignored. Returns whether the mode was changed.
    pub fn set_resource_mode(&mut self, name: &str, mode: ShaderResourceMode) -> bool {
        let Some(resource) = self
            .resources
            .iter_mut()
            .find(|resource| resource.name == name)
        else {
            tracing::warn!("resource `{name}` not found for shader");
            return false;
        };

        if mode == ShaderResourceMode::Dynamic && resource.ty != ShaderResourceType::BufferUniform
        {
            tracing::warn!("resource `{name}` does not support dynamic binding");
            return false;
        }

        resource.mode = mode;
        true
    }
}
