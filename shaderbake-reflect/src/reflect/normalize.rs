use crate::error::{MalformedKind, NormalizeError};
use crate::reflect::raw::{RawMember, RawPushConstant, RawReflection};
use crate::reflect::{ReflectTables, ResourceBundle, ShaderResource, ShaderResourceType};
use std::path::Path;

/// The size in bytes of every specialization constant.
pub const SPECIALIZATION_CONSTANT_SIZE: u32 = 4;

/// Normalize a reflection report into the resource table of the variant.
///
/// Resources are emitted by category (inputs, subpass inputs, outputs, textures, uniform
/// buffers, push constants, specialization constants), each in report order. Every
/// resource is visible to the single stage of the report's entry point.
pub fn normalize(
    raw: &RawReflection,
    tables: &ReflectTables,
) -> Result<ResourceBundle, NormalizeError> {
    let [entry_point] = raw.entry_points.as_slice() else {
        return Err(NormalizeError::MalformedReflection(
            MalformedKind::EntryPointCount(raw.entry_points.len()),
        ));
    };
    let stages = tables.stage(&entry_point.mode)?;

    let Some(outputs) = &raw.outputs else {
        return Err(NormalizeError::MalformedReflection(
            MalformedKind::MissingOutputs,
        ));
    };

    let mut resources = Vec::new();

    for input in &raw.inputs {
        resources.push(ShaderResource {
            location: input.location,
            vec_size: tables.vec_size(&input.ty)?,
            columns: 1,
            array_size: 1,
            ..ShaderResource::new(ShaderResourceType::Input, stages, &input.name)
        });
    }

    for input in &raw.subpass_inputs {
        resources.push(ShaderResource {
            set: input.set,
            binding: input.binding,
            input_attachment_index: input.input_attachment_index,
            array_size: 1,
            ..ShaderResource::new(ShaderResourceType::InputAttachment, stages, &input.name)
        });
    }

    for output in outputs {
        resources.push(ShaderResource {
            location: output.location,
            vec_size: tables.vec_size(&output.ty)?,
            columns: 1,
            array_size: 1,
            ..ShaderResource::new(ShaderResourceType::Output, stages, &output.name)
        });
    }

    for texture in &raw.textures {
        resources.push(ShaderResource {
            set: texture.set,
            binding: texture.binding,
            array_size: 1,
            ..ShaderResource::new(ShaderResourceType::ImageSampler, stages, &texture.name)
        });
    }

    for ubo in &raw.ubos {
        resources.push(ShaderResource {
            set: ubo.set,
            binding: ubo.binding,
            array_size: 1,
            size: ubo.block_size,
            ..ShaderResource::new(ShaderResourceType::BufferUniform, stages, &ubo.name)
        });
    }

    for push_constant in &raw.push_constants {
        resources.push(ShaderResource {
            size: push_constant_size(raw, push_constant, tables)?,
            ..ShaderResource::new(ShaderResourceType::PushConstant, stages, &push_constant.name)
        });
    }

    for constant in &raw.specialization_constants {
        resources.push(ShaderResource {
            size: SPECIALIZATION_CONSTANT_SIZE,
            constant_id: constant.id,
            ..ShaderResource::new(
                ShaderResourceType::SpecializationConstant,
                stages,
                &constant.name,
            )
        });
    }

    Ok(ResourceBundle { resources })
}

/// The size of a push constant block: the end of its member with the highest offset.
///
/// If several members share the highest offset, the first of them is used.
fn push_constant_size(
    raw: &RawReflection,
    block: &RawPushConstant,
    tables: &ReflectTables,
) -> Result<u32, NormalizeError> {
    let Some(ty) = raw.types.get(&block.ty) else {
        return Err(NormalizeError::MalformedReflection(
            MalformedKind::MissingType(block.ty.clone()),
        ));
    };

    let last = ty
        .members
        .iter()
        .fold(None, |last: Option<&RawMember>, member| match last {
            Some(current) if member.offset <= current.offset => Some(current),
            _ => Some(member),
        });

    let Some(last) = last else {
        return Err(NormalizeError::MalformedReflection(
            MalformedKind::EmptyBlock(block.name.clone()),
        ));
    };

    Ok(last.offset + tables.byte_size(&last.ty)?)
}

/// Parse and normalize a JSON reflection report.
pub fn normalize_str(json: &str, tables: &ReflectTables) -> Result<ResourceBundle, NormalizeError> {
    let raw: RawReflection = serde_json::from_str(json)?;
    normalize(&raw, tables)
}

/// Normalize the reflection report at `raw_path` and write the bundle to `output`.
///
/// The report is left untouched.
pub fn normalize_file(
    raw_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    tables: &ReflectTables,
) -> Result<ResourceBundle, NormalizeError> {
    let raw_path = raw_path.as_ref();
    let json = std::fs::read_to_string(raw_path)
        .map_err(|e| NormalizeError::IOError(raw_path.to_path_buf(), e))?;
    let bundle = normalize_str(&json, tables)?;
    bundle.save(output)?;
    Ok(bundle)
}

/// Replace the reflection report at `path` with its normalized bundle.
///
/// This is destructive: the report is overwritten, and running it a second time on the
/// same file fails with [`MalformedKind::EntryPointCount`] since a bundle has no entry points.
pub fn normalize_in_place(
    path: impl AsRef<Path>,
    tables: &ReflectTables,
) -> Result<ResourceBundle, NormalizeError> {
    let path = path.as_ref();
    normalize_file(path, path, tables)
}
