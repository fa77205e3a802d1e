use crate::error::{BakeError, Result};
use crate::layout::OutputLayout;
use crate::options::BakeOptions;
use crate::report::{BakeReport, VariantOutcome};
use rayon::prelude::*;
use shaderbake_reflect::error::ToolchainError;
use shaderbake_reflect::front::Toolchain;
use shaderbake_reflect::reflect::{normalize_file, ReflectTables, ResourceBundle};
use shaderbake_variants::{MacroConfig, VariantKey};
use std::path::Path;

/// Builds every variant of a shader source.
pub struct ShaderBaker<T> {
    toolchain: T,
    tables: ReflectTables,
    options: BakeOptions,
}

impl<T: Toolchain + Sync> ShaderBaker<T> {
    pub fn new(toolchain: T, tables: ReflectTables, options: BakeOptions) -> Self {
        ShaderBaker {
            toolchain,
            tables,
            options,
        }
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Compile, reflect and normalize every variant of the shader at `source`.
    ///
    /// A failed variant does not stop the others; its error is recorded in the report.
    /// A tool timeout does not stop the variant either, but is recorded on its outcome.
    /// Only a missing source, an invalid macro configuration or an unwritable output
    /// directory fail the whole bake.
    pub fn bake(&self, source: impl AsRef<Path>) -> Result<BakeReport> {
        let source = source.as_ref();
        let source = std::fs::canonicalize(source)
            .map_err(|e| BakeError::SourceNotFound(source.to_path_buf(), e))?;

        let config_path = self
            .options
            .macro_config
            .clone()
            .unwrap_or_else(|| MacroConfig::default_path(&source));
        let config = MacroConfig::try_parse(&config_path)?;

        let layout = OutputLayout::new(&source);
        layout.create_dirs()?;

        let variants = config.enumerate();
        tracing::info!(
            source = %source.display(),
            variants = variants.len(),
            jobs = self.options.jobs,
            "baking shader variants"
        );

        let outcomes: Vec<VariantOutcome> = if self.options.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()?;
            pool.install(|| {
                variants
                    .into_par_iter()
                    .map(|key| self.bake_variant(&config, &layout, key))
                    .collect()
            })
        } else {
            variants
                .into_iter()
                .map(|key| self.bake_variant(&config, &layout, key))
                .collect()
        };

        Ok(BakeReport {
            source,
            variants: outcomes,
        })
    }

    fn bake_variant(
        &self,
        config: &MacroConfig,
        layout: &OutputLayout,
        key: VariantKey,
    ) -> VariantOutcome {
        let _span = tracing::info_span!("variant", key = %key).entered();

        let mut timeouts = Vec::new();
        let (defines, result) = match config.defines(&key) {
            Ok(defines) => {
                let result = self.build_variant(layout, &key, &defines, &mut timeouts);
                (defines.into_iter().map(String::from).collect(), result)
            }
            Err(e) => (Vec::new(), Err(e.into())),
        };

        match &result {
            Ok(_) if !timeouts.is_empty() => tracing::error!(
                "variant built from stale or missing artifacts after {} timeout(s)",
                timeouts.len()
            ),
            Ok(bundle) => tracing::info!(
                resources = bundle.resources.len(),
                "built {}",
                layout.spirv_path(&key).display()
            ),
            Err(e) => tracing::error!("variant failed: {e}"),
        }

        VariantOutcome {
            spirv: layout.spirv_path(&key),
            resources: layout.resource_path(&key),
            key,
            defines,
            result: result.map(|bundle| bundle.resources.len()),
            timeouts,
        }
    }

    fn build_variant(
        &self,
        layout: &OutputLayout,
        key: &VariantKey,
        defines: &[&str],
        timeouts: &mut Vec<ToolchainError>,
    ) -> Result<ResourceBundle> {
        let spirv = layout.spirv_path(key);
        continue_after_timeout(
            self.toolchain.compile(layout.source(), defines, &spirv),
            timeouts,
        )?;

        let raw = layout.raw_reflection_path(key);
        continue_after_timeout(self.toolchain.reflect(&spirv, &raw), timeouts)?;

        let bundle = normalize_file(&raw, layout.resource_path(key), &self.tables)?;

        if !self.options.keep_raw_reflection {
            if let Err(e) = std::fs::remove_file(&raw) {
                tracing::warn!("could not remove {}: {e}", raw.display());
            }
        }
        Ok(bundle)
    }
}

/// A timed out tool leaves a missing or stale artifact behind, which the next step
/// picks up. The timeout is recorded so the variant is not reported as built.
fn continue_after_timeout(
    result: std::result::Result<(), ToolchainError>,
    timeouts: &mut Vec<ToolchainError>,
) -> Result<()> {
    match result {
        Err(e) if e.is_timeout() => {
            tracing::warn!("{e}");
            timeouts.push(e);
            Ok(())
        }
        other => Ok(other?),
    }
}
