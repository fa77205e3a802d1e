use shaderbake_pack::{BakeError, BakeOptions, ShaderBaker};
use shaderbake_reflect::error::{NormalizeError, ToolchainError};
use shaderbake_reflect::front::Toolchain;
use shaderbake_reflect::reflect::{ReflectTables, ResourceBundle, ShaderResourceType};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Writes the active defines as the "binary", and reflects an output plus one input per
/// define, so every variant has a distinct resource table.
#[derive(Default)]
struct FakeToolchain {
    compiled: Mutex<Vec<Vec<String>>>,
    compile_timeouts: Vec<&'static str>,
    reflect_timeouts: Vec<&'static str>,
    scalar_input: Option<&'static str>,
}

fn timeout() -> ToolchainError {
    ToolchainError::ExternalToolTimeout {
        tool: "fake".to_string(),
        timeout: Duration::from_secs(1),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl Toolchain for FakeToolchain {
    fn compile(
        &self,
        _source: &Path,
        defines: &[&str],
        output: &Path,
    ) -> Result<(), ToolchainError> {
        self.compiled
            .lock()
            .unwrap()
            .push(defines.iter().map(|d| d.to_string()).collect());
        if self.compile_timeouts.iter().any(|name| *name == file_name(output)) {
            return Err(timeout());
        }
        std::fs::write(output, defines.join(" ")).unwrap();
        Ok(())
    }

    fn reflect(&self, spirv: &Path, output: &Path) -> Result<(), ToolchainError> {
        if self.reflect_timeouts.iter().any(|name| *name == file_name(spirv)) {
            return Err(timeout());
        }

        let defines = std::fs::read_to_string(spirv).unwrap_or_default();
        let mut inputs = Vec::new();
        for (location, define) in defines.split_whitespace().enumerate() {
            let ty = if Some(define) == self.scalar_input {
                "float"
            } else {
                "vec4"
            };
            inputs.push(serde_json::json!({ "type": ty, "name": define, "location": location }));
        }

        let report = serde_json::json!({
            "entryPoints": [{ "name": "main", "mode": "frag" }],
            "inputs": inputs,
            "outputs": [{ "type": "vec4", "name": "outColor", "location": 0 }]
        });
        std::fs::write(output, report.to_string()).unwrap();
        Ok(())
    }
}

fn shader(macros: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("lighting.frag");
    std::fs::write(&source, "#version 450\nvoid main() {}\n").unwrap();
    std::fs::write(dir.path().join("lighting.macro.json"), macros).unwrap();
    (dir, source)
}

const TWO_TOGGLES: &str = r#"{ "all": ["A"], "A": { "macros": ["X", "Y"], "type": 0 } }"#;

#[test]
fn bakes_every_variant() {
    let (_dir, source) = shader(TWO_TOGGLES);
    let baker = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions::default(),
    );

    let report = baker.bake(&source).unwrap();
    assert!(report.is_success());
    assert_eq!(report.variants.len(), 4);

    let keys: Vec<String> = report.variants.iter().map(|v| v.key.prefix()).collect();
    assert_eq!(keys, vec!["0.", "1.", "2.", "3."]);

    let defines: Vec<Vec<String>> = report.variants.iter().map(|v| v.defines.clone()).collect();
    assert_eq!(
        defines,
        vec![
            vec![],
            vec!["X".to_string()],
            vec!["Y".to_string()],
            vec!["X".to_string(), "Y".to_string()]
        ]
    );
    assert_eq!(*baker.toolchain().compiled.lock().unwrap(), defines);

    let source = std::fs::canonicalize(&source).unwrap();
    let res_dir = PathBuf::from(format!("{}.res2", source.display()));
    let bin_dir = PathBuf::from(format!("{}.bin2", source.display()));
    for (index, variant) in report.variants.iter().enumerate() {
        assert_eq!(variant.spirv, bin_dir.join(format!("{index}.spv")));
        assert_eq!(variant.resources, res_dir.join(format!("{index}.json")));
        assert!(variant.spirv.exists());
        assert!(!res_dir.join(format!("{index}.raw.json")).exists());

        let bundle = ResourceBundle::load(&variant.resources).unwrap();
        assert_eq!(bundle.resources.len(), variant.defines.len() + 1);
        assert_eq!(*variant.result.as_ref().unwrap(), bundle.resources.len());
        assert_eq!(
            bundle
                .resources
                .iter()
                .filter(|r| r.ty == ShaderResourceType::Input)
                .count(),
            variant.defines.len()
        );
    }
}

#[test]
fn parallel_bake_matches_sequential_order() {
    let (_dir, source) = shader(
        r#"{
            "all": ["ATTR", "LIGHT"],
            "ATTR": { "macros": ["HAS_UV", "HAS_NORMAL"], "type": 0 },
            "LIGHT": { "macros": ["POINT", "SPOT", "DIRECTIONAL"], "type": 1 }
        }"#,
    );

    let sequential = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions::default(),
    )
    .bake(&source)
    .unwrap();

    let parallel = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions {
            jobs: 4,
            ..BakeOptions::default()
        },
    )
    .bake(&source)
    .unwrap();

    assert!(parallel.is_success());
    assert_eq!(parallel.variants.len(), 12);
    let keys = |report: &shaderbake_pack::BakeReport| {
        report
            .variants
            .iter()
            .map(|v| v.key.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&sequential), keys(&parallel));
    assert_eq!(keys(&parallel)[0], "0.1");
    assert_eq!(keys(&parallel)[11], "3.4");
}

#[test]
fn failed_variant_does_not_stop_the_others() {
    let (_dir, source) = shader(TWO_TOGGLES);
    let baker = ShaderBaker::new(
        FakeToolchain {
            scalar_input: Some("Y"),
            ..FakeToolchain::default()
        },
        ReflectTables::default(),
        BakeOptions::default(),
    );

    let report = baker.bake(&source).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failure_count(), 2);

    let failed: Vec<String> = report.failures().map(|v| v.key.to_string()).collect();
    assert_eq!(failed, vec!["2", "3"]);
    for failure in report.failures() {
        assert!(matches!(
            &failure.result,
            Err(BakeError::NormalizeError(NormalizeError::UnknownType(ty))) if ty == "float"
        ));
        assert!(!failure.resources.exists());
    }
}

#[test]
fn timeouts_are_not_fatal() {
    let (_dir, source) = shader(TWO_TOGGLES);
    let baker = ShaderBaker::new(
        FakeToolchain {
            compile_timeouts: vec!["1.spv"],
            reflect_timeouts: vec!["2.spv"],
            ..FakeToolchain::default()
        },
        ReflectTables::default(),
        BakeOptions::default(),
    );

    let report = baker.bake(&source).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failure_count(), 2);

    // the reflector still ran on the missing binary
    let compile_timed_out = &report.variants[1];
    assert!(!compile_timed_out.spirv.exists());
    assert_eq!(*compile_timed_out.result.as_ref().unwrap(), 1);
    assert_eq!(compile_timed_out.timeouts.len(), 1);
    assert!(compile_timed_out.timeouts[0].is_timeout());
    assert!(!compile_timed_out.is_success());

    // nothing to normalize
    let reflect_timed_out = &report.variants[2];
    assert!(matches!(
        &reflect_timed_out.result,
        Err(BakeError::NormalizeError(NormalizeError::IOError(..)))
    ));
    assert_eq!(reflect_timed_out.timeouts.len(), 1);

    assert!(report.variants[0].is_success());
    assert!(report.variants[0].timeouts.is_empty());
    assert!(report.variants[3].is_success());
}

#[test]
fn stale_binary_after_timeout_is_not_success() {
    let (_dir, source) = shader(r#"{ "all": ["A"], "A": { "macros": ["X"], "type": 0 } }"#);
    let source = std::fs::canonicalize(source).unwrap();
    let bin_dir = PathBuf::from(format!("{}.bin2", source.display()));
    std::fs::create_dir_all(&bin_dir).unwrap();
    std::fs::write(bin_dir.join("0.spv"), "").unwrap();
    std::fs::write(bin_dir.join("1.spv"), "X").unwrap();

    let baker = ShaderBaker::new(
        FakeToolchain {
            compile_timeouts: vec!["0.spv", "1.spv"],
            ..FakeToolchain::default()
        },
        ReflectTables::default(),
        BakeOptions::default(),
    );

    let report = baker.bake(&source).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failure_count(), 2);
    for variant in &report.variants {
        assert!(variant.result.is_ok());
        assert!(variant.resources.exists());
        assert_eq!(variant.timeouts.len(), 1);
    }
}

#[test]
fn stale_artifacts_are_kept() {
    let (_dir, source) = shader(TWO_TOGGLES);
    let source = std::fs::canonicalize(source).unwrap();
    let stale = PathBuf::from(format!("{}.bin2/9.spv", source.display()));
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, "stale").unwrap();

    let baker = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions {
            keep_raw_reflection: true,
            ..BakeOptions::default()
        },
    );
    let report = baker.bake(&source).unwrap();
    assert!(report.is_success());
    assert!(stale.exists());

    for variant in &report.variants {
        let raw = variant.resources.with_file_name(format!("{}raw.json", variant.key.prefix()));
        assert!(raw.exists());
    }
}

#[test]
fn macro_config_override() {
    let (dir, source) = shader(TWO_TOGGLES);
    let config = dir.path().join("other.json");
    std::fs::write(
        &config,
        r#"{ "all": ["L"], "L": { "macros": ["A", "B", "C"], "type": 1 } }"#,
    )
    .unwrap();

    let baker = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions {
            macro_config: Some(config),
            ..BakeOptions::default()
        },
    );
    let report = baker.bake(&source).unwrap();
    let keys: Vec<String> = report.variants.iter().map(|v| v.key.to_string()).collect();
    assert_eq!(keys, vec!["1", "2", "4"]);
}

#[test]
fn setup_errors_abort() {
    let dir = tempfile::tempdir().unwrap();
    let baker = ShaderBaker::new(
        FakeToolchain::default(),
        ReflectTables::default(),
        BakeOptions::default(),
    );

    let missing = baker.bake(dir.path().join("missing.frag"));
    assert!(matches!(missing, Err(BakeError::SourceNotFound(..))));

    let source = dir.path().join("lonely.vert");
    std::fs::write(&source, "#version 450\n").unwrap();
    let no_config = baker.bake(&source);
    assert!(matches!(no_config, Err(BakeError::MacroConfigError(_))));
    assert!(baker.toolchain().compiled.lock().unwrap().is_empty());
}
