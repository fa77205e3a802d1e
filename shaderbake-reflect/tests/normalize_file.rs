use shaderbake_reflect::error::{MalformedKind, NormalizeError};
use shaderbake_reflect::reflect::{
    normalize_file, normalize_in_place, ReflectTables, ResourceBundle, ShaderResourceType,
};

const REPORT: &str = r#"{
    "entryPoints": [{ "name": "main", "mode": "frag" }],
    "types": {
        "_10": {
            "name": "Push",
            "members": [
                { "name": "color", "type": "vec4", "offset": 0 },
                { "name": "exposure", "type": "float", "offset": 16 }
            ]
        }
    },
    "inputs": [{ "type": "vec2", "name": "inUV", "location": 0 }],
    "outputs": [{ "type": "vec4", "name": "outColor", "location": 0 }],
    "textures": [{ "type": "sampler2D", "name": "hdr", "set": 0, "binding": 0 }],
    "push_constants": [{ "id": 12, "name": "push", "type": "_10", "push_constant": true }]
}"#;

#[test]
fn normalize_to_separate_file() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("0.raw.json");
    let out = dir.path().join("0.json");
    std::fs::write(&raw, REPORT).unwrap();

    let bundle = normalize_file(&raw, &out, &ReflectTables::default()).unwrap();
    assert_eq!(bundle.resources.len(), 4);
    assert_eq!(ResourceBundle::load(&out).unwrap(), bundle);
    assert_eq!(std::fs::read_to_string(&raw).unwrap(), REPORT);
    assert_eq!(
        bundle.find("push").unwrap().ty,
        ShaderResourceType::PushConstant
    );
    assert_eq!(bundle.find("push").unwrap().size, 20);
}

#[test]
fn in_place_is_not_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("0.json");
    std::fs::write(&path, REPORT).unwrap();

    let tables = ReflectTables::default();
    let bundle = normalize_in_place(&path, &tables).unwrap();
    assert_eq!(ResourceBundle::load(&path).unwrap(), bundle);

    let again = normalize_in_place(&path, &tables);
    assert!(matches!(
        again,
        Err(NormalizeError::MalformedReflection(
            MalformedKind::EntryPointCount(0)
        ))
    ));
    assert_eq!(ResourceBundle::load(&path).unwrap(), bundle);
}

#[test]
fn missing_report() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("missing.raw.json");
    let result = normalize_file(&raw, dir.path().join("out.json"), &ReflectTables::default());
    assert!(matches!(result, Err(NormalizeError::IOError(path, _)) if path == raw));
}
