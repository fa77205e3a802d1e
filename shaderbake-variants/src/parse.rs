use crate::config::{GroupKind, MacroConfig, MacroGroup};
use crate::error::MacroConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The extension of the macro configuration file that accompanies a shader source.
pub const MACRO_CONFIG_EXTENSION: &str = "macro.json";

#[derive(Deserialize)]
struct RawMacroConfig {
    all: Vec<String>,
    #[serde(flatten)]
    groups: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawMacroGroup {
    macros: Vec<String>,
    #[serde(rename = "type")]
    kind: i64,
}

impl MacroConfig {
    /// Parse a macro configuration from a JSON document.
    ///
    /// The document lists the group names in order under `all`; each group is an object
    /// with its `macros` and a `type` of `0` for independent toggles, or any other value for
    /// an exclusive selection.
    pub fn parse_str(json: &str) -> Result<MacroConfig, MacroConfigError> {
        let raw: RawMacroConfig = serde_json::from_str(json)?;

        let mut groups = Vec::with_capacity(raw.all.len());
        for name in raw.all {
            let Some(value) = raw.groups.get(&name) else {
                return Err(MacroConfigError::MissingGroup(name));
            };
            let group = RawMacroGroup::deserialize(value)?;
            groups.push(MacroGroup {
                name,
                kind: GroupKind::from(group.kind),
                macros: group.macros,
            });
        }

        MacroConfig::new(groups)
    }

    /// Load a macro configuration file.
    pub fn try_parse(path: impl AsRef<Path>) -> Result<MacroConfig, MacroConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| MacroConfigError::IOError(path.to_path_buf(), e))?;
        MacroConfig::parse_str(&json)
    }

    /// The default location of the macro configuration for a shader source.
    ///
    /// The final extension of the source is replaced, so `lighting.frag` is configured by
    /// `lighting.macro.json`.
    pub fn default_path(source: impl AsRef<Path>) -> PathBuf {
        source.as_ref().with_extension(MACRO_CONFIG_EXTENSION)
    }
}

#[cfg(test)]
mod test {
    use crate::{GroupKind, MacroConfig, MacroConfigError};
    use std::path::{Path, PathBuf};

    #[test]
    pub fn parse_groups_in_listed_order() {
        let config = MacroConfig::parse_str(
            r#"{
                "all": ["LIGHT", "ATTR"],
                "ATTR": { "macros": ["HAS_UV", "HAS_NORMAL"], "type": 0 },
                "LIGHT": { "macros": ["POINT", "SPOT", "DIRECTIONAL"], "type": 1 }
            }"#,
        )
        .unwrap();

        let groups = config.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "LIGHT");
        assert_eq!(groups[0].kind, GroupKind::Exclusive);
        assert_eq!(groups[1].name, "ATTR");
        assert_eq!(groups[1].kind, GroupKind::Independent);
        assert_eq!(groups[1].macros, vec!["HAS_UV", "HAS_NORMAL"]);
        assert_eq!(config.variant_count(), 3 * 4);
    }

    #[test]
    pub fn unlisted_groups_are_ignored() {
        let config = MacroConfig::parse_str(
            r#"{
                "all": ["A"],
                "A": { "macros": ["X"], "type": 0 },
                "notes": "not a group"
            }"#,
        )
        .unwrap();
        assert_eq!(config.groups().len(), 1);
    }

    #[test]
    pub fn missing_group_is_an_error() {
        let err = MacroConfig::parse_str(r#"{ "all": ["A"] }"#).unwrap_err();
        assert!(matches!(err, MacroConfigError::MissingGroup(name) if name == "A"));
    }

    #[test]
    pub fn group_listed_twice_is_enumerated_twice() {
        let config = MacroConfig::parse_str(
            r#"{ "all": ["A", "A"], "A": { "macros": ["X", "Y"], "type": 0 } }"#,
        )
        .unwrap();
        assert_eq!(config.groups().len(), 2);
        assert_eq!(config.groups()[0], config.groups()[1]);
        assert_eq!(config.enumerate().len(), 16);
    }

    #[test]
    pub fn missing_all_is_an_error() {
        let err = MacroConfig::parse_str(r#"{ "A": { "macros": [], "type": 0 } }"#).unwrap_err();
        assert!(matches!(err, MacroConfigError::JsonError(_)));
    }

    #[test]
    pub fn default_path_replaces_extension() {
        assert_eq!(
            MacroConfig::default_path(Path::new("shaders/deferred/lighting.frag")),
            PathBuf::from("shaders/deferred/lighting.macro.json")
        );
    }
}
