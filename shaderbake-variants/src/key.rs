use std::fmt::{Display, Formatter};

/// The encoded macro selection of one shader variant, one value per macro group.
///
/// Bit `j` of a group's value means the `j`-th macro of that group is defined. The key
/// also names the artifacts compiled for the variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey(Vec<u32>);

impl VariantKey {
    /// The per-group values, in group order.
    pub fn values(&self) -> &[u32] {
        &self.0
    }

    /// The number of groups this key encodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this key encodes no groups at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The artifact name prefix: every value followed by a `.`.
    ///
    /// A key of `[1, 2]` has the prefix `1.2.`; a key with no groups has an empty prefix.
    pub fn prefix(&self) -> String {
        self.0.iter().map(|value| format!("{value}.")).collect()
    }

    /// The file name of an artifact of this variant with the given extension.
    pub fn artifact_name(&self, extension: &str) -> String {
        format!("{}{extension}", self.prefix())
    }
}

impl From<Vec<u32>> for VariantKey {
    fn from(values: Vec<u32>) -> Self {
        VariantKey(values)
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
