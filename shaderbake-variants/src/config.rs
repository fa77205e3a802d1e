use crate::error::MacroConfigError;
use crate::key::VariantKey;
use shaderbake_common::map::{FastHashMap, FastHashSet};

/// The largest number of macros a single group may declare.
///
/// Every group value is a `u32` bitmask, and an independent group enumerates
/// `2^size` values.
pub const MAX_GROUP_SIZE: usize = 31;

/// How the macros within a group combine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// Each macro may be toggled on or off independently.
    Independent,
    /// Exactly one macro of the group is active per variant.
    Exclusive,
}

impl From<i64> for GroupKind {
    fn from(value: i64) -> Self {
        if value == 0 {
            GroupKind::Independent
        } else {
            GroupKind::Exclusive
        }
    }
}

/// An ordered group of preprocessor macros that are enumerated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroGroup {
    /// The name of the group in the macro configuration.
    pub name: String,
    /// How the macros of this group combine.
    pub kind: GroupKind,
    /// The macro names. The index of a name is its bit in the group's encoding.
    pub macros: Vec<String>,
}

impl MacroGroup {
    /// Create a new group of independently toggled macros.
    pub fn independent<S: Into<String>>(
        name: impl Into<String>,
        macros: impl IntoIterator<Item = S>,
    ) -> Self {
        MacroGroup {
            name: name.into(),
            kind: GroupKind::Independent,
            macros: macros.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new group of mutually exclusive macros.
    pub fn exclusive<S: Into<String>>(
        name: impl Into<String>,
        macros: impl IntoIterator<Item = S>,
    ) -> Self {
        MacroGroup {
            name: name.into(),
            kind: GroupKind::Exclusive,
            macros: macros.into_iter().map(Into::into).collect(),
        }
    }

    /// The number of distinct values this group contributes to the variant product.
    pub fn variant_count(&self) -> usize {
        match self.kind {
            GroupKind::Independent => 1 << self.macros.len(),
            GroupKind::Exclusive => self.macros.len().max(1),
        }
    }

    /// The encoded values this group contributes, in enumeration order.
    ///
    /// An empty group of either kind yields the single value `0`.
    pub fn values(&self) -> impl Iterator<Item = u32> {
        let size = self.macros.len() as u32;
        let (independent, exclusive) = match self.kind {
            GroupKind::Independent => (Some(0..(1u32 << size)), None),
            GroupKind::Exclusive if size == 0 => (Some(0..1), None),
            GroupKind::Exclusive => (None, Some((0..size).map(|bit| 1u32 << bit))),
        };
        independent
            .into_iter()
            .flatten()
            .chain(exclusive.into_iter().flatten())
    }

    /// The macros whose bits are set in `value`.
    pub fn active_macros(&self, value: u32) -> Result<Vec<&str>, MacroConfigError> {
        let mut active = Vec::new();
        let mut bits = value;
        while bits != 0 {
            let bit = bits.trailing_zeros();
            let Some(name) = self.macros.get(bit as usize) else {
                return Err(MacroConfigError::BitOutOfRange {
                    group: self.name.clone(),
                    bit,
                    count: self.macros.len(),
                });
            };
            active.push(name.as_str());
            bits &= bits - 1;
        }
        Ok(active)
    }

    fn validate(&self) -> Result<(), MacroConfigError> {
        if self.macros.len() > MAX_GROUP_SIZE {
            return Err(MacroConfigError::GroupTooLarge {
                group: self.name.clone(),
                size: self.macros.len(),
            });
        }

        let mut seen = FastHashSet::default();
        for name in &self.macros {
            if !seen.insert(name.as_str()) {
                return Err(MacroConfigError::DuplicateMacro {
                    group: self.name.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The complete macro configuration of a shader source.
///
/// Group order is significant: it is the positional order of the values in every
/// [`VariantKey`](crate::VariantKey).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroConfig {
    groups: Vec<MacroGroup>,
}

impl MacroConfig {
    /// Create a macro configuration from groups in declaration order.
    ///
    /// Fails if a group is invalid, or if the number of variants does not fit in a `usize`.
    pub fn new(groups: Vec<MacroGroup>) -> Result<Self, MacroConfigError> {
        let mut count: usize = 1;
        for group in &groups {
            group.validate()?;
            count = count
                .checked_mul(group.variant_count())
                .ok_or(MacroConfigError::TooManyVariants)?;
        }
        Ok(MacroConfig { groups })
    }

    /// The macro groups in declaration order.
    pub fn groups(&self) -> &[MacroGroup] {
        &self.groups
    }

    /// The number of variants [`MacroConfig::enumerate`] produces.
    ///
    /// [`MacroConfig::new`] rejects configurations where this would overflow.
    pub fn variant_count(&self) -> usize {
        self.groups.iter().map(MacroGroup::variant_count).product()
    }

    /// The macros to define when compiling the given variant, in group order.
    pub fn defines(&self, key: &VariantKey) -> Result<Vec<&str>, MacroConfigError> {
        if key.len() != self.groups.len() {
            return Err(MacroConfigError::EncodingLength {
                expected: self.groups.len(),
                received: key.len(),
            });
        }

        let mut defines = Vec::new();
        for (group, &value) in self.groups.iter().zip(key.values()) {
            defines.extend(group.active_macros(value)?);
        }
        Ok(defines)
    }

    /// Encode a set of active macros to the key of the variant that was compiled for it.
    ///
    /// Names that do not belong to any group are ignored.
    pub fn encode<S: AsRef<str>>(&self, active: impl IntoIterator<Item = S>) -> VariantKey {
        let mut index: FastHashMap<&str, (usize, u32)> = FastHashMap::default();
        for (group_index, group) in self.groups.iter().enumerate() {
            for (bit, name) in group.macros.iter().enumerate() {
                index.insert(name.as_str(), (group_index, bit as u32));
            }
        }

        let mut values = vec![0u32; self.groups.len()];
        for name in active {
            if let Some(&(group, bit)) = index.get(name.as_ref()) {
                values[group] |= 1 << bit;
            }
        }
        VariantKey::from(values)
    }
}
