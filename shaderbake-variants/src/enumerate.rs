use crate::config::{MacroConfig, MacroGroup};
use crate::key::VariantKey;

impl MacroConfig {
    /// Enumerate every variant of this configuration.
    ///
    /// The result is the cartesian product of the groups' values, with the first group
    /// varying slowest. The order is deterministic for a given configuration.
    pub fn enumerate(&self) -> Vec<VariantKey> {
        let mut variants = Vec::new();
        let mut current = Vec::with_capacity(self.groups().len());
        enumerate_groups(self.groups(), &mut current, &mut variants);
        variants
    }
}

fn enumerate_groups(groups: &[MacroGroup], current: &mut Vec<u32>, out: &mut Vec<VariantKey>) {
    let Some((group, rest)) = groups.split_first() else {
        out.push(VariantKey::from(current.clone()));
        return;
    };

    for value in group.values() {
        current.push(value);
        enumerate_groups(rest, current, out);
        current.pop();
    }
}
