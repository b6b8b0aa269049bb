use std::collections::BTreeSet;

use super::{grammar::Production, Grammar};

impl Grammar {
    /// Non-terminals that derive the empty string.
    ///
    /// Each pass either adds a non-terminal or ends the loop, so there are at
    /// most `|non-terminals| + 1` passes.
    pub fn nullable_set(&self) -> BTreeSet<usize> {
        self.nullable_set_from(BTreeSet::new())
    }

    /// Grows `nullable` to the fixed point. Seeding it with non-terminals
    /// already known to be nullable never removes any of them.
    pub fn nullable_set_from(&self, mut nullable: BTreeSet<usize>) -> BTreeSet<usize> {
        loop {
            let mut changed = false;
            for (left, productions) in &self.rules {
                if nullable.contains(left) {
                    continue;
                }
                let is_nullable = productions.iter().any(|p| match p {
                    Production::Epsilon => true,
                    Production::Symbols(s) => s.iter().all(|idx| nullable.contains(idx)),
                });
                if is_nullable {
                    nullable.insert(*left);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        nullable
    }
}
