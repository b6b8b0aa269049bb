use std::collections::BTreeSet;

use itertools::Itertools;

use super::{grammar::Production, Grammar};

impl Grammar {
    /// Removes ε-productions. Every production is expanded into the variants
    /// obtained by deleting each subset of its nullable positions; ε survives
    /// only on a nullable start symbol.
    pub fn eliminate_epsilon(&self) -> Grammar {
        let nullable = self.nullable_set();
        let mut g = self.with_same_symbols();

        for (&left, productions) in &self.rules {
            let mut new_productions: BTreeSet<Production> = BTreeSet::new();
            for production in productions {
                let symbols = match production {
                    Production::Epsilon => continue,
                    Production::Symbols(s) => s,
                };
                let nullable_positions: Vec<usize> = symbols
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| nullable.contains(*s))
                    .map(|(i, _)| i)
                    .collect();

                for removed in nullable_positions.into_iter().powerset() {
                    let variant: Vec<usize> = symbols
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !removed.contains(i))
                        .map(|(_, s)| *s)
                        .collect();
                    if !variant.is_empty() {
                        new_productions.insert(Production::Symbols(variant));
                    }
                }
            }
            g.set_productions(left, new_productions);
        }

        if let Some(start) = self.start_symbol {
            if nullable.contains(&start) {
                g.add_production(start, Production::Epsilon);
            }
        }

        g.prune_dangling();

        log::debug!(
            "epsilon elimination: {} nullable, {} productions remain",
            nullable.len(),
            g.production_count()
        );
        g
    }
}
