use std::collections::BTreeSet;

use super::{grammar::Production, Grammar};

impl Grammar {
    fn is_unit(&self, production: &Production) -> bool {
        match production.symbols() {
            [single] => self.is_active(*single),
            _ => false,
        }
    }

    /// Reflexive-transitive closure of "A unit-derives B". The set only
    /// grows and is bounded by `|non-terminals|^2` pairs.
    pub fn unit_pairs(&self) -> BTreeSet<(usize, usize)> {
        let mut pairs: BTreeSet<(usize, usize)> = self.rules.keys().map(|&nt| (nt, nt)).collect();

        for (&left, productions) in &self.rules {
            for production in productions {
                if self.is_unit(production) {
                    pairs.insert((left, production.symbols()[0]));
                }
            }
        }

        loop {
            let composed: Vec<(usize, usize)> = pairs
                .iter()
                .flat_map(|&(a, b)| {
                    pairs
                        .range((b, 0)..=(b, usize::MAX))
                        .map(move |&(_, c)| (a, c))
                })
                .filter(|pair| !pairs.contains(pair))
                .collect();
            if composed.is_empty() {
                break;
            }
            pairs.extend(composed);
        }
        pairs
    }

    /// For every unit pair (A, B) copies the non-unit productions of B into
    /// A. A non-terminal whose unit chains never reach a non-unit production
    /// disappears.
    pub fn eliminate_unit(&self) -> Grammar {
        let pairs = self.unit_pairs();
        let mut g = self.with_same_symbols();

        for &(a, b) in &pairs {
            for production in self.productions_of(b) {
                if self.is_unit(production) {
                    continue;
                }
                // ε stays on the start symbol
                if production.is_epsilon() && a != b {
                    continue;
                }
                log::trace!(
                    "unit pair ({}, {}): copy {:?}",
                    self.get_symbol_name(a),
                    self.get_symbol_name(b),
                    production
                );
                g.add_production(a, production.clone());
            }
        }

        g.prune_dangling();

        log::debug!(
            "unit elimination: {} unit pairs, {} non-terminals remain",
            pairs.len(),
            g.rules.len()
        );
        g
    }
}
