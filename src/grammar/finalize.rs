use std::collections::{BTreeMap, BTreeSet};

use super::{
    grammar::{Origin, Production},
    Grammar,
};

impl Grammar {
    /// Replaces every terminal after the first symbol with a wrapper
    /// non-terminal `X_<T> -> t`, one wrapper per distinct terminal.
    pub fn finalize_gnf(&self) -> Grammar {
        let mut g = self.with_same_symbols();
        let mut wrappers: BTreeMap<usize, usize> = BTreeMap::new();

        for (&left, productions) in &self.rules {
            let mut new_productions: BTreeSet<Production> = BTreeSet::new();
            for production in productions {
                let symbols = match production {
                    Production::Epsilon => {
                        new_productions.insert(Production::Epsilon);
                        continue;
                    }
                    Production::Symbols(s) => s,
                };
                if !self.is_terminal(symbols[0]) {
                    log::debug!(
                        "{} -> {:?} does not start with a terminal, keeping it",
                        self.get_symbol_name(left),
                        production
                    );
                    new_productions.insert(production.clone());
                    continue;
                }

                let mut rewritten = vec![symbols[0]];
                for &symbol in &symbols[1..] {
                    if g.is_terminal(symbol) {
                        let wrapper = match wrappers.get(&symbol) {
                            Some(&w) => w,
                            None => {
                                let name = g.get_wrapper_name(g.get_symbol_name(symbol));
                                let w = g.add_non_terminal(&name, Origin::TerminalWrapper);
                                wrappers.insert(symbol, w);
                                w
                            }
                        };
                        rewritten.push(wrapper);
                    } else {
                        rewritten.push(symbol);
                    }
                }
                new_productions.insert(Production::Symbols(rewritten));
            }
            g.set_productions(left, new_productions);
        }

        for (&terminal, &wrapper) in &wrappers {
            g.add_production(wrapper, Production::Symbols(vec![terminal]));
        }

        log::debug!("finalization: {} terminal wrappers", wrappers.len());
        g
    }
}
