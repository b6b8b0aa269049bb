use std::collections::BTreeSet;

use super::{
    grammar::{Origin, Production},
    Grammar,
};

impl Grammar {
    /// Removes direct left recursion from every non-terminal, in registry
    /// order. Later non-terminals see the rewrites made for earlier ones.
    pub fn eliminate_left_recursion(&self) -> Grammar {
        let mut g = self.clone();
        let mut introduced = Vec::new();

        for nt in self.non_terminals() {
            if !g.is_active(nt) {
                continue;
            }
            if let Some(prime) = g.eliminate_direct_left_recursion(nt) {
                introduced.push(prime);
            }
        }

        g.prune_dangling();

        log::debug!(
            "left recursion elimination: introduced {:?}",
            introduced
                .iter()
                .map(|idx| g.get_symbol_name(*idx))
                .collect::<Vec<_>>()
        );
        g
    }

    /// Rewrites `A -> A α | β` into `A -> β | β A'` and `A' -> α | α A'`.
    /// Returns the new non-terminal, or `None` when nothing was introduced.
    /// A non-terminal with only left-recursive productions cannot derive a
    /// finite string and is removed.
    pub fn eliminate_direct_left_recursion(&mut self, nt: usize) -> Option<usize> {
        let productions = self.rules.get(&nt)?;

        let mut alphas: Vec<Vec<usize>> = Vec::new();
        let mut betas: Vec<Production> = Vec::new();
        for production in productions {
            match production.symbols().split_first() {
                Some((&first, alpha)) if first == nt => {
                    if !alpha.is_empty() {
                        alphas.push(alpha.to_vec());
                    }
                }
                _ => betas.push(production.clone()),
            }
        }

        if alphas.is_empty() {
            return None;
        }
        if betas.is_empty() {
            log::debug!(
                "{} is only left-recursive, removing it",
                self.get_symbol_name(nt)
            );
            self.rules.remove(&nt);
            return None;
        }

        let prime_name = self.get_symbol_prime_name(self.get_symbol_name(nt).to_string() + "'");
        let prime = self.add_non_terminal(&prime_name, Origin::LeftRecursion);

        let mut new_productions: BTreeSet<Production> = BTreeSet::new();
        for beta in betas {
            let mut with_prime = beta.symbols().to_vec();
            with_prime.push(prime);
            new_productions.insert(beta);
            new_productions.insert(Production::Symbols(with_prime));
        }

        let mut prime_productions: BTreeSet<Production> = BTreeSet::new();
        for alpha in alphas {
            let mut with_prime = alpha.clone();
            with_prime.push(prime);
            prime_productions.insert(Production::Symbols(alpha));
            prime_productions.insert(Production::Symbols(with_prime));
        }

        self.set_productions(nt, new_productions);
        self.set_productions(prime, prime_productions);
        Some(prime)
    }
}

#[cfg(test)]
mod tests {
    use crate::Grammar;
    use pretty_assertions::assert_eq;

    #[test]
    fn expression() {
        let mut g = Grammar::parse("E -> E + T | T\nT ->").unwrap();
        let e = g.get_symbol_index("E").unwrap();
        let prime = g.eliminate_direct_left_recursion(e).unwrap();
        assert_eq!(g.get_symbol_name(prime), "E'");
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            " E -> T\n    | T E'\nE' -> + T\n    | + T E'"
        );
    }

    #[test]
    fn no_recursion_no_change() {
        let mut g = Grammar::parse("S -> a S | b").unwrap();
        let s = g.get_symbol_index("S").unwrap();
        assert_eq!(g.eliminate_direct_left_recursion(s), None);
        assert_eq!(g.to_production_output_vec().to_plaintext(), "S -> a S\n   | b");
    }

    #[test]
    fn recursion_without_escape_removes_non_terminal() {
        let g = Grammar::parse("S -> A | s\nA -> A a")
            .unwrap()
            .eliminate_left_recursion();
        assert_eq!(g.non_terminal_names(), vec!["S"]);
        assert_eq!(g.to_production_output_vec().to_plaintext(), "S -> s");
    }

    #[test]
    fn prime_name_avoids_existing_symbols() {
        let g = Grammar::parse("A -> A x | A'\nA' -> y")
            .unwrap()
            .eliminate_left_recursion();
        assert_eq!(g.non_terminal_names(), vec!["A", "A'", "A''"]);
    }

    #[test]
    fn epsilon_beta_keeps_epsilon_and_prime() {
        let g = Grammar::parse("S -> S a | eps").unwrap().eliminate_left_recursion();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            " S -> S'\n    | ε\nS' -> a\n    | a S'"
        );
    }
}
