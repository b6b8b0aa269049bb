use std::collections::BTreeSet;

use super::{grammar::Production, Grammar};

/// Result of the terminal-prefix substitution.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub grammar: Grammar,
    pub passes: usize,
    /// No production is left starting with an active non-terminal.
    pub converged: bool,
    pub warning: Option<String>,
}

impl Grammar {
    /// Pass limit for [`Grammar::substitute_leading_non_terminals`].
    pub fn substitution_cap(&self) -> usize {
        let n = self.rules.len();
        n * n + n + 5
    }

    /// Some production starts with a non-terminal that has productions.
    pub fn has_leading_non_terminal(&self) -> bool {
        self.rules.values().flatten().any(|p| {
            p.first()
                .map_or(false, |b| self.is_non_terminal(b) && self.is_active(b))
        })
    }

    /// Replaces every `A -> B γ` whose `B` is active with `A -> δ γ` for each
    /// `B -> δ`, until a full pass changes nothing or the pass cap is hit.
    /// `A -> B` with `B -> A ...` is left as it is.
    pub fn substitute_leading_non_terminals(&self) -> Substitution {
        let mut g = self.clone();
        let cap = self.substitution_cap();

        let mut passes = 0;
        let mut changed = true;
        while changed && passes < cap {
            changed = false;
            passes += 1;

            for a in g.non_terminals() {
                let productions = match g.rules.get(&a) {
                    Some(p) => p,
                    None => continue,
                };

                let mut next: BTreeSet<Production> = BTreeSet::new();
                for production in productions {
                    let (b, gamma) = match production.symbols().split_first() {
                        Some((&b, gamma)) if g.is_non_terminal(b) && g.is_active(b) => (b, gamma),
                        _ => {
                            next.insert(production.clone());
                            continue;
                        }
                    };

                    for delta in g.productions_of(b) {
                        // ε of the start symbol was already expanded away
                        if delta.is_epsilon() && gamma.is_empty() {
                            continue;
                        }
                        if delta.first() == Some(a) && gamma.is_empty() {
                            next.insert(production.clone());
                            continue;
                        }
                        let spliced: Vec<usize> =
                            delta.symbols().iter().chain(gamma.iter()).cloned().collect();
                        next.insert(Production::from_symbols(spliced));
                    }
                }

                if &next != productions {
                    log::trace!(
                        "substitution pass {}: {} now has {} productions",
                        passes,
                        g.get_symbol_name(a),
                        next.len()
                    );
                    changed = true;
                    g.set_productions(a, next);
                }
            }
        }

        g.prune_dangling();

        let converged = !g.has_leading_non_terminal();
        let warning = if changed {
            Some(format!("Substitution loop reached max iterations ({}).", cap))
        } else if !converged {
            Some(format!(
                "Substitution stopped after {} passes with productions still led by a non-terminal.",
                passes
            ))
        } else {
            None
        };
        if let Some(w) = &warning {
            log::warn!("{} Keeping partial result.", w);
        }

        log::debug!("substitution finished after {} passes", passes);
        Substitution {
            grammar: g,
            passes,
            converged,
            warning,
        }
    }
}
