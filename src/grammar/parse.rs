use crate::Grammar;

use super::{
    grammar::{Origin, Production},
    ParseError, EPSILON_LITERALS,
};

fn is_epsilon_literal(s: &str) -> bool {
    let lower = s.to_lowercase();
    EPSILON_LITERALS.contains(&lower.as_str())
}

impl Grammar {
    /// Parses `LHS -> alt1 | alt2 | ...` lines. A symbol is a terminal iff it
    /// never appears as a left-hand side. The start symbol is the left-hand
    /// side of the first rule.
    pub fn parse(grammar: &str) -> Result<Self, ParseError> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str)> = Vec::new();

        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let (left_str, rights) = match line.split_once("->") {
                Some(parts) => parts,
                None => return Err(ParseError::MissingArrow { line: i + 1 }),
            };
            let left_str = left_str.trim();
            if left_str.is_empty() {
                return Err(ParseError::EmptyLeftSide { line: i + 1 });
            }

            let left = if let Some(idx) = g.get_symbol_index(left_str) {
                idx
            } else {
                g.add_non_terminal(left_str, Origin::Parsed)
            };
            if g.start_symbol.is_none() {
                g.start_symbol = Some(left);
            }

            raw_productions.push((left, rights));
        }

        if raw_productions.is_empty() {
            return Err(ParseError::Empty);
        }

        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let right = right.trim();
                if right.is_empty() {
                    continue;
                }
                if is_epsilon_literal(right) {
                    g.add_production(left, Production::Epsilon);
                    continue;
                }

                let symbols: Vec<usize> = right
                    .split_whitespace()
                    .filter(|s| !is_epsilon_literal(s))
                    .map(|s| {
                        if let Some(idx) = g.get_symbol_index(s) {
                            idx
                        } else {
                            g.add_terminal(s.to_string())
                        }
                    })
                    .collect();
                g.add_production(left, Production::from_symbols(symbols));
            }
        }

        if g.rules.is_empty() {
            return Err(ParseError::NoRules);
        }

        log::debug!(
            "parsed {} productions over {} non-terminals",
            g.production_count(),
            g.rules.len()
        );

        Ok(g)
    }
}
