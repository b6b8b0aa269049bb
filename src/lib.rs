extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod automata;
pub mod grammar;
pub use automata::{Dfa101, Recognizer, TuringMachine};
pub use grammar::pipeline::{convert_to_gnf, GnfConversion, Stage};
pub use grammar::{Grammar, ParseError};

#[wasm_bindgen]
pub fn gnf_conversion_to_json(grammar: &str) -> String {
    match convert_to_gnf(grammar) {
        Ok(conversion) => conversion.to_conversion_output(false).to_json(),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}

#[wasm_bindgen]
pub fn dfa_101_accepts(input: &str) -> bool {
    Dfa101.accepts(input)
}

#[wasm_bindgen]
pub fn tm_divisible_by_three_accepts(input: &str) -> bool {
    TuringMachine::divisible_by_three().accepts(input)
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::grammar::Production;
    use crate::{Grammar, ParseError};
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("S -> a S | b").unwrap();

        let s = g.get_symbol_index("S").unwrap();
        let a = g.get_symbol_index("a").unwrap();
        let b = g.get_symbol_index("b").unwrap();

        assert_eq!(g.start_symbol, Some(s));
        assert_eq!(g.non_terminal_names(), vec!["S"]);
        assert_eq!(g.terminals(), vec!["a", "b"]);
        assert!(g.is_terminal(a));
        assert_eq!(
            g.productions_of(s).cloned().collect::<Vec<_>>(),
            vec![Production::Symbols(vec![a, s]), Production::Symbols(vec![b])]
        );
    }

    #[test]
    fn epsilon_literals() {
        for text in ["S -> a | epsilon", "S -> a | EPS", "S -> a | ε", "S -> a | Epsilon"] {
            let g = Grammar::parse(text).unwrap();
            let s = g.start_symbol.unwrap();
            assert!(g.productions_of(s).any(|p| p.is_epsilon()), "{}", text);
            assert_eq!(g.terminals(), vec!["a"]);
        }
    }

    #[test]
    fn multiple_rules() {
        let g = Grammar::parse(
            "
            S -> A B | C
            A -> a
            B -> b
            C -> c C | epsilon
            ",
        )
        .unwrap();
        assert_eq!(g.start_symbol_name(), Some("S"));
        assert_eq!(g.non_terminal_names(), vec!["A", "B", "C", "S"]);
        assert_eq!(g.terminals(), vec!["a", "b", "c"]);
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "A -> a\nB -> b\nC -> c C\n   | ε\nS -> A B\n   | C"
        );
    }

    #[test]
    fn terminal_iff_never_a_left_side() {
        let g = Grammar::parse("S -> x T\nT -> S y").unwrap();
        for (name, terminal) in [("S", false), ("T", false), ("x", true), ("y", true)] {
            let idx = g.get_symbol_index(name).unwrap();
            assert_eq!(g.is_terminal(idx), terminal, "{}", name);
        }
    }

    #[test]
    fn second_arrow_is_a_symbol() {
        let g = Grammar::parse("S -> a S b -> c").unwrap();
        assert_eq!(g.to_production_output_vec().to_plaintext(), "S -> a S b -> c");
    }

    #[test]
    fn rules_without_productions_are_dropped() {
        let g = Grammar::parse("S -> a B\nB ->").unwrap();
        assert_eq!(g.non_terminal_names(), vec!["S"]);
        assert_eq!(g.original_non_terminals().len(), 2);
        let b = g.get_symbol_index("B").unwrap();
        assert!(g.is_non_terminal(b));
    }

    #[test]
    fn start_symbol_survives_pruning() {
        let g = Grammar::parse("S ->\nA -> a").unwrap();
        assert_eq!(g.start_symbol_name(), Some("S"));
        assert_eq!(g.non_terminal_names(), vec!["A"]);
    }

    #[test]
    fn every_registered_non_terminal_has_productions() {
        let g = Grammar::parse("S -> A | s\nA ->\nB -> | |\nC -> c").unwrap();
        for nt in g.non_terminals() {
            assert!(g.productions_of(nt).next().is_some());
        }
        assert_eq!(g.non_terminal_names(), vec!["C", "S"]);
    }

    #[test]
    fn empty_parse() {
        assert_eq!(Grammar::parse("").unwrap_err(), ParseError::Empty);
        assert_eq!(Grammar::parse("  \n  ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn missing_arrow() {
        assert_eq!(
            Grammar::parse("S -> a\n\nS a b").unwrap_err(),
            ParseError::MissingArrow { line: 3 }
        );
    }

    #[test]
    fn no_left_parse() {
        assert_eq!(
            Grammar::parse("-> a").unwrap_err(),
            ParseError::EmptyLeftSide { line: 1 }
        );
    }

    #[test]
    fn left_side_is_taken_whole() {
        let g = Grammar::parse("S a S -> x").unwrap();
        let left = g.get_symbol_index("S a S").unwrap();
        assert_eq!(g.start_symbol, Some(left));
        assert_eq!(g.non_terminal_names(), vec!["S a S"]);
        assert_eq!(g.terminals(), vec!["x"]);
    }

    #[test]
    fn no_rules() {
        assert_eq!(Grammar::parse("S ->").unwrap_err(), ParseError::NoRules);
    }
}

#[cfg(test)]
mod gnf_tests {
    use std::collections::BTreeSet;

    use crate::grammar::grammar::Production;
    use crate::{convert_to_gnf, Grammar, Stage};

    const EXAMPLE_1: &str = "
        S -> A B | a
        A -> b S | c
        B -> S a | epsilon
    ";

    fn assert_strict_gnf(text: &str) {
        let conversion = convert_to_gnf(text).unwrap();
        let original = conversion.original_grammar();
        let terminals: BTreeSet<&str> = original.terminals().into_iter().collect();
        let g = conversion.final_grammar();
        let registry: BTreeSet<usize> = g.non_terminals().into_iter().collect();

        assert!(g.is_gnf(), "{}", g.to_production_output_vec().to_plaintext());
        for (&left, productions) in &g.rules {
            for production in productions {
                match production {
                    Production::Epsilon => assert_eq!(Some(left), g.start_symbol),
                    Production::Symbols(s) => {
                        assert!(terminals.contains(g.get_symbol_name(s[0])));
                        assert!(s[1..].iter().all(|idx| registry.contains(idx)));
                    }
                }
            }
        }
    }

    #[test]
    fn example_1_is_strict_gnf() {
        assert_strict_gnf(EXAMPLE_1);
    }

    #[test]
    fn example_1_keeps_start_epsilon_out() {
        // B is nullable, S is not
        let conversion = convert_to_gnf(EXAMPLE_1).unwrap();
        let g = conversion.final_grammar();
        assert!(g.rules.values().flatten().all(|p| !p.is_epsilon()));
    }

    #[test]
    fn expression_grammar_is_strict_gnf() {
        assert_strict_gnf("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id");
    }

    #[test]
    fn nullable_sequences() {
        let text = "
            S -> A a A | B b B | epsilon
            A -> epsilon
            B -> epsilon
            C -> A B
            D -> C c
            E -> D
            F -> f
        ";
        assert_strict_gnf(text);
        let conversion = convert_to_gnf(text).unwrap();
        let g = conversion.final_grammar();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "D -> c\nE -> c\nF -> f\nS -> a\n   | b\n   | ε"
        );
    }

    #[test]
    fn unit_cycles() {
        assert_strict_gnf("S -> A | B | c\nA -> B | a\nB -> S | b");
    }

    #[test]
    fn every_stage_is_recorded() {
        let conversion = convert_to_gnf(EXAMPLE_1).unwrap();
        let stages: Vec<Stage> = conversion.stages.iter().map(|s| s.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        for snapshot in &conversion.stages {
            for nt in snapshot.grammar.non_terminals() {
                assert!(snapshot.grammar.productions_of(nt).next().is_some());
            }
        }
        let prefixed = conversion.snapshot(Stage::TerminalPrefixed).unwrap();
        assert!(prefixed.warnings.is_empty());
    }

    #[test]
    fn non_convergence_is_a_warning() {
        let conversion = convert_to_gnf("A -> B x | a\nB -> A y | b").unwrap();
        assert_eq!(conversion.warnings().count(), 1);
        assert_eq!(conversion.stages.len(), 6);
        assert!(!conversion.final_grammar().is_gnf());
    }

    #[test]
    fn wrappers_bottom_out_in_one_terminal() {
        let conversion = convert_to_gnf(EXAMPLE_1).unwrap();
        let g = conversion.final_grammar();
        let start = g.start_symbol.unwrap();
        for production in g.rules.values().flatten() {
            for &nt in production.symbols().iter().skip(1) {
                if nt == start {
                    continue;
                }
                let expansions: Vec<&Production> = g.productions_of(nt).collect();
                assert!(!expansions.is_empty());
                for expansion in expansions {
                    assert!(g.is_terminal(expansion.symbols()[0]));
                }
            }
        }
        for nt in g.non_terminals() {
            if g.get_symbol_name(nt).starts_with("X_") {
                let only: Vec<&Production> = g.productions_of(nt).collect();
                assert_eq!(only.len(), 1);
                assert_eq!(only[0].symbols().len(), 1);
                assert!(g.is_terminal(only[0].symbols()[0]));
            }
        }
    }

    #[test]
    fn to_gnf_matches_convert() {
        let g = Grammar::parse(EXAMPLE_1).unwrap();
        let a = g.to_gnf();
        let b = convert_to_gnf(EXAMPLE_1).unwrap();
        assert_eq!(
            a.final_grammar().to_production_output_vec().to_plaintext(),
            b.final_grammar().to_production_output_vec().to_plaintext()
        );
    }

    #[test]
    fn wasm_json_reports_parse_errors() {
        assert_eq!(
            crate::gnf_conversion_to_json("S a"),
            "{\"error\":\"Line 1: missing \\\"->\\\"\"}"
        );
    }

    #[test]
    fn wasm_json_error_is_valid_json() {
        let json: serde_json::Value =
            serde_json::from_str(&crate::gnf_conversion_to_json("S a\\b")).unwrap();
        assert_eq!(json["error"], "Line 1: missing \"->\"");
    }
}
