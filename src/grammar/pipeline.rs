use std::collections::BTreeSet;

use super::{Grammar, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsed,
    EpsilonEliminated,
    UnitEliminated,
    LeftRecursionEliminated,
    TerminalPrefixed,
    Finalized,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Parsed,
        Stage::EpsilonEliminated,
        Stage::UnitEliminated,
        Stage::LeftRecursionEliminated,
        Stage::TerminalPrefixed,
        Stage::Finalized,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Parsed => "Original Grammar",
            Stage::EpsilonEliminated => "1. After Epsilon Elimination",
            Stage::UnitEliminated => "2. After Unit Production Elimination",
            Stage::LeftRecursionEliminated => "3. After Direct Left Recursion Elimination",
            Stage::TerminalPrefixed => "4. After Substitution to Start Terminals",
            Stage::Finalized => "5. Final GNF Grammar",
        }
    }
}

/// The grammar as it stood after one stage.
#[derive(Debug, Clone)]
pub struct StageSnapshot {
    pub stage: Stage,
    pub grammar: Grammar,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GnfConversion {
    /// Nullable non-terminals of the parsed grammar.
    pub nullable: BTreeSet<usize>,
    pub stages: Vec<StageSnapshot>,
}

impl GnfConversion {
    pub fn snapshot(&self, stage: Stage) -> Option<&StageSnapshot> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn original_grammar(&self) -> &Grammar {
        &self.stages[0].grammar
    }

    pub fn final_grammar(&self) -> &Grammar {
        &self.stages[self.stages.len() - 1].grammar
    }

    pub fn warnings(&self) -> impl Iterator<Item = &String> {
        self.stages.iter().flat_map(|s| s.warnings.iter())
    }
}

impl Grammar {
    /// Runs the whole conversion, keeping every intermediate grammar.
    pub fn to_gnf(&self) -> GnfConversion {
        let nullable = self.nullable_set();

        let mut stages = vec![StageSnapshot {
            stage: Stage::Parsed,
            grammar: self.clone(),
            warnings: Vec::new(),
        }];
        let mut push = |stage: Stage, grammar: Grammar, warnings: Vec<String>| {
            log::debug!(
                "{}: {} non-terminals, {} productions",
                stage.title(),
                grammar.rules.len(),
                grammar.production_count()
            );
            stages.push(StageSnapshot {
                stage,
                grammar,
                warnings,
            });
        };

        let g = self.eliminate_epsilon();
        push(Stage::EpsilonEliminated, g.clone(), Vec::new());

        let g = g.eliminate_unit();
        push(Stage::UnitEliminated, g.clone(), Vec::new());

        let g = g.eliminate_left_recursion();
        push(Stage::LeftRecursionEliminated, g.clone(), Vec::new());

        let substitution = g.substitute_leading_non_terminals();
        let warnings: Vec<String> = substitution.warning.into_iter().collect();
        let g = substitution.grammar;
        push(Stage::TerminalPrefixed, g.clone(), warnings);

        let g = g.finalize_gnf();
        push(Stage::Finalized, g, Vec::new());

        GnfConversion { nullable, stages }
    }
}

pub fn convert_to_gnf(grammar: &str) -> Result<GnfConversion, ParseError> {
    Ok(Grammar::parse(grammar)?.to_gnf())
}
