use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    grammar::Production,
    pipeline::{GnfConversion, StageSnapshot},
    Grammar, EPSILON,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    /// One line per alternative, continuation lines aligned under the arrow.
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A row of the `array` environment built by [`ProductionOutputVec::to_latex`].
    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn production_to_vec_str(&self, production: &Production) -> Vec<&str> {
        match production {
            Production::Epsilon => vec![EPSILON],
            Production::Symbols(s) => s.iter().map(|idx| self.get_symbol_name(*idx)).collect(),
        }
    }

    /// Non-terminals in registry order, productions sorted by their text with
    /// ε last.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for left in self.non_terminals() {
            let mut sorted: Vec<(bool, String, Vec<&str>)> = self
                .productions_of(left)
                .map(|p| {
                    let right = self.production_to_vec_str(p);
                    (p.is_epsilon(), right.join(" "), right)
                })
                .collect();
            sorted.sort();
            productions.push(ProductionOutput {
                left: self.get_symbol_name(left),
                rights: sorted.into_iter().map(|(_, _, right)| right).collect(),
            });
        }
        ProductionOutputVec { productions }
    }
}

#[derive(Serialize)]
pub struct StageOutput<'a> {
    title: &'a str,
    productions: ProductionOutputVec<'a>,
    non_terminals: Vec<&'a str>,
    warnings: &'a [String],
}

impl StageOutput<'_> {
    fn to_plaintext(&self) -> String {
        let mut lines = vec![format!("=== {} ===", self.title)];
        if self.productions.is_empty() {
            lines.push("(Grammar is empty)".to_string());
        } else {
            lines.push(self.productions.to_plaintext());
        }
        lines.push(format!("Non-Terminals: {}", self.non_terminals.join(", ")));
        lines.extend(self.warnings.iter().map(|w| format!("Warning: {}", w)));
        lines.join("\n")
    }

    fn to_latex(&self) -> String {
        let mut output = format!("\\paragraph{{{}}}\n", escape::tex(self.title));
        if !self.productions.is_empty() {
            output.push_str(&self.productions.to_latex());
        }
        for w in self.warnings {
            output.push_str(&format!("\n\\textit{{Warning: {}}}", escape::tex(w.as_str())));
        }
        output
    }
}

impl StageSnapshot {
    pub fn to_stage_output(&self) -> StageOutput {
        StageOutput {
            title: self.stage.title(),
            productions: self.grammar.to_production_output_vec(),
            non_terminals: self.grammar.non_terminal_names(),
            warnings: &self.warnings,
        }
    }
}

#[derive(Serialize)]
pub struct ConversionOutput<'a> {
    start_symbol: Option<&'a str>,
    terminals: Vec<&'a str>,
    nullable: Vec<&'a str>,
    stages: Vec<StageOutput<'a>>,
    is_gnf: bool,
}

impl ConversionOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let nullable = if self.nullable.is_empty() {
            "None".to_string()
        } else {
            self.nullable.join(", ")
        };
        let mut blocks: Vec<String> = Vec::new();
        for (i, stage) in self.stages.iter().enumerate() {
            blocks.push(stage.to_plaintext());
            if i == 0 {
                blocks.push(format!(
                    "Start Symbol: {}\nTerminals: {}\nNullable Set: {}",
                    self.start_symbol.unwrap_or("-"),
                    self.terminals.join(", "),
                    nullable
                ));
            }
        }
        blocks.join("\n")
    }

    pub fn to_latex(&self) -> String {
        self.stages
            .iter()
            .map(|s| s.to_latex())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

impl GnfConversion {
    /// Every stage, or only the last one when `final_only` is set.
    pub fn to_conversion_output(&self, final_only: bool) -> ConversionOutput {
        let original = self.original_grammar();
        let mut nullable: Vec<&str> = self
            .nullable
            .iter()
            .map(|idx| original.get_symbol_name(*idx))
            .collect();
        nullable.sort();

        let stages = if final_only {
            &self.stages[self.stages.len() - 1..]
        } else {
            &self.stages[..]
        };

        ConversionOutput {
            start_symbol: original.start_symbol_name(),
            terminals: original.terminals(),
            nullable,
            stages: stages.iter().map(|s| s.to_stage_output()).collect(),
            is_gnf: self.final_grammar().is_gnf(),
        }
    }
}
