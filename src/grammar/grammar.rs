use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Where a non-terminal came from. Only `Parsed` non-terminals belong to the
/// original non-terminal set; the others are minted by later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    Parsed,
    LeftRecursion,
    TerminalWrapper,
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub origin: Origin,
}

impl NonTerminal {
    pub fn new(index: usize, name: String, origin: Origin) -> Self {
        Self {
            index,
            name,
            origin,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }
}

/// A right-hand side. `Symbols` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Production {
    Epsilon,
    Symbols(Vec<usize>),
}

impl Production {
    /// Builds a production from a symbol list, mapping the empty list to ε.
    pub fn from_symbols(symbols: Vec<usize>) -> Self {
        if symbols.is_empty() {
            Production::Epsilon
        } else {
            Production::Symbols(symbols)
        }
    }

    pub fn symbols(&self) -> &[usize] {
        match self {
            Production::Epsilon => &[],
            Production::Symbols(s) => s.as_slice(),
        }
    }

    pub fn first(&self) -> Option<usize> {
        self.symbols().first().cloned()
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Production::Epsilon)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub rules: BTreeMap<usize, BTreeSet<Production>>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same symbol table and start symbol, no productions.
    pub fn with_same_symbols(&self) -> Self {
        Self {
            symbols: self.symbols.clone(),
            symbol_table: self.symbol_table.clone(),
            rules: BTreeMap::new(),
            start_symbol: self.start_symbol,
        }
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        self.symbols[index].name()
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        matches!(self.symbols[index], Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self, index: usize) -> bool {
        !self.is_terminal(index)
    }

    /// A non-terminal with at least one production.
    pub fn is_active(&self, index: usize) -> bool {
        self.rules.contains_key(&index)
    }

    pub fn start_symbol_name(&self) -> Option<&str> {
        self.start_symbol.map(|idx| self.get_symbol_name(idx))
    }

    pub fn add_non_terminal(&mut self, name: &str, origin: Origin) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::NonTerminal(NonTerminal::new(
            idx,
            name.to_string(),
            origin,
        )));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: usize, right: Production) {
        self.rules.entry(left).or_default().insert(right);
    }

    /// Replaces the productions of `left`; an empty set removes `left` from
    /// the active grammar.
    pub fn set_productions(&mut self, left: usize, productions: BTreeSet<Production>) {
        if productions.is_empty() {
            self.rules.remove(&left);
        } else {
            self.rules.insert(left, productions);
        }
    }

    pub fn productions_of(&self, left: usize) -> impl Iterator<Item = &Production> {
        self.rules.get(&left).into_iter().flatten()
    }

    /// The active non-terminal registry, ordered by name.
    pub fn non_terminals(&self) -> Vec<usize> {
        let mut nts: Vec<usize> = self.rules.keys().cloned().collect();
        nts.sort_by(|a, b| self.get_symbol_name(*a).cmp(self.get_symbol_name(*b)));
        nts
    }

    pub fn non_terminal_names(&self) -> Vec<&str> {
        self.non_terminals()
            .into_iter()
            .map(|idx| self.get_symbol_name(idx))
            .collect()
    }

    /// Terminals referenced by active productions, ordered by name.
    pub fn terminals(&self) -> Vec<&str> {
        let used: BTreeSet<usize> = self
            .rules
            .values()
            .flatten()
            .flat_map(|p| p.symbols().iter().cloned())
            .filter(|idx| self.is_terminal(*idx))
            .collect();
        let mut names: Vec<&str> = used.into_iter().map(|idx| self.get_symbol_name(idx)).collect();
        names.sort();
        names
    }

    /// Every non-terminal fixed at parse time, active or not.
    pub fn original_non_terminals(&self) -> BTreeSet<usize> {
        self.symbols
            .iter()
            .filter_map(|s| s.non_terminal())
            .filter(|nt| nt.origin == Origin::Parsed)
            .map(|nt| nt.index)
            .collect()
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(|p| p.len()).sum()
    }

    pub fn get_symbol_prime_name(&self, mut name: String) -> String {
        while self.symbol_table.contains_key(&name) {
            name.push('\'');
        }
        name
    }

    /// `X_` followed by the upper-cased terminal with every character that
    /// cannot appear in an identifier replaced by `_`. A numeric suffix is
    /// appended while the name is taken.
    pub fn get_wrapper_name(&self, terminal: &str) -> String {
        let mut clean = String::new();
        if terminal.chars().next().map_or(false, |c| c.is_ascii_digit()) {
            clean.push('_');
        }
        clean.extend(terminal.chars().map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        }));
        let base = format!("X_{}", clean.to_uppercase());

        let mut name = base.clone();
        let mut suffix = 1;
        while self.symbol_table.contains_key(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        name
    }

    /// Repeatedly drops productions that mention a non-terminal with no
    /// productions, and the non-terminals left empty by that, until nothing
    /// changes. Each pass either removes a production or stops, so the loop
    /// is bounded by the production count.
    pub fn prune_dangling(&mut self) {
        loop {
            let before = self.production_count();
            let active: BTreeSet<usize> = self.rules.keys().cloned().collect();

            let symbols = &self.symbols;
            for productions in self.rules.values_mut() {
                productions.retain(|p| {
                    p.symbols().iter().all(|s| {
                        matches!(symbols[*s], Symbol::Terminal(_)) || active.contains(s)
                    })
                });
            }
            self.rules.retain(|_, p| !p.is_empty());

            if self.production_count() == before {
                break;
            }
        }
    }

    /// Strict GNF: every production is a terminal followed only by active
    /// non-terminals, and ε appears only on the start symbol.
    pub fn is_gnf(&self) -> bool {
        self.rules.iter().all(|(left, productions)| {
            productions.iter().all(|p| match p {
                Production::Epsilon => Some(*left) == self.start_symbol,
                Production::Symbols(s) => {
                    self.is_terminal(s[0])
                        && s[1..]
                            .iter()
                            .all(|idx| self.is_non_terminal(*idx) && self.is_active(*idx))
                }
            })
        })
    }
}
