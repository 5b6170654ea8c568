/*
    This module is for storing and looking up CNF grammars
*/

use std::collections::HashMap;

pub const DEFAULT_START_SYMBOL: &str = "S";

// The two nonterminals on the right of a binary rule
pub type Expansion = (String, String);

// The binary alternatives of a single nonterminal
pub type Expansions = Vec<Expansion>;

// Maps a right hand side (left child, then right child) to the rules producing it
type PairIndex = HashMap<String, HashMap<String, Vec<String>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    start_symbol: String,
    rules: HashMap<String, Expansions>,
    terminals: HashMap<String, Vec<String>>,
    by_pair: PairIndex,
    by_terminal: HashMap<String, Vec<String>>
}

// Push `name` unless it is already listed, keeping first insertion order
fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::with_start_symbol(DEFAULT_START_SYMBOL)
    }
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn with_start_symbol(start_symbol: impl Into<String>) -> Self {
        Grammar {
            start_symbol: start_symbol.into(),
            rules: HashMap::new(),
            terminals: HashMap::new(),
            by_pair: HashMap::new(),
            by_terminal: HashMap::new()
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn set_start_symbol(&mut self, start_symbol: impl Into<String>) {
        self.start_symbol = start_symbol.into();
    }

    /// Binary rules, keyed by their left hand side.
    pub fn rules(&self) -> &HashMap<String, Expansions> {
        &self.rules
    }

    /// Terminal rules, keyed by their left hand side.
    pub fn terminals(&self) -> &HashMap<String, Vec<String>> {
        &self.terminals
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.terminals.is_empty()
    }

    /// Registers `name -> left right`. Duplicates are kept in `rules` but
    /// never listed twice in the lookup index, so they cannot duplicate a parse.
    pub fn add_rule(&mut self, name: &str, left: &str, right: &str) {
        self.rules
            .entry(name.to_string())
            .or_default()
            .push((left.to_string(), right.to_string()));

        let names = self.by_pair
            .entry(left.to_string())
            .or_default()
            .entry(right.to_string())
            .or_default();
        push_unique(names, name);
    }

    /// Registers `name -> token`.
    pub fn add_terminal(&mut self, name: &str, token: &str) {
        self.terminals
            .entry(name.to_string())
            .or_default()
            .push(token.to_string());

        let names = self.by_terminal.entry(token.to_string()).or_default();
        push_unique(names, name);
    }

    /// Every rule name whose binary alternatives include `left right`.
    pub fn rules_for_pair(&self, left: &str, right: &str) -> &[String] {
        self.by_pair
            .get(left)
            .and_then(|rights| rights.get(right))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every rule name that rewrites directly to `token`.
    pub fn rules_for_terminal(&self, token: &str) -> &[String] {
        self.by_terminal.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    // Number of alternatives `symbol` can expand to
    pub(crate) fn expansion_count(&self, symbol: &str) -> usize {
        self.rules.get(symbol).map_or(0, Vec::len) + self.terminals.get(symbol).map_or(0, Vec::len)
    }
}
