/*
    This module parses sentences with the Cocke-Kasami-Younger algorithm

    The chart stores every way each span of the sentence can be derived. An
    entry only remembers which rule it came from and where its children live
    in shorter spans, so trees are only built for complete parses.
*/

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::grammar::Grammar;
use crate::tree::ParseTree;

/// Limit on the work a single parse may do, counted in chart entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    #[default]
    Unlimited,
    Entries(usize)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    // Not a statement about the sentence, only about how much work it took
    #[error("gave up after creating {limit} chart entries")]
    BudgetExceeded { limit: usize }
}

pub type ParseResult = Result<Vec<ParseTree>, ParseError>;

#[derive(Debug)]
enum Derivation {
    // Position of the token in the sentence
    Token(usize),
    // Children are entries of the cells [i, split) and [split, j)
    Split {
        split: usize,
        left: usize,
        right: usize
    }
}

#[derive(Debug)]
struct Entry<'g> {
    symbol: &'g str,
    derivation: Derivation
}

type Cell<'g> = Vec<Entry<'g>>;

// Upper triangle of an (n+1) x (n+1) grid, one cell per span [i, j) with i < j
struct Chart<'g> {
    len: usize,
    cells: Vec<Cell<'g>>,
    created: usize,
    budget: Budget
}

impl<'g> Chart<'g> {
    fn new(len: usize, budget: Budget) -> Self {
        let mut cells = Vec::new();
        cells.resize_with(len * (len + 1) / 2, Vec::new);

        Chart {
            len,
            cells,
            created: 0,
            budget
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j <= self.len);
        // Row i starts after the rows for every shorter start position
        i * self.len - i * i.saturating_sub(1) / 2 + (j - i - 1)
    }

    fn cell(&self, i: usize, j: usize) -> &Cell<'g> {
        &self.cells[self.index(i, j)]
    }

    fn charge(&mut self, entries: usize) -> Result<(), ParseError> {
        self.created += entries;
        match self.budget {
            Budget::Entries(limit) if self.created > limit => Err(ParseError::BudgetExceeded { limit }),
            _ => Ok(())
        }
    }

    // Whether holding `pending` more entries would go over the budget
    fn exceeds(&self, pending: usize) -> bool {
        match self.budget {
            Budget::Entries(limit) => self.created + pending > limit,
            Budget::Unlimited => false
        }
    }

    fn store(&mut self, i: usize, j: usize, cell: Cell<'g>) -> Result<(), ParseError> {
        self.charge(cell.len())?;
        trace!(i, j, entries = cell.len(), "filled cell");
        let index = self.index(i, j);
        self.cells[index] = cell;
        Ok(())
    }

    fn tree<S: AsRef<str>>(&self, tokens: &[S], i: usize, j: usize, entry: usize) -> ParseTree {
        let Entry { symbol, derivation } = &self.cell(i, j)[entry];
        match *derivation {
            Derivation::Token(position) => ParseTree::leaf(*symbol, tokens[position].as_ref()),
            Derivation::Split { split, left, right } => ParseTree::node(
                *symbol,
                self.tree(tokens, i, split, left),
                self.tree(tokens, split, j, right)
            )
        }
    }
}

pub struct Parser<'g> {
    grammar: &'g Grammar,
    budget: Budget
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Parser {
            grammar,
            budget: Budget::Unlimited
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Every derivation of `tokens` from the start symbol. An empty result
    /// means the sentence is not in the language, including when a token is
    /// unknown to the grammar or there are no tokens at all.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut chart = Chart::new(tokens.len(), self.budget);
        if !self.fill_tokens(&mut chart, tokens)? {
            return Ok(Vec::new());
        }
        self.fill_spans(&mut chart)?;

        let n = tokens.len();
        let start = self.grammar.start_symbol();
        let parses = chart.cell(0, n)
            .iter()
            .positions(|entry| entry.symbol == start)
            .map(|entry| chart.tree(tokens, 0, n, entry))
            .collect_vec();

        debug!(tokens = n, entries = chart.created, parses = parses.len(), "parsed sentence");
        Ok(parses)
    }

    // Spans of length one. Returns false if some token has no terminal rule.
    fn fill_tokens<S: AsRef<str>>(&self, chart: &mut Chart<'g>, tokens: &[S]) -> Result<bool, ParseError> {
        for (position, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            let names = self.grammar.rules_for_terminal(token);
            if names.is_empty() {
                debug!(token, position, "token is not in the lexicon");
                return Ok(false);
            }

            let mut cell = Cell::new();
            for name in names {
                cell.push(Entry {
                    symbol: name.as_str(),
                    derivation: Derivation::Token(position)
                });
                // The entry just pushed is the one over the limit
                if chart.exceeds(cell.len()) {
                    break;
                }
            }
            chart.store(position, position + 1, cell)?;
        }
        Ok(true)
    }

    // Longer spans, shortest first, so both halves of every split are final
    fn fill_spans(&self, chart: &mut Chart<'g>) -> Result<(), ParseError> {
        let n = chart.len;
        for len in 2..=n {
            for i in 0..=(n - len) {
                let j = i + len;
                let mut cell = Cell::new();

                'splits: for split in (i + 1)..j {
                    let lefts = chart.cell(i, split).iter().enumerate();
                    let rights = chart.cell(split, j).iter().enumerate();

                    for ((left, l), (right, r)) in lefts.cartesian_product(rights) {
                        for name in self.grammar.rules_for_pair(l.symbol, r.symbol) {
                            cell.push(Entry {
                                symbol: name.as_str(),
                                derivation: Derivation::Split { split, left, right }
                            });
                            // Storing the cell reports the overrun
                            if chart.exceeds(cell.len()) {
                                break 'splits;
                            }
                        }
                    }
                }

                chart.store(i, j, cell)?;
            }
        }
        Ok(())
    }
}

/// Parses without a work budget.
pub fn parse<S: AsRef<str>>(grammar: &Grammar, tokens: &[S]) -> Vec<ParseTree> {
    match Parser::new(grammar).parse(tokens) {
        Ok(parses) => parses,
        Err(e) => unreachable!("an unlimited budget never runs out: {}", e)
    }
}
