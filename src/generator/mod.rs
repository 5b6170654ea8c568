/*
    This module generates random derivations, and with them sentences
*/

use rand::Rng;
use thiserror::Error;

use crate::grammar::*;
use crate::tree::ParseTree;

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    // A nonterminal has neither binary nor terminal rules
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // Recursive grammars can keep expanding for a long time
    #[error("Derivation grew deeper than {0} rules")]
    DepthExceeded(usize)
}

pub type GenResult = Result<ParseTree, GenerateError>;

/// Samples a derivation from the grammar's start symbol, picking uniformly
/// among the alternatives of every nonterminal on the way down.
pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    generate_from(grammar, grammar.start_symbol(), rng, max_depth)
}

// Generates a derivation in the given grammar starting with the given symbol
pub fn generate_from(grammar: &Grammar, start: &str, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    generate_symbol(grammar, start, rng, 1, max_depth)
}

fn generate_symbol(grammar: &Grammar, symbol: &str, rng: &mut impl Rng, depth: usize, max_depth: usize) -> GenResult {
    if depth > max_depth {
        return Err(GenerateError::DepthExceeded(max_depth));
    }

    let count = grammar.expansion_count(symbol);
    if count == 0 {
        return Err(GenerateError::UndefinedNonterminal(symbol.to_string()));
    }

    let binary: &[Expansion] = grammar.rules().get(symbol).map(Vec::as_slice).unwrap_or(&[]);
    let choice = rng.gen_range(0..count);

    match binary.get(choice) {
        Some((left, right)) => Ok(ParseTree::node(
            symbol,
            generate_symbol(grammar, left, rng, depth + 1, max_depth)?,
            generate_symbol(grammar, right, rng, depth + 1, max_depth)?
        )),
        None => {
            let token = &grammar.terminals()[symbol][choice - binary.len()];
            Ok(ParseTree::leaf(symbol, token.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::chart::parse;
    use crate::parser::parse_str;

    fn english() -> Grammar {
        let mut grammar = Grammar::new();
        parse_str(include_str!("../../example_data/english.cnf"), &mut grammar);
        grammar
    }

    #[test]
    fn generate_single_derivation() {
        let mut grammar = Grammar::new();
        grammar.add_rule("S", "NP", "VP");
        grammar.add_terminal("NP", "dog");
        grammar.add_terminal("VP", "barks");

        let mut rng = StdRng::seed_from_u64(7);
        let tree = generate(&grammar, &mut rng, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(tree.to_string(), "[S [NP dog] [VP barks]]");
    }

    #[test]
    fn generate_undefined() {
        let mut grammar = Grammar::new();
        grammar.add_rule("S", "NP", "VP");
        grammar.add_terminal("NP", "dog");

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generate(&grammar, &mut rng, DEFAULT_MAX_DEPTH),
            Err(GenerateError::UndefinedNonterminal("VP".to_string()))
        );
        assert_eq!(
            generate_from(&grammar, "Nothing", &mut rng, DEFAULT_MAX_DEPTH),
            Err(GenerateError::UndefinedNonterminal("Nothing".to_string()))
        );
    }

    #[test]
    fn generate_too_deep() {
        let mut grammar = Grammar::new();
        grammar.add_rule("S", "S", "S");

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(&grammar, &mut rng, 5), Err(GenerateError::DepthExceeded(5)));
    }

    #[test]
    fn generate_override_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let tree = generate_from(&english(), "PP", &mut rng, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(tree.symbol(), "PP");
    }

    #[test]
    fn generated_derivations_are_parsed_back() {
        let grammar = english();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut generated = 0;

        for _ in 0..50 {
            match generate(&grammar, &mut rng, 8) {
                Ok(tree) => {
                    assert!(tree.depth() <= 8);
                    assert!(parse(&grammar, &tree.leaves()).contains(&tree));
                    generated += 1;
                }
                Err(e) => assert_eq!(e, GenerateError::DepthExceeded(8))
            }
        }
        assert!(generated > 0);
    }
}
