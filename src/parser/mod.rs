/*
    This module reads CNF grammar files

    Every line is split on whitespace. Four tokens (`A -> B C`) make a binary
    rule, three tokens (`A -> t`) make a terminal rule, and any other line is
    skipped.
*/

mod lexer;

use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;

#[derive(Debug, thiserror::Error)]
pub enum LoadErrorType {
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error)
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) => a.kind() == b.kind()
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;

fn io_error(error: std::io::Error, location: Location) -> LoadError {
    LoadError {
        location,
        error: LoadErrorType::FileError(error)
    }
}

// What a single line contributed to the grammar
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum LineKind {
    Rule,
    Terminal,
    Ignored
}

pub fn parse_line(grammar: &mut Grammar, line: &str) -> LineKind {
    match classify(&lex_line(line)) {
        Line::Rule { name, left, right } => {
            grammar.add_rule(name, left, right);
            LineKind::Rule
        }
        Line::Terminal { name, token } => {
            grammar.add_terminal(name, token);
            LineKind::Terminal
        }
        Line::Ignored { tokens } => {
            if tokens > 0 {
                debug!(tokens, line, "skipping line that is neither a rule nor a terminal");
            }
            LineKind::Ignored
        }
    }
}

/// Adds every line of `source` to `grammar`.
pub fn parse_str(source: &str, grammar: &mut Grammar) {
    for line in source.lines() {
        parse_line(grammar, line);
    }
}

/// Adds every line read from `reader` to `grammar`. Read failures are
/// reported at the line they happened on.
pub fn parse_reader(reader: impl BufRead, grammar: &mut Grammar, location: &Location) -> LoadResult<()> {
    for (num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| io_error(e, location.at_line(num + 1)))?;
        parse_line(grammar, &line);
    }
    Ok(())
}

pub fn parse_file(path: &Path) -> LoadResult<Grammar> {
    let location = Location::whole_file(path);
    let file = File::open(path).map_err(|e| io_error(e, location.clone()))?;

    let mut grammar = Grammar::new();
    parse_reader(std::io::BufReader::new(file), &mut grammar, &location)?;

    debug!(
        path = %path.display(),
        rules = grammar.rules().len(),
        terminals = grammar.terminals().len(),
        "loaded grammar"
    );
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use std::io::{ErrorKind, Read};
    use std::path::PathBuf;

    use super::*;

    fn pair(left: &str, right: &str) -> Expansion {
        (left.to_string(), right.to_string())
    }

    // Reads a few good lines, then fails
    struct FailingReader {
        data: &'static [u8]
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.data.is_empty() {
                return Err(std::io::Error::new(ErrorKind::InvalidData, "disk on fire"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn parse_normal_line() {
        let mut grammar = Grammar::new();
        assert_eq!(parse_line(&mut grammar, "S -> NP VP"), LineKind::Rule);
        assert_eq!(parse_line(&mut grammar, "NP -> dog"), LineKind::Terminal);

        assert_eq!(grammar.rules()["S"], vec![pair("NP", "VP")]);
        assert_eq!(grammar.terminals()["NP"], vec!["dog".to_string()]);
    }

    #[test]
    fn parse_malformed_line() {
        let mut grammar = Grammar::new();
        assert_eq!(parse_line(&mut grammar, ""), LineKind::Ignored);
        assert_eq!(parse_line(&mut grammar, "S"), LineKind::Ignored);
        assert_eq!(parse_line(&mut grammar, "S -> A B C"), LineKind::Ignored);
        assert!(grammar.is_empty());
    }

    #[test]
    fn parse_source_string() {
        let mut grammar = Grammar::new();
        parse_str("S -> NP VP\n\nNP -> dog\nVP -> barks\nVP -> runs\n", &mut grammar);

        assert_eq!(grammar.rules().len(), 1);
        assert_eq!(grammar.terminals()["VP"], vec!["barks".to_string(), "runs".to_string()]);
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/english.cnf");
        let grammar = parse_file(&example_path).unwrap();

        assert_eq!(grammar.start_symbol(), "S");
        assert_eq!(grammar.rules()["S"], vec![pair("NP", "VP")]);
        assert_eq!(grammar.rules()["VP"], vec![pair("V", "NP"), pair("VP", "PP")]);
        assert_eq!(grammar.rules()["NP"], vec![pair("Det", "N"), pair("NP", "PP")]);
        assert_eq!(grammar.rules()["PP"], vec![pair("P", "NP")]);
        assert_eq!(grammar.terminals()["Det"], vec!["the".to_string(), "a".to_string()]);
        assert_eq!(grammar.rules_for_terminal("saw"), ["V", "N"]);
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cnf");
        let grammar = parse_file(&example_path).unwrap();

        // Only the well formed lines survive
        assert_eq!(grammar.rules().len(), 1);
        assert_eq!(grammar.rules()["S"], vec![pair("NP", "VP")]);
        assert_eq!(grammar.terminals().len(), 2);
        assert!(grammar.rules_for_terminal("->").is_empty());
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.cnf");
        let error = parse_file(&example_path).unwrap_err();

        assert_eq!(error, LoadError {
            location: Location::whole_file(&example_path),
            error: LoadErrorType::FileError(ErrorKind::NotFound.into())
        });
    }

    #[test]
    fn read_error_has_line() {
        let reader = std::io::BufReader::new(FailingReader {
            data: b"S -> NP VP\nNP -> dog\n"
        });
        let mut grammar = Grammar::new();
        let location = Location::whole_file("stream");
        let error = parse_reader(reader, &mut grammar, &location).unwrap_err();

        assert_eq!(error.location, location.at_line(3));
        assert_eq!(grammar.rules_for_pair("NP", "VP"), ["S"]);
    }
}
