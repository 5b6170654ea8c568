/*
    The interactive prompt: `help`, `parse` and `quit`
*/

use itertools::Itertools;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::chart::{ParseError, ParseResult, Parser};
use crate::tree::{render_flat, render_tree, ParseTree};

const COMMAND_PROMPT: &str = "cky> ";
const SENTENCE_PROMPT: &str = "sentence> ";

const HELP: &str = "\
commands:
    help      show this message
    parse     parse a sentence, tokens separated by whitespace
    quit, q   leave";

#[derive(PartialEq, Debug)]
pub enum Command<'a> {
    Help,
    Parse,
    Quit,
    Empty,
    Unknown(&'a str)
}

pub fn command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Empty,
        "help" => Command::Help,
        "parse" => Command::Parse,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown(other)
    }
}

// Only sentences that parsed go into the prompt history
fn worth_remembering(result: &ParseResult) -> bool {
    result.as_ref().is_ok_and(|parses| !parses.is_empty())
}

pub struct Session<'g> {
    parser: Parser<'g>,
    indented: bool
}

impl<'g> Session<'g> {
    pub fn new(parser: Parser<'g>, indented: bool) -> Self {
        Session { parser, indented }
    }

    fn render(&self, tree: &ParseTree) -> String {
        if self.indented {
            render_tree(tree)
        } else {
            render_flat(tree)
        }
    }

    pub fn parse_sentence(&self, sentence: &str) -> ParseResult {
        let tokens = sentence.split_whitespace().collect_vec();
        self.parser.parse(&tokens)
    }

    /// What gets printed for one sentence.
    pub fn report(&self, sentence: &str) -> String {
        self.format_result(self.parse_sentence(sentence))
    }

    fn format_result(&self, result: ParseResult) -> String {
        match result {
            Ok(parses) if parses.is_empty() => "no valid parses".to_string(),
            Ok(parses) => {
                let count = match parses.len() {
                    1 => "1 parse".to_string(),
                    n => format!("{} parses", n)
                };
                let separator = if self.indented { "\n\n" } else { "\n" };
                let rendered = parses.iter().map(|tree| self.render(tree)).join(separator);
                format!("{}\n{}", rendered, count)
            }
            Err(e @ ParseError::BudgetExceeded { .. }) => format!("could not finish parsing: {}", e)
        }
    }

    /// Reads commands until `quit` or the end of input.
    pub fn run(&self) -> rustyline::Result<()> {
        let mut rl = rustyline::DefaultEditor::new()?;
        loop {
            let line = match rl.readline(COMMAND_PROMPT) {
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
                Err(e) => return Err(e),
                Ok(line) => line
            };

            match command(&line) {
                Command::Empty => {}
                Command::Help => println!("{}", HELP),
                Command::Quit => return Ok(()),
                Command::Unknown(other) => println!("unknown command `{}`, try `help`", other),
                Command::Parse => {
                    let sentence = match rl.readline(SENTENCE_PROMPT) {
                        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
                        Err(e) => return Err(e),
                        Ok(sentence) => sentence
                    };
                    debug!(sentence = %sentence, "parsing");
                    let result = self.parse_sentence(&sentence);
                    if worth_remembering(&result) {
                        let _ = rl.add_history_entry(&sentence);
                    }
                    println!("{}", self.format_result(result));
                }
            }
        }
    }
}
