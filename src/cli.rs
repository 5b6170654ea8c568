use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Parse sentences with a CNF grammar using the CKY algorithm")]
pub struct Cli {
    /// File containing the grammar in Chomsky normal form
    #[arg(value_name = "GRAMMAR")]
    pub file: PathBuf,

    /// Sentence to parse once instead of starting the interactive prompt
    #[arg(value_name = "SENTENCE")]
    pub sentence: Vec<String>,

    /// Print parses as indented trees instead of on one line
    #[arg(short, long)]
    pub parse_tree: bool,

    /// Start symbol (default: S)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Give up on a sentence after creating this many chart entries
    #[arg(short, long, value_name = "ENTRIES")]
    pub budget: Option<usize>,

    /// Generate this many random sentences instead of parsing
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Seed for sentence generation
    #[arg(long, value_name = "SEED", requires = "generate")]
    pub seed: Option<u64>,

    /// Deepest derivation to generate
    #[arg(long, value_name = "DEPTH", default_value_t = crate::generator::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    pub fn budget(&self) -> crate::chart::Budget {
        self.budget.map_or(crate::chart::Budget::Unlimited, crate::chart::Budget::Entries)
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::chart::Budget;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::parse_from(["cky", "-p", "--budget", "100", "grammar.cnf", "dog", "barks"]);
        assert_eq!(cli.file, PathBuf::from("grammar.cnf"));
        assert_eq!(cli.sentence, vec!["dog", "barks"]);
        assert!(cli.parse_tree);
        assert_eq!(cli.budget(), Budget::Entries(100));
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn default_arguments() {
        let cli = Cli::parse_from(["cky", "-vv", "grammar.cnf"]);
        assert!(cli.sentence.is_empty());
        assert_eq!(cli.start, None);
        assert_eq!(cli.budget(), Budget::Unlimited);
        assert_eq!(cli.max_depth, crate::generator::DEFAULT_MAX_DEPTH);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }
}
