use clap::Parser as _;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use cky::cli::Cli;
use cky::repl::Session;
use cky::{generator, parser, render_flat, render_tree, Parser};

fn generate(cli: &Cli, grammar: &cky::Grammar, amount: u32) {
    let mut rng = cli.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    for _ in 0..amount {
        match generator::generate(grammar, &mut rng, cli.max_depth) {
            Ok(tree) => {
                debug!(depth = tree.depth(), "generated derivation");
                println!("{}", tree.leaves().iter().join(" "));
                if cli.parse_tree {
                    println!("{}", render_tree(&tree));
                } else {
                    println!("{}", render_flat(&tree));
                }
            }
            Err(e) => warn!("{}", e)
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let mut grammar = parser::parse_file(&cli.file)?;
    if let Some(start) = &cli.start {
        grammar.set_start_symbol(start.as_str());
    }
    if grammar.is_empty() {
        warn!("{} defines no rules", cli.file.display());
    }

    if let Some(amount) = cli.generate {
        generate(&cli, &grammar, amount);
        return Ok(());
    }

    let session = Session::new(Parser::new(&grammar).with_budget(cli.budget()), cli.parse_tree);
    if !cli.sentence.is_empty() {
        println!("{}", session.report(&cli.sentence.join(" ")));
        return Ok(());
    }

    session.run()?;
    Ok(())
}
