pub mod chart;
pub mod cli;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod repl;
pub mod tree;

pub use crate::chart::{parse, Budget, ParseError, Parser};
pub use crate::grammar::Grammar;
pub use crate::tree::{render_flat, render_tree, ParseTree};
