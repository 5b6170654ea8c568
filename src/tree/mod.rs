/*
    This module holds derivations found by the chart parser and renders them
    as bracketed strings
*/

use std::fmt::Display;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseTree {
    // A rule rewriting directly to a token of the sentence
    Leaf {
        symbol: String,
        token: String
    },
    // A binary rule, children in sentence order
    Node {
        symbol: String,
        left: Box<ParseTree>,
        right: Box<ParseTree>
    }
}

impl ParseTree {
    pub fn leaf(symbol: impl Into<String>, token: impl Into<String>) -> Self {
        ParseTree::Leaf {
            symbol: symbol.into(),
            token: token.into()
        }
    }

    pub fn node(symbol: impl Into<String>, left: ParseTree, right: ParseTree) -> Self {
        ParseTree::Node {
            symbol: symbol.into(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }

    /// Name of the rule at the root of this tree.
    pub fn symbol(&self) -> &str {
        match self {
            ParseTree::Leaf { symbol, .. } | ParseTree::Node { symbol, .. } => symbol
        }
    }

    /// The tokens covered by this tree, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        match self {
            ParseTree::Leaf { token, .. } => leaves.push(token),
            ParseTree::Node { left, right, .. } => {
                left.collect_leaves(leaves);
                right.collect_leaves(leaves);
            }
        }
    }

    /// Number of rules on the longest path from the root to a token.
    pub fn depth(&self) -> usize {
        match self {
            ParseTree::Leaf { .. } => 1,
            ParseTree::Node { left, right, .. } => 1 + left.depth().max(right.depth())
        }
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_flat(self))
    }
}

fn push_flat(tree: &ParseTree, out: &mut String) {
    match tree {
        ParseTree::Leaf { symbol, token } => {
            out.push('[');
            out.push_str(symbol);
            out.push(' ');
            out.push_str(token);
            out.push(']');
        }
        ParseTree::Node { symbol, left, right } => {
            out.push('[');
            out.push_str(symbol);
            out.push(' ');
            push_flat(left, out);
            out.push(' ');
            push_flat(right, out);
            out.push(']');
        }
    }
}

/// Renders a derivation on one line, e.g. `[S [NP dog] [VP barks]]`.
pub fn render_flat(tree: &ParseTree) -> String {
    let mut out = String::new();
    push_flat(tree, &mut out);
    out
}

fn push_indented(tree: &ParseTree, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    match tree {
        ParseTree::Leaf { symbol, token } => {
            out.push_str(&indent);
            out.push('[');
            out.push_str(symbol);
            out.push(' ');
            out.push_str(token);
            out.push(']');
        }
        ParseTree::Node { symbol, left, right } => {
            out.push_str(&indent);
            out.push('[');
            out.push_str(symbol);
            out.push('\n');
            push_indented(left, depth + 1, out);
            out.push('\n');
            push_indented(right, depth + 1, out);
            out.push('\n');
            out.push_str(&indent);
            out.push(']');
        }
    }
}

/// Renders a derivation with one rule per line, children indented one level
/// deeper than their parent. No trailing newline.
pub fn render_tree(tree: &ParseTree) -> String {
    render_tree_at(tree, 0)
}

// Same as `render_tree`, with the root already `depth` levels deep
pub fn render_tree_at(tree: &ParseTree, depth: usize) -> String {
    let mut out = String::new();
    push_indented(tree, depth, &mut out);
    out
}
