// The shape of one grammar line, borrowed from the line's text
#[derive(PartialEq, Debug)]
pub enum Line<'a> {
    // A -> B C
    Rule {
        name: &'a str,
        left: &'a str,
        right: &'a str
    },
    // A -> t
    Terminal {
        name: &'a str,
        token: &'a str
    },
    // Anything else, including blank lines
    Ignored {
        tokens: usize
    }
}

pub fn lex_line(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

// Only the position of the arrow matters, not what it is spelled as
pub fn classify<'a>(tokens: &[&'a str]) -> Line<'a> {
    match *tokens {
        [name, _, left, right] => Line::Rule { name, left, right },
        [name, _, token] => Line::Terminal { name, token },
        _ => Line::Ignored { tokens: tokens.len() }
    }
}
