use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input holds nothing but whitespace.
    Empty,
    MissingArrow { line: usize },
    EmptyLeftSide { line: usize },
    /// Every rule ended up without a single production.
    NoRules,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "input is empty or contains no rules"),
            ParseError::MissingArrow { line } => write!(f, "Line {}: missing \"->\"", line),
            ParseError::EmptyLeftSide { line } => write!(f, "Line {}: empty left side", line),
            ParseError::NoRules => write!(f, "no valid rules were parsed"),
        }
    }
}

impl std::error::Error for ParseError {}
