pub mod eliminate_epsilon;
pub mod eliminate_left_recursion;
pub mod eliminate_unit;
pub mod error;
pub mod finalize;
pub mod grammar;
pub mod nullable;
pub mod parse;
pub mod pipeline;
pub mod pretty_print;
pub mod substitute;
pub use error::ParseError;
pub use grammar::Grammar;

pub const EPSILON: &str = "ε";
/// Alternatives spelled like this (any case) are the empty production.
pub const EPSILON_LITERALS: [&str; 4] = ["epsilon", "eps", "ε", "ϵ"];
