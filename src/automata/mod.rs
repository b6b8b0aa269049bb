pub mod dfa;
pub mod turing;

pub use dfa::Dfa101;
pub use turing::TuringMachine;

/// A machine that accepts or rejects whole input strings.
pub trait Recognizer {
    fn accepts(&self, input: &str) -> bool;
}
