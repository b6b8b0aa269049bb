use super::Recognizer;

/// States of the automaton for binary strings containing `101`. `Q3` means
/// the substring has been seen and is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Q0,
    Q1,
    Q2,
    Q3,
}

impl State {
    pub fn next(self, c: char) -> Option<State> {
        use State::*;
        match (self, c) {
            (Q0, '0') => Some(Q0),
            (Q0, '1') => Some(Q1),
            (Q1, '0') => Some(Q2),
            (Q1, '1') => Some(Q1),
            (Q2, '0') => Some(Q0),
            (Q2, '1') => Some(Q3),
            (Q3, '0') | (Q3, '1') => Some(Q3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Dfa101;

impl Dfa101 {
    /// Final state after reading `input`, `None` on a non-binary character.
    pub fn run(&self, input: &str) -> Option<State> {
        input.chars().try_fold(State::Q0, |state, c| state.next(c))
    }
}

impl Recognizer for Dfa101 {
    fn accepts(&self, input: &str) -> bool {
        self.run(input) == Some(State::Q3)
    }
}
