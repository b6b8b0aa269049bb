use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::Recognizer;

pub const BLANK: char = '⊔';
pub const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Stay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: String,
    pub write: char,
    pub direction: Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Accepted,
    Rejected,
    StepLimitReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuringMachineError {
    UnknownState(String),
}

impl fmt::Display for TuringMachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuringMachineError::UnknownState(s) => {
                write!(f, "state '{}' is used in a transition but not declared", s)
            }
        }
    }
}

impl std::error::Error for TuringMachineError {}

/// A single-tape, deterministic Turing machine.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    input_alphabet: HashSet<char>,
    transitions: HashMap<(String, char), Transition>,
    start: String,
    accept: String,
    reject: String,
    blank: char,
}

impl TuringMachine {
    pub fn new(
        states: HashSet<String>,
        input_alphabet: HashSet<char>,
        transitions: HashMap<(String, char), Transition>,
        start: &str,
        accept: &str,
        reject: &str,
        blank: char,
    ) -> Result<Self, TuringMachineError> {
        for state in [start, accept, reject] {
            if !states.contains(state) {
                return Err(TuringMachineError::UnknownState(state.to_string()));
            }
        }
        for ((from, _), t) in &transitions {
            for state in [from, &t.next] {
                if !states.contains(state) {
                    return Err(TuringMachineError::UnknownState(state.clone()));
                }
            }
        }
        Ok(Self {
            input_alphabet,
            transitions,
            start: start.to_string(),
            accept: accept.to_string(),
            reject: reject.to_string(),
            blank,
        })
    }

    /// Reads a binary numeral most significant bit first, tracking the
    /// remainder modulo 3 in the state.
    pub fn divisible_by_three() -> Self {
        let table = [
            ("q_rem0", '0', "q_rem0"),
            ("q_rem0", '1', "q_rem1"),
            ("q_rem0", BLANK, "q_accept"),
            ("q_rem1", '0', "q_rem2"),
            ("q_rem1", '1', "q_rem0"),
            ("q_rem1", BLANK, "q_reject"),
            ("q_rem2", '0', "q_rem1"),
            ("q_rem2", '1', "q_rem2"),
            ("q_rem2", BLANK, "q_reject"),
        ];
        let transitions = table
            .iter()
            .map(|&(from, read, to)| {
                let direction = if read == BLANK { Move::Stay } else { Move::Right };
                (
                    (from.to_string(), read),
                    Transition {
                        next: to.to_string(),
                        write: read,
                        direction,
                    },
                )
            })
            .collect();

        Self {
            input_alphabet: ['0', '1'].into_iter().collect(),
            transitions,
            start: "q_rem0".to_string(),
            accept: "q_accept".to_string(),
            reject: "q_reject".to_string(),
            blank: BLANK,
        }
    }

    /// Runs the machine for at most `max_steps` transitions. Input symbols
    /// outside the input alphabet and missing transitions reject.
    pub fn run(&self, input: &str, max_steps: usize) -> Halt {
        if !input.chars().all(|c| self.input_alphabet.contains(&c)) {
            return Halt::Rejected;
        }

        let mut tape: BTreeMap<isize, char> = input
            .chars()
            .enumerate()
            .map(|(i, c)| (i as isize, c))
            .collect();
        let mut state = self.start.as_str();
        let mut head: isize = 0;

        for step in 0..=max_steps {
            if state == self.accept {
                log::trace!("accepted after {} steps", step);
                return Halt::Accepted;
            }
            if state == self.reject {
                return Halt::Rejected;
            }
            if step == max_steps {
                break;
            }

            let symbol = tape.get(&head).cloned().unwrap_or(self.blank);
            let t = match self.transitions.get(&(state.to_string(), symbol)) {
                Some(t) => t,
                None => return Halt::Rejected,
            };
            tape.insert(head, t.write);
            state = t.next.as_str();
            match t.direction {
                Move::Left => head -= 1,
                Move::Right => head += 1,
                Move::Stay => {}
            }
        }
        Halt::StepLimitReached
    }
}

impl Recognizer for TuringMachine {
    fn accepts(&self, input: &str) -> bool {
        self.run(input, DEFAULT_MAX_STEPS) == Halt::Accepted
    }
}
