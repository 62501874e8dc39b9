//! Step-by-step evaluation of a [`Dfa`] over a byte string, indexing
//! transitions directly by byte rather than through a string-keyed map.

use crate::dfa::{Dfa, DfaState};

#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current_state: usize,
    dead: bool,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, |s| s.accepting)
    }

    pub fn current_state(&self) -> Option<&DfaState> {
        if self.dead {
            None
        } else {
            Some(&self.dfa.states[self.current_state])
        }
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        (!self.dead).then_some(self.current_state)
    }

    pub fn step(&mut self, byte: u8) -> Option<&DfaState> {
        if self.dead {
            return None;
        }
        match self.dfa.states[self.current_state].transitions.get(&byte) {
            None => {
                self.dead = true;
                None
            }
            Some(&next) => {
                self.current_state = next;
                Some(&self.dfa.states[self.current_state])
            }
        }
    }

    pub fn step_multiple(&mut self, bytes: &[u8]) -> Option<&DfaState> {
        for &b in bytes {
            self.step(b)?;
        }
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        Self {
            dfa: value,
            current_state: value.start,
            dead: false,
        }
    }
}
