//! Step-by-step evaluation of an [`Nfa`] over a byte string, without first
//! converting to a DFA, indexing transitions directly by byte instead of
//! through a string-keyed map.

use crate::nfa::Nfa;
use std::collections::HashSet;
use std::iter;

#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current_states: HashSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_states.iter().any(|&s| self.nfa.states[s].accepting)
    }

    pub fn current_states_idx(&self) -> &HashSet<usize> {
        &self.current_states
    }

    pub fn step_all(&self) -> Vec<NfaEvaluator<'a>> {
        iter::repeat(self.clone())
            .zip(self.nfa.alphabet())
            .map(|(mut eval, byte)| {
                eval.step(byte);
                eval
            })
            .collect()
    }

    pub fn step(&mut self, byte: u8) {
        let moved: HashSet<usize> = self
            .current_states
            .iter()
            .filter_map(|s| self.nfa.states[*s].transitions.get(&byte))
            .flatten()
            .copied()
            .collect();
        self.current_states = self.nfa.closure(&moved);
    }

    pub fn step_multiple(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.step(b);
        }
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(value: &'a Nfa) -> Self {
        let current_states = value.closure(&HashSet::from([value.start]));
        Self {
            nfa: value,
            current_states,
        }
    }
}
