//! Nondeterministic finite automata over a byte alphabet, with ε-moves.
//!
//! States live in a flat arena (`Vec<NfaState>`), addressed by arena-local
//! index — no reference-counted graph nodes. The only way to build an
//! [`Nfa`] in this crate is Thompson construction from a [`Regex`](crate::regex::Regex);
//! subset construction turns one into a [`Dfa`](crate::dfa::Dfa).

pub mod eval;

use crate::dfa::{Dfa, DfaState};
use std::collections::{HashMap, HashSet};

/// One state in the automaton's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    pub accepting: bool,
    pub epsilon: Vec<usize>,
    pub transitions: HashMap<u8, Vec<usize>>,
}

/// An ε-NFA: a state arena plus a designated start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: usize,
}

impl Nfa {
    /// The ε-closure of a set of states: every state reachable from `set`
    /// by zero or more ε-edges, including `set` itself.
    pub fn closure(&self, set: &HashSet<usize>) -> HashSet<usize> {
        let mut result = set.clone();
        let mut stack: Vec<usize> = set.iter().copied().collect();
        while let Some(s) = stack.pop() {
            for &next in &self.states[s].epsilon {
                if result.insert(next) {
                    stack.push(next);
                }
            }
        }
        result
    }

    fn mov(&self, set: &HashSet<usize>, byte: u8) -> HashSet<usize> {
        set.iter()
            .filter_map(|&s| self.states[s].transitions.get(&byte))
            .flatten()
            .copied()
            .collect()
    }

    /// The alphabet actually used by this NFA's byte transitions (not the
    /// full 0x00-0xFF range — only the bytes some transition is labeled with).
    pub fn alphabet(&self) -> Vec<u8> {
        let mut set: HashSet<u8> = HashSet::new();
        for s in &self.states {
            set.extend(s.transitions.keys().copied());
        }
        let mut v: Vec<u8> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    /// Subset construction: builds a DFA whose states are
    /// canonically keyed by the exact set of NFA-origin states they
    /// represent (`DfaState::nfa_origin`), discarded after minimization.
    pub fn to_dfa(&self) -> Dfa {
        let alphabet = self.alphabet();
        let start_origin = self.closure(&HashSet::from([self.start]));

        let mut origin_to_id: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut states: Vec<DfaState> = Vec::new();
        let mut queue: Vec<HashSet<usize>> = Vec::new();

        let key = sorted_key(&start_origin);
        origin_to_id.insert(key.clone(), 0);
        states.push(DfaState {
            accepting: self.set_has_accepting(&start_origin),
            transitions: HashMap::new(),
            nfa_origin: key,
        });
        queue.push(start_origin);

        let mut idx = 0;
        while idx < queue.len() {
            let origin = queue[idx].clone();
            for &byte in &alphabet {
                let moved = self.mov(&origin, byte);
                if moved.is_empty() {
                    continue;
                }
                let closed = self.closure(&moved);
                let closed_key = sorted_key(&closed);
                let target_id = *origin_to_id.entry(closed_key.clone()).or_insert_with(|| {
                    states.push(DfaState {
                        accepting: self.set_has_accepting(&closed),
                        transitions: HashMap::new(),
                        nfa_origin: closed_key.clone(),
                    });
                    queue.push(closed);
                    states.len() - 1
                });
                states[idx].transitions.insert(byte, target_id);
            }
            idx += 1;
        }

        Dfa { states, start: 0 }
    }

    fn set_has_accepting(&self, set: &HashSet<usize>) -> bool {
        set.iter().any(|&s| self.states[s].accepting)
    }

    /// Whether the NFA accepts the given byte string, by ε-closure/move
    /// simulation (not by first converting to a DFA).
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut current = self.closure(&HashSet::from([self.start]));
        for &b in input {
            current = self.closure(&self.mov(&current, b));
            if current.is_empty() {
                return false;
            }
        }
        self.set_has_accepting(&current)
    }
}

fn sorted_key(set: &HashSet<usize>) -> Vec<usize> {
    let mut v: Vec<usize> = set.iter().copied().collect();
    v.sort_unstable();
    v
}
