//! Deterministic finite automata over a byte alphabet.
//!
//! Built only by [`Nfa::to_dfa`](crate::nfa::Nfa::to_dfa) (subset
//! construction) and then optionally [`Dfa::minimize`] (signature-based
//! partition refinement). States live in a flat arena addressed by index,
//! same discipline as [`Nfa`](crate::nfa::Nfa).

pub mod eval;

use std::collections::HashMap;

/// One DFA state. `nfa_origin` is the sorted set of NFA states this state
/// represents, populated by subset construction; it becomes meaningless
/// (and is left as whatever the representative state happened to carry)
/// once [`Dfa::minimize`] merges states, since a block no longer corresponds
/// to a single NFA-origin set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub accepting: bool,
    pub transitions: HashMap<u8, usize>,
    pub nfa_origin: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: usize,
}

impl Dfa {
    pub fn alphabet(&self) -> Vec<u8> {
        let mut set = std::collections::HashSet::new();
        for s in &self.states {
            set.extend(s.transitions.keys().copied());
        }
        let mut v: Vec<u8> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    /// Runs the DFA over `input`; a missing transition (a dead state) is a
    /// rejection, not an error.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut state = self.start;
        for &b in input {
            match self.states[state].transitions.get(&b) {
                Some(&next) => state = next,
                None => return false,
            }
        }
        self.states[state].accepting
    }

    fn reachable(&self) -> Vec<usize> {
        let mut seen = vec![false; self.states.len()];
        let mut stack = vec![self.start];
        seen[self.start] = true;
        let mut order = Vec::new();
        while let Some(s) = stack.pop() {
            order.push(s);
            for &t in self.states[s].transitions.values() {
                if !seen[t] {
                    seen[t] = true;
                    stack.push(t);
                }
            }
        }
        order
    }

    /// Drops states unreachable from `start`, remapping indices.
    pub fn remove_unreachable_states(&mut self) {
        let mut reachable = self.reachable();
        reachable.sort_unstable();
        let remap: HashMap<usize, usize> =
            reachable.iter().enumerate().map(|(new, &old)| (old, new)).collect();
        let mut states = Vec::with_capacity(reachable.len());
        for &old in &reachable {
            let mut state = self.states[old].clone();
            state.transitions = state
                .transitions
                .into_iter()
                .filter_map(|(b, t)| remap.get(&t).map(|&nt| (b, nt)))
                .collect();
            states.push(state);
        }
        self.states = states;
        self.start = remap[&self.start];
    }

    /// Signature-based partition refinement. Initial
    /// partition is {accepting}/{non-accepting}; states are repeatedly
    /// regrouped by the tuple (over the alphabet in a fixed order) of block
    /// indices their transitions land in, using `-1` for dead transitions,
    /// until the partition stops changing.
    fn state_equivalence_classes(&self) -> Vec<Vec<usize>> {
        let alphabet = self.alphabet();
        let n = self.states.len();
        if n == 0 {
            return Vec::new();
        }

        let mut block_of: Vec<usize> = self
            .states
            .iter()
            .map(|s| if s.accepting { 1 } else { 0 })
            .collect();
        let mut num_blocks = if block_of.iter().any(|&b| b == 0) && block_of.iter().any(|&b| b == 1) {
            2
        } else {
            1
        };
        if num_blocks == 1 {
            // Normalize to a single block id 0 regardless of which branch set id 1.
            block_of = vec![0; n];
        }

        loop {
            let signatures: Vec<Vec<i64>> = (0..n)
                .map(|s| {
                    alphabet
                        .iter()
                        .map(|&b| match self.states[s].transitions.get(&b) {
                            Some(&t) => block_of[t] as i64,
                            None => -1,
                        })
                        .collect()
                })
                .collect();

            let mut group_of_signature: HashMap<(usize, Vec<i64>), usize> = HashMap::new();
            let mut new_block_of = vec![0usize; n];
            let mut next_id = 0usize;
            for s in 0..n {
                let key = (block_of[s], signatures[s].clone());
                let id = *group_of_signature.entry(key).or_insert_with(|| {
                    let id = next_id;
                    next_id += 1;
                    id
                });
                new_block_of[s] = id;
            }

            if next_id == num_blocks {
                block_of = new_block_of;
                break;
            }
            num_blocks = next_id;
            block_of = new_block_of;
        }

        let mut classes: Vec<Vec<usize>> = vec![Vec::new(); num_blocks];
        for (s, &b) in block_of.iter().enumerate() {
            classes[b].push(s);
        }
        classes
    }

    /// Merges equivalence classes computed by [`Dfa::state_equivalence_classes`]
    /// into one state per class.
    fn merge_equivalence_classes(&mut self) {
        let classes = self.state_equivalence_classes();
        let mut old_to_new = vec![0usize; self.states.len()];
        for (new_id, class) in classes.iter().enumerate() {
            for &old in class {
                old_to_new[old] = new_id;
            }
        }

        let mut states = Vec::with_capacity(classes.len());
        for class in &classes {
            let representative = &self.states[class[0]];
            let transitions = representative
                .transitions
                .iter()
                .map(|(&b, &t)| (b, old_to_new[t]))
                .collect();
            states.push(DfaState {
                accepting: representative.accepting,
                transitions,
                nfa_origin: representative.nfa_origin.clone(),
            });
        }

        self.states = states;
        self.start = old_to_new[self.start];
    }

    /// `remove_unreachable_states` followed by `merge_equivalence_classes`.
    pub fn minimize(&mut self) {
        self.remove_unreachable_states();
        if !self.states.is_empty() {
            self.merge_equivalence_classes();
        }
    }

    /// Whether two DFAs accept the same language, by product-construction
    /// exploration over the union of both alphabets.
    pub fn equivalent_to(&self, other: &Dfa) -> bool {
        let mut alphabet: Vec<u8> = self.alphabet();
        for b in other.alphabet() {
            if !alphabet.contains(&b) {
                alphabet.push(b);
            }
        }

        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![(self.start, other.start)];
        seen.insert((self.start, other.start));
        while let Some((a, b)) = stack.pop() {
            if self.states[a].accepting != other.states[b].accepting {
                return false;
            }
            for &sym in &alphabet {
                let na = self.states[a].transitions.get(&sym).copied();
                let nb = other.states[b].transitions.get(&sym).copied();
                match (na, nb) {
                    (None, None) => {}
                    (Some(_), None) | (None, Some(_)) => {
                        // One side dies and the other doesn't: only a mismatch if the
                        // still-alive side can still reach an accepting state.
                        let alive = na.map(|s| (self, s)).or(nb.map(|s| (other, s)));
                        if let Some((dfa, s)) = alive {
                            if dfa.has_reachable_accepting_state_from(s) {
                                return false;
                            }
                        }
                    }
                    (Some(na), Some(nb)) => {
                        if seen.insert((na, nb)) {
                            stack.push((na, nb));
                        }
                    }
                }
            }
        }
        true
    }

    fn has_reachable_accepting_state_from(&self, start: usize) -> bool {
        let mut seen = vec![false; self.states.len()];
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(s) = stack.pop() {
            if self.states[s].accepting {
                return true;
            }
            for &t in self.states[s].transitions.values() {
                if !seen[t] {
                    seen[t] = true;
                    stack.push(t);
                }
            }
        }
        false
    }
}
