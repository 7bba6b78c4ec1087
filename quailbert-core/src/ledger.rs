//! Points leaderboard and recent-activity tracking.
//!
//! The [`Ledger`] is process-wide shared state. Every operation takes the
//! single lock exactly once, so awards, activity marks, sweeps and ranking
//! never observe each other half-done. Nothing here is persisted.

use crate::transport::ParticipantId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct LedgerState {
    /// Balances in order of first award.
    balances: Vec<(ParticipantId, u64)>,
    /// Position of each participant in `balances`.
    index: HashMap<ParticipantId, usize>,
    /// Participants seen since the last sweep.
    active: HashSet<ParticipantId>,
}

/// Shared handle to the scoring state. Clones refer to the same ledger.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    state: Arc<Mutex<LedgerState>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add `delta` points to a participant, creating the entry at 0 first if
    /// needed. Returns the new balance.
    pub fn award(&self, participant: ParticipantId, delta: u64) -> u64 {
        let mut state = self.lock();
        let existing = state.index.get(&participant).copied();
        let slot = match existing {
            Some(i) => i,
            None => {
                let i = state.balances.len();
                state.balances.push((participant, 0));
                state.index.insert(participant, i);
                i
            }
        };
        let entry = &mut state.balances[slot].1;
        *entry = entry.saturating_add(delta);
        *entry
    }

    /// Current balance, if the participant has ever been awarded.
    pub fn points(&self, participant: ParticipantId) -> Option<u64> {
        let state = self.lock();
        state
            .index
            .get(&participant)
            .map(|&i| state.balances[i].1)
    }

    /// All balances, highest first. Equal balances keep first-award order.
    pub fn rank(&self) -> Vec<(ParticipantId, u64)> {
        let mut ranked = self.lock().balances.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Whether nobody has been awarded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().balances.is_empty()
    }

    /// Record that a participant has spoken since the last sweep.
    pub fn mark_active(&self, participant: ParticipantId) {
        self.lock().active.insert(participant);
    }

    /// Number of participants active since the last sweep.
    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Take the active set, leaving it empty.
    pub fn drain_active(&self) -> HashSet<ParticipantId> {
        std::mem::take(&mut self.lock().active)
    }
}
