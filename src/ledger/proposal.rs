// Proposal - a votable item with a fixed deadline and a running tally

use crate::identity::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sequential proposal id, starting at 1
pub type ProposalId = u64;

/// A proposal accepts votes while `now < deadline`; at the deadline it is closed.
pub fn is_active(deadline: u64, now: u64) -> bool {
    now < deadline
}

/// Stored proposal record, owned by the ledger
#[derive(Clone, Debug)]
pub struct Proposal {
    id: ProposalId,
    description: String,
    deadline: u64,
    vote_count: u64,
    /// Identities that have voted; never shrinks
    voters: HashSet<Identity>,
}

impl Proposal {
    pub(crate) fn new(id: ProposalId, description: String, deadline: u64) -> Self {
        Self {
            id,
            description,
            deadline,
            vote_count: 0,
            voters: HashSet::new(),
        }
    }

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }

    pub fn is_active(&self, now: u64) -> bool {
        is_active(self.deadline, now)
    }

    pub fn has_voted(&self, voter: &Identity) -> bool {
        self.voters.contains(voter)
    }

    /// Record a vote. Returns false (and changes nothing) for a repeat voter.
    pub(crate) fn record_vote(&mut self, voter: Identity) -> bool {
        if !self.voters.insert(voter) {
            return false;
        }
        self.vote_count += 1;
        true
    }

    /// Immutable view with activity evaluated at `now`
    pub fn snapshot(&self, now: u64) -> ProposalSnapshot {
        ProposalSnapshot {
            id: self.id,
            description: self.description.clone(),
            deadline: self.deadline,
            vote_count: self.vote_count,
            is_active: self.is_active(now),
        }
    }
}

/// Point-in-time copy of a proposal handed out to callers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSnapshot {
    id: ProposalId,
    description: String,
    deadline: u64,
    vote_count: u64,
    is_active: bool,
}

impl ProposalSnapshot {
    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }

    /// Activity as of the moment the snapshot was taken
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Seconds left until the deadline, zero once it has passed
    pub fn remaining_secs(&self, now: u64) -> u64 {
        self.deadline.saturating_sub(now)
    }

    /// Deadline as a UTC date-time, if representable
    pub fn deadline_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.deadline)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Result of a winner query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub id: ProposalId,
    pub vote_count: u64,
}
