// Voting Ledger - the single source of truth for proposals and votes

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::events::{dispatch, EventSink, LedgerEvent, NullSink};
use crate::identity::Identity;
use crate::ledger::error::LedgerError;
use crate::ledger::proposal::{Proposal, ProposalId, ProposalSnapshot, Winner};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

const SECS_PER_MINUTE: u64 = 60;

/// The voting ledger.
///
/// Mutations take `&mut self`, which serializes them: the check, the write
/// and the event emission of one call form a single unit that no other call
/// can interleave with. Wrap in [`SharedLedger`](crate::ledger::SharedLedger)
/// to share across threads.
pub struct VotingLedger {
    config: LedgerConfig,
    /// Index `i` holds proposal id `i + 1`
    proposals: Vec<Proposal>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for VotingLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VotingLedger")
            .field("admin", &self.config.admin)
            .field("proposal_count", &self.proposals.len())
            .finish()
    }
}

impl VotingLedger {
    /// Create an empty ledger at genesis
    pub fn new<C, S>(config: LedgerConfig, clock: C, sink: S) -> Self
    where
        C: Clock + 'static,
        S: EventSink + 'static,
    {
        info!(admin = %config.admin, "voting ledger created");
        Self {
            config,
            proposals: Vec::new(),
            clock: Arc::new(clock),
            sink: Arc::new(sink),
        }
    }

    /// Wall-clock ledger that discards events
    pub fn with_system_clock(config: LedgerConfig) -> Self {
        Self::new(config, SystemClock, NullSink)
    }

    /// The identity fixed at genesis as admin
    pub fn admin(&self) -> &Identity {
        &self.config.admin
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.config.admin == *identity
    }

    /// Number of proposals ever created; ids are exactly `1..=proposal_count`
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Current time as seen by the ledger
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    fn proposal(&self, id: ProposalId) -> Result<&Proposal, LedgerError> {
        index_of(id)
            .and_then(|i| self.proposals.get(i))
            .ok_or_else(LedgerError::no_such_proposal)
    }

    fn proposal_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, LedgerError> {
        index_of(id)
            .and_then(|i| self.proposals.get_mut(i))
            .ok_or_else(LedgerError::no_such_proposal)
    }

    /// Open a new proposal lasting `duration_minutes`. Admin only.
    pub fn create_proposal(
        &mut self,
        caller: &Identity,
        description: &str,
        duration_minutes: u64,
    ) -> Result<ProposalId, LedgerError> {
        self.try_create_proposal(caller, description, duration_minutes)
            .inspect_err(|e| debug!(caller = %caller, error = %e, "create_proposal rejected"))
    }

    fn try_create_proposal(
        &mut self,
        caller: &Identity,
        description: &str,
        duration_minutes: u64,
    ) -> Result<ProposalId, LedgerError> {
        if !self.is_admin(caller) {
            return Err(LedgerError::Unauthorized);
        }
        if description.is_empty() {
            return Err(LedgerError::empty_description());
        }
        if duration_minutes == 0 {
            return Err(LedgerError::zero_duration());
        }

        let now = self.now();
        let deadline = duration_minutes
            .checked_mul(SECS_PER_MINUTE)
            .and_then(|secs| now.checked_add(secs))
            .ok_or_else(LedgerError::duration_overflow)?;

        let id = self.proposal_count() + 1;
        self.proposals
            .push(Proposal::new(id, description.to_string(), deadline));

        info!(id, deadline, "proposal created");
        dispatch(
            self.sink.as_ref(),
            LedgerEvent::ProposalCreated {
                id,
                description: description.to_string(),
                deadline,
            },
        );

        Ok(id)
    }

    /// Cast `caller`'s single vote on an active proposal
    pub fn vote(&mut self, caller: &Identity, proposal_id: ProposalId) -> Result<(), LedgerError> {
        self.try_vote(caller, proposal_id)
            .inspect_err(|e| debug!(caller = %caller, proposal_id, error = %e, "vote rejected"))
    }

    fn try_vote(&mut self, caller: &Identity, proposal_id: ProposalId) -> Result<(), LedgerError> {
        let now = self.now();
        let proposal = self.proposal_mut(proposal_id)?;

        if !proposal.is_active(now) {
            return Err(LedgerError::Expired);
        }
        if !proposal.record_vote(*caller) {
            return Err(LedgerError::AlreadyDone);
        }

        info!(proposal_id, voter = %caller, votes = proposal.vote_count(), "vote recorded");
        dispatch(
            self.sink.as_ref(),
            LedgerEvent::Voted {
                proposal_id,
                voter: *caller,
            },
        );

        Ok(())
    }

    /// Snapshot of one proposal, activity evaluated now
    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<ProposalSnapshot, LedgerError> {
        let now = self.now();
        self.proposal(proposal_id).map(|p| p.snapshot(now))
    }

    /// Snapshots of every proposal in id order
    pub fn get_all_proposals(&self) -> Vec<ProposalSnapshot> {
        let now = self.now();
        self.proposals.iter().map(|p| p.snapshot(now)).collect()
    }

    pub fn has_voted(&self, proposal_id: ProposalId, identity: &Identity) -> Result<bool, LedgerError> {
        self.proposal(proposal_id).map(|p| p.has_voted(identity))
    }

    /// Completed proposal with the most votes.
    ///
    /// Scans in id order and replaces the running best only on a strictly
    /// greater count, so ties go to the lowest id.
    pub fn get_winner(&self) -> Result<Winner, LedgerError> {
        if self.proposals.is_empty() {
            return Err(LedgerError::no_proposals());
        }

        let now = self.now();
        let mut best: Option<Winner> = None;

        for proposal in self.proposals.iter().filter(|p| !p.is_active(now)) {
            match best {
                Some(ref w) if proposal.vote_count() <= w.vote_count => {}
                _ => {
                    best = Some(Winner {
                        id: proposal.id(),
                        vote_count: proposal.vote_count(),
                    })
                }
            }
        }

        best.ok_or_else(LedgerError::no_completed_proposals)
    }
}

fn index_of(id: ProposalId) -> Option<usize> {
    id.checked_sub(1).and_then(|i| usize::try_from(i).ok())
}
