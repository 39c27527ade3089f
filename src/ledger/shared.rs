// Shared Ledger - thread-safe handle over a single VotingLedger

use crate::identity::Identity;
use crate::ledger::{LedgerError, ProposalId, ProposalSnapshot, VotingLedger, Winner};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to one ledger.
///
/// Mutations hold the write lock across validation, update and event
/// emission; reads share the read lock and see every mutation ordered
/// before them. A poisoned lock is recovered: mutations validate before
/// writing, so a panic cannot leave a half-applied vote behind.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<RwLock<VotingLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: VotingLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VotingLedger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VotingLedger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn admin(&self) -> Identity {
        *self.read().admin()
    }

    pub fn proposal_count(&self) -> u64 {
        self.read().proposal_count()
    }

    pub fn create_proposal(
        &self,
        caller: &Identity,
        description: &str,
        duration_minutes: u64,
    ) -> Result<ProposalId, LedgerError> {
        self.write()
            .create_proposal(caller, description, duration_minutes)
    }

    pub fn vote(&self, caller: &Identity, proposal_id: ProposalId) -> Result<(), LedgerError> {
        self.write().vote(caller, proposal_id)
    }

    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<ProposalSnapshot, LedgerError> {
        self.read().get_proposal(proposal_id)
    }

    pub fn get_all_proposals(&self) -> Vec<ProposalSnapshot> {
        self.read().get_all_proposals()
    }

    pub fn has_voted(&self, proposal_id: ProposalId, identity: &Identity) -> Result<bool, LedgerError> {
        self.read().has_voted(proposal_id, identity)
    }

    pub fn get_winner(&self) -> Result<Winner, LedgerError> {
        self.read().get_winner()
    }
}

impl From<VotingLedger> for SharedLedger {
    fn from(ledger: VotingLedger) -> Self {
        Self::new(ledger)
    }
}
