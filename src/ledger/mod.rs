// Ledger module - THE VOTING STATE MACHINE
// Admin-gated proposals, one vote per identity, winner among expired proposals

mod error;
mod proposal;
mod shared;
mod state;

pub use error::{ErrorKind, LedgerError};
pub use proposal::{is_active, Proposal, ProposalId, ProposalSnapshot, Winner};
pub use shared::SharedLedger;
pub use state::VotingLedger;
