// votechain - a small governance ledger
//
// An admin opens time-bounded proposals, any identity votes at most once per
// proposal, and once proposals expire anyone can ask for the winner.

pub mod clock;
pub mod config;
pub mod events;
pub mod identity;
pub mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LedgerConfig, LogConfig};
pub use events::{ChannelSink, EventSink, LedgerEvent, NullSink, RecordingSink};
pub use identity::{Identity, Keypair};
pub use ledger::{
    ErrorKind, LedgerError, ProposalId, ProposalSnapshot, SharedLedger, VotingLedger, Winner,
};
