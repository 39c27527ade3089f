// Events - notifications emitted after successful ledger mutations
//
// The ledger calls the sink while it still holds exclusive access, so an
// observer never sees an event whose state change is missing, nor a state
// change without its event.

use crate::identity::Identity;
use crate::ledger::ProposalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Observable ledger notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A proposal was opened by the admin
    ProposalCreated {
        id: ProposalId,
        description: String,
        deadline: u64,
    },
    /// An identity cast its vote
    Voted {
        proposal_id: ProposalId,
        voter: Identity,
    },
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::ProposalCreated {
                id,
                description,
                deadline,
            } => write!(
                f,
                "ProposalCreated(id={}, description={:?}, deadline={})",
                id, description, deadline
            ),
            LedgerEvent::Voted { proposal_id, voter } => {
                write!(f, "Voted(proposal={}, voter={})", proposal_id, voter)
            }
        }
    }
}

/// Receiver of ledger notifications. Must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: LedgerEvent);
}

/// Logs and then forwards to the wrapped sink
pub(crate) fn dispatch(sink: &dyn EventSink, event: LedgerEvent) {
    info!(event = %event, "ledger event");
    sink.emit(event);
}

/// Discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: LedgerEvent) {}
}

/// Append-only in-memory event log
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LedgerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far, oldest first
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: LedgerEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: LedgerEvent) {
        (**self).emit(event);
    }
}

/// Forwards events into an unbounded tokio channel
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<LedgerEvent>,
}

impl ChannelSink {
    /// Create a sink together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LedgerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: mpsc::UnboundedSender<LedgerEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: LedgerEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!(event = %e.0, "event receiver dropped");
        }
    }
}
