// Event Sink Tests
// Tests for ProposalCreated / Voted notifications reaching observers

use std::sync::Arc;
use votechain::{
    ChannelSink, Identity, LedgerConfig, LedgerEvent, ManualClock, RecordingSink, VotingLedger,
};

const START: u64 = 1_700_000_000;

fn recorded_ledger() -> (VotingLedger, Identity, ManualClock, Arc<RecordingSink>) {
    let admin = Identity::generate();
    let clock = ManualClock::new(START);
    let sink = Arc::new(RecordingSink::new());
    let ledger = VotingLedger::new(LedgerConfig::new(admin), clock.clone(), sink.clone());
    (ledger, admin, clock, sink)
}

// ============================================================================
// RECORDING SINK
// ============================================================================

#[test]
fn test_create_emits_proposal_created() {
    let (mut ledger, admin, _, sink) = recorded_ledger();

    ledger.create_proposal(&admin, "Proposal 1", 60).unwrap();

    assert_eq!(
        sink.events(),
        vec![LedgerEvent::ProposalCreated {
            id: 1,
            description: "Proposal 1".into(),
            deadline: START + 3_600,
        }]
    );
}

#[test]
fn test_vote_emits_voted() {
    let (mut ledger, admin, _, sink) = recorded_ledger();
    let voter = Identity::generate();

    ledger.create_proposal(&admin, "Proposal 1", 60).unwrap();
    ledger.vote(&voter, 1).unwrap();

    assert_eq!(sink.len(), 2);
    assert_eq!(
        sink.events()[1],
        LedgerEvent::Voted {
            proposal_id: 1,
            voter
        }
    );
}

#[test]
fn test_failed_calls_emit_nothing() {
    let (mut ledger, admin, clock, sink) = recorded_ledger();
    let outsider = Identity::generate();

    assert!(ledger.create_proposal(&outsider, "x", 60).is_err());
    assert!(ledger.create_proposal(&admin, "", 60).is_err());
    assert!(ledger.create_proposal(&admin, "x", 0).is_err());
    assert!(ledger.vote(&outsider, 1).is_err());
    assert!(sink.is_empty());

    ledger.create_proposal(&admin, "x", 1).unwrap();
    ledger.vote(&outsider, 1).unwrap();
    assert!(ledger.vote(&outsider, 1).is_err());
    clock.advance(120);
    assert!(ledger.vote(&Identity::generate(), 1).is_err());

    assert_eq!(sink.len(), 2);
}

#[test]
fn test_event_display() {
    let event = LedgerEvent::ProposalCreated {
        id: 3,
        description: "Fund the park".into(),
        deadline: 99,
    };
    assert_eq!(
        event.to_string(),
        "ProposalCreated(id=3, description=\"Fund the park\", deadline=99)"
    );
}

#[test]
fn test_event_serde_roundtrip() {
    let event = LedgerEvent::Voted {
        proposal_id: 7,
        voter: Identity::generate(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: LedgerEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

// ============================================================================
// CHANNEL SINK
// ============================================================================

#[tokio::test]
async fn test_channel_sink_delivers_in_order() {
    let admin = Identity::generate();
    let voter = Identity::generate();
    let (sink, mut rx) = ChannelSink::channel();
    let mut ledger = VotingLedger::new(LedgerConfig::new(admin), ManualClock::new(START), sink);

    ledger.create_proposal(&admin, "A", 5).unwrap();
    ledger.vote(&voter, 1).unwrap();
    drop(ledger);

    assert!(matches!(
        rx.recv().await,
        Some(LedgerEvent::ProposalCreated { id: 1, .. })
    ));
    assert_eq!(
        rx.recv().await,
        Some(LedgerEvent::Voted {
            proposal_id: 1,
            voter
        })
    );
    assert_eq!(rx.recv().await, None);
}
