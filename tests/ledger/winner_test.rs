// Winner Tests
// Tests for selecting the most-voted completed proposal

use votechain::{
    Identity, LedgerConfig, LedgerError, ManualClock, NullSink, VotingLedger, Winner,
};

const START: u64 = 1_700_000_000;

fn new_ledger() -> (VotingLedger, Identity, ManualClock) {
    let admin = Identity::generate();
    let clock = ManualClock::new(START);
    let ledger = VotingLedger::new(LedgerConfig::new(admin), clock.clone(), NullSink);
    (ledger, admin, clock)
}

fn cast(ledger: &mut VotingLedger, proposal_id: u64, votes: usize) {
    for _ in 0..votes {
        ledger.vote(&Identity::generate(), proposal_id).unwrap();
    }
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_no_proposals() {
    let (ledger, _, _) = new_ledger();
    assert_eq!(
        ledger.get_winner(),
        Err(LedgerError::NotFound("no proposals exist".into()))
    );
}

#[test]
fn test_no_completed_proposals() {
    let (mut ledger, admin, _) = new_ledger();
    ledger.create_proposal(&admin, "Proposal 1", 60).unwrap();

    assert_eq!(
        ledger.get_winner(),
        Err(LedgerError::NotFound("no completed proposals found".into()))
    );
}

// ============================================================================
// SELECTION
// ============================================================================

#[test]
fn test_winner_two_short_proposals() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "Proposal 1", 1).unwrap();
    ledger.create_proposal(&admin, "Proposal 2", 1).unwrap();

    cast(&mut ledger, 1, 1);
    cast(&mut ledger, 2, 2);
    clock.advance(120);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 2, vote_count: 2 }));
}

#[test]
fn test_active_proposals_ignored() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "A", 60).unwrap();
    ledger.create_proposal(&admin, "B", 1).unwrap();

    cast(&mut ledger, 1, 1);
    cast(&mut ledger, 2, 2);
    clock.advance(120);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 2, vote_count: 2 }));
}

#[test]
fn test_more_votes_on_active_proposal_do_not_count() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "A", 60).unwrap();
    ledger.create_proposal(&admin, "B", 1).unwrap();

    cast(&mut ledger, 1, 10);
    cast(&mut ledger, 2, 1);
    clock.advance(120);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 2, vote_count: 1 }));
}

#[test]
fn test_tie_goes_to_lowest_id() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "A", 1).unwrap();
    ledger.create_proposal(&admin, "B", 1).unwrap();

    cast(&mut ledger, 1, 2);
    cast(&mut ledger, 2, 2);
    clock.advance(120);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 1, vote_count: 2 }));
}

#[test]
fn test_tie_after_a_lower_count() {
    let (mut ledger, admin, clock) = new_ledger();
    for name in ["A", "B", "C", "D"] {
        ledger.create_proposal(&admin, name, 1).unwrap();
    }

    cast(&mut ledger, 1, 1);
    cast(&mut ledger, 2, 3);
    cast(&mut ledger, 3, 2);
    cast(&mut ledger, 4, 3);
    clock.advance(60);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 2, vote_count: 3 }));
}

#[test]
fn test_completed_without_votes_still_wins() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "A", 1).unwrap();
    clock.advance(60);

    assert_eq!(ledger.get_winner(), Ok(Winner { id: 1, vote_count: 0 }));
}

#[test]
fn test_winner_changes_as_more_proposals_complete() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "short", 1).unwrap();
    ledger.create_proposal(&admin, "long", 10).unwrap();

    cast(&mut ledger, 1, 1);
    cast(&mut ledger, 2, 4);

    clock.advance(60);
    assert_eq!(ledger.get_winner(), Ok(Winner { id: 1, vote_count: 1 }));

    clock.advance(600);
    assert_eq!(ledger.get_winner(), Ok(Winner { id: 2, vote_count: 4 }));
}

#[test]
fn test_winner_query_does_not_mutate() {
    let (mut ledger, admin, clock) = new_ledger();
    ledger.create_proposal(&admin, "A", 1).unwrap();
    cast(&mut ledger, 1, 3);
    clock.advance(60);

    let before = ledger.get_all_proposals();
    let first = ledger.get_winner();
    let second = ledger.get_winner();

    assert_eq!(first, second);
    assert_eq!(before, ledger.get_all_proposals());
}
