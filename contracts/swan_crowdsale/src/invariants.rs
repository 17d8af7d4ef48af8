#![allow(dead_code)]

extern crate std;

use crate::types::{Accounting, SaleState, Stage};

/// INV-1: The pause overlay always remembers the stage it covers, and the
/// stage pointer is never moved while paused.
pub fn assert_pause_overlay_consistent(state: &SaleState) {
    if state.paused {
        assert_eq!(
            state.pre_pause_stage,
            Some(state.stage),
            "INV-1 violated: paused at {:?} but pre_pause_stage is {:?}",
            state.stage,
            state.pre_pause_stage
        );
    } else {
        assert_eq!(
            state.pre_pause_stage, None,
            "INV-1 violated: pre_pause_stage set while not paused"
        );
    }
}

/// INV-2: `started` is true exactly when the chain has moved past `NotStarted`
/// into or beyond the first open stage.
pub fn assert_started_matches_stage(state: &SaleState) {
    match state.stage {
        Stage::NotStarted => assert!(
            !state.started,
            "INV-2 violated: started before any stage opened"
        ),
        Stage::Finalized => {}
        _ => assert!(
            state.started,
            "INV-2 violated: stage {:?} reached without started",
            state.stage
        ),
    }
}

/// INV-3: Stage transitions are monotonic along the chain, except for
/// finalization which may be entered from anywhere.
pub fn assert_forward_transition(from: Stage, to: Stage) {
    let valid = to == Stage::Finalized || from.next() == Some(to) || from == to;
    assert!(
        valid,
        "INV-3 violated: invalid stage transition from {:?} to {:?}",
        from, to
    );
}

/// INV-4: Tokens leaving the pool equal tokens issued to buyers, with no
/// rounding leak in either direction.
pub fn assert_pool_conservation(pool_before: i128, pool_after: i128, issued: i128) {
    assert_eq!(
        pool_before - pool_after,
        issued,
        "INV-4 violated: pool moved by {} but {} tokens were issued",
        pool_before - pool_after,
        issued
    );
}

/// INV-5: `total_raised` equals the sum of accepted payments.
pub fn assert_total_raised(ledger: &Accounting, accepted: &[i128]) {
    let expected: i128 = accepted.iter().sum();
    assert_eq!(
        ledger.total_raised, expected,
        "INV-5 violated: total_raised {} != sum of payments {}",
        ledger.total_raised, expected
    );
}

/// INV-6: Counters never go negative.
pub fn assert_counters_non_negative(ledger: &Accounting) {
    assert!(ledger.total_raised >= 0, "INV-6 violated: total_raised < 0");
    assert!(ledger.tokens_sold >= 0, "INV-6 violated: tokens_sold < 0");
    assert!(
        ledger.private_stage_sold >= 0,
        "INV-6 violated: private_stage_sold < 0"
    );
}

/// Run all stateless invariants.
pub fn assert_all_sale_invariants(state: &SaleState, ledger: &Accounting) {
    assert_pause_overlay_consistent(state);
    assert_started_matches_stage(state);
    assert_counters_non_negative(ledger);
}
