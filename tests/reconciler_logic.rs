//! Two-pass confirmation semantics of the missing-member reconciler,
//! exercised over the pure set arithmetic.

use std::collections::HashSet;

use postal_pinger_bot::reconciler::absent_members;

fn present(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn present_members_are_never_flagged() {
    let registered = owned(&["1", "2"]);
    assert!(absent_members(&registered, &present(&["1", "2", "3"])).is_empty());
}

#[test]
fn a_member_survives_the_cycle_where_they_disappear() {
    let registered = owned(&["1", "2"]);

    // Cycle 1: member "2" has just left. No prior candidates, so the
    // confirmation pass purges nothing; "2" only becomes a candidate.
    let prior_candidates: Vec<String> = Vec::new();
    let confirmed = absent_members(&prior_candidates, &present(&["1"]));
    assert!(confirmed.is_empty());
    let candidates = absent_members(&registered, &present(&["1"]));
    assert_eq!(candidates, owned(&["2"]));
}

#[test]
fn a_member_who_reappears_is_reprieved() {
    let registered = owned(&["1", "2"]);
    let candidates = owned(&["2"]);

    // Cycle 2: "2" is back before the confirmation check. Nothing is
    // purged and the fresh candidate set drops them.
    let confirmed = absent_members(&candidates, &present(&["1", "2"]));
    assert!(confirmed.is_empty());
    let next_candidates = absent_members(&registered, &present(&["1", "2"]));
    assert!(next_candidates.is_empty());
}

#[test]
fn a_member_absent_at_two_consecutive_boundaries_is_purged() {
    let registered = owned(&["1", "2"]);
    let candidates = owned(&["2"]);

    // Cycle 2: "2" is still gone, so the confirmation pass takes them.
    let confirmed = absent_members(&candidates, &present(&["1"]));
    assert_eq!(confirmed, owned(&["2"]));

    // And they stay flagged in the recomputed set until the purge lands.
    let remaining = owned(&["1"]);
    let next_candidates = absent_members(&remaining, &present(&["1"]));
    assert!(next_candidates.is_empty());
}

#[test]
fn candidate_sets_are_replaced_not_accumulated() {
    // A candidate who purged their own registrations between cycles must
    // not reappear in the fresh set: it is computed from current
    // registrations only.
    let registered = owned(&["1"]);
    let fresh = absent_members(&registered, &present(&["1"]));
    assert!(fresh.is_empty());
}
