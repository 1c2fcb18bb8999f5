//! # Randomized Reconciliation Check
//!
//! Generates random clusters and checks the merged result against a direct
//! per-key computation of the union and visibility rules, and that repeating
//! a merge from the same starting client reproduces the result.

use flowrec::{ClusterResult, NodeIdentity, Permissions, ResultMerger, Rule, Violation, ViolationKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

const RULE_POOL: usize = 12;

fn random_result(rng: &mut StdRng) -> ClusterResult {
    let mut rules = Vec::new();
    let mut violations = Vec::new();
    for r in 0..RULE_POOL {
        if rng.gen_bool(0.5) {
            rules.push(Rule::new(format!("rule-{}", r)));
        }
        if rng.gen_bool(0.4) {
            violations.push(
                Violation::new(format!("rule-{}", r), rng.gen_bool(0.8), rng.gen_bool(0.7))
                    .with_enabled(rng.gen_bool(0.5)),
            );
        }
    }
    ClusterResult::new(rules, violations)
}

/// Straightforward reference: every record of a key, AND-ed.
fn expected_violations(all: &[&ClusterResult]) -> BTreeMap<ViolationKey, Permissions> {
    let mut seen: BTreeMap<ViolationKey, Vec<Permissions>> = BTreeMap::new();
    for result in all {
        for v in &result.violations {
            seen.entry(v.key()).or_default().push(v.subject_permission.unwrap());
        }
    }
    seen.into_iter()
        .map(|(key, perms)| {
            let can_read = perms.iter().all(|p| p.can_read);
            let can_write = perms.iter().all(|p| p.can_write);
            (key, Permissions::new(can_read, can_write))
        })
        .filter(|(_, p)| p.can_read)
        .collect()
}

/// Cross-checks 500 seeded random clusters against the reference computation.
#[test]
fn test_random_clusters_match_reference() {
    let t = Instant::now();
    let mut rng = StdRng::seed_from_u64(0x5EED_F10E);
    let merger = ResultMerger::new();

    for _ in 0..500 {
        let client = random_result(&mut rng);
        let node_count = rng.gen_range(0..5);
        let per_node: HashMap<NodeIdentity, ClusterResult> = (0..node_count)
            .map(|n| {
                (
                    NodeIdentity::new(format!("node-{}", n), "127.0.0.1", 8000 + n as u16),
                    random_result(&mut rng),
                )
            })
            .collect();

        let mut all: Vec<&ClusterResult> = vec![&client];
        all.extend(per_node.values());
        let expected_rules: BTreeSet<String> =
            all.iter().flat_map(|r| r.rules.iter().map(|rule| rule.id.clone())).collect();
        let expected = expected_violations(&all);

        let mut merged = client.clone();
        merger.merge(&mut merged, &per_node);

        assert_eq!(merged.rules.len(), expected_rules.len(), "Rule ids must appear exactly once");
        assert_eq!(merged.rule_ids(), expected_rules);
        let actual: BTreeMap<ViolationKey, Permissions> = merged
            .violations
            .iter()
            .map(|v| (v.key(), v.subject_permission.unwrap()))
            .collect();
        assert_eq!(actual.len(), merged.violations.len(), "Violation keys must be unique");
        assert_eq!(actual, expected);

        // Same starting client, same node results: same answer.
        let mut again = client.clone();
        merger.merge(&mut again, &per_node);
        assert_eq!(again, merged, "Merging identical inputs must give identical results");
    }

    println!("test_random_clusters_match_reference: Testing Overhead = {:?}", t.elapsed());
}
