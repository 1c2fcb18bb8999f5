use crate::model::{ClusterResult, Permissions, ViolationKey};
use std::collections::BTreeSet;

/// Order-free projection of a [`ClusterResult`] used for structural comparison.
///
/// Rules compare by id; violations compare by key plus permission descriptor.
/// Descriptive fields are deliberately left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub rule_ids: BTreeSet<String>,
    pub violations: BTreeSet<(ViolationKey, Option<Permissions>)>,
}

impl ClusterResult {
    pub fn view(&self) -> ResultView {
        ResultView {
            rule_ids: self.rule_ids(),
            violations: self
                .violations
                .iter()
                .map(|v| (v.key(), v.subject_permission))
                .collect(),
        }
    }

    /// Set equality on rule ids and violation identity plus visibility.
    pub fn structurally_eq(&self, other: &ClusterResult) -> bool {
        self.view() == other.view()
    }

    pub fn rule_ids(&self) -> BTreeSet<String> {
        self.rules.iter().map(|r| r.id.clone()).collect()
    }

    pub fn violation_keys(&self) -> BTreeSet<ViolationKey> {
        self.violations.iter().map(|v| v.key()).collect()
    }
}
