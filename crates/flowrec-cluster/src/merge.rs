use crate::permissions::PermissionsMerger;
use flowrec_core::{
    ClusterResult, FlowRecError, MergeConfig, MissingPermissionsPolicy, NodeIdentity, Permissions,
    Result, Rule, Violation, ViolationKey,
};
use std::collections::BTreeMap;
use std::fmt;

/// Where a record being folded came from.
#[derive(Clone, Copy)]
enum Source<'a> {
    Client,
    Node(&'a NodeIdentity),
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Client => f.write_str("client"),
            Source::Node(node) => write!(f, "node {}", node),
        }
    }
}

/// Every record reported for one [`ViolationKey`], folded so far.
struct ViolationGroup {
    representative: Violation,
    permissions: Permissions,
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Node results folded into the client.
    pub nodes: usize,
    pub rules: usize,
    pub violations: usize,
    /// Groups dropped because at least one record denied read. Sorted.
    pub omitted_unreadable: Vec<ViolationKey>,
    /// Surviving violations whose reconciled descriptor denies write.
    pub write_restricted: usize,
}

/// Folds per-node flow-analysis results into the client-facing result.
///
/// Rules are unioned by id. Violations are grouped by [`ViolationKey`] and
/// their permission descriptors AND-reduced: a group survives only if no
/// reporting record denied read, and carries the most restrictive write flag.
/// A node that omits a violation contributes nothing to its group.
///
/// The merger holds no mutable state, so one instance can serve any number
/// of concurrent merges.
#[derive(Debug, Clone, Default)]
pub struct ResultMerger {
    config: MergeConfig,
}

static_assertions::assert_impl_all!(ResultMerger: Send, Sync);

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Reconciles `per_node` into `client` in place.
    ///
    /// Total over well-formed input: `max_nodes` is not enforced here.
    ///
    /// # Panics
    /// If a violation carries no permission descriptor while the policy is
    /// [`MissingPermissionsPolicy::Reject`]. Use [`ResultMerger::try_merge`]
    /// at boundaries where such input is expected.
    pub fn merge<'a, I>(&self, client: &mut ClusterResult, per_node: I) -> MergeOutcome
    where
        I: IntoIterator<Item = (&'a NodeIdentity, &'a ClusterResult)>,
    {
        let nodes: Vec<(&NodeIdentity, &ClusterResult)> = per_node.into_iter().collect();
        match self.reconcile(client, &nodes) {
            Ok(outcome) => outcome,
            Err(e) => panic!("flow-analysis merge precondition violated: {}", e),
        }
    }

    /// Reconciles `per_node` into `client` in place, rejecting input beyond
    /// `max_nodes` or lacking permission descriptors.
    ///
    /// On error `client` is left untouched.
    pub fn try_merge<'a, I>(&self, client: &mut ClusterResult, per_node: I) -> Result<MergeOutcome>
    where
        I: IntoIterator<Item = (&'a NodeIdentity, &'a ClusterResult)>,
    {
        let nodes: Vec<(&NodeIdentity, &ClusterResult)> = per_node.into_iter().collect();
        if let Some(max) = self.config.max_nodes {
            if nodes.len() > max {
                return Err(FlowRecError::TooManyNodes {
                    count: nodes.len(),
                    max,
                });
            }
        }
        self.reconcile(client, &nodes)
    }

    /// Functional form of [`ResultMerger::try_merge`]: consumes the client
    /// result and returns the reconciled one.
    pub fn merged<'a, I>(&self, mut client: ClusterResult, per_node: I) -> Result<ClusterResult>
    where
        I: IntoIterator<Item = (&'a NodeIdentity, &'a ClusterResult)>,
    {
        self.try_merge(&mut client, per_node)?;
        Ok(client)
    }

    fn reconcile(
        &self,
        client: &mut ClusterResult,
        nodes: &[(&NodeIdentity, &ClusterResult)],
    ) -> Result<MergeOutcome> {
        let mut rules: BTreeMap<String, Rule> = BTreeMap::new();
        let mut groups: BTreeMap<ViolationKey, ViolationGroup> = BTreeMap::new();

        // Client first, so its copies become the representatives.
        self.absorb(&mut rules, &mut groups, client, Source::Client)?;
        for &(node, result) in nodes {
            self.absorb(&mut rules, &mut groups, result, Source::Node(node))?;
        }

        let mut outcome = MergeOutcome {
            nodes: nodes.len(),
            ..Default::default()
        };
        let mut violations = Vec::with_capacity(groups.len());
        for (key, group) in groups {
            if !group.permissions.can_read {
                tracing::debug!("ResultMerger: omitting unreadable violation {}", key);
                outcome.omitted_unreadable.push(key);
                continue;
            }
            if !group.permissions.can_write {
                outcome.write_restricted += 1;
            }
            let mut violation = group.representative;
            violation.subject_permission = Some(group.permissions);
            violations.push(violation);
        }

        client.rules = rules.into_values().collect();
        client.violations = violations;
        outcome.rules = client.rules.len();
        outcome.violations = client.violations.len();

        tracing::info!(
            "ResultMerger: merged {} node results ({} rules, {} violations, {} omitted as unreadable)",
            outcome.nodes,
            outcome.rules,
            outcome.violations,
            outcome.omitted_unreadable.len()
        );
        Ok(outcome)
    }

    fn absorb(
        &self,
        rules: &mut BTreeMap<String, Rule>,
        groups: &mut BTreeMap<ViolationKey, ViolationGroup>,
        result: &ClusterResult,
        source: Source<'_>,
    ) -> Result<()> {
        for rule in &result.rules {
            rules.entry(rule.id.clone()).or_insert_with(|| rule.clone());
        }

        for violation in &result.violations {
            let permissions = self.permissions_of(violation, source)?;
            groups
                .entry(violation.key())
                .and_modify(|group| PermissionsMerger::merge(&mut group.permissions, &permissions))
                .or_insert_with(|| ViolationGroup {
                    representative: violation.clone(),
                    permissions,
                });
        }
        Ok(())
    }

    fn permissions_of(&self, violation: &Violation, source: Source<'_>) -> Result<Permissions> {
        match (violation.subject_permission, self.config.missing_permissions) {
            (Some(permissions), _) => Ok(permissions),
            (None, MissingPermissionsPolicy::Reject) => Err(FlowRecError::MissingPermissions {
                rule_id: violation.rule_id.clone(),
                source_name: source.to_string(),
            }),
            (None, MissingPermissionsPolicy::Deny) => {
                tracing::warn!(
                    "ResultMerger: violation of rule '{}' from {} has no permission descriptor, treating as denied",
                    violation.rule_id,
                    source
                );
                Ok(Permissions::deny_all())
            }
        }
    }
}
