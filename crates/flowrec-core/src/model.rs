use serde::{Deserialize, Serialize};
use std::fmt;

/// How a rule's violations are treated by the flow designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnforcementPolicy {
    Enforce,
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleState {
    Enabled,
    Disabled,
}

/// The visibility descriptor a node computed for the subject of a violation.
///
/// Node-local: two nodes may disagree about the same logical violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_read: bool,
    pub can_write: bool,
}

impl Permissions {
    pub const fn new(can_read: bool, can_write: bool) -> Self {
        Self { can_read, can_write }
    }

    pub const fn allow_all() -> Self {
        Self::new(true, true)
    }

    pub const fn deny_all() -> Self {
        Self::new(false, false)
    }

    /// Most restrictive combination of both descriptors.
    pub const fn intersect(self, other: Permissions) -> Self {
        Self::new(self.can_read && other.can_read, self.can_write && other.can_write)
    }
}

/// A flow-analysis rule definition. Identity is `id` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_policy: Option<EnforcementPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RuleState>,
}

impl Rule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Logical identity of a violation across nodes.
///
/// Node-reported copies of the same violation are structurally identical apart
/// from their permission descriptor, so the rule id and enabled flag are
/// sufficient to group them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViolationKey {
    pub rule_id: String,
    pub enabled: bool,
}

impl fmt::Display for ViolationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[enabled={}]", self.rule_id, self.enabled)
    }
}

/// One instance of a rule failing against a flow component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_policy: Option<EnforcementPolicy>,
    /// `None` only when the producing layer broke its contract.
    #[serde(rename = "subjectPermissionDto", default)]
    pub subject_permission: Option<Permissions>,
}

impl Violation {
    pub fn new(rule_id: impl Into<String>, can_read: bool, can_write: bool) -> Self {
        Self {
            rule_id: rule_id.into(),
            subject_permission: Some(Permissions::new(can_read, can_write)),
            ..Default::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_subject(mut self, subject_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self.subject_display_name = Some(display_name.into());
        self
    }

    pub fn without_permissions(mut self) -> Self {
        self.subject_permission = None;
        self
    }

    pub fn key(&self) -> ViolationKey {
        ViolationKey {
            rule_id: self.rule_id.clone(),
            enabled: self.enabled,
        }
    }
}

/// Identifies a cluster node that answered a flow-analysis query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIdentity {
    pub id: String,
    pub api_address: String,
    pub api_port: u16,
}

impl NodeIdentity {
    pub fn new(id: impl Into<String>, api_address: impl Into<String>, api_port: u16) -> Self {
        Self {
            id: id.into(),
            api_address: api_address.into(),
            api_port,
        }
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.id, self.api_address, self.api_port)
    }
}

/// The flow-analysis answer of one node, or the reconciled answer handed to
/// the API client.
///
/// Both collections have set semantics keyed by [`Rule::id`] and
/// [`Violation::key`]; their order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(rename = "ruleViolations", default)]
    pub violations: Vec<Violation>,
}

impl ClusterResult {
    pub fn new(rules: Vec<Rule>, violations: Vec<Violation>) -> Self {
        Self { rules, violations }
    }
}
