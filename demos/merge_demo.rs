use flowrec::{
    init_tracing, ClusterResult, FlowRecConfig, NodeIdentity, ResultMerger, Rule, Violation,
};
use std::collections::HashMap;

const CONFIG: &str = r#"
[merge]
missing_permissions = "deny"

[log]
level = "debug"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FlowRecConfig::from_toml_str(CONFIG)?;
    init_tracing(&config.log)?;

    let mut client = ClusterResult::new(
        vec![Rule::new("no-self-loops").with_name("Disallow self-loop connections")],
        vec![Violation::new("no-self-loops", true, true).with_subject("proc-1", "GenerateFlowFile")],
    );

    let mut per_node = HashMap::new();
    per_node.insert(
        NodeIdentity::new("node-1", "10.0.0.1", 8443),
        ClusterResult::new(
            vec![Rule::new("no-self-loops"), Rule::new("restrict-backpressure")],
            vec![
                Violation::new("no-self-loops", true, false),
                Violation::new("restrict-backpressure", false, true),
            ],
        ),
    );
    per_node.insert(
        NodeIdentity::new("node-2", "10.0.0.2", 8443),
        ClusterResult::new(
            vec![Rule::new("restrict-backpressure")],
            vec![Violation::new("restrict-backpressure", true, true)],
        ),
    );

    let merger = ResultMerger::with_config(config.merge);
    let outcome = merger.try_merge(&mut client, &per_node)?;

    tracing::info!("Omitted as unreadable: {:?}", outcome.omitted_unreadable);
    for violation in &client.violations {
        tracing::info!("Visible violation: {} {:?}", violation.key(), violation.subject_permission);
    }
    Ok(())
}
