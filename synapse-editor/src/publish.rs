//! Turning a finished chain into a composite agent definition.

use link0::{AgentKind, AgentRecord, Chain, ChainDraft, LocalizedText, NewAgent};

/// Credits charged per run of a freshly published chain.
pub const DEFAULT_CREDITS_PER_RUN: u32 = 1;

/// Whether the publish action is enabled: a non-blank title, a
/// non-blank description, and more than one step. A single-agent
/// "chain" is not a composite.
pub fn can_publish(title: &str, description: &str, chain: &Chain) -> bool {
    !title.trim().is_empty() && !description.trim().is_empty() && chain.len() > 1
}

/// Build the chain-type agent definition.
///
/// The composite's externally visible contract is "first step's inputs
/// in, last step's outputs out": input schema/example come from the
/// first step's agent, output schema/example from the last step's.
pub(crate) fn composite_definition(
    title: &str,
    description: &str,
    icon_svg: Option<String>,
    first: &AgentRecord,
    last: &AgentRecord,
    chain: &Chain,
    prompt: &str,
) -> NewAgent {
    let configuration = serde_json::to_value(ChainDraft::snapshot(chain, prompt))
        .unwrap_or(serde_json::Value::Null);
    NewAgent {
        title: LocalizedText::from(title),
        description: LocalizedText::from(description),
        input: first.input.clone(),
        input_example: first.input_example.clone(),
        output: last.output.clone(),
        output_example: last.output_example.clone(),
        agent_endpoint: "internal".into(),
        kind: AgentKind::Chain,
        configuration: Some(configuration),
        credits_per_run: DEFAULT_CREDITS_PER_RUN,
        stars: 0,
        icon_svg,
    }
}
