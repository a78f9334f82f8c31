//! Acceptance tests for the link0 protocol crate.
//!
//! Tests cover:
//! - Trait object safety (Arc<dyn Trait> is Send + Sync)
//! - Chain model invariants through the public API
//! - Draft wire-shape round-trips
//! - Mock implementations honoring the trait contracts

use link0::test_utils::{MemoryDraft, MockCatalog, PassthroughEvaluator, ScriptedBackend};
use link0::*;
use serde_json::json;
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Object Safety: Arc<dyn Trait> compiles and is Send + Sync
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn _assert_send_sync<T: Send + Sync>() {}

#[test]
fn arc_catalog_is_send_sync() {
    _assert_send_sync::<Arc<dyn AgentCatalog>>();
}

#[test]
fn arc_simulation_backend_is_send_sync() {
    _assert_send_sync::<Arc<dyn SimulationBackend>>();
}

#[test]
fn arc_draft_store_is_send_sync() {
    _assert_send_sync::<Arc<dyn DraftStore>>();
}

#[test]
fn arc_evaluator_is_send_sync() {
    _assert_send_sync::<Arc<dyn TransformEvaluator>>();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Mock implementations honor the trait contracts
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn mock_catalog_resolves_team_members() {
    let catalog = MockCatalog::with_team(&["a", "b"]);
    let team = catalog.team().await.unwrap();
    assert_eq!(team.len(), 2);
    assert!(catalog.agent(&"a".into()).await.unwrap().is_some());
    assert!(catalog.agent(&"missing".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn mock_catalog_records_created_agents() {
    let catalog = MockCatalog::with_team(&["a"]);
    let record = catalog
        .create_agent(NewAgent {
            title: "Pipeline".into(),
            description: "Two agents in a trench coat".into(),
            input: None,
            input_example: None,
            output: None,
            output_example: None,
            agent_endpoint: "internal".into(),
            kind: AgentKind::Chain,
            configuration: None,
            credits_per_run: 1,
            stars: 0,
            icon_svg: None,
        })
        .await
        .unwrap();
    assert_eq!(catalog.created().len(), 1);
    assert!(catalog.agent(&record.id).await.unwrap().is_some());
}

#[tokio::test]
async fn scripted_backend_echoes_preceding_into_flow() {
    let backend = ScriptedBackend::new();
    let env = backend
        .simulate_environment(&"b".into(), "hello", &["a".into()])
        .await
        .unwrap();
    assert_eq!(env.prompt, "hello");
    assert_eq!(env.flow.len(), 1);
    assert_eq!(env.flow[0].agent_id.as_str(), "a");
}

#[tokio::test]
async fn memory_draft_load_save_clear() {
    let store = MemoryDraft::new();
    assert!(store.load(CHAIN_DRAFT_SLOT).await.unwrap().is_none());
    store
        .save(CHAIN_DRAFT_SLOT, json!({"agents": []}))
        .await
        .unwrap();
    assert_eq!(
        store.load(CHAIN_DRAFT_SLOT).await.unwrap(),
        Some(json!({"agents": []}))
    );
    store.clear(CHAIN_DRAFT_SLOT).await.unwrap();
    assert!(store.load(CHAIN_DRAFT_SLOT).await.unwrap().is_none());
}

#[tokio::test]
async fn passthrough_evaluator_returns_input() {
    let out = PassthroughEvaluator
        .evaluate("function transform(env) { return env; }", &json!({"x": 1}))
        .await
        .unwrap();
    assert_eq!(out, json!({"x": 1}));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Serde round-trips on the wire-facing types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn simulated_environment_round_trips() {
    let env = SimulatedEnvironment {
        prompt: "hi".into(),
        input: json!({"q": "hi"}),
        flow: vec![FlowEntry {
            agent_id: "a".into(),
            result: json!({"text": "out"}),
            execution_id: ExecutionId::new("exec-0"),
        }],
    };
    let json = serde_json::to_value(&env).unwrap();
    assert_eq!(json["flow"][0]["agentId"], "a");
    assert_eq!(json["flow"][0]["executionId"], "exec-0");
    let back: SimulatedEnvironment = serde_json::from_value(json).unwrap();
    assert_eq!(back, env);
}

#[test]
fn new_agent_serializes_chain_kind_under_type_key() {
    let agent = NewAgent {
        title: "Pipeline".into(),
        description: "desc".into(),
        input: Some(json!({"type": "object"})),
        input_example: None,
        output: None,
        output_example: None,
        agent_endpoint: "internal".into(),
        kind: AgentKind::Chain,
        configuration: Some(json!({"agents": []})),
        credits_per_run: 1,
        stars: 0,
        icon_svg: None,
    };
    let json = serde_json::to_value(&agent).unwrap();
    assert_eq!(json["type"], "chain");
    assert_eq!(json["agentEndpoint"], "internal");
}
