//! The connector state machine — per-step completeness, derived from
//! model content plus the transient test record of the open panel.
//!
//! The states are ordered by increasing completeness. Transitions are
//! pure functions over two inputs: the durable [`ChainStep`] and the
//! ephemeral [`StepSession`] the editor keeps for whichever step is
//! currently open. Nothing here renders anything — UI affordances
//! (which buttons are enabled, which tab advances) are a projection of
//! [`ConnectorState`].

use crate::chain::{ChainStep, ConnectorType};

/// Completeness of a step's connector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectorState {
    /// No usable content for the chosen connector type.
    Unconfigured,
    /// Magic with a non-blank prompt, or code with non-blank source.
    Configured,
    /// A test against the simulated environment succeeded this session.
    Tested,
    /// Code generation succeeded this session; the generated source is
    /// installed and the step is now a code connector.
    Generated,
}

/// Transient record for the step whose connector panel is open.
///
/// Discarded when the panel closes or the selection moves — test
/// results never outlive the session that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSession {
    /// A transform test succeeded for this step this session.
    pub tested: bool,
    /// Code generation succeeded for this step this session.
    pub generated: bool,
}

impl StepSession {
    /// Whether "generate code" is unlocked: a test must have
    /// succeeded at least once for the open step.
    pub fn can_generate(&self) -> bool {
        self.tested
    }
}

/// True if the step has usable content for its connector type.
pub fn is_configured(step: &ChainStep) -> bool {
    match step.connector_type {
        ConnectorType::Magic => !step.connector_prompt.trim().is_empty(),
        ConnectorType::Code => !step.connector_js_code.trim().is_empty(),
    }
}

/// Derive the step's connector state.
///
/// `connector_valid` plays no part here: it records that the panel was
/// opened, not that anything about the content is correct.
pub fn connector_state(step: &ChainStep, session: &StepSession) -> ConnectorState {
    if session.generated {
        return ConnectorState::Generated;
    }
    if !is_configured(step) {
        return ConnectorState::Unconfigured;
    }
    if session.tested {
        ConnectorState::Tested
    } else {
        ConnectorState::Configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainStep;

    fn magic_step(prompt: &str) -> ChainStep {
        let mut step = ChainStep::new("a".into());
        step.connector_prompt = prompt.into();
        step
    }

    fn code_step(source: &str) -> ChainStep {
        let mut step = ChainStep::new("a".into());
        step.connector_type = ConnectorType::Code;
        step.connector_js_code = source.into();
        step
    }

    #[test]
    fn blank_magic_prompt_is_unconfigured() {
        let state = connector_state(&magic_step("   "), &StepSession::default());
        assert_eq!(state, ConnectorState::Unconfigured);
    }

    #[test]
    fn nonblank_magic_prompt_is_configured() {
        let state = connector_state(&magic_step("pick the title"), &StepSession::default());
        assert_eq!(state, ConnectorState::Configured);
    }

    #[test]
    fn blank_code_source_is_unconfigured() {
        let state = connector_state(&code_step(""), &StepSession::default());
        assert_eq!(state, ConnectorState::Unconfigured);
    }

    #[test]
    fn successful_test_advances_to_tested() {
        let session = StepSession {
            tested: true,
            generated: false,
        };
        let state = connector_state(&magic_step("pick the title"), &session);
        assert_eq!(state, ConnectorState::Tested);
    }

    #[test]
    fn generation_dominates_everything() {
        let session = StepSession {
            tested: true,
            generated: true,
        };
        let state = connector_state(&code_step("function transform(env) { return env; }"), &session);
        assert_eq!(state, ConnectorState::Generated);
    }

    #[test]
    fn generate_is_locked_until_a_test_succeeds() {
        assert!(!StepSession::default().can_generate());
        let tested = StepSession {
            tested: true,
            generated: false,
        };
        assert!(tested.can_generate());
    }

    #[test]
    fn states_order_by_completeness() {
        assert!(ConnectorState::Unconfigured < ConnectorState::Configured);
        assert!(ConnectorState::Configured < ConnectorState::Tested);
        assert!(ConnectorState::Tested < ConnectorState::Generated);
    }

    #[test]
    fn connector_valid_does_not_affect_state() {
        // connector_valid records a panel visit, not content validity.
        let mut step = magic_step("");
        step.connector_valid = true;
        let state = connector_state(&step, &StepSession::default());
        assert_eq!(state, ConnectorState::Unconfigured);
    }
}
