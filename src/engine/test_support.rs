use std::cell::RefCell;
use std::collections::VecDeque;

use crate::engine::error::EngineError;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};

/// Provider that replays a fixed script of payloads, one per call.
/// Calling past the end of the script fails like an empty reply.
pub struct ScriptedProvider {
    script: RefCell<VecDeque<Payload>>,
    pub calls: RefCell<Vec<Vec<ToolKind>>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Payload>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl GenerativeProvider for ScriptedProvider {
    fn generate(
        &self,
        toolset: &[ToolKind],
        _force: Option<ToolKind>,
        _messages: &[PromptMessage],
    ) -> Result<Payload, EngineError> {
        self.calls.borrow_mut().push(toolset.to_vec());
        self.script
            .borrow_mut()
            .pop_front()
            .ok_or(EngineError::ProviderEmptyResponse)
    }
}
