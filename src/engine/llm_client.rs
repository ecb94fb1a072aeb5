use std::cell::Cell;
use std::env;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::error::EngineError;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};
use crate::engine::toolset;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Generative provider backed by an OpenAI-compatible chat-completions
/// endpoint. One blocking request per call, no retries.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    tokens: Cell<u64>,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            tokens: Cell::new(0),
        }
    }

    /// Build a client from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and
    /// `OPENAI_MODEL`, falling back to the public endpoint defaults.
    pub fn from_env() -> Self {
        Self::new(
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            env::var("OPENAI_API_KEY").unwrap_or_default(),
            env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        )
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u64,
}

impl GenerativeProvider for OpenAiClient {
    fn generate(
        &self,
        toolset_kinds: &[ToolKind],
        force: Option<ToolKind>,
        messages: &[PromptMessage],
    ) -> Result<Payload, EngineError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools: toolset_kinds.iter().map(|kind| toolset::schema(*kind)).collect(),
            tool_choice: force.map(|kind| {
                serde_json::json!({
                    "type": "function",
                    "function": { "name": kind.function_name() }
                })
            }),
        };

        debug!(model = %self.model, tools = toolset_kinds.len(), "provider call");

        let response: ChatCompletionResponse = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(usage) = &response.usage {
            self.tokens.set(self.tokens.get() + usage.total_tokens);
        }

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(EngineError::ProviderEmptyResponse)?;

        if let Some(calls) = message.tool_calls {
            for call in calls {
                let Some(kind) = ToolKind::from_function_name(&call.function.name) else {
                    warn!(tool = %call.function.name, "provider invoked an unoffered tool");
                    continue;
                };
                let args: Value = serde_json::from_str(&call.function.arguments).map_err(
                    |source| EngineError::ProviderArgumentParse {
                        tool: call.function.name.clone(),
                        source,
                    },
                )?;
                return toolset::decode(kind, args);
            }
            return Err(EngineError::ProviderEmptyResponse);
        }

        match message.content {
            Some(text) if !text.is_empty() => Ok(Payload::Narration(text)),
            _ => Err(EngineError::ProviderEmptyResponse),
        }
    }

    fn tokens(&self) -> u64 {
        self.tokens.get()
    }

    fn set_tokens(&self, tokens: u64) {
        self.tokens.set(tokens);
    }
}
