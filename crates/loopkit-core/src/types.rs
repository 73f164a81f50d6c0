//! Core types for Loopkit — the message and tool-call data model.
//!
//! These types model the OpenAI chat completions format spoken by every
//! endpoint implementation. Roles are a Rust enum instead of stringly-typed
//! dicts, so a malformed transcript is a compile error rather than a 400
//! from the provider.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// One turn in a conversation.
///
/// Each variant maps to a `role` field value on the wire. Tool results
/// carry the id of the call that produced them so results can be paired
/// with requests when a step runs several tools.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },

    #[serde(rename = "assistant")]
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },

    #[serde(rename = "tool")]
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Create an assistant message with text content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create an assistant message recording requested tool calls.
    ///
    /// `content` is whatever visible text accompanied the request
    /// (often none).
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant {
            content,
            tool_calls: Some(tool_calls),
        }
    }

    /// Create a tool result message, tagged with its originating call id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Tool Calls (function calling)
// ─────────────────────────────────────────────

/// A tool invocation requested by the model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Unique ID for this call (used to match results back to requests).
    pub id: String,
    /// Always "function" in the current OpenAI API.
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to call.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        ToolCall {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// The function name and arguments within a tool call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// Name of the tool to call.
    pub name: String,
    /// JSON-encoded arguments string, as produced by the model.
    pub arguments: String,
}

// ─────────────────────────────────────────────
// Tool Definitions (for endpoint requests)
// ─────────────────────────────────────────────

/// Definition of a tool, sent to the model so it knows what it may invoke.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Always "function".
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function schema.
    pub function: FunctionDefinition,
}

/// Schema of a function tool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

// ─────────────────────────────────────────────
// Step Result
// ─────────────────────────────────────────────

/// The outcome of one endpoint call: text and/or requested tool calls.
///
/// A step is final exactly when the model requested no tool calls.
#[derive(Clone, Debug, Default)]
pub struct StepResult {
    /// Assistant text, if any (may be absent when only tools were requested).
    pub text: Option<String>,
    /// Tool calls requested by the model, in the order it returned them.
    pub tool_calls: Vec<ToolCall>,
    /// Why the model stopped generating (e.g. "stop", "tool_calls").
    pub finish_reason: Option<String>,
    /// Token usage statistics, when the provider reports them.
    pub usage: Option<UsageInfo>,
}

impl StepResult {
    /// Create a final step result carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        StepResult {
            text: Some(content.into()),
            ..Default::default()
        }
    }

    /// Create a step result requesting tool calls.
    pub fn calls(tool_calls: Vec<ToolCall>) -> Self {
        StepResult {
            tool_calls,
            ..Default::default()
        }
    }

    /// A terminal answer: no tool calls were requested.
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// Token usage statistics reported by the provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Wire types (OpenAI-compatible chat completions)
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Raw chat completion response from an OpenAI-compatible API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatCompletionResponse {
    /// Convert the first choice into a [`StepResult`].
    ///
    /// Returns `None` when the response carried no choices; the endpoint
    /// treats that as a malformed response.
    pub fn into_step_result(self) -> Option<StepResult> {
        let choice = self.choices.into_iter().next()?;
        Some(StepResult {
            text: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
            finish_reason: choice.finish_reason,
            usage: self.usage,
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
