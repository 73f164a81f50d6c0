//! Session state — the per-run conversation history plus step counter.
//!
//! A session lives exactly as long as one run of the loop: created when the
//! run starts, dropped when it ends or is cancelled. History is append-only;
//! nothing is ever mutated in place or reordered, so the transcript sent to
//! the endpoint is always a prefix-extension of the previous one.

use serde::Serialize;

use crate::types::{Message, ToolCall};

/// Accumulated message history and step counter for one run.
///
/// Per non-final step the history grows by exactly one assistant message
/// plus one tool message per requested call; the terminal step adds exactly
/// one assistant message.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Session {
    messages: Vec<Message>,
    steps_taken: usize,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded with a system prompt.
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Session {
            messages: vec![Message::system(prompt)],
            steps_taken: 0,
        }
    }

    /// Append the user's prompt.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append a terminal assistant answer.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Append an assistant message recording requested tool calls.
    pub fn push_tool_calls(&mut self, content: Option<String>, calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant_tool_calls(content, calls));
    }

    /// Append a tool result, tagged with its originating call id.
    pub fn push_tool_result(&mut self, call_id: impl Into<String>, content: impl Into<String>) {
        self.messages.push(Message::tool_result(call_id, content));
    }

    /// Record that one endpoint call was made. Monotonically non-decreasing.
    pub fn record_step(&mut self) {
        self.steps_taken += 1;
    }

    /// Number of endpoint calls made so far.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// The full ordered transcript, as sent to the endpoint each step.
    pub fn transcript(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the session, yielding the transcript.
    pub fn into_transcript(self) -> Vec<Message> {
        self.messages
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.steps_taken(), 0);
    }

    #[test]
    fn test_system_prompt_seeds_transcript() {
        let session = Session::with_system_prompt("You are Loopkit.");
        assert_eq!(session.len(), 1);
        match &session.transcript()[0] {
            Message::System { content } => assert_eq!(content, "You are Loopkit."),
            other => panic!("expected system message, got {other:?}"),
        }
    }

    #[test]
    fn test_step_counter_monotonic() {
        let mut session = Session::new();
        session.record_step();
        session.record_step();
        assert_eq!(session.steps_taken(), 2);
    }

    #[test]
    fn test_non_final_step_growth() {
        // One assistant message + one tool result per call.
        let mut session = Session::new();
        session.push_user("get me two temperatures");
        let before = session.len();

        let calls = vec![
            ToolCall::new("c1", "get_weather", r#"{"city": "A"}"#),
            ToolCall::new("c2", "get_weather", r#"{"city": "B"}"#),
        ];
        session.push_tool_calls(None, calls);
        session.push_tool_result("c1", "18.0");
        session.push_tool_result("c2", "21.5");

        assert_eq!(session.len(), before + 1 + 2);
    }

    #[test]
    fn test_transcript_order_preserved() {
        let mut session = Session::new();
        session.push_user("hi");
        session.push_tool_calls(None, vec![ToolCall::new("c1", "t", "{}")]);
        session.push_tool_result("c1", "ok");
        session.push_assistant("done");

        let roles: Vec<&str> = session
            .transcript()
            .iter()
            .map(|m| match m {
                Message::System { .. } => "system",
                Message::User { .. } => "user",
                Message::Assistant { .. } => "assistant",
                Message::Tool { .. } => "tool",
            })
            .collect();
        assert_eq!(roles, vec!["user", "assistant", "tool", "assistant"]);
    }

    #[test]
    fn test_tool_result_keeps_call_id() {
        let mut session = Session::new();
        session.push_tool_result("call_77", "result text");
        match &session.transcript()[0] {
            Message::Tool { tool_call_id, content } => {
                assert_eq!(tool_call_id, "call_77");
                assert_eq!(content, "result text");
            }
            other => panic!("expected tool message, got {other:?}"),
        }
    }
}
