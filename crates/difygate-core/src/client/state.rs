//! Per-session conversation state.
//!
//! A transcript of [`ChatTurn`]s plus the upstream conversation handle.
//! All mutation goes through the transition methods below.

use difygate_types::chat::ChatTurn;

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    turns: Vec<ChatTurn>,
    conversation_id: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Handle to echo on the next chat call; `None` starts a new conversation.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(content));
    }

    /// Store the handle returned by upstream. An empty handle clears it.
    pub fn adopt_conversation_id(&mut self, id: &str) {
        self.conversation_id = if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        };
    }

    /// Forget the transcript but keep talking in the same conversation.
    pub fn clear_history(&mut self) {
        self.turns.clear();
    }

    /// Forget the transcript and the conversation handle.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.conversation_id = None;
    }
}

#[cfg(test)]
mod tests {
    use difygate_types::chat::ChatRole;

    use super::*;

    #[test]
    fn test_turns_are_ordered() {
        let mut state = ConversationState::new();
        state.push_user("hello");
        state.push_assistant("hi");

        let roles: Vec<ChatRole> = state.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
        assert_eq!(state.turns()[1].content, "hi");
    }

    #[test]
    fn test_adopt_and_reset() {
        let mut state = ConversationState::new();
        state.adopt_conversation_id("c1");
        state.push_user("x");
        assert_eq!(state.conversation_id(), Some("c1"));

        state.reset();
        assert!(state.turns().is_empty());
        assert!(state.conversation_id().is_none());
    }

    #[test]
    fn test_clear_history_keeps_handle() {
        let mut state = ConversationState::new();
        state.adopt_conversation_id("c1");
        state.push_user("x");

        state.clear_history();
        assert!(state.turns().is_empty());
        assert_eq!(state.conversation_id(), Some("c1"));
    }

    #[test]
    fn test_empty_handle_clears() {
        let mut state = ConversationState::new();
        state.adopt_conversation_id("c1");
        state.adopt_conversation_id("");
        assert!(state.conversation_id().is_none());
    }
}
