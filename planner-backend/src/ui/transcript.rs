use crate::ai::{Message, MessageRole};

pub const THINKING_PLACEHOLDER: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    /// Part of the conversation sent to the model
    Conversation,
    /// Shown to the user only (save confirmations and the like)
    Notice,
}

#[derive(Debug, Clone)]
struct Entry {
    message: Message,
    kind: EntryKind,
}

/// In-memory chat history for one front-end session.
///
/// Sending again while a reply is outstanding is allowed; replies are
/// appended in whatever order they arrive.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    pending: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChatState {
        if self.pending > 0 {
            ChatState::AwaitingReply
        } else {
            ChatState::Idle
        }
    }

    /// Record a user turn and start waiting for its reply.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(Entry {
            message: Message::user(text),
            kind: EntryKind::Conversation,
        });
        self.pending += 1;
    }

    /// Record a model reply, settling one outstanding request.
    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.entries.push(Entry {
            message: Message::assistant(text),
            kind: EntryKind::Conversation,
        });
        self.pending = self.pending.saturating_sub(1);
    }

    /// Record an assistant-styled line that is not sent to the model.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.entries.push(Entry {
            message: Message::assistant(text),
            kind: EntryKind::Notice,
        });
    }

    /// The conversation as sent to the model, notices excluded
    pub fn conversation(&self) -> Vec<Message> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Conversation)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visible history, with a "Thinking..." line while a reply is outstanding.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.entries.iter().map(|e| render(&e.message)).collect();
        if self.state() == ChatState::AwaitingReply {
            lines.push(render(&Message::assistant(THINKING_PLACEHOLDER)));
        }
        lines
    }
}

pub fn render(message: &Message) -> String {
    let prefix = match message.role {
        MessageRole::User => "You",
        MessageRole::Assistant => "Assistant",
        MessageRole::System => "System",
    };
    format!("{}: {}", prefix, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_follows_pending_requests() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.state(), ChatState::Idle);

        transcript.push_user("first");
        transcript.push_user("second");
        assert_eq!(transcript.state(), ChatState::AwaitingReply);

        transcript.push_reply("one");
        assert_eq!(transcript.state(), ChatState::AwaitingReply);
        transcript.push_reply("two");
        assert_eq!(transcript.state(), ChatState::Idle);
    }

    #[test]
    fn test_render_lines_with_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_user("What's due?");
        assert_eq!(
            transcript.render_lines(),
            vec!["You: What's due?".to_string(), "Assistant: Thinking...".to_string()]
        );

        transcript.push_reply("The report.");
        assert_eq!(
            transcript.render_lines(),
            vec!["You: What's due?".to_string(), "Assistant: The report.".to_string()]
        );
    }

    #[test]
    fn test_notices_not_sent_to_model() {
        let mut transcript = Transcript::new();
        transcript.push_notice("Task added for 2025-01-10: Write report");
        transcript.push_user("hello");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.conversation(), vec![Message::user("hello")]);
        assert_eq!(transcript.state(), ChatState::AwaitingReply);
    }
}
