use std::sync::Arc;

use super::{ChatLog, ChatModel, Message};
use crate::context::{self, ScheduleContext, ASSISTANT_PREAMBLE};

/// What to send: the bare conversation, or the conversation preceded by a
/// system prompt built from the planner's data.
#[derive(Debug, Clone)]
pub enum ChatInput {
    Plain(Vec<Message>),
    Contextual(Vec<Message>, ScheduleContext),
}

impl ChatInput {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            ChatInput::Plain(messages) => messages,
            ChatInput::Contextual(messages, ctx) => {
                let mut out = Vec::with_capacity(messages.len() + 1);
                out.push(Message::system(ctx.system_prompt()));
                out.extend(messages);
                out
            }
        }
    }
}

/// Forwards conversations to the model and returns its reply text.
///
/// Failures come back as a readable reply string rather than an error, so
/// callers can show them in the transcript like any other answer.
#[derive(Clone)]
pub struct ChatClient {
    model: Arc<dyn ChatModel>,
    log: ChatLog,
}

impl ChatClient {
    pub fn new(model: Arc<dyn ChatModel>, log: ChatLog) -> Self {
        Self { model, log }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn chat(&self, input: ChatInput) -> String {
        let messages = input.into_messages();
        log::info!(
            "[CHAT] Sending {} messages to {}",
            messages.len(),
            self.model.model_name()
        );

        let reply = match self.model.generate_text(messages.clone()).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("[CHAT] Model call failed: {}", e);
                format!("Error connecting to Ollama: {}", e)
            }
        };

        self.log.record(self.model.model_name(), &messages, &reply).await;
        reply
    }

    /// Ask for help with an explicit task list instead of the stored plans.
    pub async fn process_planning_request<S: AsRef<str>>(
        &self,
        message: &str,
        current_tasks: &[S],
    ) -> String {
        let prompt = context::planning_request_prompt(message, current_tasks);
        self.chat(ChatInput::Plain(vec![
            Message::system(ASSISTANT_PREAMBLE),
            Message::user(prompt),
        ]))
        .await
    }
}
