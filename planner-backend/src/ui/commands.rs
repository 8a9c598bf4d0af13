//! Front-end actions as plain functions: open/save the day editor, show
//! the schedule and calendar, send a chat message. A toolkit binds these
//! to its own events.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::calendar::MonthCalendar;
use super::transcript::Transcript;
use crate::ai::{ChatClient, ChatInput, Message};
use crate::context::ScheduleContext;
use crate::error::Result;
use crate::store::{DayStore, PlanDate};

pub const NO_SCHEDULE_FOUND: &str = "No schedule found";

/// Contents of the modal day editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEditor {
    pub date: PlanDate,
    pub text: String,
    /// A plan file already exists for the date
    pub existing: bool,
}

pub struct PlannerCommands {
    store: Arc<DayStore>,
    chat: Arc<ChatClient>,
    today: NaiveDate,
    transcript: Transcript,
}

impl PlannerCommands {
    pub fn new(store: Arc<DayStore>, chat: Arc<ChatClient>, today: NaiveDate) -> Self {
        Self {
            store,
            chat,
            today,
            transcript: Transcript::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// OpenDayEditor(date)
    pub async fn open_day_editor(&self, date: &str) -> Result<DayEditor> {
        let date = PlanDate::parse(date)?;
        let existing = self.store.exists(date).await?;
        let text = self.store.read(date).await?;
        Ok(DayEditor {
            date,
            text,
            existing,
        })
    }

    /// SaveDayEditor(date, text). Returns the confirmation added to the transcript.
    pub async fn save_day_editor(&mut self, date: &str, text: &str) -> Result<String> {
        let date = PlanDate::parse(date)?;
        let existing = self.store.exists(date).await?;
        self.store.write(date, text).await?;

        let notice = format!(
            "Task {} for {}: {}",
            if existing { "updated" } else { "added" },
            date,
            text
        );
        self.transcript.push_notice(notice.clone());
        Ok(notice)
    }

    /// Read-only schedule panel text
    pub async fn schedule_panel(&self) -> Result<String> {
        let schedule = self.store.read_schedule().await?;
        if schedule.trim().is_empty() {
            return Ok(NO_SCHEDULE_FOUND.to_string());
        }
        Ok(schedule.trim_end().to_string())
    }

    /// Current month with today and planned days marked
    pub async fn calendar(&self) -> Result<String> {
        let calendar = MonthCalendar::containing(self.today);
        let planned: BTreeSet<u32> = self
            .store
            .list_month(calendar.month())
            .await?
            .keys()
            .filter_map(|date| PlanDate::parse(date).ok())
            .map(|date| date.naive().day())
            .collect();
        Ok(calendar.render(self.today, &planned))
    }

    /// First half of SendChatMessage: record the user turn and capture what
    /// the request needs. `None` for blank input.
    ///
    /// The returned request owns its data, so it can run on another task
    /// while the front end stays responsive.
    pub fn begin_chat(&mut self, text: &str) -> Option<PendingChat> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push_user(text);
        Some(PendingChat {
            store: Arc::clone(&self.store),
            chat: Arc::clone(&self.chat),
            today: self.today,
            conversation: self.transcript.conversation(),
        })
    }

    /// Second half of SendChatMessage: append the reply.
    pub fn finish_chat(&mut self, reply: impl Into<String>) {
        self.transcript.push_reply(reply);
    }

    /// SendChatMessage(text), run to completion. `None` for blank input.
    pub async fn send_chat_message(&mut self, text: &str) -> Option<String> {
        let pending = self.begin_chat(text)?;
        let reply = pending.run().await;
        self.finish_chat(reply.clone());
        Some(reply)
    }
}

/// A chat request detached from the front end
pub struct PendingChat {
    store: Arc<DayStore>,
    chat: Arc<ChatClient>,
    today: NaiveDate,
    conversation: Vec<Message>,
}

impl PendingChat {
    /// Build the context from the store and ask the model. Unreadable
    /// planner data degrades to an empty context.
    pub async fn run(self) -> String {
        let context = match ScheduleContext::load(&self.store, self.today).await {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("[CHAT] Could not load planner data, sending without it: {}", e);
                ScheduleContext::empty(self.today)
            }
        };
        self.chat
            .chat(ChatInput::Contextual(self.conversation, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;
    use crate::ai::{ChatLog, MessageRole};
    use crate::error::PlannerError;
    use crate::ui::transcript::ChatState;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn commands(dir: &std::path::Path, model: Arc<ScriptedModel>) -> PlannerCommands {
        PlannerCommands::new(
            Arc::new(DayStore::new(dir)),
            Arc::new(ChatClient::new(model, ChatLog::disabled())),
            today(),
        )
    }

    #[tokio::test]
    async fn test_day_editor_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut commands = commands(dir.path(), Arc::new(ScriptedModel::replying("ok")));

        let editor = commands.open_day_editor("2025-04-22").await.unwrap();
        assert_eq!(editor.text, "");
        assert!(!editor.existing);

        let notice = commands.save_day_editor("2025-04-22", "Essay draft").await.unwrap();
        assert_eq!(notice, "Task added for 2025-04-22: Essay draft");

        let notice = commands.save_day_editor("2025-04-22", "Essay final").await.unwrap();
        assert_eq!(notice, "Task updated for 2025-04-22: Essay final");

        let editor = commands.open_day_editor("2025-04-22").await.unwrap();
        assert_eq!(editor.text, "Essay final");
        assert!(editor.existing);
        assert_eq!(commands.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_editor_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut commands = commands(dir.path(), Arc::new(ScriptedModel::replying("ok")));

        assert!(matches!(
            commands.open_day_editor("2025-02-30").await,
            Err(PlannerError::InvalidDate(_))
        ));
        assert!(matches!(
            commands.save_day_editor("tomorrow", "x").await,
            Err(PlannerError::InvalidDate(_))
        ));
    }

    #[tokio::test]
    async fn test_schedule_panel() {
        let dir = tempfile::tempdir().unwrap();
        let commands = commands(dir.path(), Arc::new(ScriptedModel::replying("ok")));
        assert_eq!(commands.schedule_panel().await.unwrap(), NO_SCHEDULE_FOUND);

        DayStore::new(dir.path())
            .write_schedule("Mon: Lecture\n")
            .await
            .unwrap();
        assert_eq!(commands.schedule_panel().await.unwrap(), "Mon: Lecture");
    }

    #[tokio::test]
    async fn test_calendar_marks_planned_days() {
        let dir = tempfile::tempdir().unwrap();
        let mut commands = commands(dir.path(), Arc::new(ScriptedModel::replying("ok")));
        commands.save_day_editor("2025-04-03", "Quiz").await.unwrap();

        let text = commands.calendar().await.unwrap();
        assert!(text.starts_with("April 2025"));
        assert!(text.contains("  3*"));
        assert!(text.contains("[20]"));
    }

    #[tokio::test]
    async fn test_send_chat_message_uses_context_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::replying("Start with the essay."));
        let mut commands = commands(dir.path(), model.clone());
        commands.save_day_editor("2025-04-20", "Essay due").await.unwrap();

        assert!(commands.send_chat_message("   ").await.is_none());

        let reply = commands.send_chat_message("What should I do first?").await.unwrap();
        assert_eq!(reply, "Start with the essay.");
        commands.send_chat_message("And after that?").await.unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);

        let first = &seen[0];
        assert_eq!(first[0].role, MessageRole::System);
        assert!(first[0].content.contains("(Today) ===\nEssay due"));
        assert_eq!(first[1], Message::user("What should I do first?"));

        // Second call carries the whole conversation, without the save notice
        let second = &seen[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[2], Message::assistant("Start with the essay."));
        assert_eq!(second[3], Message::user("And after that?"));

        assert_eq!(commands.transcript().state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_pending_chat_runs_detached() {
        let dir = tempfile::tempdir().unwrap();
        let mut commands = commands(dir.path(), Arc::new(ScriptedModel::replying("done")));

        let pending = commands.begin_chat("hi").unwrap();
        assert_eq!(commands.transcript().state(), ChatState::AwaitingReply);

        let reply = tokio::spawn(pending.run()).await.unwrap();
        commands.finish_chat(reply);

        assert_eq!(commands.transcript().state(), ChatState::Idle);
        assert_eq!(
            commands.transcript().render_lines(),
            vec!["You: hi".to_string(), "Assistant: done".to_string()]
        );
    }
}
