//! Seeds the store with model-written sample data: a week of daily plans
//! for a university student plus a weekly schedule.

use chrono::{Days, NaiveDate};

use crate::ai::ChatModel;
use crate::error::Result;
use crate::store::{DayStore, PlanDate};

pub const DEFAULT_DAYS: u64 = 7;

pub const WEEKLY_SCHEDULE_PROMPT: &str = "Create a general weekly schedule for a university student.
Include regular classes, study blocks, club activities, and part-time work if any.
Consider typical student commitments like library hours, gym time, and social activities.
Keep it in plain text format with just days of the week and entries.";

pub fn daily_entry_prompt(date: PlanDate) -> String {
    format!(
        "Create a daily planner entry for a university student for {}.
Include 2-3 classes/lectures, study tasks, assignments due, and maybe personal reminders.
Consider typical student activities like group projects, library study sessions, or club meetings.
Keep it simple and in plain text format without any special formatting, just plain text with newlines.",
        date
    )
}

/// What a seeding run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub written: Vec<PlanDate>,
    /// Dates the model failed to produce, with the error text
    pub failed: Vec<(PlanDate, String)>,
    pub schedule_written: bool,
}

/// Ask `model` for `days` daily plans starting at `start`, then a weekly
/// schedule. Model failures skip that item; store failures abort.
pub async fn seed(
    store: &DayStore,
    model: &dyn ChatModel,
    start: NaiveDate,
    days: u64,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for offset in 0..days {
        let date = PlanDate::from(start + Days::new(offset));
        match model.complete(&daily_entry_prompt(date)).await {
            Ok(content) => {
                store.write(date, &content).await?;
                log::info!("Created entry for {}", date);
                summary.written.push(date);
            }
            Err(e) => {
                log::error!("Failed to generate entry for {}: {}", date, e);
                summary.failed.push((date, e.to_string()));
            }
        }
    }

    match model.complete(WEEKLY_SCHEDULE_PROMPT).await {
        Ok(schedule) => {
            store.write_schedule(&schedule).await?;
            log::info!("Created {}", store.schedule_path().display());
            summary.schedule_written = true;
        }
        Err(e) => log::error!("Failed to generate schedule: {}", e),
    }

    Ok(summary)
}
