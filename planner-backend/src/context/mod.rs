//! Assembles the planner's system prompt: current date, weekly schedule and
//! every daily plan, each plan headed by its weekday, date and distance
//! from today.
//!
//! Nothing is truncated or budgeted; the prompt grows with the data.

use chrono::NaiveDate;

use crate::error::Result;
use crate::store::{DailyPlan, DayStore, PlanDate};

pub const ASSISTANT_PREAMBLE: &str =
    "You are a helpful planning assistant. You help manage tasks and deadlines.";
pub const CLOSING_INSTRUCTION: &str =
    "Based on the schedule and daily plans above, please help the user.";

const NO_SCHEDULE: &str = "(no schedule)";
const NO_PLANS: &str = "(no daily plans)";

/// Everything the model is told about the user's calendar
#[derive(Debug, Clone)]
pub struct ScheduleContext {
    pub current_date: NaiveDate,
    pub schedule: String,
    /// Sorted by date
    pub plans: Vec<DailyPlan>,
}

impl ScheduleContext {
    pub fn new(current_date: NaiveDate, schedule: impl Into<String>, mut plans: Vec<DailyPlan>) -> Self {
        plans.sort_by_key(|plan| plan.date);
        Self {
            current_date,
            schedule: schedule.into(),
            plans,
        }
    }

    /// An empty context for `current_date`
    pub fn empty(current_date: NaiveDate) -> Self {
        Self::new(current_date, String::new(), Vec::new())
    }

    /// Read the schedule and every daily plan from `store`.
    pub async fn load(store: &DayStore, current_date: NaiveDate) -> Result<Self> {
        let schedule = store.read_schedule().await?;
        let plans = store.list_all().await?;
        Ok(Self::new(current_date, schedule, plans))
    }

    pub fn system_prompt(&self) -> String {
        build_system_prompt(self.current_date, &self.schedule, &self.plans)
    }
}

/// `Today`, `N days ago` or `in N days`
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let offset = (date - today).num_days();
    let unit = |n: i64| if n == 1 { "day" } else { "days" };
    match offset {
        0 => "Today".to_string(),
        n if n < 0 => format!("{} {} ago", -n, unit(-n)),
        n => format!("in {} {}", n, unit(n)),
    }
}

/// Header line for one daily plan, e.g. `=== Friday, 2025-01-10 (in 2 days) ===`
pub fn plan_header(date: PlanDate, today: NaiveDate) -> String {
    format!(
        "=== {}, {} ({}) ===",
        date.weekday_name(),
        date,
        relative_day_label(date.naive(), today)
    )
}

pub fn build_system_prompt(current_date: NaiveDate, schedule: &str, plans: &[DailyPlan]) -> String {
    let today = PlanDate::from(current_date);
    let mut prompt = String::new();

    prompt.push_str(ASSISTANT_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Current date: {}, {}\n\n", today.weekday_name(), today));

    prompt.push_str("Schedule:\n");
    if schedule.trim().is_empty() {
        prompt.push_str(NO_SCHEDULE);
    } else {
        prompt.push_str(schedule);
    }
    prompt.push_str("\n\n");

    prompt.push_str("Daily plans:\n");
    if plans.is_empty() {
        prompt.push_str(NO_PLANS);
        prompt.push('\n');
    }
    for plan in plans {
        prompt.push_str(&plan_header(plan.date, current_date));
        prompt.push('\n');
        prompt.push_str(&plan.content);
        if !plan.content.ends_with('\n') {
            prompt.push('\n');
        }
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}

/// One-shot prompt listing the user's current tasks ahead of their request.
pub fn planning_request_prompt<S: AsRef<str>>(message: &str, current_tasks: &[S]) -> String {
    let tasks: Vec<&str> = current_tasks.iter().map(|t| t.as_ref()).collect();
    format!(
        "Current tasks and deadlines:\n{}\n\nUser request: {}\n\nPlease help manage these tasks and deadlines.",
        tasks.join("\n"),
        message
    )
}
