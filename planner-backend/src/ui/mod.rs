//! Toolkit-independent core of the planner front end.

pub mod calendar;
pub mod commands;
pub mod console;
pub mod transcript;

pub use calendar::MonthCalendar;
pub use commands::{DayEditor, PendingChat, PlannerCommands};
pub use console::ConsoleCommand;
pub use transcript::{ChatState, Transcript};
