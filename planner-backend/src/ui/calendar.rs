use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::store::PlanMonth;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A month laid out in Monday-first week rows; `None` pads days belonging
/// to the neighbouring months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    month: PlanMonth,
    weeks: Vec<[Option<u32>; 7]>,
}

impl MonthCalendar {
    pub fn new(month: PlanMonth) -> Self {
        let offset = month.first_day().weekday().num_days_from_monday() as usize;
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut column = offset;

        for day in 1..=month.days_in_month() {
            week[column] = Some(day);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column != 0 {
            weeks.push(week);
        }

        Self { month, weeks }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(PlanMonth::containing(date))
    }

    pub fn month(&self) -> PlanMonth {
        self.month
    }

    pub fn weeks(&self) -> &[[Option<u32>; 7]] {
        &self.weeks
    }

    /// e.g. "April 2025"
    pub fn title(&self) -> String {
        self.month.first_day().format("%B %Y").to_string()
    }

    /// Text grid. Today is bracketed, days with a stored plan get a `*`.
    pub fn render(&self, today: NaiveDate, planned_days: &BTreeSet<u32>) -> String {
        let today_in_month = (today.year() == self.month.year() && today.month() == self.month.month())
            .then(|| today.day());

        let mut out = String::new();
        out.push_str(&self.title());
        out.push('\n');
        for header in WEEKDAY_HEADERS {
            out.push_str(&format!("{:>4}", header));
        }
        out.push('\n');

        for week in &self.weeks {
            let row: String = week
                .iter()
                .map(|cell| match cell {
                    None => "    ".to_string(),
                    Some(day) if Some(*day) == today_in_month => format!("[{:>2}]", day),
                    Some(day) if planned_days.contains(day) => format!("{:>3}*", day),
                    Some(day) => format!("{:>3} ", day),
                })
                .collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}
