//! Flat-file store: one UTF-8 text file per date under `<data>/days/`,
//! plus a single `<data>/schedule.txt`.
//!
//! Writes replace the whole file. Nothing is locked; concurrent writers to
//! the same date race and the last write wins.

mod date;

pub use date::{PlanDate, PlanMonth};

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::Result;

const DAYS_DIR: &str = "days";
const SCHEDULE_FILE: &str = "schedule.txt";

/// Free-text content stored for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPlan {
    pub date: PlanDate,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct DayStore {
    data_dir: PathBuf,
}

impl DayStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn days_dir(&self) -> PathBuf {
        self.data_dir.join(DAYS_DIR)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(SCHEDULE_FILE)
    }

    fn day_path(&self, date: PlanDate) -> PathBuf {
        self.days_dir().join(date.file_name())
    }

    /// Create the data and days directories if they don't exist
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(self.days_dir()).await
    }

    /// Stored text for `date`; empty when no file exists.
    pub async fn read(&self, date: PlanDate) -> Result<String> {
        read_optional(&self.day_path(date)).await
    }

    pub async fn exists(&self, date: PlanDate) -> Result<bool> {
        Ok(fs::try_exists(self.day_path(date)).await?)
    }

    /// Replace the full content of the plan for `date`.
    pub async fn write(&self, date: PlanDate, text: &str) -> Result<()> {
        self.ensure_dirs().await?;
        fs::write(self.day_path(date), text).await?;
        log::debug!("Wrote {} bytes for {}", text.len(), date);
        Ok(())
    }

    /// The plan split into lines, line endings kept.
    pub async fn read_lines(&self, date: PlanDate) -> Result<Vec<String>> {
        let text = self.read(date).await?;
        Ok(text.split_inclusive('\n').map(str::to_string).collect())
    }

    /// Replace the plan with `lines` written back to back (no separators added).
    pub async fn write_lines<I, S>(&self, date: PlanDate, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
        self.write(date, &text).await
    }

    /// Every stored plan within `month`, keyed by ISO date.
    pub async fn list_month(&self, month: PlanMonth) -> Result<BTreeMap<String, String>> {
        let plans = self.scan(|date| month.contains(date)).await?;
        Ok(plans
            .into_iter()
            .map(|plan| (plan.date.to_string(), plan.content))
            .collect())
    }

    /// Every stored plan, oldest first.
    pub async fn list_all(&self) -> Result<Vec<DailyPlan>> {
        self.scan(|_| true).await
    }

    pub async fn read_schedule(&self) -> Result<String> {
        read_optional(&self.schedule_path()).await
    }

    pub async fn write_schedule(&self, text: &str) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        fs::write(self.schedule_path(), text).await?;
        log::debug!("Wrote schedule ({} bytes)", text.len());
        Ok(())
    }

    async fn scan<F>(&self, keep: F) -> Result<Vec<DailyPlan>>
    where
        F: Fn(PlanDate) -> bool,
    {
        let mut read_dir = match fs::read_dir(self.days_dir()).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut plans = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let file_name = entry.file_name();
            let date = match file_name
                .to_str()
                .and_then(|name| name.strip_suffix(".txt"))
                .and_then(|stem| PlanDate::parse(stem).ok())
            {
                Some(date) => date,
                None => continue,
            };
            if !keep(date) || !entry.file_type().await?.is_file() {
                continue;
            }
            let content = read_optional(&entry.path()).await?;
            plans.push(DailyPlan { date, content });
        }

        plans.sort_by_key(|plan| plan.date);
        Ok(plans)
    }
}

async fn read_optional(path: &Path) -> Result<String> {
    match fs::read(path).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}
