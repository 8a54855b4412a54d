use crate::error::{ChlogError, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub parent_ids: Vec<String>,
}

/// File-level change between two commit trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified { path: String },
    Added { path: String },
    Deleted { path: String },
    Renamed { from: String, to: String },
    Copied { from: String, to: String },
}

impl FileChange {
    /// One diff-description line, keyed by change kind.
    pub fn describe(&self) -> String {
        match self {
            FileChange::Modified { path } => format!("Modified {path}"),
            FileChange::Added { path } => format!("Added {path}"),
            FileChange::Deleted { path } => format!("Deleted {path}"),
            FileChange::Renamed { from, to } => format!("Renamed {from} to {to}"),
            FileChange::Copied { from, .. } => format!("Copied\n{from}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangelogEntry {
    pub date: String,
    pub summary: String,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    /// Build a range from the CLI's `--after`/`--before` bounds (MM.DD.YYYY).
    pub fn from_bounds(after: Option<&str>, before: Option<&str>) -> Result<Self> {
        let mut range = DateRange::new();

        if let Some(a) = after {
            range = range.with_since(parse_bound(a)?);
        }
        if let Some(b) = before {
            range = range.with_until(parse_bound(b)?);
        }

        if let (Some(s), Some(u)) = (range.since, range.until) {
            if s > u {
                return Err(ChlogError::InvalidDate(format!(
                    "Invalid range: after ({}) is later than before ({})",
                    s, u
                )));
            }
        }

        Ok(range)
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bound(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%m.%d.%Y")
        .map_err(|e| ChlogError::InvalidDate(format!("Expected MM.DD.YYYY, got '{input}': {e}")))?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ChlogError::InvalidDate(format!("Invalid date '{input}'")))?;
    Ok(Utc.from_utc_datetime(&datetime))
}
