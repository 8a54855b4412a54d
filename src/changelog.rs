use crate::error::Result;
use crate::git::GitRepo;
use crate::llm::LlmClient;
use crate::model::{ChangelogEntry, DateRange, FileChange};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Format of the per-entry date line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// 2024-06-30
    YearFirst,
    /// 06-30-2024
    MonthFirst,
}

impl DateStyle {
    pub fn format(self, timestamp: &DateTime<Utc>) -> String {
        match self {
            DateStyle::YearFirst => timestamp.format("%Y-%m-%d").to_string(),
            DateStyle::MonthFirst => timestamp.format("%m-%d-%Y").to_string(),
        }
    }
}

/// What to do with commits whose response yields fewer than two usable lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPolicy {
    /// Skip the commit entirely.
    Strict,
    /// Write whatever is available, even if empty.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct ChangelogOptions {
    pub branch: String,
    pub max_count: usize,
    pub range: DateRange,
    pub date_style: DateStyle,
    pub policy: EntryPolicy,
    pub header: bool,
    pub output: PathBuf,
}

/// Summarize the commit window into `opts.output`, one entry per adjacent
/// commit pair. Returns the number of entries written.
pub fn generate(repo: &GitRepo, llm: &dyn LlmClient, opts: &ChangelogOptions) -> Result<usize> {
    let commits = repo.list_commits(&opts.branch, opts.max_count, &opts.range)?;

    let mut file = File::create(&opts.output)?;
    if opts.header {
        writeln!(file, "{}\n", repo.locator())?;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut written = 0usize;
    for pair in commits.windows(2) {
        let current = &pair[0];
        let predecessor = &pair[1];
        pb.set_message(format!("Summarizing {}", short_id(&current.id)));

        let changes = repo.diff(&current.id, &predecessor.id)?;
        let diff_text = diff_description(&changes);
        let response = llm.summarize(&current.message, &diff_text)?;

        if let Some(entry) =
            parse_response(&response, &current.timestamp, opts.date_style, opts.policy)
        {
            write_entry(&mut file, &entry)?;
            written += 1;
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(written)
}

/// Serialize file changes into the diff description fed to the LLM, one line
/// per change, preserving diff order.
pub fn diff_description(changes: &[FileChange]) -> String {
    let mut text = String::new();
    for change in changes {
        text.push_str(&change.describe());
        text.push('\n');
    }
    text
}

/// Strip marker substrings and leading punctuation from one response line.
///
/// Idempotent: applying it to already-clean text returns the text unchanged.
pub fn cleanup_output(line: &str) -> String {
    let mut text = line.to_string();
    for marker in ["Summary:", "Changes:", "Explanation"] {
        text = text.replace(marker, "");
    }
    text.trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .trim()
        .to_string()
}

/// Interpret a raw LLM response as a changelog entry: first surviving line is
/// the summary, the rest joined by spaces is the detail. Returns `None` when
/// the strict policy rejects a response with fewer than two usable lines.
pub fn parse_response(
    raw: &str,
    timestamp: &DateTime<Utc>,
    date_style: DateStyle,
    policy: EntryPolicy,
) -> Option<ChangelogEntry> {
    let lines: Vec<String> = raw
        .lines()
        .map(cleanup_output)
        .filter(|line| !line.is_empty())
        .collect();

    if policy == EntryPolicy::Strict && lines.len() < 2 {
        return None;
    }

    let summary = lines.first().cloned().unwrap_or_default();
    let detail = if lines.len() > 1 {
        lines[1..].join(" ")
    } else {
        String::new()
    };

    Some(ChangelogEntry {
        date: date_style.format(timestamp),
        summary,
        detail,
    })
}

fn write_entry(file: &mut File, entry: &ChangelogEntry) -> Result<()> {
    writeln!(file, "{}", entry.date)?;
    writeln!(file, "{}", entry.summary)?;
    writeln!(file, "{}\n", entry.detail)?;
    Ok(())
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(7)]
}
