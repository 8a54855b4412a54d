use crate::changelog::{self, ChangelogOptions, DateStyle, EntryPolicy};
use crate::git::GitRepo;
use crate::llm::{HfEndpoint, DEFAULT_LLM_REPO_ID};
use crate::model::DateRange;
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};

/// Where remote repositories are cloned to, relative to the working
/// directory. Deleted again by [`GitRepo::cleanup`] at the end of the run.
pub const CLONE_DIR: &str = "./cloned_repo";

#[derive(Parser)]
#[command(name = "chlog")]
#[command(about = "Generate a changelog from git history with an LLM")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "URL to clone the repository from")]
    pub url: Option<String>,

    #[arg(long = "repo_path", help = "Path to a local repository")]
    pub repo_path: Option<PathBuf>,

    #[arg(long = "llm_repo_id", default_value = DEFAULT_LLM_REPO_ID, help = "Repo id of the HuggingFace LLM")]
    pub llm_repo_id: String,

    #[arg(long = "max_count", default_value_t = 20, help = "Only parse a given number of commits")]
    pub max_count: usize,

    #[arg(long, help = "Only parse commits after this date (MM.DD.YYYY)")]
    pub after: Option<String>,

    #[arg(long, help = "Only parse commits before this date (MM.DD.YYYY)")]
    pub before: Option<String>,

    #[arg(long, default_value = "main", help = "Branch to read history from")]
    pub branch: String,

    #[arg(long, default_value = "changelog", help = "Output file path")]
    pub output: PathBuf,

    #[arg(long, help = "Write an entry even when the response yields fewer than two usable lines")]
    pub lenient: bool,

    #[arg(long = "date-format", value_parser = ["year-first", "month-first"], default_value = "year-first", help = "Entry date format")]
    pub date_format: String,

    #[arg(long = "no-header", help = "Do not write the repository identity line")]
    pub no_header: bool,

    #[arg(long = "strict-config", help = "Fail on malformed git configuration instead of ignoring it")]
    pub strict_config: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let lenient_config = !self.strict_config;

        let range = DateRange::from_bounds(self.after.as_deref(), self.before.as_deref())
            .context("Failed to resolve date range")?;

        let mut repo = match (&self.url, &self.repo_path) {
            (Some(_), Some(_)) => {
                println!("You can only specify a remote repo or a local repo");
                std::process::exit(1);
            }
            (None, None) => {
                println!("You must specify either a remote repo or a local repo");
                std::process::exit(1);
            }
            (Some(url), None) => {
                match GitRepo::clone_remote(url, Path::new(CLONE_DIR), lenient_config) {
                    Ok(repo) => repo,
                    Err(e) => {
                        println!("Failed to clone repo: {e}");
                        std::process::exit(1);
                    }
                }
            }
            (None, Some(path)) => match GitRepo::open_local(path, lenient_config) {
                Ok(repo) => repo,
                Err(e) => {
                    println!("No git repository found at that location: {e}");
                    std::process::exit(1);
                }
            },
        };

        let options = ChangelogOptions {
            branch: self.branch.clone(),
            max_count: self.max_count,
            range,
            date_style: match self.date_format.as_str() {
                "month-first" => DateStyle::MonthFirst,
                _ => DateStyle::YearFirst,
            },
            policy: if self.lenient {
                EntryPolicy::Lenient
            } else {
                EntryPolicy::Strict
            },
            header: !self.no_header,
            output: self.output.clone(),
        };

        let llm = HfEndpoint::new(&self.llm_repo_id);

        let result =
            changelog::generate(&repo, &llm, &options).context("Failed to generate changelog");

        // Run cleanup on success and failure alike, but let a pipeline
        // error take precedence over a cleanup error.
        let cleanup_result = repo.cleanup();
        let written = result?;
        cleanup_result.context("Failed to remove cloned repository")?;

        println!(
            "{} {} entries written to {}",
            style("Done:").green().bold(),
            written,
            options.output.display()
        );
        Ok(())
    }
}
