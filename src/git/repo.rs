use crate::error::{ChlogError, Result};
use crate::model::{CommitInfo, DateRange, FileChange};
use chrono::DateTime;
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

pub struct GitRepo {
    repo: Repository,
    locator: String,
    cloned_path: Option<PathBuf>,
}

impl GitRepo {
    /// Open an existing repository at `path`.
    ///
    /// `lenient_config` tolerates malformed repository configuration the way
    /// the stock git binary does; pass `false` to fail on it instead.
    pub fn open_local<P: AsRef<Path>>(path: P, lenient_config: bool) -> Result<Self> {
        let open_opts = gix::open::Options::default().strict_config(!lenient_config);
        let repo = gix::ThreadSafeRepository::discover_opts(
            path.as_ref(),
            Default::default(),
            gix::sec::trust::Mapping {
                full: open_opts.clone(),
                reduced: open_opts,
            },
        )?
        .to_thread_local();

        Ok(Self {
            repo,
            locator: path.as_ref().display().to_string(),
            cloned_path: None,
        })
    }

    /// Bare-clone `url` into `dest` and open the result.
    ///
    /// The clone directory is recorded as pending deletion; see
    /// [`GitRepo::cleanup`].
    pub fn clone_remote(url: &str, dest: &Path, lenient_config: bool) -> Result<Self> {
        let interrupt = AtomicBool::new(false);
        let (repo, _outcome) = gix::clone::PrepareFetch::new(
            url,
            dest,
            gix::create::Kind::Bare,
            gix::create::Options::default(),
            gix::open::Options::default().strict_config(!lenient_config),
        )?
        .fetch_only(gix::progress::Discard, &interrupt)?;

        Ok(Self {
            repo,
            locator: url.to_string(),
            cloned_path: Some(dest.to_path_buf()),
        })
    }

    /// Repository identity as given on the command line (URL or local path).
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Newest-first window of first-parent history from `branch`, capped at
    /// `max_count` and restricted to `range`.
    pub fn list_commits(
        &self,
        branch: &str,
        max_count: usize,
        range: &DateRange,
    ) -> Result<Vec<CommitInfo>> {
        let tip = self.resolve_branch(branch)?;

        let mut commits = Vec::new();
        let mut next = Some(tip);

        while let Some(commit_id) = next {
            if commits.len() >= max_count {
                break;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| ChlogError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            next = parents.first().copied();

            if let Some(since) = range.since {
                // The walk is newest-first, so nothing below `since` can match.
                if timestamp < since {
                    break;
                }
            }
            if !range.contains(&timestamp) {
                continue;
            }

            let author = commit.author()?;
            let message = commit.message_raw()?.to_string();

            commits.push(CommitInfo {
                id: commit_id.to_string(),
                author_name: author.name.to_string(),
                author_email: author.email.to_string(),
                message: message.trim_end().to_string(),
                timestamp,
                parent_ids: parents.iter().map(|id| id.to_string()).collect(),
            });
        }

        Ok(commits)
    }

    /// File-level changes between two commits' trees, diffed from older to
    /// newer: an `Added` entry is a file the newer commit introduced.
    pub fn diff(&self, newer_id: &str, older_id: &str) -> Result<Vec<FileChange>> {
        let newer_tree = self.find_tree(newer_id)?;
        let older_tree = self.find_tree(older_id)?;

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(Some(&older_tree), Some(&newer_tree), None)?;

        Ok(changes.into_iter().map(to_file_change).collect())
    }

    /// Delete the clone directory if this repository was cloned; no-op for
    /// local repositories and on repeat calls.
    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(path) = self.cloned_path.take() {
            std::fs::remove_dir_all(&path)?;
        }
        Ok(())
    }

    fn resolve_branch(&self, branch: &str) -> Result<ObjectId> {
        for candidate in [
            format!("refs/heads/{branch}"),
            format!("refs/remotes/origin/{branch}"),
        ] {
            if let Ok(id) = self.repo.rev_parse_single(candidate.as_str()) {
                return Ok(id.detach());
            }
        }

        self.repo
            .rev_parse_single(branch)
            .map(|id| id.detach())
            .map_err(|e| ChlogError::Parse(format!("Branch '{branch}' not found: {e}")))
    }

    fn find_tree(&self, commit_id: &str) -> Result<gix::Tree<'_>> {
        let oid = ObjectId::from_hex(commit_id.as_bytes())
            .map_err(|e| ChlogError::Parse(format!("Invalid commit ID: {e}")))?;
        Ok(self.repo.find_commit(oid)?.tree()?)
    }
}

fn to_file_change(change: ChangeDetached) -> FileChange {
    match change {
        ChangeDetached::Addition { location, .. } => FileChange::Added {
            path: location.to_string(),
        },
        ChangeDetached::Deletion { location, .. } => FileChange::Deleted {
            path: location.to_string(),
        },
        ChangeDetached::Modification { location, .. } => FileChange::Modified {
            path: location.to_string(),
        },
        ChangeDetached::Rewrite {
            source_location,
            location,
            copy,
            ..
        } => {
            if copy {
                FileChange::Copied {
                    from: source_location.to_string(),
                    to: location.to_string(),
                }
            } else {
                FileChange::Renamed {
                    from: source_location.to_string(),
                    to: location.to_string(),
                }
            }
        }
    }
}
