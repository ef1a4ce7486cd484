use async_trait::async_trait;

use crate::domain::commit::CommitHash;
use crate::domain::tag::TagName;
use crate::error::AppResult;

/// Read-only queries against the repository the run executes in.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// The tag pointing exactly at `HEAD`. Fails when `HEAD` is untagged.
    async fn exact_tag_at_head(&self) -> AppResult<TagName>;

    /// Nearest ancestor tag of `HEAD`'s parent whose name contains none of
    /// `alpha`, `beta`, `rc`. Fails when no such tag exists.
    async fn previous_stable_tag(&self) -> AppResult<TagName>;

    /// First line of the tag's annotation.
    async fn tag_annotation_subject(&self, tag: &TagName) -> AppResult<String>;

    /// Annotation text after the first line.
    async fn tag_annotation_body(&self, tag: &TagName) -> AppResult<String>;

    /// Full hashes reachable from `HEAD` but not from `since`, in the log
    /// traversal's own order. Empty when the tag is already at `HEAD`.
    async fn commits_since(&self, since: &TagName) -> AppResult<Vec<CommitHash>>;

    /// First line of the commit message.
    async fn commit_subject(&self, commit: &CommitHash) -> AppResult<String>;

    /// Commit message after the first line.
    async fn commit_body(&self, commit: &CommitHash) -> AppResult<String>;
}
