use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::commit::CommitHash;
use crate::domain::tag::TagName;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Queries the repository by spawning `git`, one child process per call.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        debug!(args = %args.join(" "), "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::CommandExecution(format!(
                "git {} failed ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_line(&self, args: &[&str]) -> AppResult<String> {
        let stdout = self.run(args).await?;
        Ok(stdout.lines().next().unwrap_or("").trim().to_string())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn exact_tag_at_head(&self) -> AppResult<TagName> {
        let tag = self
            .run_line(&["describe", "--exact-match", "HEAD"])
            .await
            .map_err(|err| AppError::TagResolution(format!("HEAD is not exactly tagged ({err})")))?;
        if tag.is_empty() {
            return Err(AppError::TagResolution(
                "git describe printed no tag name".to_string(),
            ));
        }
        Ok(TagName(tag))
    }

    async fn previous_stable_tag(&self) -> AppResult<TagName> {
        // Plain substring exclusion, so e.g. a tag containing "src" is
        // skipped along with real release candidates.
        let tag = self
            .run_line(&[
                "describe",
                "--tags",
                "--abbrev=0",
                "--exclude=*alpha*",
                "--exclude=*beta*",
                "--exclude=*rc*",
                "HEAD^",
            ])
            .await
            .map_err(|err| {
                AppError::NoPriorTag(format!("no stable tag reachable before HEAD ({err})"))
            })?;
        if tag.is_empty() {
            return Err(AppError::NoPriorTag(
                "git describe printed no tag name".to_string(),
            ));
        }
        Ok(TagName(tag))
    }

    async fn tag_annotation_subject(&self, tag: &TagName) -> AppResult<String> {
        let refname = format!("refs/tags/{}", tag.as_str());
        self.run_line(&["for-each-ref", "--format=%(contents:subject)", &refname])
            .await
    }

    async fn tag_annotation_body(&self, tag: &TagName) -> AppResult<String> {
        let refname = format!("refs/tags/{}", tag.as_str());
        self.run(&["for-each-ref", "--format=%(contents:body)", &refname])
            .await
    }

    async fn commits_since(&self, since: &TagName) -> AppResult<Vec<CommitHash>> {
        let range = format!("{}..HEAD", since.as_str());
        let stdout = self.run(&["log", "--format=tformat:%H", &range]).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| CommitHash(line.to_string()))
            .collect())
    }

    async fn commit_subject(&self, commit: &CommitHash) -> AppResult<String> {
        self.run_line(&["show", "--quiet", "--format=%s", commit.as_str()])
            .await
    }

    async fn commit_body(&self, commit: &CommitHash) -> AppResult<String> {
        self.run(&["show", "--quiet", "--format=%b", commit.as_str()])
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn git(dir: &Path, args: &[&str]) {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("failed to spawn git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn repo_with_release_history() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path();
        git(path, &["init", "-q"]);
        git(path, &["commit", "--allow-empty", "-m", "initial import"]);
        git(path, &["tag", "-a", "v0.1.0", "-m", "First release"]);
        git(path, &["commit", "--allow-empty", "-m", "fix crash", "-m", "Changelog: fix"]);
        git(path, &["tag", "-a", "v0.2.0-rc1", "-m", "Release candidate"]);
        git(path, &["commit", "--allow-empty", "-m", "add widget", "-m", "Changelog: new"]);
        git(
            path,
            &["tag", "-a", "v0.2.0", "-m", "Second release", "-m", "Now with widgets."],
        );
        dir
    }

    #[tokio::test]
    async fn resolves_the_exact_tag_and_the_prior_stable_tag() {
        let repo = repo_with_release_history();
        let cli = GitCli::new(repo.path().to_path_buf());

        let current = cli.exact_tag_at_head().await.expect("current tag");
        assert_eq!(current.as_str(), "v0.2.0");

        // The rc tag between the releases must be skipped.
        let previous = cli.previous_stable_tag().await.expect("previous tag");
        assert_eq!(previous.as_str(), "v0.1.0");
    }

    #[tokio::test]
    async fn reads_the_tag_annotation() {
        let repo = repo_with_release_history();
        let cli = GitCli::new(repo.path().to_path_buf());
        let tag = TagName("v0.2.0".to_string());

        let subject = cli.tag_annotation_subject(&tag).await.expect("subject");
        assert_eq!(subject, "Second release");

        let body = cli.tag_annotation_body(&tag).await.expect("body");
        assert_eq!(body.trim(), "Now with widgets.");
    }

    #[tokio::test]
    async fn enumerates_commits_newest_first_with_bodies() {
        let repo = repo_with_release_history();
        let cli = GitCli::new(repo.path().to_path_buf());

        let commits = cli
            .commits_since(&TagName("v0.1.0".to_string()))
            .await
            .expect("commits");
        assert_eq!(commits.len(), 2);

        let newest = cli.commit_subject(&commits[0]).await.expect("subject");
        assert_eq!(newest, "add widget");
        let body = cli.commit_body(&commits[1]).await.expect("body");
        assert_eq!(body.trim(), "Changelog: fix");
    }

    #[tokio::test]
    async fn zero_commits_since_the_current_tag_is_not_an_error() {
        let repo = repo_with_release_history();
        let cli = GitCli::new(repo.path().to_path_buf());

        let commits = cli
            .commits_since(&TagName("v0.2.0".to_string()))
            .await
            .expect("commits");
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn builds_release_notes_end_to_end() {
        use std::sync::Arc;

        use crate::config::AppConfig;
        use crate::context::AppContext;
        use crate::services::OutputSink;
        use crate::workflow::changelog::build_release_notes;

        struct NullSink;
        impl OutputSink for NullSink {
            fn set_output(&self, _name: &str, _value: &str) -> AppResult<()> {
                Ok(())
            }
        }

        let repo = repo_with_release_history();
        let config = AppConfig {
            workspace_root: repo.path().to_path_buf(),
            github_output: None,
        };
        let ctx = AppContext::new(
            config,
            Arc::new(GitCli::new(repo.path().to_path_buf())),
            Arc::new(NullSink),
        );

        let outcome = build_release_notes(&ctx).await.expect("outcome");
        assert_eq!(outcome.subject, "Second release");
        assert_eq!(
            outcome.changes,
            "# v0.2.0 Changelog\n\nNow with widgets.\n## Bugfixes\n\n * fix crash\n\n## Additions\n\n * add widget\n\n"
        );

        // Same repository state, byte-identical result.
        let rerun = build_release_notes(&ctx).await.expect("rerun");
        assert_eq!(rerun.changes, outcome.changes);
        assert_eq!(rerun.subject, outcome.subject);
    }

    #[tokio::test]
    async fn untagged_head_is_a_tag_resolution_error() {
        let repo = repo_with_release_history();
        let path = repo.path();
        git(path, &["commit", "--allow-empty", "-m", "work in progress"]);
        let cli = GitCli::new(path.to_path_buf());

        let err = cli.exact_tag_at_head().await.expect_err("must fail");
        assert!(matches!(err, AppError::TagResolution(_)));
    }

    #[tokio::test]
    async fn missing_prior_tag_is_its_own_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path();
        git(path, &["init", "-q"]);
        git(path, &["commit", "--allow-empty", "-m", "initial import"]);
        git(path, &["tag", "-a", "v0.1.0", "-m", "First release"]);
        let cli = GitCli::new(path.to_path_buf());

        let err = cli.previous_stable_tag().await.expect_err("must fail");
        assert!(matches!(err, AppError::NoPriorTag(_)));
    }
}
