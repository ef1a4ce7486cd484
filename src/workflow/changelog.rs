use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::changelog::Changelog;
use crate::domain::commit::CommitHash;
use crate::domain::trailer::{self, TrailerDirective};
use crate::error::AppResult;
use crate::services::VersionControlService;

#[derive(Debug)]
pub struct ChangelogOutcome {
    pub changes: String,
    pub subject: String,
}

/// Resolve the release range, classify every commit trailer in it, and
/// render the changelog for the tag at `HEAD`.
pub async fn build_release_notes(ctx: &AppContext) -> AppResult<ChangelogOutcome> {
    let vc = ctx.version_control.as_ref();
    debug!(workspace = %ctx.config.workspace_root.display(), "building release notes");

    let current = vc.exact_tag_at_head().await?;
    let previous = vc.previous_stable_tag().await?;
    info!(
        current = current.as_str(),
        previous = previous.as_str(),
        "resolved release range"
    );

    let commits = vc.commits_since(&previous).await?;
    debug!(count = commits.len(), "commits since previous stable tag");

    // The annotation lookups touch nothing the loop writes, so they run
    // alongside it.
    let (annotation_body, subject, changelog) = tokio::try_join!(
        vc.tag_annotation_body(&current),
        vc.tag_annotation_subject(&current),
        collect_changes(vc, &commits),
    )?;

    Ok(ChangelogOutcome {
        changes: changelog.render(&current, &annotation_body),
        subject,
    })
}

async fn collect_changes(
    vc: &dyn VersionControlService,
    commits: &[CommitHash],
) -> AppResult<Changelog> {
    let mut changelog = Changelog::default();

    for commit in commits {
        let body = vc.commit_body(commit).await?;
        let trailers = trailer::parse_trailers(&body);
        if trailers.is_empty() {
            debug!(commit = commit.as_str(), "found no trailers");
            continue;
        }

        // Every trailer gets a say; a commit may feed several buckets.
        for parsed in &trailers {
            match trailer::classify(parsed) {
                TrailerDirective::Update => {
                    changelog.push_update(&trailer::unfold_message(&body));
                }
                TrailerDirective::New => {
                    changelog.push_addition(&vc.commit_subject(commit).await?);
                }
                TrailerDirective::Fix => {
                    changelog.push_fix(&vc.commit_subject(commit).await?);
                }
                TrailerDirective::Ignored => {
                    debug!(
                        commit = commit.as_str(),
                        key = parsed.key.as_str(),
                        "found no interesting trailers"
                    );
                }
            }
        }
    }

    Ok(changelog)
}
