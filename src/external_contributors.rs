//! Gatekeeping for pull requests opened by people outside the organization.
//!
//! CI only runs on branches of the organization’s own repository, so PRs from
//! forks are mirrored into a `pull-request/<number>` branch once a maintainer
//! approved them with an “ok to test” comment. The mirror follows the PR head
//! on every push and is deleted when the PR is closed.

use std::fmt::Display;

use anyhow::Result;
use octocrab::models::{issues::Comment, repos::Ref};
use octocrab::params::repos::Reference;
use serde_json::json;

use crate::constants::{EXTERNAL_CONTRIBUTORS_FEATURE, EXTERNAL_CONTRIBUTOR_COMMENT};
use crate::context::Context;
use crate::event::PullRequestAction;
use crate::shared::{
    external_pr_branch_name, feature_is_disabled, is_okay_to_test_comment,
    valid_comments_exist_by_predicate, ADMIN_PERMISSION, WRITE_PERMISSION,
};

/// The API call a handled event resulted in.
#[derive(Debug)]
pub(crate) enum Outcome {
    CommentCreated(Box<Comment>),
    RefUpdated(Ref),
    RefCreated(Ref),
    RefDeleted,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::CommentCreated(comment) => write!(f, "created comment {}", comment.html_url),
            Outcome::RefUpdated(git_ref) => write!(f, "updated {}", git_ref.ref_field),
            Outcome::RefCreated(git_ref) => write!(f, "created {}", git_ref.ref_field),
            Outcome::RefDeleted => write!(f, "deleted mirror branch"),
        }
    }
}

pub(crate) struct ExternalContributors<'a> {
    context: &'a Context,
}

impl<'a> ExternalContributors<'a> {
    pub fn new(context: &'a Context) -> Self {
        ExternalContributors { context }
    }

    /// Only failures to post the approval request or to create the mirror
    /// branch are returned as errors, everything else is logged and ignored.
    pub async fn handle(&self) -> Result<Option<Outcome>> {
        if feature_is_disabled(self.context, EXTERNAL_CONTRIBUTORS_FEATURE) {
            tracing::debug!("{EXTERNAL_CONTRIBUTORS_FEATURE} is disabled");
            return Ok(None);
        }

        let action = self.context.payload.action;
        tracing::debug!("Handling {}.{action:?}", self.context.name);
        match action {
            PullRequestAction::Opened => self.request_approval().await,
            PullRequestAction::Synchronize | PullRequestAction::Reopened => {
                self.sync_mirror().await
            }
            PullRequestAction::Closed => Ok(self.delete_mirror().await),
            PullRequestAction::Other => Ok(None),
        }
    }

    async fn request_approval(&self) -> Result<Option<Outcome>> {
        let payload = &self.context.payload;
        let author = &payload.sender.login;
        if self.author_is_member(author).await {
            tracing::info!("{author} is an organization member, nothing to do");
            return Ok(None);
        }

        tracing::info!(
            "Asking for approval of {author}’s PR {}#{}",
            payload.repository,
            payload.pull_request.number
        );
        let comment = self
            .context
            .github
            .issues(self.context.owner(), self.context.repo())
            .create_comment(payload.pull_request.number, EXTERNAL_CONTRIBUTOR_COMMENT)
            .await?;
        Ok(Some(Outcome::CommentCreated(Box::new(comment))))
    }

    async fn sync_mirror(&self) -> Result<Option<Outcome>> {
        let pr = &self.context.payload.pull_request;
        let approved = valid_comments_exist_by_predicate(
            self.context,
            pr.number,
            &[ADMIN_PERMISSION, WRITE_PERMISSION],
            |comment| {
                is_okay_to_test_comment(comment.body.as_deref().unwrap_or_default())
                    && comment.user.is_some()
            },
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to look for approval comments on PR {}: {e}", pr.number);
            false
        });
        if !approved {
            tracing::info!("PR {} has not been approved for testing", pr.number);
            return Ok(None);
        }

        let branch = external_pr_branch_name(pr.number);
        match self.update_ref(&branch, &pr.head.sha).await {
            Ok(git_ref) => {
                tracing::info!("Moved {branch} to {}", pr.head.sha);
                Ok(Some(Outcome::RefUpdated(git_ref)))
            }
            Err(e) => {
                tracing::info!("Failed to update {branch} ({e}), creating it");
                let git_ref = self.create_ref(&branch, &pr.head.sha).await?;
                tracing::info!("Created {branch} at {}", pr.head.sha);
                Ok(Some(Outcome::RefCreated(git_ref)))
            }
        }
    }

    async fn delete_mirror(&self) -> Option<Outcome> {
        let branch = external_pr_branch_name(self.context.payload.pull_request.number);
        let route = format!("{}/refs/heads/{branch}", self.git_route());
        match self.context.github._delete(route, None::<&()>).await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Deleted {branch}");
                Some(Outcome::RefDeleted)
            }
            Ok(response) => {
                tracing::info!("Not deleting {branch}: {}", response.status());
                None
            }
            Err(e) => {
                tracing::info!("Not deleting {branch}: {e}");
                None
            }
        }
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> octocrab::Result<Ref> {
        let route = format!("{}/refs/heads/{branch}", self.git_route());
        self.context
            .github
            .patch(route, Some(&json!({ "sha": sha, "force": true })))
            .await
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> octocrab::Result<Ref> {
        self.context
            .github
            .repos(self.context.owner(), self.context.repo())
            .create_ref(&Reference::Branch(branch.to_owned()), sha)
            .await
    }

    fn git_route(&self) -> String {
        format!("/repos/{}/{}/git", self.context.owner(), self.context.repo())
    }

    /// Any failure to confirm membership counts as “not a member”.
    async fn author_is_member(&self, author: &str) -> bool {
        let Some(org) = &self.context.payload.organization else {
            tracing::info!("No organization in payload, treating {author} as external");
            return false;
        };
        let route = format!("/orgs/{}/members/{author}", org.login);
        match self.context.github._get(route).await {
            Ok(response) => response.status() == http::StatusCode::NO_CONTENT,
            Err(e) => {
                tracing::info!("Membership check for {author} failed: {e}");
                false
            }
        }
    }
}
