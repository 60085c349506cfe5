//! Helpers shared by the pull request handlers.

use std::sync::LazyLock;

use anyhow::Result;
use octocrab::Page;
use regex::Regex;
use serde::Deserialize;

use crate::constants::MIRROR_BRANCH_PREFIX;
use crate::context::Context;
use crate::octocrab_utils::PageExt;

static OKAY_TO_TEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/?ok(ay)? to test$").expect("valid regex"));

/// Repository permission of a collaborator, as reported by
/// `GET /repos/{owner}/{repo}/collaborators/{username}/permission`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Permission {
    Admin,
    Maintain,
    Write,
    Triage,
    Read,
    None,
    #[serde(other)]
    Unknown,
}

pub(crate) const ADMIN_PERMISSION: Permission = Permission::Admin;
pub(crate) const WRITE_PERMISSION: Permission = Permission::Write;

#[derive(Debug, Deserialize)]
struct CollaboratorPermission {
    permission: Permission,
}

/// An issue comment. Unlike [`octocrab::models::issues::Comment`], the author
/// may be missing (deleted accounts show up as `null`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueComment {
    pub body: Option<String>,
    pub user: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommentAuthor {
    pub login: String,
}

pub(crate) fn feature_is_disabled(context: &Context, name: &str) -> bool {
    let repo = context.payload.repository.to_string();
    match context.config.features_for(&repo).get(name) {
        Some(enabled) => !enabled,
        None => {
            tracing::warn!("Unknown feature {name:?}, treating it as disabled");
            true
        }
    }
}

pub(crate) fn is_okay_to_test_comment(body: &str) -> bool {
    OKAY_TO_TEST.is_match(body.trim())
}

pub(crate) fn external_pr_branch_name(pr_number: u64) -> String {
    format!("{MIRROR_BRANCH_PREFIX}{pr_number}")
}

/// Whether any comment on the PR satisfies `predicate` and was written by
/// someone holding one of the `allowed` permissions on the repository.
pub(crate) async fn valid_comments_exist_by_predicate(
    context: &Context,
    pr_number: u64,
    allowed: &[Permission],
    predicate: impl Fn(&IssueComment) -> bool,
) -> Result<bool> {
    let github_api = &context.github;
    let route = format!(
        "/repos/{}/{}/issues/{pr_number}/comments?per_page=100",
        context.owner(),
        context.repo()
    );
    let candidates = github_api
        .get::<Page<IssueComment>, _, _>(route, None::<&()>)
        .await?
        .filter_all(github_api, predicate)
        .await?;

    for comment in candidates {
        let Some(user) = comment.user else {
            continue;
        };
        match permission_of(context, &user.login).await {
            Ok(permission) if allowed.contains(&permission) => return Ok(true),
            Ok(permission) => {
                tracing::debug!("Ignoring comment by {} ({permission:?})", user.login);
            }
            Err(e) => {
                tracing::warn!("Failed to get permission of {}: {e}", user.login);
            }
        }
    }
    Ok(false)
}

async fn permission_of(context: &Context, username: &str) -> octocrab::Result<Permission> {
    let route = format!(
        "/repos/{}/{}/collaborators/{username}/permission",
        context.owner(),
        context.repo()
    );
    let CollaboratorPermission { permission } = context.github.get(route, None::<&()>).await?;
    Ok(permission)
}
