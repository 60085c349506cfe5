use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A stripped down version of [`octocrab::models::webhook_events::WebhookEvent`]
/// for `pull_request` deliveries, holding only what the handlers consume.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PullRequestEvent {
    /// The action this event represents.
    pub action: PullRequestAction,
    /// The organization the repository belongs to, if any
    #[serde(default)]
    pub organization: Option<Account>,
    /// The repository this event corresponds to
    pub repository: Repository,
    /// The pull request this event corresponds to
    pub pull_request: PullRequest,
    /// The sender of the event
    pub sender: Account,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PullRequestAction {
    Opened,
    Synchronize,
    Reopened,
    Closed,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Account {
    pub login: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Repository {
    pub name: String,
    pub owner: Account,
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner.login, self.name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PullRequest {
    pub number: u64,
    pub head: Head,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Head {
    pub sha: String,
}
