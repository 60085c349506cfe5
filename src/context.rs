use std::sync::Arc;

use octocrab::Octocrab;

use crate::config::OpsBotConfig;
use crate::event::PullRequestEvent;

/// Everything a handler may use for one webhook delivery.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    /// Webhook event name, e.g. `pull_request`
    pub name: String,
    pub payload: PullRequestEvent,
    pub github: Arc<Octocrab>,
    pub config: Arc<OpsBotConfig>,
}

impl Context {
    pub fn new(
        name: impl Into<String>,
        payload: PullRequestEvent,
        github: Arc<Octocrab>,
        config: Arc<OpsBotConfig>,
    ) -> Self {
        Context {
            name: name.into(),
            payload,
            github,
            config,
        }
    }

    pub fn owner(&self) -> &str {
        &self.payload.repository.owner.login
    }

    pub fn repo(&self) -> &str {
        &self.payload.repository.name
    }
}
