mod github;

pub(crate) use github::{PullRequestAction, PullRequestEvent};

/// Work items passed from the webhook listener to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    PullRequest(Box<PullRequestEvent>),
}

impl Event {
    /// The `X-GitHub-Event` name this event was delivered as.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Event::PullRequest(_) => crate::constants::PULL_REQUEST_EVENT,
        }
    }
}

impl From<PullRequestEvent> for Event {
    fn from(val: PullRequestEvent) -> Self {
        Event::PullRequest(Box::new(val))
    }
}
