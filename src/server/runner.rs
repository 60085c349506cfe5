use std::sync::Arc;

use anyhow::Result;
use futures::{channel::mpsc::Receiver, StreamExt};
use octocrab::Octocrab;
use tracing::Instrument;

use crate::config::OpsBotConfig;
use crate::context::Context;
use crate::event::Event;
use crate::external_contributors::{ExternalContributors, Outcome};

pub(super) async fn runner(
    mut receiver: Receiver<Event>,
    github: Arc<Octocrab>,
    config: Arc<OpsBotConfig>,
) {
    // loop runs until sender disconnects
    while let Some(event) = receiver.next().await {
        let span = tracing::info_span!("handle_event", event = event.name());
        if let Err(error) = handle_event(event, github.clone(), config.clone())
            .instrument(span)
            .await
        {
            tracing::error!("{error:#}");
        }
    }
}

pub(crate) async fn handle_event(
    event: Event,
    github: Arc<Octocrab>,
    config: Arc<OpsBotConfig>,
) -> Result<Option<Outcome>> {
    let name = event.name();
    match event {
        Event::PullRequest(payload) => {
            tracing::info!(
                "Handling {:?} for PR {}#{}",
                payload.action,
                payload.repository,
                payload.pull_request.number
            );
            let context = Context::new(name, *payload, github, config);
            let outcome = ExternalContributors::new(&context)
                .handle()
                .instrument(tracing::info_span!("external_contributors"))
                .await?;
            if let Some(outcome) = &outcome {
                tracing::info!("Done: {outcome}");
            }
            Ok(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{channel::mpsc::channel, SinkExt};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::event::PullRequestEvent;
    use crate::fixtures::{github_error, pull_request_event, OWNER, REPO};

    #[tokio::test]
    async fn test_runner_survives_handler_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/repos/{OWNER}/{REPO}/git/refs/heads/pull-request/12")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        // membership lookup 404s, then commenting fails
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(github_error("Forbidden")))
            .expect(1)
            .mount(&server)
            .await;
        let github = Arc::new(
            Octocrab::builder()
                .base_uri(server.uri())
                .unwrap()
                .build()
                .unwrap(),
        );

        let (mut sender, receiver) = channel(2);
        for action in ["opened", "closed"] {
            let payload: PullRequestEvent =
                serde_json::from_value(pull_request_event(action)).unwrap();
            sender.send(payload.into()).await.unwrap();
        }
        drop(sender);
        // returns once both events are handled and the channel is closed
        runner(receiver, github, Arc::new(OpsBotConfig::default())).await;
    }
}
