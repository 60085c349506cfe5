use futures::{channel::mpsc::Sender, SinkExt};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use axum_github_webhook_extract::{GithubEvent, GithubToken as GitHubSecret};
use tower_http::trace::TraceLayer;

use crate::constants::PULL_REQUEST_EVENT;
use crate::event::{Event, PullRequestEvent};

const EVENT_HEADER: &str = "X-GitHub-Event";

#[derive(Debug, Clone)]
struct AppState {
    sender: Sender<Event>,
    secret: GitHubSecret,
}

impl FromRef<AppState> for GitHubSecret {
    fn from_ref(state: &AppState) -> GitHubSecret {
        state.secret.clone()
    }
}

async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    GithubEvent(payload): GithubEvent<serde_json::Value>,
) -> Result<String, (StatusCode, String)> {
    let name = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if name != PULL_REQUEST_EVENT {
        tracing::debug!("Ignoring {name:?} event");
        return Ok("skipped".to_owned());
    }
    let event: PullRequestEvent = serde_json::from_value(payload).map_err(|e| {
        tracing::info!("Invalid {name} payload: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;
    handle_enqueue(event.into(), state).await
}

async fn handle_enqueue(
    event: Event,
    mut state: AppState,
) -> Result<String, (StatusCode, String)> {
    state
        .sender
        .send(event)
        .await
        .map(|()| "enqueued".to_owned())
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: Failed to send event".to_owned(),
            )
        })
}

pub(crate) fn listen(sender: Sender<Event>, secret: SecretString) -> axum::Router {
    let state = AppState {
        sender,
        secret: GitHubSecret(Arc::new(secret.expose_secret().to_owned())),
    };
    std::mem::drop(secret);

    Router::new()
        .route("/", post(handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
