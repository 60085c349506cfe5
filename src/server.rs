use anyhow::Result;
use futures::FutureExt;
use futures::{channel::mpsc::channel, TryFutureExt};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::cli::ServeArgs;
use crate::config::OpsBotConfig;
use crate::event::Event;
use crate::utils::get_credential;

mod listener;
mod runner;

pub(crate) use runner::handle_event;

pub(crate) async fn serve(args: ServeArgs, config: OpsBotConfig) -> Result<()> {
    let (sender, receiver) = channel::<Event>(32);
    // If secret has not been passed via CLI or env, get it as a credential.
    let secret_token = args
        .secret_token
        .map(Into::into)
        .ok_or(())
        .or_else(|()| get_credential("webhook_secret"))?;

    let service = listener::listen(sender, secret_token);
    let tcp_listener = TcpListener::bind(&args.addr).await?;
    tracing::info!("Listening on {}", args.addr);

    let mut set: JoinSet<Result<()>> = JoinSet::new();
    set.spawn(axum::serve(tcp_listener, service).into_future().err_into());
    set.spawn(runner::runner(receiver, octocrab::instance(), Arc::new(config)).map(Result::Ok));
    join_all(set).await
}

/// Wait for all tasks, failing on the first task that errors or panics.
async fn join_all(mut set: JoinSet<Result<()>>) -> Result<()> {
    while let Some(res) = set.join_next().await {
        res??;
    }
    Ok(())
}
