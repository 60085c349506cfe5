use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use octocrab::models::AppId;
use secrecy::SecretString;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) auth: AuthArgs,
    /// Bot configuration file (JSON5). Uses defaults if not given
    #[arg(long, global = true, env = "OPS_BOT_CONFIG")]
    pub(crate) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start web hook server
    Serve(ServeArgs),
    /// Handle a single webhook payload read from a file
    Handle(HandleArgs),
}

#[derive(Args)]
pub(crate) struct ServeArgs {
    /// IP and port to listen on
    #[arg(default_value = "0.0.0.0:3000")]
    pub(crate) addr: String,
    /// Webhook secret as configured on GitHub
    #[arg(long, env)]
    pub(crate) secret_token: Option<String>,
}

#[derive(Args)]
pub(crate) struct HandleArgs {
    /// JSON file containing the webhook payload
    pub(crate) payload: PathBuf,
    /// Webhook event name (`X-GitHub-Event`)
    #[arg(long, default_value = crate::constants::PULL_REQUEST_EVENT)]
    pub(crate) event: String,
}

#[derive(Args, Default)]
pub(crate) struct AuthArgs {
    /// GitHub personal access token
    #[arg(long, env, global = true, conflicts_with_all = ["app_id", "app_key"])]
    pub(crate) github_token: Option<String>,
    /// GitHub App ID
    #[arg(long, env, global = true, requires = "app_key")]
    pub(crate) app_id: Option<u64>,
    /// GitHub App private key (PEM)
    #[arg(long, env, global = true, requires = "app_id")]
    pub(crate) app_key: Option<String>,
}

pub(crate) enum Auth {
    AppKey(AppId, SecretString),
    GitHubToken(SecretString),
}

impl TryFrom<AuthArgs> for Auth {
    type Error = anyhow::Error;

    fn try_from(args: AuthArgs) -> Result<Self> {
        match args {
            AuthArgs {
                github_token: Some(token),
                ..
            } => Ok(Auth::GitHubToken(token.into())),
            AuthArgs {
                app_id: Some(id),
                app_key: Some(key),
                ..
            } => Ok(Auth::AppKey(AppId(id), key.into())),
            _ => bail!("Either --github-token or --app-id and --app-key are required"),
        }
    }
}

impl AuthArgs {
    pub(crate) async fn try_into_octocrab(self) -> Result<octocrab::Octocrab> {
        super::octocrab_utils::auth_to_octocrab(self.try_into()?).await
    }
}
