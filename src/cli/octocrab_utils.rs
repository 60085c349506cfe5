use anyhow::{Context, Result};
use futures::TryStreamExt;
use secrecy::ExposeSecret;

use super::Auth;

pub(super) async fn auth_to_octocrab(auth: Auth) -> Result<octocrab::Octocrab> {
    match auth {
        Auth::AppKey(app_id, app_key) => {
            let key = jsonwebtoken::EncodingKey::from_rsa_pem(app_key.expose_secret().as_bytes())?;
            let base = octocrab::Octocrab::builder().app(app_id, key).build()?;
            let insts = base
                .apps()
                .installations()
                .send()
                .await?
                .into_stream(&base)
                .try_collect::<Vec<_>>()
                .await?;
            let inst = insts.first().context("GitHub App has no installations")?;
            tracing::info!(
                "Using installation {} of {} ({} total)",
                inst.id,
                inst.account.login,
                insts.len()
            );
            Ok(octocrab::Octocrab::installation(&base, inst.id))
        }
        Auth::GitHubToken(github_token) => {
            Ok(octocrab::Octocrab::builder()
                // https://github.com/XAMPPRocky/octocrab/issues/594
                .personal_token(github_token.expose_secret().to_owned())
                .build()?)
        }
    }
}
