use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    config,
    idp::{IdentityProvider, adfs::AdfsProvider},
};

#[derive(Debug, Clone, Args)]
pub struct AuthCommand {}

impl AuthCommand {
    pub async fn execute(self, profile: &str) -> Result<()> {
        info!("Starting sign-on for profile: {}", profile);

        let config = config::load(profile).await.with_context(|| {
            format!("Failed to load configuration for profile '{profile}'")
        })?;

        let idp = IdentityProvider::Adfs(AdfsProvider::new(config.relying_party.clone()));

        let credentials = config::resolve_credentials(config)
            .context("Failed to resolve sign-on credentials")?;

        let assertion = idp
            .login(&credentials)
            .await
            .context("Failed to sign on to AD FS")?;

        info!("Sign-on succeeded");

        // Only the assertion goes to stdout, so the output can be piped
        // straight into a credential exchanger; status lives on stderr.
        println!("{assertion}");

        Ok(())
    }
}
