use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::constants::SIGN_ON_PATH;
use crate::error::LoginError;
use crate::idp::Credentials;
use crate::scrape;

/// AD FS forms authentication varies its response by user agent; present a
/// browser-style one so the sign-on page renders the plain HTML form.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; Trident/7.0; rv:11.0) like Gecko";

/// AD FS (WS-Federation) provider implementation
#[derive(Debug, Clone)]
pub struct AdfsProvider {
    relying_party: String,
}

impl AdfsProvider {
    /// Create a new AD FS provider targeting the specified relying party
    pub fn new(relying_party: String) -> Self {
        Self { relying_party }
    }

    /// Build the IdP-initiated sign-on URL for the given hostname
    pub fn sign_on_url(&self, hostname: &str) -> String {
        format!(
            "{hostname}{SIGN_ON_PATH}?loginToRp={}",
            urlencoding::encode(&self.relying_party)
        )
    }

    /// Run the two-request sign-on flow: fetch the login page, submit the
    /// credentialed form, and extract the base64 SAML assertion from the
    /// response.
    ///
    /// Both requests share one client-local cookie store; the session
    /// cookie set on the GET must accompany the POST. Each step completes
    /// before the next begins and any failure aborts the whole attempt.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, LoginError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        let sign_on_url = self.sign_on_url(&credentials.hostname);
        info!("Requesting AD FS sign-on page");
        debug!("GET {}", sign_on_url);

        let body = client.get(&sign_on_url).send().await?.text().await?;
        let page = scrape::scrape_login_page(&body)?;
        let payload = scrape::build_payload(&page.inputs, credentials)?;

        let submit_url = resolve_action(&credentials.hostname, &page.action)?;
        info!("Submitting sign-on form");
        debug!("POST {}", submit_url);

        let body = client
            .post(submit_url)
            .form(&payload)
            .send()
            .await?
            .text()
            .await?;

        scrape::scrape_saml_response(&body)
    }
}

/// Resolve the form's `action` attribute against the provider origin.
/// A relative action joins onto the origin; an absolute one is used as-is.
fn resolve_action(hostname: &str, action: &str) -> Result<Url, LoginError> {
    let base = Url::parse(hostname)?;
    Ok(base.join(action)?)
}
