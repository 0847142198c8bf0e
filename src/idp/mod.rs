pub mod adfs;

use self::adfs::AdfsProvider;
use crate::error::LoginError;

/// Sign-on inputs supplied by the caller (config file, environment, or
/// interactive prompt). Immutable for the duration of one login; the login
/// flow itself never touches process state.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Identity provider origin, normalized to carry a scheme
    /// (e.g. `https://sts.example.com`)
    pub hostname: String,
}

/// Identity Provider enum using composition pattern
/// Each variant contains a provider-specific struct with its own implementation
#[derive(Debug, Clone)]
pub enum IdentityProvider {
    Adfs(AdfsProvider),
    // Future: AzureEntra(azure::AzureProvider),
}

impl IdentityProvider {
    /// Run the sign-on flow and return the base64 SAML assertion
    pub async fn login(&self, credentials: &Credentials) -> Result<String, LoginError> {
        match self {
            Self::Adfs(provider) => provider.login(credentials).await,
        }
    }
}
