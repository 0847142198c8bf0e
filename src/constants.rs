use std::{env, path::PathBuf};

use dirs;

/// Configuration directory name under the user's config directory
pub const CONFIG_DIR_NAME: &str = "adsam";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Environment variable overriding the configuration file location
pub const ENV_CONFIG_FILE: &str = "ADSAM_CONFIG_FILE";

/// AD FS IdP-initiated sign-on endpoint path
pub const SIGN_ON_PATH: &str = "/adfs/ls/IdpInitiatedSignOn.aspx";

/// Default relying party identifier (AWS)
pub const DEFAULT_RELYING_PARTY: &str = "urn:amazon:webservices";

/// Name of the hidden input carrying the SAML assertion on the result page
pub const SAML_RESPONSE_FIELD: &str = "SAMLResponse";

/// Environment variables overriding configured credentials
pub const ENV_USERNAME: &str = "ADFS_USER";
pub const ENV_PASSWORD: &str = "ADFS_PASS";
pub const ENV_HOSTNAME: &str = "ADFS_HOST";

/// Get the configuration file path
/// Respects ADSAM_CONFIG_FILE environment variable if set
pub fn get_config_path() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = env::var(ENV_CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }

    // Use default location: ~/.config/adsam/config.ini
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    })
}
