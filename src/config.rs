use std::env;

use anyhow::{Context, Result};
use dialoguer::{Input, Password, theme::ColorfulTheme};
use ini::{Ini, Properties};
use tokio::fs;
use url::Url;

use crate::constants::{
    self, DEFAULT_RELYING_PARTY, ENV_HOSTNAME, ENV_PASSWORD, ENV_USERNAME,
};
use crate::idp::Credentials;

/// Stored sign-on settings for one profile. Unset fields are empty strings
/// and are filled from the environment or by prompting at sign-on time.
#[derive(Debug, Clone)]
pub struct Config {
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub relying_party: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            username: String::new(),
            password: String::new(),
            relying_party: DEFAULT_RELYING_PARTY.to_string(),
        }
    }
}

impl Config {
    fn from_ini_section(section: &Properties) -> Self {
        Self {
            hostname: section.get("host").unwrap_or("").to_string(),
            username: section.get("user").unwrap_or("").to_string(),
            password: section.get("pass").unwrap_or("").to_string(),
            relying_party: section
                .get("relying_party")
                .unwrap_or(DEFAULT_RELYING_PARTY)
                .to_string(),
        }
    }

    fn save_to_ini(&self, ini: &mut Ini, profile: &str) {
        let mut setter = ini.with_section(Some(section_name(profile)));
        setter
            .set("host", self.hostname.as_str())
            .set("user", self.username.as_str())
            .set("relying_party", self.relying_party.as_str());

        // A stored password is optional; an empty one is prompted for at
        // sign-on time instead of being written out.
        if !self.password.is_empty() {
            setter.set("pass", self.password.as_str());
        }
    }

    /// Replace fields from ADFS_HOST / ADFS_USER / ADFS_PASS when set
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var(ENV_HOSTNAME) {
            self.hostname = val;
        }
        if let Ok(val) = env::var(ENV_USERNAME) {
            self.username = val;
        }
        if let Ok(val) = env::var(ENV_PASSWORD) {
            self.password = val;
        }
    }
}

pub async fn load(profile: &str) -> Result<Config> {
    let path = constants::get_config_path().context("Failed to determine config path")?;

    if !path.exists() {
        // Nothing configured yet: the default profile falls back to
        // environment variables and prompts, a named profile is a typo.
        if profile == "default" {
            return Ok(Config::default());
        }
        anyhow::bail!("Config file not found. Please run `adsam configure` first");
    }

    let ini = Ini::load_from_file(&path).context("Failed to load config file")?;

    match ini.section(Some(section_name(profile))) {
        Some(section) => Ok(Config::from_ini_section(section)),
        None if profile == "default" => Ok(Config::default()),
        None => anyhow::bail!("Profile '{profile}' not found in config"),
    }
}

pub async fn save(profile: &str, config: &Config) -> Result<()> {
    let path = constants::get_config_path().context("Failed to determine config path")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut ini = if path.exists() {
        Ini::load_from_file(&path).unwrap_or_else(|_| Ini::new())
    } else {
        Ini::new()
    };

    config.save_to_ini(&mut ini, profile);

    ini.write_to_file(&path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Produce the final sign-on inputs for one login attempt: stored config,
/// overridden by environment variables, with anything still missing asked
/// for interactively. The hostname is normalized to carry a scheme.
pub fn resolve_credentials(mut config: Config) -> Result<Credentials> {
    config.apply_env_overrides();

    let theme = ColorfulTheme::default();

    let hostname = if config.hostname.is_empty() {
        Input::<String>::with_theme(&theme)
            .with_prompt("Hostname")
            .validate_with(|input: &String| {
                if is_valid_hostname(input) {
                    Ok(())
                } else {
                    Err("Please enter the AD FS hostname, e.g. sts.example.com")
                }
            })
            .interact_text()
            .context("Failed to read hostname")?
    } else {
        config.hostname
    };

    let username = if config.username.is_empty() {
        Input::<String>::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?
    } else {
        config.username
    };

    let password = if config.password.is_empty() {
        Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?
    } else {
        config.password
    };

    Ok(Credentials {
        username,
        password,
        hostname: normalize_hostname(&hostname),
    })
}

pub async fn configure_interactive(profile: &str) -> Result<()> {
    println!("Configuring adsam for profile: {profile}");

    let existing_config = load(profile).await.ok();

    if existing_config.is_some() {
        println!("Press Enter to keep current values, or type new values.");
    }
    println!();

    let theme = ColorfulTheme::default();

    let default_config = existing_config.unwrap_or_default();

    let hostname = Input::<String>::with_theme(&theme)
        .with_prompt("AD FS Hostname")
        .default(default_config.hostname.clone())
        .allow_empty(false)
        .validate_with(|input: &String| {
            if is_valid_hostname(input) {
                Ok(())
            } else {
                Err("Please enter the AD FS hostname, e.g. sts.example.com")
            }
        })
        .interact_text()
        .context("Failed to read hostname")?;

    let username = Input::<String>::with_theme(&theme)
        .with_prompt("Username")
        .default(default_config.username.clone())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read username")?;

    let password = Password::with_theme(&theme)
        .with_prompt("Password (leave empty to be prompted at sign-on)")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password")?;

    let relying_party = Input::<String>::with_theme(&theme)
        .with_prompt("Relying Party")
        .default(default_config.relying_party)
        .interact_text()
        .context("Failed to read relying party")?;

    let config = Config {
        hostname,
        username,
        password,
        relying_party,
    };

    save(profile, &config).await?;

    println!("\nConfiguration saved successfully.");
    Ok(())
}

fn section_name(profile: &str) -> String {
    if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

/// Prepend `https://` unless a scheme is already present; trim whitespace
/// and trailing slashes so the sign-on path concatenates cleanly.
pub fn normalize_hostname(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn is_valid_hostname(s: &str) -> bool {
    !s.trim().is_empty() && Url::parse(&normalize_hostname(s)).is_ok()
}
