//! Client settings persistence.
//!
//! Non-secret settings go through `confy`; the API password lives in the
//! OS keychain, keyed by user name.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "ordercast";
const KEYCHAIN_SERVICE: &str = "ordercast.api.credentials";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub user_name: String,
    /// When set, orders and reports are intercepted client-side instead
    /// of being sent. Read at client construction time.
    #[serde(default)]
    pub test_mode: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_name: String::new(),
            test_mode: true,
        }
    }
}

pub fn load() -> Result<ClientSettings> {
    let settings: ClientSettings =
        confy::load(APP_NAME, None).context("Failed to load client settings")?;
    Ok(settings)
}

pub fn store(settings: &ClientSettings) -> Result<()> {
    confy::store(APP_NAME, None, settings).context("Failed to store client settings")?;
    Ok(())
}

/// Store the API password for a user in the OS keychain
pub fn store_password(user_name: &str, password: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, user_name)?;
    entry.set_password(password)?;
    Ok(())
}

/// Retrieve the API password for a user from the OS keychain
pub fn get_password(user_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, user_name)?;
    let password = entry.get_password()?;
    Ok(password)
}

/// Delete the API password for a user from the OS keychain
pub fn delete_password(user_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, user_name)?;
    entry.delete_password()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_test_mode_on() {
        let settings = ClientSettings::default();
        assert!(settings.service.test_mode);
        assert!(settings.service.base_url.is_empty());
    }

    #[test]
    fn settings_round_trip_through_serde() {
        let settings = ClientSettings {
            service: ServiceConfig {
                base_url: "https://svc.example".to_string(),
                user_name: "u".to_string(),
                test_mode: false,
            },
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: ClientSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.service.base_url, "https://svc.example");
        assert!(!back.service.test_mode);
    }
}
