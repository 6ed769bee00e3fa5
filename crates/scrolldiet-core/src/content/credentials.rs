//! API key lookup for the content service.

use crate::error::ContentError;

/// Keyring entry holding the content API key.
pub const API_KEY_ENTRY: &str = "gemini_api_key";

/// Environment variables checked before the keyring, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    Keyring,
}

impl KeySource {
    pub fn describe(self) -> String {
        match self {
            KeySource::Env(var) => format!("environment (${var})"),
            KeySource::Keyring => "OS keyring".to_string(),
        }
    }
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use crate::error::ContentError;

    const SERVICE: &str = "scrolldiet";

    pub fn get(key: &str) -> Result<Option<String>, ContentError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), ContentError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), ContentError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolve the API key from the environment, then the keyring.
///
/// Keyring failures are logged and treated as "no key".
pub fn resolve_api_key() -> Option<(String, KeySource)> {
    resolve_with(|var| std::env::var(var).ok(), || {
        keyring_store::get(API_KEY_ENTRY).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "keyring lookup failed");
            None
        })
    })
}

fn resolve_with(
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Option<(String, KeySource)> {
    for var in API_KEY_VARS {
        if let Some(key) = env(var).filter(|k| !k.trim().is_empty()) {
            return Some((key.trim().to_string(), KeySource::Env(var)));
        }
    }
    keyring()
        .filter(|k| !k.trim().is_empty())
        .map(|k| (k.trim().to_string(), KeySource::Keyring))
}

/// Store a key in the keyring.
///
/// # Errors
/// Returns an error if the key is blank or the keyring write fails.
pub fn store_api_key(key: &str) -> Result<(), ContentError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ContentError::MissingCredentials);
    }
    keyring_store::set(API_KEY_ENTRY, key)
}

/// Remove the stored key. Missing entries are not an error.
///
/// # Errors
/// Returns an error if the keyring cannot be reached.
pub fn clear_api_key() -> Result<(), ContentError> {
    keyring_store::delete(API_KEY_ENTRY)
}
