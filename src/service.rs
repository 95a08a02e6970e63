// Service seam: the operations the dispatcher needs from the remote
// settings API and the errors they can fail with. `api::ApiClient` is
// the HTTP implementation; tests use an in-memory fake.

use crate::settings::{Category, Change, Properties, TargetUsers};
use thiserror::Error;

/// Failures reported by the settings service. The CLI treats them all
/// the same way: print the message to stderr and finish.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("malformed service url {url}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service error: {status} - {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Remote operations on one domain's email settings.
pub trait SettingsService {
    /// Write `change` for a single user.
    fn update(&self, user: &str, change: &Change) -> Result<()>;

    /// Read the single entry of an entry-shaped category.
    fn retrieve_entry(&self, user: &str, category: Category) -> Result<Properties>;

    /// Read every entry of a feed-shaped category.
    fn retrieve_feed(&self, user: &str, category: Category) -> Result<Vec<Properties>>;

    /// Apply `change` to each user in order, stopping at the first failure.
    fn apply(&self, users: &TargetUsers, change: &Change) -> Result<()> {
        for user in users.iter() {
            self.update(user, change)?;
        }
        Ok(())
    }

    fn retrieve_imap(&self, user: &str) -> Result<bool> {
        let entry = self.retrieve_entry(user, Category::Imap)?;
        let raw = entry
            .get("enable")
            .ok_or_else(|| SettingsError::Decode("imap entry has no enable property".into()))?;
        raw.trim()
            .to_lowercase()
            .parse::<bool>()
            .map_err(|_| SettingsError::Decode(format!("imap enable is not a boolean: {raw}")))
    }

    fn retrieve_signature(&self, user: &str) -> Result<String> {
        let mut entry = self.retrieve_entry(user, Category::Signature)?;
        Ok(entry.remove("signature").unwrap_or_default())
    }
}
