//! Explicit preferences context threaded through the API.
//!
//! There are no process-wide defaults; callers construct a [`Preferences`]
//! value and pass it where needed (snapshot envelopes, new ledgers).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub locale: String,
    /// ISO-4217 code applied to newly created ledgers.
    pub currency: String,
    /// Recorded in snapshot envelopes as `appVersion`.
    pub app_version: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            app_version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
