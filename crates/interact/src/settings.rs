use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Id of the `<script type="application/json">` tag the server renders settings into.
pub const SETTINGS_ELEMENT_ID: &str = "scholarfolio-settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Relative path the contact form posts to.
    pub endpoint: String,
    /// Address offered to the visitor when a submission fails.
    pub fallback_email: String,
    pub notification_timeout_ms: u64,
    pub exit_animation_ms: u64,
    pub loading_state_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "/send-email".to_owned(),
            fallback_email: "contact@example.org".to_owned(),
            notification_timeout_ms: 8_000,
            exit_animation_ms: 500,
            loading_state_ms: 2_000,
        }
    }
}

impl Settings {
    /// Parses embedded settings, keeping defaults when the payload is unusable.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("invalid embedded settings, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }

    pub fn loading_state(&self) -> Duration {
        Duration::from_millis(self.loading_state_ms)
    }
}
