use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Authentication boundary configuration.
///
/// ticketd does not verify credentials itself: an authenticating reverse
/// proxy in front of it injects the authenticated user's id into a header,
/// and the service re-validates that the user record still exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Header containing the authenticated user's id.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
        }
    }
}

impl AuthConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.identity_header.is_empty() {
            return Err(ConfigError::Validation(
                "auth.identity_header must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_identity_header() -> String {
    "x-ticketd-user".to_string()
}
