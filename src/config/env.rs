use log::debug;

use super::RequestDefaults;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "PARLIAMENT_BASE_URL";

/// Environment variable holding the API access token.
pub const ACCESS_TOKEN_ENV: &str = "PARLIAMENT_ACCESS_TOKEN";

/// Header the access token is sent in.
pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";

impl RequestDefaults {
    /// Builds defaults from `PARLIAMENT_BASE_URL` and `PARLIAMENT_ACCESS_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`RequestDefaults::from_env`] with a custom variable lookup.
    /// Unset and empty variables are ignored.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut defaults = RequestDefaults::new();

        if let Some(base_url) = read(BASE_URL_ENV) {
            debug!("Using {} from environment: {}", BASE_URL_ENV, base_url);
            defaults.base_url = Some(base_url);
        }

        if let Some(token) = read(ACCESS_TOKEN_ENV) {
            debug!("Using {} for the {} header", ACCESS_TOKEN_ENV, ACCESS_TOKEN_HEADER);
            defaults.headers.insert(ACCESS_TOKEN_HEADER, token);
        }

        defaults
    }
}
