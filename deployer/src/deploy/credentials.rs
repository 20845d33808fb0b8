//! Provider credentials

use std::collections::HashMap;

use secrecy::SecretString;

use crate::models::deployment::Provider;

/// Optional Vercel team scope
pub const VERCEL_TEAM_ID_ENV: &str = "VERCEL_TEAM_ID";

/// Optional Render workspace owner
pub const RENDER_OWNER_ID_ENV: &str = "RENDER_OWNER_ID";

/// One bearer token per provider, plus the non-secret account scopes some
/// providers need. A provider without a token is disabled.
#[derive(Debug, Default)]
pub struct Credentials {
    tokens: HashMap<Provider, SecretString>,
    pub vercel_team_id: Option<String>,
    pub render_owner_id: Option<String>,
}

impl Credentials {
    /// Read tokens from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    ///
    /// Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut credentials = Self {
            vercel_team_id: present(VERCEL_TEAM_ID_ENV),
            render_owner_id: present(RENDER_OWNER_ID_ENV),
            ..Default::default()
        };

        for provider in Provider::ALL {
            if let Some(token) = present(provider.token_env_var()) {
                credentials.tokens.insert(provider, SecretString::from(token));
            }
        }

        credentials
    }

    /// Set a token
    pub fn with_token(mut self, provider: Provider, token: impl Into<String>) -> Self {
        self.tokens
            .insert(provider, SecretString::from(token.into()));
        self
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.tokens.contains_key(&provider)
    }

    /// Move a token out, handing it to the adapter that will use it
    pub fn take_token(&mut self, provider: Provider) -> Option<SecretString> {
        self.tokens.remove(&provider)
    }
}
