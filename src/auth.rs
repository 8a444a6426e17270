//! Identity seam for bearer-token acquisition.
//!
//! The transport asks the identity provider for a token silently before
//! every dispatch. Silent acquisition failure is "no token", never a hard
//! error; the transport then falls back to the stored legacy token, and
//! finally to dispatching unauthenticated.

use async_trait::async_trait;
use secrecy::SecretString;

/// A signed-in account known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub username: String,
}

/// Source of bearer tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// All currently signed-in accounts, first is preferred.
    async fn accounts(&self) -> Vec<Account>;

    /// Non-interactive token acquisition for one account.
    async fn acquire_token_silent(&self, account: &Account) -> Option<SecretString>;
}

/// Provider with no signed-in accounts.
pub struct NoIdentity;

#[async_trait]
impl IdentityProvider for NoIdentity {
    async fn accounts(&self) -> Vec<Account> {
        Vec::new()
    }

    async fn acquire_token_silent(&self, _account: &Account) -> Option<SecretString> {
        None
    }
}

/// Provider backed by an environment variable, for headless use.
pub struct EnvIdentity {
    var: String,
}

impl EnvIdentity {
    pub fn new(var: impl Into<String>) -> Self {
        EnvIdentity { var: var.into() }
    }
}

#[async_trait]
impl IdentityProvider for EnvIdentity {
    async fn accounts(&self) -> Vec<Account> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => vec![Account {
                id: self.var.clone(),
                username: "env".to_string(),
            }],
            _ => Vec::new(),
        }
    }

    async fn acquire_token_silent(&self, _account: &Account) -> Option<SecretString> {
        std::env::var(&self.var)
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }
}

/// Provider with a fixed account and token.
pub struct StaticIdentity {
    account: Account,
    token: String,
}

impl StaticIdentity {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        let username = username.into();
        StaticIdentity {
            account: Account {
                id: format!("static:{username}"),
                username,
            },
            token: token.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn accounts(&self) -> Vec<Account> {
        vec![self.account.clone()]
    }

    async fn acquire_token_silent(&self, _account: &Account) -> Option<SecretString> {
        Some(SecretString::from(self.token.clone()))
    }
}

/// Observer for the "session invalid" side signal raised on 401 responses.
///
/// The transport's responsibility ends at clearing client-held credentials
/// and firing this signal; navigation to a sign-in entry point belongs to
/// the embedding environment.
pub trait SessionObserver: Send + Sync {
    fn session_invalidated(&self);
}

/// Default observer: records the signal and nothing else.
pub struct NullSessionObserver;

impl SessionObserver for NullSessionObserver {
    fn session_invalidated(&self) {
        tracing::warn!("session invalidated; sign-in required");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_no_identity_has_no_accounts() {
        let provider = NoIdentity;
        assert!(provider.accounts().await.is_empty());
    }

    #[tokio::test]
    async fn test_static_identity_acquires_silently() {
        let provider = StaticIdentity::new("tech", "tok-123");
        let accounts = provider.accounts().await;
        assert_eq!(accounts.len(), 1);
        let token = provider.acquire_token_silent(&accounts[0]).await.unwrap();
        assert_eq!(token.expose_secret(), "tok-123");
    }
}
