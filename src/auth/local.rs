use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AuthError,
    storage::{keys::StorageKey, kv_store::KeyValueStore, load_json_or_default, save_json},
};

use super::{AuthProvider, User};

/// Offline stand-in for a hosted auth service. Accounts are profiles kept in the store; the
/// password is required but never stored or compared.
pub struct LocalAuthProvider<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalAuthProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn profiles(&self) -> Result<Vec<User>, AuthError> {
        Ok(load_json_or_default(&self.store, &StorageKey::users()).await?)
    }
}

fn validate(email: &str, password: &str) -> Result<String, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingField { field: "Email" });
    }
    if password.is_empty() {
        return Err(AuthError::MissingField { field: "Password" });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email.to_string()),
        _ => Err(AuthError::InvalidEmail {
            email: email.to_string(),
        }),
    }
}

#[async_trait(?Send)]
impl<S: KeyValueStore> AuthProvider for LocalAuthProvider<S> {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = validate(email, password)?;
        self.profiles()
            .await?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(&email))
            .ok_or(AuthError::UnknownAccount { email })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<User, AuthError> {
        let email = validate(email, password)?;
        if full_name.trim().is_empty() {
            return Err(AuthError::MissingField { field: "Full name" });
        }
        let mut profiles = self.profiles().await?;
        if profiles.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AuthError::AccountExists { email });
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            full_name: full_name.trim().to_string(),
        };
        profiles.push(user.clone());
        save_json(&self.store, &StorageKey::users(), &profiles).await?;
        info!("Registered {}", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::LocalAuthProvider;
    use crate::{auth::AuthProvider, error::AuthError, storage::kv_store::MemoryStore};

    #[tokio::test]
    async fn sign_up_then_sign_in() -> Result<()> {
        let provider = LocalAuthProvider::new(MemoryStore::default());
        let user = provider
            .sign_up("Amina@Example.com", "secret", " Amina ")
            .await?;
        assert_eq!(user.full_name, "Amina");

        let signed_in = provider.sign_in("amina@example.com", "anything").await?;
        assert_eq!(signed_in, user);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_bad_input() -> Result<()> {
        let provider = LocalAuthProvider::new(MemoryStore::default());
        assert!(matches!(
            provider.sign_in("", "x").await,
            Err(AuthError::MissingField { field: "Email" })
        ));
        assert!(matches!(
            provider.sign_in("a@b.c", "").await,
            Err(AuthError::MissingField { field: "Password" })
        ));
        assert!(matches!(
            provider.sign_in("not-an-email", "x").await,
            Err(AuthError::InvalidEmail { .. })
        ));
        assert!(matches!(
            provider.sign_in("a@b.c", "x").await,
            Err(AuthError::UnknownAccount { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn email_is_unique() -> Result<()> {
        let provider = LocalAuthProvider::new(MemoryStore::default());
        provider.sign_up("a@b.c", "x", "A").await?;
        assert!(matches!(
            provider.sign_up("A@B.C", "y", "B").await,
            Err(AuthError::AccountExists { .. })
        ));
        Ok(())
    }
}
