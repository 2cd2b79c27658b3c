//! Sign-in plumbing. Checking credentials is the job of an [AuthProvider]; this module only
//! keeps track of who is signed in.

pub mod form;
pub mod local;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{AuthError, StorageError},
    storage::{keys::StorageKey, kv_store::KeyValueStore, load_json, save_json},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_up(&self, email: &str, password: &str, full_name: &str)
        -> Result<User, AuthError>;
}

/// User of the active session, if any.
pub async fn current_user(store: &impl KeyValueStore) -> Result<Option<User>, StorageError> {
    load_json(store, &StorageKey::current_user()).await
}

pub async fn start_session(store: &impl KeyValueStore, user: &User) -> Result<(), StorageError> {
    info!("Starting session for {}", user.id);
    save_json(store, &StorageKey::current_user(), user).await
}

pub async fn end_session(store: &impl KeyValueStore) -> Result<(), StorageError> {
    store.remove(&StorageKey::current_user()).await
}
