use std::fmt::Display;

use chrono::NaiveDate;

use crate::{error::StorageError, utils::time::date_to_key};

/// Name of a stored value. Keys end up as file names, so anything that could escape the store
/// directory is refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.contains("..")
            || key.chars().any(char::is_control)
        {
            return Err(StorageError::InvalidKey { key });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn daily_content_date() -> Self {
        Self("dailyContentDate".into())
    }

    pub fn daily_verse() -> Self {
        Self("dailyVerse".into())
    }

    pub fn wisdom_quote() -> Self {
        Self("wisdomQuote".into())
    }

    pub fn current_user() -> Self {
        Self("currentUser".into())
    }

    pub fn users() -> Self {
        Self("users".into())
    }

    pub fn language() -> Self {
        Self("language".into())
    }

    pub fn prayers(user: &str, date: NaiveDate) -> Result<Self, StorageError> {
        Self::new(format!("prayers_{user}_{}", date_to_key(date)))
    }

    pub fn tasks(user: &str) -> Result<Self, StorageError> {
        Self::new(format!("tasks_{user}"))
    }

    pub fn pomodoro(user: &str, date: NaiveDate) -> Result<Self, StorageError> {
        Self::new(format!("pomodoro_{user}_{}", date_to_key(date)))
    }

    pub fn reading(user: &str, date: NaiveDate) -> Result<Self, StorageError> {
        Self::new(format!("reading_{user}_{}", date_to_key(date)))
    }

    pub fn courses(user: &str) -> Result<Self, StorageError> {
        Self::new(format!("courses_{user}"))
    }

    pub fn metrics(user: &str, course: &str, date: NaiveDate) -> Result<Self, StorageError> {
        Self::new(format!("metrics_{user}_{course}_{}", date_to_key(date)))
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
