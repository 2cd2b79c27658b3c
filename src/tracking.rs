//! Writers for the records the dashboard aggregates: prayers, tasks and reading.

use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::StorageError,
    storage::{
        entities::{PrayerDay, ReadingDay, Task},
        keys::StorageKey,
        kv_store::KeyValueStore,
        load_json_or_default, save_json,
    },
    utils::percentage::Percentage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub fn is_done(self, day: &PrayerDay) -> bool {
        match self {
            Prayer::Fajr => day.fajr,
            Prayer::Dhuhr => day.dhuhr,
            Prayer::Asr => day.asr,
            Prayer::Maghrib => day.maghrib,
            Prayer::Isha => day.isha,
        }
    }

    fn slot(self, day: &mut PrayerDay) -> &mut bool {
        match self {
            Prayer::Fajr => &mut day.fajr,
            Prayer::Dhuhr => &mut day.dhuhr,
            Prayer::Asr => &mut day.asr,
            Prayer::Maghrib => &mut day.maghrib,
            Prayer::Isha => &mut day.isha,
        }
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        };
        f.write_str(name)
    }
}

pub async fn set_prayer(
    store: &impl KeyValueStore,
    user: &str,
    date: NaiveDate,
    prayer: Prayer,
    done: bool,
) -> Result<PrayerDay, StorageError> {
    let key = StorageKey::prayers(user, date)?;
    let mut day: PrayerDay = load_json_or_default(store, &key).await?;
    *prayer.slot(&mut day) = done;
    save_json(store, &key, &day).await?;
    info!("Marked {prayer} as {done} on {date}");
    Ok(day)
}

pub async fn list_tasks(store: &impl KeyValueStore, user: &str) -> Result<Vec<Task>, StorageError> {
    load_json_or_default(store, &StorageKey::tasks(user)?).await
}

pub async fn add_task(
    store: &impl KeyValueStore,
    user: &str,
    title: &str,
    now: DateTime<Utc>,
) -> Result<Task, StorageError> {
    let key = StorageKey::tasks(user)?;
    let mut tasks: Vec<Task> = load_json_or_default(store, &key).await?;
    let task = Task::new(Uuid::new_v4().to_string(), title.to_string(), now);
    tasks.push(task.clone());
    save_json(store, &key, &tasks).await?;
    Ok(task)
}

/// Marks the task whose id starts with `id_prefix` as completed. `None` when nothing matches.
pub async fn complete_task(
    store: &impl KeyValueStore,
    user: &str,
    id_prefix: &str,
) -> Result<Option<Task>, StorageError> {
    let key = StorageKey::tasks(user)?;
    let mut tasks: Vec<Task> = load_json_or_default(store, &key).await?;
    let Some(task) = tasks
        .iter_mut()
        .find(|t| !id_prefix.is_empty() && t.id.starts_with(id_prefix))
    else {
        return Ok(None);
    };
    task.completed = true;
    let task = task.clone();
    save_json(store, &key, &tasks).await?;
    Ok(Some(task))
}

/// Reading progress is a plain percentage of the day's reading goal.
#[derive(Debug, Clone, Copy)]
pub struct ReadingProgress(pub Percentage);

impl FromStr for ReadingProgress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<Percentage>()?;
        if *value > 100. {
            return Err(anyhow!("Reading progress can't exceed 100%"));
        }
        Ok(Self(value))
    }
}

pub async fn reading(
    store: &impl KeyValueStore,
    user: &str,
    date: NaiveDate,
) -> Result<ReadingDay, StorageError> {
    load_json_or_default(store, &StorageKey::reading(user, date)?).await
}

pub async fn set_reading(
    store: &impl KeyValueStore,
    user: &str,
    date: NaiveDate,
    progress: ReadingProgress,
) -> Result<(), StorageError> {
    let key = StorageKey::reading(user, date)?;
    let mut day: ReadingDay = load_json_or_default(store, &key).await?;
    day.progress = *progress.0;
    save_json(store, &key, &day).await
}
