use chrono::NaiveDate;
use futures::try_join;

use crate::{
    error::StorageError,
    storage::{
        entities::{PomodoroDay, PrayerDay, ReadingDay, Task},
        keys::StorageKey,
        kv_store::KeyValueStore,
        load_json_or_default,
    },
};

/// Today's progress across the four tracked areas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub tasks_completed: usize,
    pub pomodoro_sessions: u32,
    pub prayers_completed: usize,
    pub reading_progress: f64,
}

impl DashboardStats {
    pub async fn collect(
        store: &impl KeyValueStore,
        user: &str,
        today: NaiveDate,
    ) -> Result<Self, StorageError> {
        let prayers_key = StorageKey::prayers(user, today)?;
        let tasks_key = StorageKey::tasks(user)?;
        let pomodoro_key = StorageKey::pomodoro(user, today)?;
        let reading_key = StorageKey::reading(user, today)?;

        let (prayers, tasks, pomodoro, reading) = try_join!(
            load_json_or_default::<PrayerDay>(store, &prayers_key),
            load_json_or_default::<Vec<Task>>(store, &tasks_key),
            load_json_or_default::<PomodoroDay>(store, &pomodoro_key),
            load_json_or_default::<ReadingDay>(store, &reading_key),
        )?;

        Ok(Self {
            tasks_completed: tasks.iter().filter(|t| t.completed_on(today)).count(),
            pomodoro_sessions: pomodoro.sessions_completed,
            prayers_completed: prayers.completed(),
            reading_progress: reading.progress,
        })
    }
}
