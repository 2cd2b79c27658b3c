use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::{
    error::StorageError,
    storage::{
        entities::PomodoroDay, keys::StorageKey, kv_store::KeyValueStore, load_json_or_default,
        save_json,
    },
    utils::clock::Clock,
};

use super::{processing::TimerEventProcessor, runner::TimerEvent, state::Phase};

/// Adds one completed focus interval to the user's tally for `date`. Returns the new tally.
pub async fn record_pomodoro_session(
    store: &impl KeyValueStore,
    user: &str,
    date: NaiveDate,
) -> Result<u32, StorageError> {
    let key = StorageKey::pomodoro(user, date)?;
    let mut day: PomodoroDay = load_json_or_default(store, &key).await?;
    day.sessions_completed += 1;
    save_json(store, &key, &day).await?;
    Ok(day.sessions_completed)
}

/// Persists focus completions into the daily pomodoro record. Breaks are not recorded.
pub struct SessionRecorder<S: KeyValueStore> {
    store: S,
    user: String,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> SessionRecorder<S> {
    pub fn new(store: S, user: String, clock: Box<dyn Clock>) -> Self {
        Self { store, user, clock }
    }
}

impl<S: KeyValueStore> TimerEventProcessor for SessionRecorder<S> {
    async fn process_next(&mut self, event: TimerEvent) -> Result<()> {
        let TimerEvent::PhaseCompleted(completion, _) = event else {
            return Ok(());
        };
        if completion.finished != Phase::Focus {
            return Ok(());
        }
        let today = self.clock.today();
        let total = record_pomodoro_session(&self.store, &self.user, today).await?;
        info!("Recorded pomodoro session {total} for {today}");
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
