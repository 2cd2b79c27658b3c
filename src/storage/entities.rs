//! Documents as they are laid out in the store. Field names are camelCase so values written by
//! earlier versions of the app keep decoding.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::time::date_to_key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Five user defined counters for one course on one day. The record is rewritten as a whole on
/// every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub metric1: f64,
    #[serde(default)]
    pub metric2: f64,
    #[serde(default)]
    pub metric3: f64,
    #[serde(default)]
    pub metric4: f64,
    #[serde(default)]
    pub metric5: f64,
}

impl DailyMetric {
    pub fn empty(id: String, user_id: &str, course_id: &str, date: NaiveDate) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            date,
            metric1: 0.,
            metric2: 0.,
            metric3: 0.,
            metric4: 0.,
            metric5: 0.,
        }
    }

    pub fn values(&self) -> [f64; 5] {
        [
            self.metric1,
            self.metric2,
            self.metric3,
            self.metric4,
            self.metric5,
        ]
    }

    /// Mutable access by 1-based index, matching the `metricN` field names.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut f64> {
        match index {
            1 => Some(&mut self.metric1),
            2 => Some(&mut self.metric2),
            3 => Some(&mut self.metric3),
            4 => Some(&mut self.metric4),
            5 => Some(&mut self.metric5),
            _ => None,
        }
    }
}

/// Daily aggregate of the timer. Anything else found in the stored object is written back as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroDay {
    #[serde(default)]
    pub sessions_completed: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prayers of one day. Fields written by other views are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerDay {
    #[serde(default)]
    pub fajr: bool,
    #[serde(default)]
    pub dhuhr: bool,
    #[serde(default)]
    pub asr: bool,
    #[serde(default)]
    pub maghrib: bool,
    #[serde(default)]
    pub isha: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PrayerDay {
    pub fn completed(&self) -> usize {
        [self.fajr, self.dhuhr, self.asr, self.maghrib, self.isha]
            .into_iter()
            .filter(|v| *v)
            .count()
    }
}

/// A task as other views store it. `createdAt` is kept as the raw string, dates alone and full
/// timestamps both occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "string_or_scalar")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: String, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed: false,
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            extra: Map::new(),
        }
    }

    /// Completed and created on `day`, compared on the `YYYY-MM-DD` prefix.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.completed
            && self
                .created_at
                .as_deref()
                .is_some_and(|v| v.starts_with(&date_to_key(day)))
    }
}

/// Numeric ids are read as their decimal text.
fn string_or_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingDay {
    #[serde(default)]
    pub progress: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub ar: String,
    pub en: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WisdomQuote {
    pub ar: String,
    pub en: String,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{PomodoroDay, PrayerDay, ReadingDay, Task, Verse};

    #[test]
    fn pomodoro_day_keeps_unknown_fields() {
        let mut day: PomodoroDay =
            serde_json::from_str(r#"{"sessionsCompleted":2,"minutes":50}"#).unwrap();
        day.sessions_completed += 1;
        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(value["sessionsCompleted"], 3);
        assert_eq!(value["minutes"], 50);
    }

    #[test]
    fn prayer_day_counts_missing_as_not_prayed() {
        let day: PrayerDay = serde_json::from_str(r#"{"fajr":true,"isha":true}"#).unwrap();
        assert_eq!(day.completed(), 2);
    }

    #[test]
    fn task_completion_is_bound_to_creation_day() {
        let mut task = Task::new(
            "t".into(),
            "Revise".into(),
            Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 0).unwrap(),
        );
        assert_eq!(task.created_at.as_deref(), Some("2026-10-16T23:59:00.000Z"));
        assert!(!task.completed_on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()));
        task.completed = true;
        assert!(task.completed_on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()));
        assert!(!task.completed_on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
    }

    #[test]
    fn task_accepts_date_only_creation_and_numeric_id() {
        let tasks: Vec<Task> =
            serde_json::from_str(r#"[{"id":1,"completed":true,"createdAt":"2026-10-16"}]"#)
                .unwrap();
        assert_eq!(tasks[0].id, "1");
        assert!(tasks[0].completed_on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()));
    }

    #[test]
    fn rewritten_records_keep_unknown_fields() {
        let mut prayers: PrayerDay =
            serde_json::from_str(r#"{"fajr":true,"sunnah":true}"#).unwrap();
        prayers.asr = true;
        let value = serde_json::to_value(&prayers).unwrap();
        assert_eq!(value["sunnah"], true);
        assert_eq!(value["asr"], true);

        let mut task: Task =
            serde_json::from_str(r#"{"id":"t","title":"Revise","priority":"high"}"#).unwrap();
        task.completed = true;
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["priority"], "high");
        assert_eq!(value["completed"], true);

        let reading: ReadingDay =
            serde_json::from_str(r#"{"progress":20,"book":"Riyad as-Salihin"}"#).unwrap();
        assert_eq!(serde_json::to_value(&reading).unwrap()["book"], "Riyad as-Salihin");
    }

    #[test]
    fn verse_uses_ref_field() {
        let verse: Verse =
            serde_json::from_str(r#"{"ar":"a","en":"b","ref":"Quran 94:6"}"#).unwrap();
        assert_eq!(verse.reference, "Quran 94:6");
    }
}
