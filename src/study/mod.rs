//! Courses and their per-day metrics.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::StudyError,
    storage::{
        entities::{Course, DailyMetric},
        keys::StorageKey,
        kv_store::KeyValueStore,
        load_json, load_json_or_default, save_json,
    },
};

pub const DEFAULT_COURSE_COLOR: &str = "#D4AF37";

/// Checks that `input` is a `#rrggbb` color. Case is kept as typed.
pub fn parse_color(input: &str) -> Result<String, StudyError> {
    let valid = input.len() == 7
        && input.starts_with('#')
        && input[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(input.to_string())
    } else {
        Err(StudyError::InvalidColor {
            input: input.to_string(),
        })
    }
}

/// The user's course list with an optional selection. Every change writes the whole list back.
pub struct CourseBook<S: KeyValueStore> {
    store: S,
    user: String,
    courses: Vec<Course>,
    selected: Option<String>,
}

impl<S: KeyValueStore> CourseBook<S> {
    pub async fn load(store: S, user: &str) -> Result<Self, StudyError> {
        let courses = load_json_or_default(&store, &StorageKey::courses(user)?).await?;
        Ok(Self {
            store,
            user: user.to_string(),
            courses,
            selected: None,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn selected(&self) -> Option<&Course> {
        let id = self.selected.as_deref()?;
        self.courses.iter().find(|c| c.id == id)
    }

    /// Adds a course. Blank names are refused before anything is written; names are stored as
    /// typed and duplicates are allowed.
    pub async fn add(
        &mut self,
        name: &str,
        color: &str,
        now: DateTime<Utc>,
    ) -> Result<&Course, StudyError> {
        if name.trim().is_empty() {
            return Err(StudyError::EmptyCourseName);
        }
        let course = Course {
            id: Uuid::new_v4().to_string(),
            user_id: self.user.clone(),
            name: name.to_string(),
            color: parse_color(color)?,
            created_at: now,
        };
        info!("Adding course {} ({})", course.name, course.id);
        self.courses.push(course);
        self.persist().await?;
        Ok(&self.courses[self.courses.len() - 1])
    }

    /// Removes a course by id. Returns whether something was removed. Metrics recorded for the
    /// course are left in place.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StudyError> {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        let removed = self.courses.len() != before;
        if removed {
            info!("Deleted course {id}");
        }
        self.persist().await?;
        Ok(removed)
    }

    /// Finds a course by exact id, then by name ignoring case, then by id prefix. The first
    /// match wins.
    pub fn find(&self, query: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|c| c.id == query)
            .or_else(|| {
                self.courses
                    .iter()
                    .find(|c| c.name.to_lowercase() == query.to_lowercase())
            })
            .or_else(|| {
                self.courses
                    .iter()
                    .find(|c| !query.is_empty() && c.id.starts_with(query))
            })
    }

    pub fn select(&mut self, query: &str) -> Result<&Course, StudyError> {
        let id = self
            .find(query)
            .map(|c| c.id.clone())
            .ok_or_else(|| StudyError::UnknownCourse {
                query: query.to_string(),
            })?;
        self.selected = Some(id);
        self.selected().ok_or_else(|| StudyError::UnknownCourse {
            query: query.to_string(),
        })
    }

    async fn persist(&self) -> Result<(), StudyError> {
        save_json(&self.store, &StorageKey::courses(&self.user)?, &self.courses).await?;
        Ok(())
    }
}

/// Metrics of one course on one day.
pub struct MetricSheet<S: KeyValueStore> {
    store: S,
    record: DailyMetric,
}

impl<S: KeyValueStore> MetricSheet<S> {
    /// Reads the stored record, or starts an empty one with a fresh id. Nothing is written until
    /// the first update.
    pub async fn load(
        store: S,
        user: &str,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Self, StudyError> {
        let key = StorageKey::metrics(user, course_id, date)?;
        let record = match load_json(&store, &key).await? {
            Some(record) => record,
            None => DailyMetric::empty(Uuid::new_v4().to_string(), user, course_id, date),
        };
        Ok(Self { store, record })
    }

    pub fn record(&self) -> &DailyMetric {
        &self.record
    }

    /// Sets metric `index` (1 to 5) and writes the whole record back under its own date.
    pub async fn update(&mut self, index: usize, value: f64) -> Result<&DailyMetric, StudyError> {
        if value < 0. || value.is_nan() {
            return Err(StudyError::NegativeMetric { value });
        }
        let slot = self
            .record
            .slot_mut(index)
            .ok_or(StudyError::MetricOutOfRange { index })?;
        *slot = value;

        let key = StorageKey::metrics(&self.record.user_id, &self.record.course_id, self.record.date)?;
        save_json(&self.store, &key, &self.record).await?;
        Ok(&self.record)
    }
}
