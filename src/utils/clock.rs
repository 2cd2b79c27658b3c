use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use tokio::time::Instant;

/// Source of wall-clock dates and monotonic instants for the timer and for the daily keys. Swapping
/// it out lets tests pin "today" and run the countdown on paused tokio time.
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    fn instant(&self) -> Instant;

    async fn sleep_until(&self, instant: Instant);

    /// Calendar day used in storage keys. Matches an ISO timestamp cut at `T`, so it is a UTC day.
    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }

    /// Calendar day as the user sees it. Only used for rotating daily content.
    fn local_day(&self) -> NaiveDate {
        self.time().with_timezone(&Local).date_naive()
    }
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, instant: Instant) {
        tokio::time::sleep_until(instant).await;
    }
}

/// Clock frozen at a given date while still sleeping on tokio time.
#[cfg(test)]
#[derive(Clone)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

#[cfg(test)]
#[async_trait]
impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.now
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, instant: Instant) {
        tokio::time::sleep_until(instant).await;
    }
}
