use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Source of "now" for every operation that stamps a date or generates an id.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant; `today` is the UTC calendar date of that instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Nine in the morning (UTC) of `date`.
    pub fn on(date: NaiveDate) -> Self {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
        Self::new(date.and_time(time).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Millisecond timestamp id, bumped past `current_max` so ids stay unique within a collection.
pub(crate) fn next_timestamp_id(now: DateTime<Utc>, current_max: Option<u64>) -> u64 {
    let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    match current_max {
        Some(max) if max >= candidate => max.saturating_add(1),
        _ => candidate,
    }
}
