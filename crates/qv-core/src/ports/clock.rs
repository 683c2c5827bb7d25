use chrono::{DateTime, NaiveDate, Utc};

pub trait ClockPort: Send + Sync {
    /// Local calendar date, used for age checks and birthdate bounds.
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}
