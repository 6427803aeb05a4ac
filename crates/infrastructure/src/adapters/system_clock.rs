//! Wall-clock time for cache ages

use baza_application::Clock;
use chrono::{DateTime, Utc};

/// [`Clock`] reading the operating system's UTC time.
///
/// Cache entries compare `now()` with the time they were stored, so a
/// wall clock stepped backwards makes entries look younger until it
/// catches up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
