//! Port for minting identifiers of newly registered users.

use std::sync::{Arc, Mutex, PoisonError};

use mockable::Clock;

use crate::domain::UserId;

/// Source of fresh [`UserId`] values.
#[cfg_attr(test, mockall::automock)]
pub trait UserIdGenerator: Send + Sync {
    /// Mint an identifier not previously returned by this generator.
    fn next_id(&self) -> UserId;
}

/// Identifiers derived from the current time in epoch milliseconds.
///
/// Two registrations within the same millisecond (or a clock stepping
/// backwards) would collide, so the generator remembers the last value it
/// handed out and bumps past it.
pub struct TimestampUserIdGenerator {
    clock: Arc<dyn Clock>,
    last: Mutex<i64>,
}

impl TimestampUserIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: Mutex::new(i64::MIN),
        }
    }
}

impl UserIdGenerator for TimestampUserIdGenerator {
    fn next_id(&self) -> UserId {
        let now = self.clock.utc().timestamp_millis();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let next = if now > *last { now } else { last.saturating_add(1) };
        *last = next;
        UserId::from_millis(next)
    }
}

#[cfg(test)]
mod tests {
    //! Id minting against a mocked clock.
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    fn clock_reading(millis: &[i64]) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        let mut readings = millis.to_vec().into_iter();
        clock.expect_utc().times(millis.len()).returning(move || {
            let millis = readings.next().expect("clock read more often than expected");
            Utc.timestamp_millis_opt(millis)
                .single()
                .expect("valid fixture timestamp")
        });
        Arc::new(clock)
    }

    #[rstest]
    fn id_is_the_epoch_millisecond_timestamp() {
        let generator = TimestampUserIdGenerator::new(clock_reading(&[1_718_900_000_123]));
        assert_eq!(generator.next_id().as_ref(), "1718900000123");
    }

    #[rstest]
    #[case(&[1_718_900_000_000; 3], &["1718900000000", "1718900000001", "1718900000002"])]
    #[case(
        &[1_718_900_000_500, 1_718_900_000_100, 1_718_900_000_900],
        &["1718900000500", "1718900000501", "1718900000900"]
    )]
    fn ids_strictly_increase(#[case] readings: &[i64], #[case] expected: &[&str]) {
        let generator = TimestampUserIdGenerator::new(clock_reading(readings));
        let ids: Vec<String> = readings.iter().map(|_| generator.next_id().into()).collect();
        assert_eq!(ids, expected);
    }
}
