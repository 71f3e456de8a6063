use crate::domain::{FallbackReason, Reading, ReadingSource};
use crate::ports::Clock;
use chrono::{DateTime, FixedOffset, Offset};
use chrono_tz::Tz;
use tracing::debug;

/// Produce the wall-clock reading for `zone`.
///
/// With a cached authoritative timestamp the reading is that instant in the
/// zone; the caller advances the timestamp between calls. Without one, the
/// zone's time of day comes from the timezone database and is combined with
/// the local machine's calendar date, so near midnight the date can be off
/// by one for zones far from the machine's own.
///
/// Anything unusable (no zone, unknown zone, timestamp out of range) yields
/// the local machine's time unmodified.
pub fn resolve_time(zone: Option<&str>, cached: Option<i64>, clock: &dyn Clock) -> Reading {
    let now = clock.now();

    let Some(zone_id) = zone.map(str::trim).filter(|z| !z.is_empty()) else {
        return local_reading(now, FallbackReason::NoZoneSelected);
    };

    let tz: Tz = match zone_id.parse() {
        Ok(tz) => tz,
        Err(_) => {
            debug!("Zone {} not in timezone database, using local time", zone_id);
            return local_reading(now, FallbackReason::UnknownZone(zone_id.to_string()));
        }
    };

    match cached {
        Some(timestamp) => match DateTime::from_timestamp(timestamp, 0) {
            Some(instant) => {
                let zoned = instant.with_timezone(&tz);
                Reading {
                    civil: zoned.naive_local(),
                    offset: zoned.offset().fix(),
                    source: ReadingSource::Authoritative,
                }
            }
            None => local_reading(now, FallbackReason::TimestampOutOfRange(timestamp)),
        },
        None => {
            let zoned = now.with_timezone(&tz);
            Reading {
                civil: now.date_naive().and_time(zoned.time()),
                offset: zoned.offset().fix(),
                source: ReadingSource::ZoneRules,
            }
        }
    }
}

fn local_reading(now: DateTime<FixedOffset>, reason: FallbackReason) -> Reading {
    Reading {
        civil: now.naive_local(),
        offset: *now.offset(),
        source: ReadingSource::LocalMachine(reason),
    }
}
