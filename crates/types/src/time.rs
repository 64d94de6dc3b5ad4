// Path: crates/types/src/time.rs

//! Ledger timestamp types.
//!
//! All three accept `YYYY-MM-DDTHH:MM:SS` with an optional fractional part and
//! an optional trailing `Z`; the text is always interpreted as UTC.

use crate::error::AbiError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Milliseconds from the Unix epoch to 2000-01-01T00:00:00Z, the block timestamp epoch.
pub const BLOCK_TIMESTAMP_EPOCH_MS: i64 = 946_684_800_000;
/// The length of one block timestamp slot in milliseconds.
pub const BLOCK_INTERVAL_MS: i64 = 500;

fn parse_utc(ty: &str, s: &str) -> Result<DateTime<Utc>, AbiError> {
    let text = s.trim();
    let text = text.strip_suffix('Z').unwrap_or(text);
    let naive = NaiveDateTime::parse_from_str(text, PARSE_FORMAT)
        .map_err(|e| AbiError::malformed(ty, s, e.to_string()))?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn from_unix_millis(ms: i64) -> Option<DateTime<Utc>> {
    let nanos = u32::try_from(ms.rem_euclid(1000) * 1_000_000).ok()?;
    Utc.timestamp_opt(ms.div_euclid(1000), nanos).single()
}

/// Microseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct TimePoint(i64);

impl TimePoint {
    /// Wraps a microsecond count.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// The microsecond count.
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// The calendar time, if representable.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.0.rem_euclid(1_000_000) * 1000).ok()?;
        Utc.timestamp_opt(self.0.div_euclid(1_000_000), nanos).single()
    }
}

impl FromStr for TimePoint {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = parse_utc("time_point", s)?;
        dt.timestamp()
            .checked_mul(1_000_000)
            .and_then(|us| us.checked_add(i64::from(dt.timestamp_subsec_micros())))
            .map(Self)
            .ok_or_else(|| AbiError::overflow("time_point", s))
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format(MILLIS_FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Whole seconds since the Unix epoch, as a 32-bit value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct TimePointSec(u32);

impl TimePointSec {
    /// Wraps a second count.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// The second count.
    pub const fn secs(self) -> u32 {
        self.0
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self(u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX))
    }

    /// This time advanced by `secs`, saturating at the end of the range.
    pub fn saturating_add(self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// The calendar time.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(i64::from(self.0), 0).single()
    }
}

impl FromStr for TimePointSec {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = parse_utc("time_point_sec", s)?;
        u32::try_from(dt.timestamp())
            .map(Self)
            .map_err(|_| AbiError::overflow("time_point_sec", s))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format(SECONDS_FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Half-second slots since 2000-01-01T00:00:00Z.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct BlockTimestamp(u32);

impl BlockTimestamp {
    /// Wraps a slot number.
    pub const fn from_slot(slot: u32) -> Self {
        Self(slot)
    }

    /// The slot number.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// The calendar time at the start of the slot.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        from_unix_millis(i64::from(self.0) * BLOCK_INTERVAL_MS + BLOCK_TIMESTAMP_EPOCH_MS)
    }
}

impl FromStr for BlockTimestamp {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = parse_utc("block_timestamp_type", s)?;
        let ms = dt.timestamp_millis();
        let since_epoch = ms
            .checked_sub(BLOCK_TIMESTAMP_EPOCH_MS)
            .filter(|v| *v >= 0)
            .ok_or_else(|| AbiError::overflow("block_timestamp_type", s))?;
        u32::try_from(since_epoch / BLOCK_INTERVAL_MS)
            .map(Self)
            .map_err(|_| AbiError::overflow("block_timestamp_type", s))
    }
}

impl fmt::Display for BlockTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format(MILLIS_FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}

macro_rules! serde_via_string {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

serde_via_string!(TimePoint, TimePointSec, BlockTimestamp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_point_sec_text() {
        let t: TimePointSec = "2021-08-31T05:59:39".parse().unwrap();
        assert_eq!(t.secs(), 1_630_389_579);
        assert_eq!(t.to_string(), "2021-08-31T05:59:39");
        let z: TimePointSec = "2021-08-31T05:59:39Z".parse().unwrap();
        assert_eq!(z, t);
        assert_eq!(TimePointSec::from_secs(0).to_string(), "1970-01-01T00:00:00");
    }

    #[test]
    fn test_time_point_micros() {
        let t: TimePoint = "2021-08-31T05:59:39.500".parse().unwrap();
        assert_eq!(t.micros(), 1_630_389_579_500_000);
        assert_eq!(t.to_string(), "2021-08-31T05:59:39.500");
        let whole: TimePoint = "1970-01-01T00:00:01".parse().unwrap();
        assert_eq!(whole.micros(), 1_000_000);
        assert_eq!(whole.to_string(), "1970-01-01T00:00:01.000");
    }

    #[test]
    fn test_block_timestamp_slots() {
        let t: BlockTimestamp = "2000-01-01T00:00:01.500".parse().unwrap();
        assert_eq!(t.slot(), 3);
        assert_eq!(t.to_string(), "2000-01-01T00:00:01.500");
        assert_eq!(BlockTimestamp::from_slot(0).to_string(), "2000-01-01T00:00:00.000");
        assert!("1999-12-31T23:59:59".parse::<BlockTimestamp>().is_err());
    }

    #[test]
    fn test_out_of_range_and_garbage() {
        let err = "1969-12-31T23:59:59".parse::<TimePointSec>().unwrap_err();
        assert!(matches!(err, AbiError::Overflow { .. }));
        let err = "yesterday".parse::<TimePointSec>().unwrap_err();
        assert!(matches!(err, AbiError::MalformedValue { .. }));
    }
}
