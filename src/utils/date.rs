//! UTC date utilities without timezone dependencies.
//!
//! Lightweight date handling for last-updated stamps. Converts filesystem
//! mtimes to calendar dates with no external crates.

use std::time::SystemTime;

/// A UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateUtc {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl DateUtc {
    /// Date of a unix timestamp (seconds since epoch).
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    /// Date of a `SystemTime`, if it is representable.
    pub fn from_system_time(time: SystemTime) -> Option<Self> {
        let secs = match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).ok()?,
            Err(e) => -i64::try_from(e.duration().as_secs()).ok()?,
        };
        Some(Self::from_unix(secs))
    }

    /// Format as "YYYY-MM-DD".
    pub fn to_iso_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Days-since-epoch to civil date (Howard Hinnant's algorithm).
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };

    (y as i32, m as u8, d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let date = DateUtc::from_unix(0);
        assert_eq!(date.to_iso_date(), "1970-01-01");
    }

    #[test]
    fn test_known_dates() {
        // 2024-06-15T14:30:45Z
        assert_eq!(DateUtc::from_unix(1_718_461_845).to_iso_date(), "2024-06-15");
        // 2000-02-29 (leap day)
        assert_eq!(DateUtc::from_unix(951_782_400).to_iso_date(), "2000-02-29");
    }

    #[test]
    fn test_pre_epoch() {
        assert_eq!(DateUtc::from_unix(-86_400).to_iso_date(), "1969-12-31");
    }
}
