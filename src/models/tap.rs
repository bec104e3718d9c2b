use super::identifier::Identifier;
use chrono::{DateTime, FixedOffset, SecondsFormat, SubsecRound, Utc};

/// One card read: when it happened and which card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tap {
    pub timestamp: DateTime<FixedOffset>,
    pub identifier: Identifier,
}

impl Tap {
    /// Builds a tap from a clock reading.
    ///
    /// The instant is truncated to microseconds, the precision the event log
    /// keeps, so a replay of the log sees exactly the instant used live.
    pub fn new(now: DateTime<Utc>, identifier: Identifier) -> Self {
        Self {
            timestamp: now.trunc_subsecs(6).fixed_offset(),
            identifier,
        }
    }

    /// Timestamp as written to the event log (RFC 3339, `+00:00` style offset).
    pub fn timestamp_str(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    /// Name of the day-file this tap belongs to (`YYYYMMDD.log`, UTC date).
    pub fn log_file_name(&self) -> String {
        format!("{}.log", self.timestamp.with_timezone(&Utc).format("%Y%m%d"))
    }
}
