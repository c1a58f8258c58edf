//! Timestamp generation for the Date header.

use chrono::{FixedOffset, Offset, Utc};

/// Source of the formatted timestamp stamped onto an email.
pub trait Clock {
    /// Current time formatted as `dd/mm/yyyy HH:MM:SS +zzzz`.
    fn timestamp(&self) -> String;
}

/// Wall clock rendering into a caller-chosen UTC offset.
///
/// The offset is deliberately a parameter: hardcoding one produces timestamps
/// that are wrong everywhere but a single timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Creates a clock rendering into the given offset.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Creates a clock rendering into UTC (`+0000`).
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Utc::now()
            .with_timezone(&self.offset)
            .format("%d/%m/%Y %H:%M:%S %z")
            .to_string()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_format_shape() {
        let stamp = SystemClock::utc().timestamp();
        // dd/mm/yyyy HH:MM:SS +zzzz
        assert!(DateTime::parse_from_str(&stamp, "%d/%m/%Y %H:%M:%S %z").is_ok());
        assert!(stamp.ends_with("+0000"));
    }

    #[test]
    fn test_configured_offset_is_rendered() {
        let offset = FixedOffset::east_opt(11 * 3600).unwrap();
        let stamp = SystemClock::new(offset).timestamp();
        assert!(stamp.ends_with("+1100"));
    }
}
