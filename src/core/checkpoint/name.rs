//! Checkpoint filename grammar
//!
//! `<timestamp>_<min_id>_<max_id>_<suffix>`, for example
//! `2026-10-16T08-15-02.123456Z_101_150_items.jsonl`.
//!
//! The timestamp is UTC, fixed width and path safe, so sorting names as plain
//! strings sorts checkpoints by creation time. Because every run starts from
//! the previous checkpoint's `max_id`, that is also ascending id order.

use crate::domain::ItemId;
use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;

/// chrono format of the leading timestamp token
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6fZ";

const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.fZ";

/// Parsed checkpoint filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointName {
    timestamp: DateTime<Utc>,
    min_id: ItemId,
    max_id: ItemId,
    suffix: String,
}

impl CheckpointName {
    /// Builds a name for a checkpoint covering `min_id..=max_id`
    ///
    /// The timestamp is truncated to microseconds, the precision the filename
    /// carries.
    pub fn new(
        timestamp: DateTime<Utc>,
        min_id: ItemId,
        max_id: ItemId,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(6),
            min_id,
            max_id,
            suffix: suffix.into(),
        }
    }

    /// Parses a filename, returning `None` if it is not a checkpoint written
    /// with `suffix`
    ///
    /// # Examples
    ///
    /// ```
    /// use itemsync::core::checkpoint::CheckpointName;
    /// use itemsync::domain::ItemId;
    ///
    /// let name = CheckpointName::parse(
    ///     "2026-10-16T08-15-02.123456Z_101_150_items.jsonl",
    ///     "items.jsonl",
    /// )
    /// .unwrap();
    /// assert_eq!(name.max_id(), ItemId::new(150));
    ///
    /// assert!(CheckpointName::parse("notes.txt", "items.jsonl").is_none());
    /// ```
    pub fn parse(file_name: &str, suffix: &str) -> Option<Self> {
        let mut tokens = file_name.splitn(4, '_');
        let timestamp_token = tokens.next()?;
        let min_token = tokens.next()?;
        let max_token = tokens.next()?;
        let suffix_token = tokens.next()?;

        if suffix_token != suffix {
            return None;
        }

        let naive = NaiveDateTime::parse_from_str(timestamp_token, TIMESTAMP_PARSE_FORMAT).ok()?;
        let timestamp = Utc.from_utc_datetime(&naive);

        // Non-canonical timestamps would break lexicographic ordering
        if timestamp.format(TIMESTAMP_FORMAT).to_string() != timestamp_token {
            return None;
        }

        let min_id = parse_id_token(min_token)?;
        let max_id = parse_id_token(max_token)?;
        if min_id.value() == 0 || min_id > max_id {
            return None;
        }

        Some(Self {
            timestamp,
            min_id,
            max_id,
            suffix: suffix.to_string(),
        })
    }

    /// Creation timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// First item id in the checkpoint
    pub fn min_id(&self) -> ItemId {
        self.min_id
    }

    /// Last item id in the checkpoint
    pub fn max_id(&self) -> ItemId {
        self.max_id
    }

    /// Number of records the checkpoint declares
    pub fn record_count(&self) -> u64 {
        self.max_id.value() - self.min_id.value() + 1
    }

    /// Rendered filename
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.min_id,
            self.max_id,
            self.suffix
        )
    }
}

/// Decimal digits only; rejects signs, whitespace and leading `+`
fn parse_id_token(token: &str) -> Option<ItemId> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u64>().ok().map(ItemId::new)
}

impl fmt::Display for CheckpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

impl PartialOrd for CheckpointName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by rendered filename, the same order a directory listing sorts in
impl Ord for CheckpointName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file_name().cmp(&other.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SUFFIX: &str = "items.jsonl";

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_file_name_format() {
        let name = CheckpointName::new(
            at("2026-10-16T08:15:02.123456789Z"),
            ItemId::new(101),
            ItemId::new(150),
            SUFFIX,
        );
        assert_eq!(
            name.file_name(),
            "2026-10-16T08-15-02.123456Z_101_150_items.jsonl"
        );
        assert_eq!(name.record_count(), 50);
    }

    #[test]
    fn test_parse_inverts_file_name() {
        let name = CheckpointName::new(
            at("2026-01-02T03:04:05.000007Z"),
            ItemId::new(1),
            ItemId::new(100),
            SUFFIX,
        );
        let parsed = CheckpointName::parse(&name.file_name(), SUFFIX).unwrap();
        assert_eq!(parsed, name);
    }

    #[test_case("2026-10-16T08-15-02.123456Z_101_150_other.jsonl" ; "wrong suffix")]
    #[test_case("2026-10-16T08-15-02.123456Z_101_items.jsonl" ; "missing token")]
    #[test_case("2026-10-16T08-15-02Z_101_150_items.jsonl" ; "no fraction")]
    #[test_case("2026-10-16T08:15:02.123456Z_101_150_items.jsonl" ; "colons")]
    #[test_case("2026-10-16T08-15-02.123456Z_150_101_items.jsonl" ; "inverted range")]
    #[test_case("2026-10-16T08-15-02.123456Z_0_10_items.jsonl" ; "zero min")]
    #[test_case("2026-10-16T08-15-02.123456Z_+1_10_items.jsonl" ; "signed id")]
    #[test_case(".3f2c9a.tmp" ; "temp file")]
    fn test_parse_rejects(file_name: &str) {
        assert!(CheckpointName::parse(file_name, SUFFIX).is_none());
    }

    #[test]
    fn test_lexicographic_order_is_chronological() {
        let early = CheckpointName::new(
            at("2026-09-30T23:59:59.999999Z"),
            ItemId::new(1),
            ItemId::new(100),
            SUFFIX,
        );
        let late = CheckpointName::new(
            at("2026-10-01T00:00:00.000000Z"),
            ItemId::new(101),
            ItemId::new(150),
            SUFFIX,
        );
        assert!(early.file_name() < late.file_name());
        assert!(early < late);
    }
}
