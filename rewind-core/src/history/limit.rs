//! Retention limit for a history.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How many snapshots a history keeps.
///
/// Counts below 1 are not errors: every conversion from a number coerces
/// them to [`HistoryLimit::Unbounded`].
///
/// Serialized as the string `"none"` or as a positive number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr", into = "LimitRepr")]
pub enum HistoryLimit {
    /// Keep every snapshot.
    #[default]
    Unbounded,
    /// Keep at most this many snapshots, evicting the oldest first.
    Bounded(NonZeroUsize),
}

impl HistoryLimit {
    /// Build a limit from a signed count; anything below 1 means unbounded.
    pub fn from_count(count: i64) -> Self {
        usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::Unbounded, Self::Bounded)
    }

    /// The bound, if any.
    pub fn get(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(n) => Some(n.get()),
        }
    }

    /// Whether `len` snapshots fit under this limit.
    pub fn admits(self, len: usize) -> bool {
        self.get().map_or(true, |max| len <= max)
    }
}

impl From<usize> for HistoryLimit {
    fn from(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Self::Unbounded, Self::Bounded)
    }
}

impl From<i64> for HistoryLimit {
    fn from(count: i64) -> Self {
        Self::from_count(count)
    }
}

impl From<i32> for HistoryLimit {
    fn from(count: i32) -> Self {
        Self::from_count(i64::from(count))
    }
}

impl From<NonZeroUsize> for HistoryLimit {
    fn from(count: NonZeroUsize) -> Self {
        Self::Bounded(count)
    }
}

impl From<Option<NonZeroUsize>> for HistoryLimit {
    fn from(count: Option<NonZeroUsize>) -> Self {
        count.map_or(Self::Unbounded, Self::Bounded)
    }
}

impl FromStr for HistoryLimit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("unbounded") {
            return Ok(Self::Unbounded);
        }
        trimmed
            .parse::<i64>()
            .map(Self::from_count)
            .map_err(|_| Error::InvalidLimit {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("none"),
            Self::Bounded(n) => write!(f, "{n}"),
        }
    }
}

/// Wire form: a number, or a keyword string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(i64),
    Keyword(String),
}

impl TryFrom<LimitRepr> for HistoryLimit {
    type Error = Error;

    fn try_from(repr: LimitRepr) -> Result<Self, Self::Error> {
        match repr {
            LimitRepr::Count(count) => Ok(Self::from_count(count)),
            LimitRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl From<HistoryLimit> for LimitRepr {
    fn from(limit: HistoryLimit) -> Self {
        match limit {
            HistoryLimit::Unbounded => Self::Keyword("none".to_string()),
            HistoryLimit::Bounded(n) => Self::Count(n.get() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(n: usize) -> HistoryLimit {
        HistoryLimit::Bounded(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn non_positive_counts_are_unbounded() {
        assert_eq!(HistoryLimit::from(0usize), HistoryLimit::Unbounded);
        assert_eq!(HistoryLimit::from(0i64), HistoryLimit::Unbounded);
        assert_eq!(HistoryLimit::from(-3i32), HistoryLimit::Unbounded);
        assert_eq!(HistoryLimit::from(2i32), bounded(2));
    }

    #[test]
    fn admits_respects_bound() {
        assert!(HistoryLimit::Unbounded.admits(usize::MAX));
        assert!(bounded(2).admits(2));
        assert!(!bounded(2).admits(3));
    }

    #[test]
    fn parses_keywords_and_numbers() {
        assert_eq!("none".parse::<HistoryLimit>().unwrap(), HistoryLimit::Unbounded);
        assert_eq!(" Unbounded ".parse::<HistoryLimit>().unwrap(), HistoryLimit::Unbounded);
        assert_eq!("5".parse::<HistoryLimit>().unwrap(), bounded(5));
        assert_eq!("-1".parse::<HistoryLimit>().unwrap(), HistoryLimit::Unbounded);
    }

    #[test]
    fn rejects_garbage() {
        let err = "lots".parse::<HistoryLimit>().unwrap_err();
        assert!(matches!(err, Error::InvalidLimit { ref input } if input == "lots"));
    }

    #[test]
    fn serde_uses_keyword_or_number() {
        assert_eq!(serde_json::to_string(&HistoryLimit::Unbounded).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&bounded(3)).unwrap(), "3");

        let limit: HistoryLimit = serde_json::from_str("0").unwrap();
        assert_eq!(limit, HistoryLimit::Unbounded);
        let limit: HistoryLimit = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(limit, bounded(7));
        assert!(serde_json::from_str::<HistoryLimit>("\"many\"").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for limit in [HistoryLimit::Unbounded, bounded(1), bounded(40)] {
            assert_eq!(limit.to_string().parse::<HistoryLimit>().unwrap(), limit);
        }
    }
}
