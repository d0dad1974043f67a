//! Calendar-day shards

use chrono::NaiveDate;
use std::fmt;

use crate::error::MurexError;
use crate::Result;

const SHARD_FORMAT: &str = "%Y-%m-%d";

/// One calendar day of the index, identified by its `YYYY-MM-DD` string
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shard(NaiveDate);

impl Shard {
    pub fn new(day: NaiveDate) -> Self {
        Self(day)
    }

    pub fn parse(input: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input, SHARD_FORMAT)
            .map(Shard)
            .map_err(|_| MurexError::InvalidDate(input.to_string()))
    }

    pub fn day(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SHARD_FORMAT))
    }
}

/// Expand an inclusive `[from, to]` range into one shard per day,
/// oldest first.
pub fn day_range(from: Shard, to: Shard) -> Result<Vec<Shard>> {
    if to.0 < from.0 {
        return Err(MurexError::InvalidDate(format!(
            "range end {to} precedes start {from}"
        )));
    }
    let mut days = Vec::new();
    let mut day = from.0;
    while day <= to.0 {
        days.push(Shard(day));
        day = day
            .succ_opt()
            .ok_or_else(|| MurexError::InvalidDate(format!("range end {to} out of bounds")))?;
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let shard = Shard::parse("2021-07-09").unwrap();
        assert_eq!(shard.to_string(), "2021-07-09");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Shard::parse("2021-13-40").is_err());
        assert!(Shard::parse("yesterday").is_err());
        assert!(Shard::parse("20210709").is_err());
    }

    #[test]
    fn test_day_range_inclusive() {
        let from = Shard::parse("2021-01-30").unwrap();
        let to = Shard::parse("2021-02-02").unwrap();
        let days = day_range(from, to).unwrap();
        let rendered: Vec<String> = days.iter().map(Shard::to_string).collect();
        assert_eq!(
            rendered,
            vec!["2021-01-30", "2021-01-31", "2021-02-01", "2021-02-02"]
        );
    }

    #[test]
    fn test_day_range_single_day() {
        let day = Shard::parse("2021-01-01").unwrap();
        assert_eq!(day_range(day, day).unwrap(), vec![day]);
    }

    #[test]
    fn test_day_range_reversed_is_error() {
        let from = Shard::parse("2021-01-02").unwrap();
        let to = Shard::parse("2021-01-01").unwrap();
        assert!(day_range(from, to).is_err());
    }
}
