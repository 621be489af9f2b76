use std::fmt;

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use crate::dates;

/// The date a document refers to, as received.
///
/// The raw text is kept so that a record with an unparseable date still
/// round-trips and stays visible. Ordering and range checks go through
/// [`DocumentDate::sort_key`] and [`DocumentDate::to_datetime`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentDate(String);

impl DocumentDate {
    /// Wraps a raw date string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the date; date-only values resolve to local midnight.
    pub fn to_datetime(&self) -> Option<DateTime> {
        dates::parse_document_date(&self.0)
    }

    /// Returns the calendar date, if parseable.
    pub fn to_date(&self) -> Option<Date> {
        self.to_datetime().map(|datetime| datetime.date())
    }

    /// Returns the value used for ordering.
    ///
    /// Unparseable dates sort as [`dates::FALLBACK_DATETIME`].
    pub fn sort_key(&self) -> DateTime {
        self.to_datetime().unwrap_or(dates::FALLBACK_DATETIME)
    }
}

impl From<Date> for DocumentDate {
    fn from(date: Date) -> Self {
        Self(dates::format_iso(date))
    }
}

impl From<&str> for DocumentDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DocumentDate {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DocumentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn civil_dates_format_as_iso() {
        assert_eq!(DocumentDate::from(date(2024, 3, 5)).as_str(), "2024-03-05");
    }

    #[test]
    fn unparseable_dates_sort_at_the_epoch() {
        let broken = DocumentDate::new("tanggal rusak");
        assert_eq!(broken.to_date(), None);
        assert_eq!(broken.sort_key(), dates::FALLBACK_DATETIME);
        assert_eq!(broken.sort_key(), broken.sort_key());
    }

    #[test]
    fn parses_indonesian_dates() {
        let date_id = DocumentDate::new("15 Maret 2024");
        assert_eq!(date_id.to_date(), Some(date(2024, 3, 15)));
    }
}
