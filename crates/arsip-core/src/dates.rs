//! Date parsing and formatting for document dates.
//!
//! Document dates arrive in several shapes depending on which service
//! produced them: plain `YYYY-MM-DD`, SQL-style `YYYY-MM-DD HH:MM:SS`, ISO
//! date-times with or without an offset, and the Indonesian long form used
//! in the UI (`5 Maret 2024`). Everything is normalised to civil (wall-clock)
//! values; instants with an offset are converted to the given time zone.

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Indonesian month names, January first.
pub const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Sort key used for dates that cannot be parsed.
pub const FALLBACK_DATETIME: DateTime = jiff::civil::datetime(1970, 1, 1, 0, 0, 0, 0);

/// Parses a document date in the system time zone.
pub fn parse_document_date(value: &str) -> Option<DateTime> {
    parse_document_date_in(value, &TimeZone::system())
}

/// Parses a document date, converting absolute instants into `tz`.
///
/// Date-only values resolve to midnight.
pub fn parse_document_date_in(value: &str, tz: &TimeZone) -> Option<DateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let normalized = value.replacen(' ', "T", 1);
    if let Ok(datetime) = normalized.parse::<DateTime>() {
        return Some(datetime);
    }

    if let Ok(timestamp) = normalized.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(tz.clone()).datetime());
    }

    if let Ok(date) = value.parse::<Date>() {
        return Some(date.at(0, 0, 0, 0));
    }

    parse_indonesian(value).map(|date| date.at(0, 0, 0, 0))
}

/// Parses the Indonesian long form, e.g. `5 Maret 2024`.
///
/// Month names are matched case-insensitively. Impossible dates such as
/// `31 Februari 2024` are rejected.
pub fn parse_indonesian(value: &str) -> Option<Date> {
    let mut parts = value.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = MONTHS_ID
        .iter()
        .position(|name| name.eq_ignore_ascii_case(month))?;

    let day: i8 = day.parse().ok()?;
    let year: i16 = year.parse().ok()?;
    Date::new(year, month as i8 + 1, day).ok()
}

/// Formats a date in the Indonesian long form without day padding.
pub fn format_indonesian(date: Date) -> String {
    let month = MONTHS_ID[(date.month() - 1) as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Converts `5 Maret 2024` into `2024-03-05`.
pub fn indonesian_to_iso(value: &str) -> Option<String> {
    parse_indonesian(value).map(format_iso)
}

/// Converts any parseable document date into the Indonesian long form.
pub fn iso_to_indonesian(value: &str) -> Option<String> {
    parse_document_date(value).map(|datetime| format_indonesian(datetime.date()))
}

/// Formats a date as `YYYY-MM-DD`.
#[inline]
pub fn format_iso(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// Returns today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Normalises a stored date for a date input, falling back to `today`.
pub fn to_date_input_value(value: Option<&str>, today: Date) -> Date {
    value
        .and_then(parse_document_date)
        .map_or(today, |datetime| datetime.date())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_plain_dates_at_midnight() {
        let parsed = parse_document_date_in("2024-03-05", &TimeZone::UTC).unwrap();
        assert_eq!(parsed, date(2024, 3, 5).at(0, 0, 0, 0));
    }

    #[test]
    fn parses_sql_and_iso_datetimes() {
        let sql = parse_document_date_in("2024-03-05 14:30:00", &TimeZone::UTC).unwrap();
        assert_eq!(sql, date(2024, 3, 5).at(14, 30, 0, 0));

        let iso = parse_document_date_in("2024-03-05T14:30:00.250", &TimeZone::UTC).unwrap();
        assert_eq!(iso, date(2024, 3, 5).at(14, 30, 0, 250_000_000));
    }

    #[test]
    fn converts_utc_instants_into_the_zone() {
        let jakarta = TimeZone::fixed(jiff::tz::offset(7));
        let parsed = parse_document_date_in("2024-03-04T17:00:00.000Z", &jakarta).unwrap();
        assert_eq!(parsed, date(2024, 3, 5).at(0, 0, 0, 0));
    }

    #[test]
    fn parses_indonesian_long_form() {
        assert_eq!(parse_indonesian("5 Maret 2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_indonesian("17 agustus 1945"), Some(date(1945, 8, 17)));
        assert_eq!(parse_indonesian("31 Februari 2024"), None);
        assert_eq!(parse_indonesian("5 March 2024"), None);
        assert_eq!(parse_indonesian("Maret 2024"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_document_date_in("", &TimeZone::UTC), None);
        assert_eq!(parse_document_date_in("kemarin", &TimeZone::UTC), None);
        assert_eq!(parse_document_date_in("2024-13-01", &TimeZone::UTC), None);
    }

    #[test]
    fn converts_between_iso_and_indonesian() {
        assert_eq!(indonesian_to_iso("5 Maret 2024").as_deref(), Some("2024-03-05"));
        assert_eq!(indonesian_to_iso("5 Mar 2024"), None);
        assert_eq!(iso_to_indonesian("2024-12-25").as_deref(), Some("25 Desember 2024"));
        assert_eq!(iso_to_indonesian("not a date"), None);
    }

    #[test]
    fn date_input_falls_back_to_today() {
        let today = date(2024, 6, 1);
        assert_eq!(to_date_input_value(None, today), today);
        assert_eq!(to_date_input_value(Some("???"), today), today);
        assert_eq!(
            to_date_input_value(Some("2024-03-05 08:00:00"), today),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn iso_format_is_zero_padded() {
        assert_eq!(format_iso(date(2024, 3, 5)), "2024-03-05");
    }
}
